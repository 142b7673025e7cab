//! Generic parsed configuration trees.
//!
//! File formats parse into a [`Tree`] before flattening, so the rest of the
//! crate never sees format-specific value types. The variants are matched
//! exhaustively everywhere; there is no dynamic downcasting anywhere in the
//! pipeline.

use indexmap::IndexMap;

use crate::item::Item;
use crate::path::KeyPath;

/// A parsed configuration document: nested mappings and sequences with
/// string-rendered scalars at the leaves.
///
/// Mapping entries preserve source order, which makes
/// [`flatten`](Tree::flatten) order-stable: flattening the same tree twice
/// yields identical item lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// A leaf scalar, already rendered to its raw string form.
    Scalar(String),
    /// An ordered sequence of subtrees.
    Sequence(Vec<Tree>),
    /// An ordered mapping of keys to subtrees.
    Mapping(IndexMap<String, Tree>),
}

impl Tree {
    /// An empty mapping, the zero value for an absent document.
    pub fn empty() -> Self {
        Tree::Mapping(IndexMap::new())
    }

    /// Flatten the tree into one [`Item`] per leaf scalar.
    ///
    /// The item path is the sequence of mapping keys and sequence indices
    /// from the root to the leaf; `{"db": {"hosts": ["a", "b"]}}` yields
    /// `db.hosts.0 = a` and `db.hosts.1 = b`.
    pub fn flatten(&self) -> Vec<Item> {
        let mut items = Vec::new();
        let mut segments = Vec::new();
        self.flatten_into(&mut segments, &mut items);
        items
    }

    fn flatten_into(&self, segments: &mut Vec<String>, items: &mut Vec<Item>) {
        match self {
            Tree::Scalar(value) => {
                items.push(Item::new(
                    KeyPath::from_segments(segments.iter().cloned()),
                    value.clone(),
                ));
            }
            Tree::Sequence(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    segments.push(index.to_string());
                    element.flatten_into(segments, items);
                    segments.pop();
                }
            }
            Tree::Mapping(entries) => {
                for (key, value) in entries {
                    segments.push(key.clone());
                    value.flatten_into(segments, items);
                    segments.pop();
                }
            }
        }
    }
}

impl From<toml::Value> for Tree {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Tree::Scalar(s),
            toml::Value::Integer(i) => Tree::Scalar(i.to_string()),
            toml::Value::Float(x) => Tree::Scalar(x.to_string()),
            toml::Value::Boolean(b) => Tree::Scalar(b.to_string()),
            toml::Value::Datetime(dt) => Tree::Scalar(dt.to_string()),
            toml::Value::Array(elements) => {
                Tree::Sequence(elements.into_iter().map(Tree::from).collect())
            }
            toml::Value::Table(table) => Tree::Mapping(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Tree::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Tree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            // JSON null has no natural raw-string form; render it literally.
            serde_json::Value::Null => Tree::Scalar("null".to_string()),
            serde_json::Value::Bool(b) => Tree::Scalar(b.to_string()),
            serde_json::Value::Number(n) => Tree::Scalar(n.to_string()),
            serde_json::Value::String(s) => Tree::Scalar(s),
            serde_json::Value::Array(elements) => {
                Tree::Sequence(elements.into_iter().map(Tree::from).collect())
            }
            serde_json::Value::Object(entries) => Tree::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Tree::from(value)))
                    .collect(),
            ),
        }
    }
}
