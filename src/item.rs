//! Resolved configuration entries.

use crate::path::KeyPath;
use crate::provenance::Provenance;

/// One resolved configuration entry: a path and its raw string value.
///
/// Values are carried untransformed; typed interpretation only happens at
/// read time through [`Config::get_typed`](crate::Config::get_typed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Where this entry lives in the configuration tree.
    pub path: KeyPath,
    /// The raw string value.
    pub value: String,
    /// Where the value came from, if the producing layer tracks it.
    pub provenance: Option<Provenance>,
}

impl Item {
    /// Create an item with no provenance.
    pub fn new(path: impl Into<KeyPath>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            provenance: None,
        }
    }

    /// Attach provenance to this item.
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }
}
