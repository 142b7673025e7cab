//! The resolved configuration façade.

use core::any;
use core::str::FromStr;

use indexmap::IndexMap;

use crate::builder::{ConfigBuilder, builder};
use crate::error::ConfigError;
use crate::merge::{Entry, Merged, Override};
use crate::path::KeyPath;
use crate::provenance::Provenance;

/// The final resolved configuration: an immutable `path -> value` snapshot.
///
/// Built once from an ordered list of layers via [`Config::builder`]; there
/// are no mutation methods, and re-reading the underlying sources means
/// building a new `Config`. Reading concurrently from multiple threads is
/// fine.
#[derive(Debug)]
pub struct Config {
    entries: IndexMap<KeyPath, Entry>,
    overrides: Vec<Override>,
}

impl Config {
    /// Start building a configuration from layers.
    pub fn builder() -> ConfigBuilder {
        builder()
    }

    pub(crate) fn from_merged(merged: Merged) -> Self {
        Self {
            entries: merged.entries,
            overrides: merged.overrides,
        }
    }

    /// Look up the raw value at a path.
    ///
    /// Accepts a dotted string (`"db.host"`) or anything else convertible
    /// to a [`KeyPath`]. Exact full-path lookup only.
    pub fn get<P: Into<KeyPath>>(&self, path: P) -> Option<&str> {
        self.entries.get(&path.into()).map(|e| e.value.as_str())
    }

    /// Look up a value and convert it with [`FromStr`].
    ///
    /// Fails with [`ConfigError::Missing`] when the path has no value and
    /// [`ConfigError::InvalidValue`] when conversion rejects the raw
    /// string; both are local to this call and recoverable (e.g. by
    /// falling back to a default).
    pub fn get_typed<T: FromStr, P: Into<KeyPath>>(&self, path: P) -> Result<T, ConfigError> {
        let path = path.into();
        let entry = self
            .entries
            .get(&path)
            .ok_or_else(|| ConfigError::Missing { path: path.clone() })?;
        entry.value.parse().map_err(|_| ConfigError::InvalidValue {
            path,
            raw: entry.value.clone(),
            target: any::type_name::<T>(),
        })
    }

    /// The name of the layer that supplied the value at a path.
    pub fn origin<P: Into<KeyPath>>(&self, path: P) -> Option<&str> {
        self.entries.get(&path.into()).map(|e| e.layer.as_str())
    }

    /// The provenance of the value at a path, if its layer tracked one.
    pub fn provenance<P: Into<KeyPath>>(&self, path: P) -> Option<&Provenance> {
        self.entries
            .get(&path.into())
            .and_then(|e| e.provenance.as_ref())
    }

    /// The overrides recorded while merging, in merge order.
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Iterate over all resolved `(path, value)` pairs, in merge order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyPath, &str)> {
        self.entries.iter().map(|(path, e)| (path, e.value.as_str()))
    }

    /// Number of resolved values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no layer supplied any value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write a human-readable dump of every resolved value, its origin,
    /// and the recorded overrides.
    pub fn dump(&self, writer: &mut dyn std::io::Write) -> std::io::Result<()> {
        crate::dump::dump_config(self, writer)
    }

    pub(crate) fn entries(&self) -> &IndexMap<KeyPath, Entry> {
        &self.entries
    }
}
