//! The config file layer.
//!
//! A [`FileLayer`] holds an ordered list of candidate paths; the first one
//! that exists is read, parsed through the [`FormatRegistry`] selected by
//! its extension, and flattened into items. An `optional` layer whose
//! candidates are all absent resolves to an empty item list instead of an
//! error.

use camino::{Utf8Path, Utf8PathBuf};

use crate::format::FormatRegistry;
use crate::item::Item;
use crate::layers::LayerSource;
use crate::provenance::Provenance;
use crate::source::{FileSource, Source, SourceError};
use crate::tree::Tree;

/// A layer that reads one config file from a list of candidate paths.
pub struct FileLayer {
    paths: Vec<Utf8PathBuf>,
    optional: bool,
    registry: FormatRegistry,
}

impl Default for FileLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLayer {
    /// Create an empty file layer with the default format registry.
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            optional: false,
            registry: FormatRegistry::with_defaults(),
        }
    }

    /// Add a candidate path. Candidates are checked in insertion order; the
    /// first existing file is used.
    pub fn path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Mark the layer optional: if no candidate exists, the layer resolves
    /// to no items instead of failing.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Replace the format registry.
    pub fn registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register an additional config file format.
    pub fn format<F: crate::format::ConfigFormat + 'static>(mut self, format: F) -> Self {
        self.registry.register(format);
        self
    }

    /// The candidate paths, in order.
    pub fn paths(&self) -> &[Utf8PathBuf] {
        &self.paths
    }

    /// Whether the layer tolerates all candidates being absent.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Pick the first existing candidate, logging the ones skipped.
    fn pick_path(&self) -> Option<&Utf8Path> {
        for candidate in &self.paths {
            if candidate.exists() {
                return Some(candidate);
            }
            tracing::debug!(path = %candidate, "config file candidate absent");
        }
        None
    }
}

impl LayerSource for FileLayer {
    fn items(&self) -> Result<Vec<Item>, SourceError> {
        let Some(path) = self.pick_path() else {
            if self.optional || self.paths.is_empty() {
                return Ok(Vec::new());
            }
            // Report the preferred candidate; the others were fallbacks.
            return Err(SourceError::Unavailable {
                path: self.paths[0].clone(),
                reason: "no such file".to_string(),
            });
        };

        let extension = path.extension().unwrap_or("").to_string();
        let items = FileSource::new(path.to_path_buf(), false)
            .try_map(|contents| {
                let text = contents.unwrap_or_default();
                let tree = self
                    .registry
                    .parse(&text, &extension)
                    .map_err(|e| SourceError::Transform {
                        message: format!("{path}: {e}"),
                    })?;
                // A bare scalar at the root has no key to address it by.
                match tree {
                    Tree::Scalar(_) => Err(SourceError::Transform {
                        message: format!(
                            "{path}: document root must be a table or array, not a scalar"
                        ),
                    }),
                    tree => Ok(tree),
                }
            })
            .map(|tree: Tree| tree.flatten())
            .fetch()?;

        Ok(items
            .into_iter()
            .map(|item| {
                let key_path = item.path.to_string();
                item.with_provenance(Provenance::file(path.to_path_buf(), key_path))
            })
            .collect())
    }
}
