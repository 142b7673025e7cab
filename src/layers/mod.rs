//! Configuration layers: named, ordered inputs to the merge.

pub(crate) mod env;
pub(crate) mod file;

use crate::error::ConfigError;
use crate::item::Item;
use crate::source::SourceError;

/// An item producer backing a [`Layer`].
///
/// Built-in implementations are [`FileLayer`](crate::FileLayer) and
/// [`EnvLayer`](crate::EnvLayer); implement this to feed the merge from a
/// custom origin (a database, a remote store, ...).
pub trait LayerSource {
    /// Drain the pipeline and return all items this layer provides.
    ///
    /// Sources are finite and restartable: calling this again re-reads the
    /// underlying origin and produces a fresh list.
    fn items(&self) -> Result<Vec<Item>, SourceError>;
}

/// A named configuration input.
///
/// The name is purely diagnostic: it attributes errors, conflicts, and
/// overrides to the layer that produced them.
pub struct Layer {
    name: String,
    source: Box<dyn LayerSource>,
}

impl Layer {
    /// Bind a name to an item producer.
    pub fn new(name: impl Into<String>, source: impl LayerSource + 'static) -> Self {
        Self {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// The layer's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve the layer into its full item list.
    ///
    /// Failures carry the layer name: a missing required file surfaces as
    /// [`ConfigError::SourceUnavailable`], malformed content as
    /// [`ConfigError::Parse`].
    pub fn resolve(&self) -> Result<Vec<Item>, ConfigError> {
        let items = self.source.items().map_err(|e| match e {
            SourceError::Unavailable { path, reason } => ConfigError::SourceUnavailable {
                layer: self.name.clone(),
                path,
                reason,
            },
            SourceError::Transform { message } => ConfigError::Parse {
                layer: self.name.clone(),
                message,
            },
        })?;
        tracing::debug!(layer = %self.name, items = items.len(), "resolved layer");
        Ok(items)
    }
}

impl core::fmt::Debug for Layer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Layer").field("name", &self.name).finish()
    }
}
