//! Builder API for layered configuration.

use camino::Utf8PathBuf;

use crate::config::Config;
use crate::error::ConfigError;
use crate::format::ConfigFormat;
use crate::layers::env::EnvLayer;
use crate::layers::file::FileLayer;
use crate::layers::Layer;
use crate::merge::{self, ConflictPolicy, ResolvedLayer};
use crate::source::EnvProvider;

/// Start building a layered [`Config`].
///
/// Layers are added lowest-precedence first; precedence is interpreted by
/// the configured [`ConflictPolicy`] (default: later layers win).
pub fn builder() -> ConfigBuilder {
    ConfigBuilder {
        layers: Vec::new(),
        policy: ConflictPolicy::default(),
    }
}

/// Builder for layered configuration. Created by [`builder`].
pub struct ConfigBuilder {
    layers: Vec<Layer>,
    policy: ConflictPolicy,
}

impl ConfigBuilder {
    /// Add a config file layer.
    pub fn file<F>(mut self, f: F) -> Self
    where
        F: FnOnce(FileLayerBuilder) -> FileLayerBuilder,
    {
        self.layers.push(f(FileLayerBuilder::new()).build());
        self
    }

    /// Add an environment variable layer.
    pub fn env<F>(mut self, f: F) -> Self
    where
        F: FnOnce(EnvLayerBuilder) -> EnvLayerBuilder,
    {
        self.layers.push(f(EnvLayerBuilder::new()).build());
        self
    }

    /// Add a pre-built layer (e.g. a custom [`LayerSource`](crate::LayerSource)).
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set the conflict policy.
    pub fn policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve every layer, in order, and fold them into a [`Config`].
    ///
    /// Fails on the first unresolvable layer, and, under
    /// [`ConflictPolicy::ErrorOnConflict`], on the first disagreement.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut resolved = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            resolved.push(ResolvedLayer {
                name: layer.name().to_string(),
                items: layer.resolve()?,
            });
        }

        let merged = merge::merge(resolved, self.policy)?;
        tracing::debug!(
            entries = merged.entries.len(),
            overrides = merged.overrides.len(),
            policy = ?self.policy,
            "merged layers"
        );
        Ok(Config::from_merged(merged))
    }
}

// ============================================================================
// File Layer Builder
// ============================================================================

/// Builder for a config file layer.
#[derive(Default)]
pub struct FileLayerBuilder {
    layer: FileLayer,
    name: Option<String>,
}

impl FileLayerBuilder {
    /// Create a new file layer builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate path; the first existing candidate is used.
    pub fn path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.layer = self.layer.path(path);
        self
    }

    /// Tolerate all candidates being absent (the layer resolves to no
    /// items instead of failing).
    pub fn optional(mut self) -> Self {
        self.layer = self.layer.optional();
        self
    }

    /// Register an additional config file format.
    pub fn format<F: ConfigFormat + 'static>(mut self, format: F) -> Self {
        self.layer = self.layer.format(format);
        self
    }

    /// Override the layer's diagnostic name.
    ///
    /// Defaults to the first candidate path, or `file` if none is set.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the layer.
    fn build(self) -> Layer {
        let name = self.name.unwrap_or_else(|| {
            self.layer
                .paths()
                .first()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "file".to_string())
        });
        Layer::new(name, self.layer)
    }
}

// ============================================================================
// Env Layer Builder
// ============================================================================

/// Builder for an environment variable layer.
#[derive(Default)]
pub struct EnvLayerBuilder {
    layer: EnvLayer,
    name: Option<String>,
}

impl EnvLayerBuilder {
    /// Create a new env layer builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variable prefix to match and strip, e.g. `APP_`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.layer = self.layer.prefix(prefix);
        self
    }

    /// Set the delimiter splitting names into path segments (default `__`).
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.layer = self.layer.delimiter(delimiter);
        self
    }

    /// Control case folding of prefix matching and path segments
    /// (default on).
    pub fn fold_case(mut self, fold: bool) -> Self {
        self.layer = self.layer.fold_case(fold);
        self
    }

    /// Use a custom environment provider (for testing).
    pub fn provider(mut self, provider: impl EnvProvider + 'static) -> Self {
        self.layer = self.layer.provider(provider);
        self
    }

    /// Override the layer's diagnostic name (default `env`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the layer.
    fn build(self) -> Layer {
        Layer::new(self.name.unwrap_or_else(|| "env".to_string()), self.layer)
    }
}
