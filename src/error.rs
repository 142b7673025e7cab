//! Error types for configuration loading and reading.

use camino::Utf8PathBuf;

use crate::merge::Conflict;
use crate::path::KeyPath;

/// The error type for building and reading a [`Config`](crate::Config).
///
/// Build-time failures (`SourceUnavailable`, `Parse`, `Conflict`) are fatal
/// for that build: nothing is retried, and the caller must fix the input and
/// build a new `Config`. Read-time failures (`InvalidValue`, `Missing`) are
/// local to the calling site and recoverable, e.g. by falling back to a
/// default.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required file was missing or unreadable.
    SourceUnavailable {
        /// Name of the layer that failed.
        layer: String,
        /// The path that could not be read.
        path: Utf8PathBuf,
        /// Why the read failed.
        reason: String,
    },

    /// A source produced malformed content.
    Parse {
        /// Name of the layer that failed.
        layer: String,
        /// The underlying parser message, surfaced verbatim.
        message: String,
    },

    /// Two layers supplied different values for the same path.
    ///
    /// Only raised under [`ConflictPolicy::ErrorOnConflict`](crate::ConflictPolicy).
    Conflict(Conflict),

    /// A raw value could not be converted to the requested type.
    InvalidValue {
        /// The path that was read.
        path: KeyPath,
        /// The raw string value that failed to convert.
        raw: String,
        /// Name of the requested target type.
        target: &'static str,
    },

    /// A typed read addressed a path with no value.
    Missing {
        /// The path that was read.
        path: KeyPath,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::SourceUnavailable {
                layer,
                path,
                reason,
            } => {
                write!(f, "layer `{layer}`: cannot read {path}: {reason}")
            }
            ConfigError::Parse { layer, message } => {
                write!(f, "layer `{layer}`: {message}")
            }
            ConfigError::Conflict(conflict) => write!(f, "{conflict}"),
            ConfigError::InvalidValue { path, raw, target } => {
                write!(f, "invalid value for `{path}`: cannot parse `{raw}` as {target}")
            }
            ConfigError::Missing { path } => write!(f, "no value for `{path}`"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<Conflict> for ConfigError {
    fn from(conflict: Conflict) -> Self {
        ConfigError::Conflict(conflict)
    }
}
