//! Provenance tracking for resolved configuration values.
//!
//! Every merged value remembers which external origin produced it, enabling
//! override reporting and the [`Config::dump`](crate::Config::dump) output.

use core::fmt;

use camino::Utf8PathBuf;

/// The origin of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Value came from an environment variable.
    Env {
        /// The environment variable name, e.g. `APP_DB__HOST`.
        var: String,
        /// The raw value from the environment.
        value: String,
    },

    /// Value came from a config file.
    File {
        /// Path of the file the value was read from.
        path: Utf8PathBuf,
        /// The key path within the file, e.g. `db.host`.
        key_path: String,
    },
}

impl Provenance {
    /// Create an environment variable provenance.
    pub fn env(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Env {
            var: var.into(),
            value: value.into(),
        }
    }

    /// Create a file provenance.
    pub fn file(path: impl Into<Utf8PathBuf>, key_path: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            key_path: key_path.into(),
        }
    }

    /// Check if this provenance is from environment.
    pub fn is_env(&self) -> bool {
        matches!(self, Self::Env { .. })
    }

    /// Check if this provenance is from a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Get a human-readable description of the source.
    pub fn source_description(&self) -> String {
        match self {
            Self::Env { var, .. } => format!("env: {var}"),
            Self::File { path, key_path } => format!("{path}: {key_path}"),
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env { var, .. } => write!(f, "from environment variable {var}"),
            Self::File { path, key_path } => write!(f, "from {path}: {key_path}"),
        }
    }
}
