//! The environment variable layer.
//!
//! # Naming convention
//!
//! Given a prefix `APP_` and a delimiter `__`, a variable
//!
//! ```text
//! APP_DB__HOST=localhost
//! ```
//!
//! maps to path `db.host` with value `localhost` (values are never
//! transformed). The prefix is matched and stripped literally; the
//! remainder splits on the delimiter into path segments, lower-cased when
//! case folding is on (the default). Variables without the prefix are
//! ignored; names that strip to nothing or contain empty segments are
//! skipped with a warning.

use crate::item::Item;
use crate::layers::LayerSource;
use crate::path::KeyPath;
use crate::provenance::Provenance;
use crate::source::{EnvProvider, EnvSnapshot, SnapshotSource, Source, SourceError, StdEnv};

/// A layer that maps prefixed environment variables to items.
///
/// The environment is snapshotted freshly on every
/// [`items`](LayerSource::items) call, never cached.
pub struct EnvLayer {
    prefix: String,
    delimiter: String,
    fold_case: bool,
    provider: Box<dyn EnvProvider>,
}

impl Default for EnvLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLayer {
    /// Create an env layer with no prefix, `__` delimiter, case folding on,
    /// reading the real process environment.
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            delimiter: "__".to_string(),
            fold_case: true,
            provider: Box::new(StdEnv),
        }
    }

    /// Set the variable prefix to match and strip, e.g. `APP_`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the delimiter that splits the stripped name into path segments.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Control case folding. When on (the default), prefix matching is
    /// case-insensitive and path segments are lower-cased; when off, both
    /// are exact.
    pub fn fold_case(mut self, fold: bool) -> Self {
        self.fold_case = fold;
        self
    }

    /// Use a custom environment provider (for testing).
    pub fn provider(mut self, provider: impl EnvProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    /// Strip the configured prefix from a variable name, honoring case
    /// folding. Returns the remainder, or `None` if the prefix does not
    /// match.
    fn strip_prefix<'n>(&self, name: &'n str) -> Option<&'n str> {
        if self.fold_case {
            let head = name.get(..self.prefix.len())?;
            head.eq_ignore_ascii_case(&self.prefix)
                .then(|| &name[self.prefix.len()..])
        } else {
            name.strip_prefix(self.prefix.as_str())
        }
    }

    fn items_from(&self, snapshot: &EnvSnapshot) -> Vec<Item> {
        let mut items = Vec::new();

        for (name, value) in snapshot.vars() {
            let Some(rest) = self.strip_prefix(name) else {
                continue;
            };
            if rest.is_empty() {
                tracing::warn!(var = name, "skipping variable: empty after prefix");
                continue;
            }

            let segments: Vec<&str> = rest.split(self.delimiter.as_str()).collect();
            if segments.iter().any(|s| s.is_empty()) {
                tracing::warn!(var = name, "skipping variable: empty path segment");
                continue;
            }

            let path = if self.fold_case {
                KeyPath::from_segments(segments.iter().map(|s| s.to_lowercase()))
            } else {
                KeyPath::from_segments(segments)
            };

            items.push(Item::new(path, value).with_provenance(Provenance::env(name, value)));
        }

        items
    }
}

impl LayerSource for EnvLayer {
    fn items(&self) -> Result<Vec<Item>, SourceError> {
        SnapshotSource::new(self.provider.as_ref())
            .map(|snapshot| self.items_from(&snapshot))
            .fetch()
    }
}
