//! Lazy, composable producers of raw configuration data.
//!
//! A [`Source`] wraps one external origin (a file, the process environment)
//! and is composed with pure transform steps via [`map`](Source::map) and
//! [`try_map`](Source::try_map). No step has side effects beyond the initial
//! `fetch` I/O, so the layers built on top stay deterministic and
//! restartable.

use camino::Utf8PathBuf;
use indexmap::IndexMap;

/// Error produced by a source pipeline, before layer attribution.
///
/// Layers convert this into a [`ConfigError`](crate::ConfigError) tagged
/// with their name.
#[derive(Debug)]
pub enum SourceError {
    /// The external origin could not be read at all.
    Unavailable {
        /// The path that could not be read.
        path: Utf8PathBuf,
        /// Why the read failed.
        reason: String,
    },
    /// A transform step rejected the fetched data (e.g. a parse failure).
    Transform {
        /// The underlying message.
        message: String,
    },
}

impl core::fmt::Display for SourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SourceError::Unavailable { path, reason } => {
                write!(f, "cannot read {path}: {reason}")
            }
            SourceError::Transform { message } => write!(f, "{message}"),
        }
    }
}

impl core::error::Error for SourceError {}

/// A lazy producer of one value of raw configuration data.
///
/// `fetch` performs the actual I/O; calling it again re-reads the origin.
pub trait Source {
    /// The type of data this source produces.
    type Value;

    /// Produce the value, performing whatever I/O the origin requires.
    fn fetch(&self) -> Result<Self::Value, SourceError>;

    /// Chain a pure transform step onto this source.
    fn map<F, U>(self, step: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> U,
    {
        Map { source: self, step }
    }

    /// Chain a fallible transform step onto this source.
    fn try_map<F, U>(self, step: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> Result<U, SourceError>,
    {
        TryMap { source: self, step }
    }
}

/// A source with a pure transform step applied. See [`Source::map`].
pub struct Map<S, F> {
    source: S,
    step: F,
}

impl<S, F, U> Source for Map<S, F>
where
    S: Source,
    F: Fn(S::Value) -> U,
{
    type Value = U;

    fn fetch(&self) -> Result<U, SourceError> {
        Ok((self.step)(self.source.fetch()?))
    }
}

/// A source with a fallible transform step applied. See [`Source::try_map`].
pub struct TryMap<S, F> {
    source: S,
    step: F,
}

impl<S, F, U> Source for TryMap<S, F>
where
    S: Source,
    F: Fn(S::Value) -> Result<U, SourceError>,
{
    type Value = U;

    fn fetch(&self) -> Result<U, SourceError> {
        (self.step)(self.source.fetch()?)
    }
}

// ============================================================================
// File source
// ============================================================================

/// A source that reads the full contents of one file.
///
/// `fetch` yields `Some(contents)`, or `None` when the file is absent and
/// the source is marked optional. A missing non-optional file is
/// [`SourceError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Utf8PathBuf,
    optional: bool,
}

impl FileSource {
    /// Create a source for the given path.
    pub fn new(path: impl Into<Utf8PathBuf>, optional: bool) -> Self {
        Self {
            path: path.into(),
            optional,
        }
    }

    /// The path this source reads.
    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }
}

impl Source for FileSource {
    type Value = Option<String>;

    fn fetch(&self) -> Result<Option<String>, SourceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && self.optional => {
                tracing::debug!(path = %self.path, "optional file absent");
                Ok(None)
            }
            Err(e) => Err(SourceError::Unavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
        }
    }
}

// ============================================================================
// Environment sources
// ============================================================================

/// Trait for abstracting over environment variable access.
///
/// This allows testing without modifying the actual environment.
pub trait EnvProvider {
    /// Get the value of an environment variable by name.
    fn get(&self, name: &str) -> Option<String>;

    /// Iterate over all environment variables.
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_>;
}

impl<P: EnvProvider + ?Sized> EnvProvider for &P {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        (**self).vars()
    }
}

/// Environment provider that reads from the actual process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvProvider for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(std::env::vars())
    }
}

/// Environment provider backed by a map (for testing).
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: IndexMap<String, String>,
}

impl MockEnv {
    /// Create a new empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock environment from an iterator of key-value pairs.
    pub fn from_pairs<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set an environment variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvProvider for MockEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}

/// A frozen copy of the environment, taken at one point in time.
///
/// The environment is never read implicitly as ambient global state: a
/// snapshot is captured by [`SnapshotSource`] on every fetch and handed to
/// the transform steps as a plain value.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: Vec<(String, String)>,
}

impl EnvSnapshot {
    /// Capture all variables visible through the given provider.
    pub fn capture(provider: &dyn EnvProvider) -> Self {
        Self {
            vars: provider.vars().collect(),
        }
    }

    /// Iterate over the captured `(name, value)` pairs, in capture order.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of captured variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// A source that snapshots an environment provider.
///
/// Not cached: every `fetch` takes a fresh [`EnvSnapshot`].
pub struct SnapshotSource<'a> {
    provider: &'a dyn EnvProvider,
}

impl<'a> SnapshotSource<'a> {
    /// Create a snapshot source over the given provider.
    pub fn new(provider: &'a dyn EnvProvider) -> Self {
        Self { provider }
    }
}

impl Source for SnapshotSource<'_> {
    type Value = EnvSnapshot;

    fn fetch(&self) -> Result<EnvSnapshot, SourceError> {
        Ok(EnvSnapshot::capture(self.provider))
    }
}
