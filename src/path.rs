//! Configuration key paths.

use core::fmt;

/// An ordered sequence of key segments addressing one configuration value.
///
/// Paths display joined with `.` (`db.host`) and parse back from the same
/// form. Lookup is by full-path equality; segment order only matters for
/// display. Paths produced by the layers are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Build a path from an iterator of segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(|s| s.into()).collect())
    }

    /// The path segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for KeyPath {
    /// Parse a dotted path, e.g. `"db.host"` into `["db", "host"]`.
    ///
    /// The split is literal: `"a..b"` becomes `["a", "", "b"]` and `""`
    /// becomes `[""]`. The layers never produce empty segments, so such a
    /// path is a valid lookup key that simply matches nothing.
    fn from(dotted: &str) -> Self {
        Self(dotted.split('.').map(str::to_string).collect())
    }
}

impl From<String> for KeyPath {
    fn from(dotted: String) -> Self {
        Self::from(dotted.as_str())
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}
