//! Config file format abstraction.
//!
//! This module provides the [`ConfigFormat`] trait for pluggable config file
//! parsing, the built-in [`TomlFormat`] and [`JsonFormat`] implementations,
//! and the [`FormatRegistry`] that selects a format by file extension.
//!
//! Formats only turn text into a generic [`Tree`]; flattening and merging
//! never depend on the concrete format.

use crate::tree::Tree;

/// Error returned when parsing a config file fails.
#[derive(Debug)]
pub struct FormatError {
    /// Human-readable error message.
    pub message: String,

    /// Byte offset in the source where the error occurred, if known.
    pub offset: Option<usize>,
}

impl FormatError {
    /// Create a new error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    /// Create a new error with a message and source offset.
    pub fn with_offset(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(offset) = self.offset {
            write!(f, "at byte {}: {}", offset, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl core::error::Error for FormatError {}

/// Trait for config file format parsers.
///
/// Implement this to support additional formats (YAML, INI, ...) and
/// register them with a [`FormatRegistry`] via
/// [`FileLayerBuilder::format`](crate::FileLayerBuilder::format).
pub trait ConfigFormat: Send + Sync {
    /// File extensions this format handles, without the leading dot.
    ///
    /// For example, `["json"]` or `["yaml", "yml"]`.
    fn extensions(&self) -> &[&str];

    /// Parse file contents into a [`Tree`].
    fn parse(&self, contents: &str) -> Result<Tree, FormatError>;
}

/// TOML config file format, parsed with the `toml` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl ConfigFormat for TomlFormat {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, contents: &str) -> Result<Tree, FormatError> {
        let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| {
            // `message()` is empty for some error classes (unexpected EOF);
            // fall back to the full rendered error.
            let message = match e.message() {
                "" => e.to_string(),
                m => m.to_string(),
            };
            match e.span() {
                Some(span) => FormatError::with_offset(message, span.start),
                None => FormatError::new(message),
            }
        })?;
        Ok(Tree::from(toml::Value::Table(table)))
    }
}

/// JSON config file format, parsed with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl ConfigFormat for JsonFormat {
    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, contents: &str) -> Result<Tree, FormatError> {
        let value: serde_json::Value =
            serde_json::from_str(contents).map_err(|e| FormatError::new(e.to_string()))?;
        Ok(Tree::from(value))
    }
}

/// A registry of config file formats, selected by file extension.
pub struct FormatRegistry {
    formats: Vec<Box<dyn ConfigFormat>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Create a registry with the built-in TOML and JSON formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TomlFormat);
        registry.register(JsonFormat);
        registry
    }

    /// Register a new format.
    pub fn register<F: ConfigFormat + 'static>(&mut self, format: F) {
        self.formats.push(Box::new(format));
    }

    /// Find a format that handles the given file extension.
    ///
    /// The extension should not include the leading dot.
    pub fn find_by_extension(&self, extension: &str) -> Option<&dyn ConfigFormat> {
        self.formats
            .iter()
            .find(|f| {
                f.extensions()
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(extension))
            })
            .map(|f| f.as_ref())
    }

    /// Parse config contents, selecting the format by extension.
    pub fn parse(&self, contents: &str, extension: &str) -> Result<Tree, FormatError> {
        let format = self.find_by_extension(extension).ok_or_else(|| {
            FormatError::new(format!("unsupported file extension: .{extension}"))
        })?;
        format.parse(contents)
    }

    /// Get all registered extensions.
    pub fn extensions(&self) -> Vec<&str> {
        self.formats
            .iter()
            .flat_map(|f| f.extensions().iter().copied())
            .collect()
    }
}
