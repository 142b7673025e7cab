#![warn(missing_docs)]
#![deny(unsafe_code)]
#![doc = include_str!("../README.md")]

pub(crate) mod builder;
pub(crate) mod color;
pub(crate) mod config;
pub(crate) mod dump;
pub(crate) mod error;
pub(crate) mod format;
pub(crate) mod item;
pub(crate) mod layers;
pub(crate) mod merge;
pub(crate) mod path;
pub(crate) mod provenance;
pub(crate) mod source;
pub(crate) mod tree;

// ==========================================
// PUBLIC INTERFACE
// ==========================================

pub use builder::{ConfigBuilder, EnvLayerBuilder, FileLayerBuilder, builder};
pub use config::Config;
pub use error::ConfigError;
pub use format::{ConfigFormat, FormatError, FormatRegistry, JsonFormat, TomlFormat};
pub use item::Item;
pub use layers::env::EnvLayer;
pub use layers::file::FileLayer;
pub use layers::{Layer, LayerSource};
pub use merge::{Conflict, ConflictPolicy, Override};
pub use path::KeyPath;
pub use provenance::Provenance;
pub use source::{
    EnvProvider, EnvSnapshot, FileSource, Map, MockEnv, SnapshotSource, Source, SourceError,
    StdEnv, TryMap,
};
pub use tree::Tree;
