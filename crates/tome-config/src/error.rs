//! Error types for tome configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// Failed to render settings as TOML.
    #[error("failed to serialize settings: {0}")]
    SerializeToml(#[source] ser::Error),

    /// Failed to compile a glob pattern.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The invalid pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },

    /// The repository root does not exist or is not a directory.
    #[error("repository root is not a directory: {path}")]
    RootNotDirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The manifest file does not exist.
    #[error("manifest not found: {path}")]
    ManifestNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The manifest lives outside the repository root.
    #[error("manifest {path} is outside the repository root {root}")]
    ManifestOutsideRoot {
        /// Resolved manifest path.
        path: PathBuf,
        /// Resolved repository root.
        root: PathBuf,
    },

    /// Failed to canonicalize a path.
    #[error("failed to resolve path {path}: {source}")]
    PathResolution {
        /// The path that could not be resolved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
