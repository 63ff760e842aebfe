//! Configuration validation.
//!
//! Checks a loaded configuration against a repository root and reports warnings for
//! settings that would make the build fail or silently check nothing.

use std::{fmt, path::Path};

use crate::{Config, patterns::compile_glob};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `manifest.indent_width` is zero, so no nesting can be expressed.
    ZeroIndentWidth,
    /// `manifest.extensions` is empty, so every chapter link is rejected.
    NoExtensions,
    /// The configured manifest does not exist under the root.
    ManifestMissing {
        /// Path that was looked up.
        path: String,
    },
    /// An `ignore_links` glob does not compile.
    InvalidIgnorePattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIndentWidth => write!(f, "manifest.indent_width must be at least 1"),
            Self::NoExtensions => {
                write!(f, "manifest.extensions is empty; no chapter link can match")
            }
            Self::ManifestMissing { path } => write!(f, "manifest does not exist: {path}"),
            Self::InvalidIgnorePattern { pattern, message } => {
                write!(f, "ignore_links pattern '{pattern}' is invalid: {message}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config, root: &Path) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.manifest.indent_width == 0 {
        warnings.push(ConfigWarning::ZeroIndentWidth);
    }

    if config.manifest.extensions.is_empty() {
        warnings.push(ConfigWarning::NoExtensions);
    }

    let manifest = root.join(&config.book.manifest);
    if !manifest.is_file() {
        warnings.push(ConfigWarning::ManifestMissing {
            path: manifest.display().to_string(),
        });
    }

    for pattern in &config.check.ignore_links {
        if let Err(e) = compile_glob(pattern) {
            warnings.push(ConfigWarning::InvalidIgnorePattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            });
        }
    }

    warnings
}
