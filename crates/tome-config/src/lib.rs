//! Configuration system for tome.
//!
//! tome uses TOML configuration files named `.tome.toml`. Configuration is resolved by walking
//! up the directory tree from the book's repository root, collecting any `.tome.toml` files
//! found, then loading `~/.tome.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBookSettings, RawCheckSettings, RawConfig, RawManifestSettings, parse_config_file,
    parse_config_str,
};
pub use patterns::CompiledLinkPatterns;
pub use resolve::{ResolvedManifest, format_path_for_display, resolve_manifest};
use serde::{Deserialize, Serialize};
pub use templates::local_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default manifest location, relative to the repository root.
pub const DEFAULT_MANIFEST: &str = "SUMMARY.md";

/// Default number of spaces per manifest nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Default content-file extensions accepted as chapter targets.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Top-level merged configuration for tome.
///
/// This represents the fully resolved configuration after merging all discovered `.tome.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Book layout settings.
    pub book: BookSettings,
    /// Manifest grammar settings.
    pub manifest: ManifestSettings,
    /// Validation settings.
    pub check: CheckSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.tome.toml` files.
    ///
    /// Discovery starts at `root` (the book's repository root) and walks upwards.
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(root);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Compiles the `check.ignore_links` globs into a matcher.
    pub fn compile_link_patterns(&self) -> Result<CompiledLinkPatterns, ConfigError> {
        CompiledLinkPatterns::compile(&self.check.ignore_links)
    }

    /// Validates the configuration against a repository root and returns any warnings.
    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        validate_config(self, root)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.tome.toml` file, so it can be pasted back
    /// into a config.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            book: self.book.clone(),
            manifest: self.manifest.clone(),
            check: self.check.clone(),
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::SerializeToml)
    }
}

/// Book layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BookSettings {
    /// Manifest path, relative to the repository root.
    pub manifest: PathBuf,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
        }
    }
}

/// Manifest grammar settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ManifestSettings {
    /// Spaces consumed by one nesting level.
    pub indent_width: usize,
    /// File extensions (without the dot) that chapter targets may end in.
    pub extensions: Vec<String>,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Treat every validation finding as a failure.
    pub strict: bool,
    /// Report serialization format.
    pub format: OutputFormat,
    /// Glob patterns for link targets that are never checked.
    pub ignore_links: Vec<String>,
}

/// Report serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One finding per line on stderr.
    #[default]
    Text,
    /// A single JSON document on stdout.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}' (expected text or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Book layout settings.
    book: BookSettings,
    /// Manifest grammar settings.
    manifest: ManifestSettings,
    /// Validation settings.
    check: CheckSettings,
}
