//! Configuration file parsing.
//!
//! Parses individual `.tome.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ConfigError, OutputFormat};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Book layout section.
    pub book: Option<RawBookSettings>,
    /// Manifest grammar section.
    pub manifest: Option<RawManifestSettings>,
    /// Validation section.
    pub check: Option<RawCheckSettings>,
}

/// Raw `[book]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBookSettings {
    /// Manifest path relative to the repository root.
    pub manifest: Option<String>,
}

/// Raw `[manifest]` settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawManifestSettings {
    /// Spaces per nesting level.
    pub indent_width: Option<usize>,
    /// Recognised content extensions.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub extensions: Option<Vec<String>>,
}

/// Raw `[check]` settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCheckSettings {
    /// Treat findings as failures.
    #[serde(alias = "strict_cross_refs")]
    pub strict: Option<bool>,
    /// Report format.
    pub format: Option<OutputFormat>,
    /// Link target globs that are never checked.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub ignore_links: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks whether a config file sets `root = true`.
///
/// Unreadable or unparseable files are not roots; the parse error surfaces later
/// when the file is actually loaded.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> RawConfig {
        parse_config_str(contents, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.book.is_none());
        assert!(config.manifest.is_none());
        assert!(config.check.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
root = true

[book]
manifest = "src/SUMMARY.md"

[manifest]
indent_width = 4
extensions = ["md", "mdx"]

[check]
strict = true
format = "json"
ignore_links = ["**/*.cpp", "assets/**"]
"#,
        );

        assert_eq!(config.root, Some(true));
        assert_eq!(
            config.book.unwrap().manifest.as_deref(),
            Some("src/SUMMARY.md")
        );
        let manifest = config.manifest.unwrap();
        assert_eq!(manifest.indent_width, Some(4));
        assert_eq!(
            manifest.extensions,
            Some(vec!["md".to_string(), "mdx".to_string()])
        );
        let check = config.check.unwrap();
        assert_eq!(check.strict, Some(true));
        assert_eq!(check.format, Some(OutputFormat::Json));
        assert_eq!(check.ignore_links.map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_single_string_extension() {
        let config = parse("[manifest]\nextensions = \"md\"\n");
        assert_eq!(
            config.manifest.unwrap().extensions,
            Some(vec!["md".to_string()])
        );
    }

    #[test]
    fn test_strict_cross_refs_alias() {
        let config = parse("[check]\nstrict_cross_refs = true\n");
        assert_eq!(config.check.unwrap().strict, Some(true));
    }

    #[test]
    fn test_unknown_format_is_error() {
        let result = parse_config_str("[check]\nformat = \"yaml\"\n", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let err = parse_config_str("[book\n", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_parse_config_file_missing() {
        let result = parse_config_file(Path::new("/nonexistent/.tome.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_is_root_config_true() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".tome.toml");
        fs::write(&config_path, "root = true\n").unwrap();
        assert!(is_root_config(&config_path));
    }

    #[test]
    fn test_is_root_config_false() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".tome.toml");
        fs::write(&config_path, "root = false\n").unwrap();
        assert!(!is_root_config(&config_path));
    }
}
