//! Configuration merging.
//!
//! Folds multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules.

use std::path::PathBuf;

use crate::{
    BookSettings, CheckSettings, Config, ManifestSettings,
    parse::{RawBookSettings, RawCheckSettings, RawConfig, RawManifestSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to the
/// book), lowest precedence last (global config). Every field takes the value from the
/// highest-precedence file that defines it. `ignore_links` lists are replaced, not
/// concatenated.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut book = BookSettings::default();
    let mut manifest = ManifestSettings::default();
    let mut check = CheckSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref settings) = raw.book {
            apply_raw_book(&mut book, settings);
        }
        if let Some(ref settings) = raw.manifest {
            apply_raw_manifest(&mut manifest, settings);
        }
        if let Some(ref settings) = raw.check {
            apply_raw_check(&mut check, settings);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|p| p.to_path_buf());

    Config {
        book,
        manifest,
        check,
        config_root,
    }
}

/// Applies raw `[book]` settings.
fn apply_raw_book(result: &mut BookSettings, raw: &RawBookSettings) {
    if let Some(ref v) = raw.manifest {
        result.manifest = PathBuf::from(v);
    }
}

/// Applies raw `[manifest]` settings.
fn apply_raw_manifest(result: &mut ManifestSettings, raw: &RawManifestSettings) {
    if let Some(v) = raw.indent_width {
        result.indent_width = v;
    }
    if let Some(ref v) = raw.extensions {
        result.extensions = v
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
    }
}

/// Applies raw `[check]` settings.
fn apply_raw_check(result: &mut CheckSettings, raw: &RawCheckSettings) {
    if let Some(v) = raw.strict {
        result.strict = v;
    }
    if let Some(v) = raw.format {
        result.format = v;
    }
    if let Some(ref v) = raw.ignore_links {
        result.ignore_links = v.clone();
    }
}
