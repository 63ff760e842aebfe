//! Configuration file discovery.
//!
//! Finds `.tome.toml` files by walking up from a book's repository root, then appends
//! the global `~/.tome.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".tome.toml";

/// Discovers all configuration files that apply to a book rooted at `start`.
///
/// Returns paths in precedence order: closest to `start` first, global last.
/// Walking stops at the first file with `root = true`; in that case the global
/// config is skipped as well.
pub fn discover_config_files(start: &Path) -> Vec<PathBuf> {
    // Relative roots such as `.` have no useful ancestors.
    let start = if start.is_relative() {
        start.canonicalize().unwrap_or_else(|_| start.to_path_buf())
    } else {
        start.to_path_buf()
    };
    let mut configs = Vec::new();
    let mut found_root = false;

    for dir in start.ancestors() {
        let config_path = dir.join(CONFIG_FILENAME);
        if !config_path.is_file() {
            continue;
        }
        let is_root = is_root_config(&config_path);
        configs.push(config_path);
        if is_root {
            found_root = true;
            break;
        }
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.tome.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
