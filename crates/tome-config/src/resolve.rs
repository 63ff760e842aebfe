//! Path resolution for the repository root and manifest location.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::ConfigError;

/// A manifest location pinned to a canonical repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedManifest {
    /// Canonical repository root.
    pub root: PathBuf,
    /// Manifest path relative to `root`.
    pub relative: PathBuf,
}

/// Resolves the repository root and a manifest path inside it.
///
/// - `root` must be an existing directory; it is canonicalized to resolve symlinks.
/// - `manifest` may be relative (joined to the root) or absolute.
/// - The manifest must exist and must live inside the root.
pub fn resolve_manifest(root: &Path, manifest: &Path) -> Result<ResolvedManifest, ConfigError> {
    let root = canonicalize(root)?;
    if !root.is_dir() {
        return Err(ConfigError::RootNotDirectory { path: root });
    }

    let candidate = if manifest.is_absolute() {
        manifest.to_path_buf()
    } else {
        root.join(manifest)
    };

    let absolute = candidate.canonicalize().map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ConfigError::ManifestNotFound {
                path: candidate.clone(),
            }
        } else {
            ConfigError::PathResolution {
                path: candidate.clone(),
                source,
            }
        }
    })?;

    let relative = absolute
        .strip_prefix(&root)
        .map(Path::to_path_buf)
        .map_err(|_| ConfigError::ManifestOutsideRoot {
            path: absolute.clone(),
            root: root.clone(),
        })?;

    Ok(ResolvedManifest { root, relative })
}

/// Formats a path for display, relative to `base` when that is shorter.
///
/// Paths that cannot be expressed relative to `base` are shown unchanged.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    let Some(base) = base else {
        return path.display().to_string();
    };
    match pathdiff::diff_paths(path, base) {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) if rel.as_os_str().len() < path.as_os_str().len() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Canonicalizes a path, mapping failures to `ConfigError::PathResolution`.
fn canonicalize(path: &Path) -> Result<PathBuf, ConfigError> {
    path.canonicalize()
        .map_err(|source| ConfigError::PathResolution {
            path: path.to_path_buf(),
            source,
        })
}
