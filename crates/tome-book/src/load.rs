//! High-level loading API: read a manifest from disk and build its tree.

use std::fs;

use tracing::debug;

use crate::{BookError, BookPath, DocumentTree, ManifestOptions, ManifestParser, PathResolver, TreeBuilder};

/// Parses manifest text and builds the tree.
///
/// `manifest_dir` is the directory chapter targets are relative to.
pub fn build_from_str(
    text: &str,
    resolver: &PathResolver,
    manifest_dir: &BookPath,
    options: ManifestOptions,
) -> Result<DocumentTree, BookError> {
    let manifest = ManifestParser::new(options).parse(text)?;
    TreeBuilder::new(resolver).build(&manifest, manifest_dir)
}

/// Reads the manifest at `manifest` (relative to the resolver's root) and builds the tree.
pub fn load_book(
    resolver: &PathResolver,
    manifest: &BookPath,
    options: ManifestOptions,
) -> Result<DocumentTree, BookError> {
    let fs_path = resolver.to_fs_path(manifest);
    debug!(manifest = %fs_path.display(), "reading manifest");
    let text = fs::read_to_string(&fs_path).map_err(|source| BookError::ReadManifest {
        path: fs_path.clone(),
        source,
    })?;
    build_from_str(&text, resolver, &manifest.parent(), options)
}
