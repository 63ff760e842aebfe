//! Access to the documents a book is made of.
//!
//! The validator never touches the filesystem directly. It asks a [`Corpus`]
//! whether a path exists and which links a document contains, so tests can run
//! against an in-memory book.

use std::fs;

use tome_book::{BookPath, PathResolver, extract_links};
use tracing::warn;

/// Source of document existence and link information.
pub trait Corpus {
    /// Returns true if `path` exists.
    fn exists(&self, path: &BookPath) -> bool;

    /// Returns the raw link destinations in the document at `path`, in order.
    fn links(&self, path: &BookPath) -> Vec<String>;
}

/// Corpus backed by a directory on disk.
#[derive(Debug, Clone, Copy)]
pub struct FsCorpus<'a> {
    /// Maps book paths to filesystem paths.
    resolver: &'a PathResolver,
}

impl<'a> FsCorpus<'a> {
    /// Creates a corpus rooted at the resolver's root.
    pub fn new(resolver: &'a PathResolver) -> Self {
        Self { resolver }
    }
}

impl Corpus for FsCorpus<'_> {
    fn exists(&self, path: &BookPath) -> bool {
        self.resolver.to_fs_path(path).exists()
    }

    fn links(&self, path: &BookPath) -> Vec<String> {
        let fs_path = self.resolver.to_fs_path(path);
        match fs::read_to_string(&fs_path) {
            Ok(content) => extract_links(&content),
            Err(e) => {
                warn!(path = %fs_path.display(), error = %e, "skipping unreadable document");
                Vec::new()
            }
        }
    }
}

/// Corpus built from two closures.
///
/// Handy for callers that already hold the book in memory.
pub struct FnCorpus<E, L> {
    /// Existence check.
    exists: E,
    /// Link lookup.
    links: L,
}

impl<E, L> FnCorpus<E, L>
where
    E: Fn(&BookPath) -> bool,
    L: Fn(&BookPath) -> Vec<String>,
{
    /// Wraps an existence check and a link lookup.
    pub fn new(exists: E, links: L) -> Self {
        Self { exists, links }
    }
}

impl<E, L> Corpus for FnCorpus<E, L>
where
    E: Fn(&BookPath) -> bool,
    L: Fn(&BookPath) -> Vec<String>,
{
    fn exists(&self, path: &BookPath) -> bool {
        (self.exists)(path)
    }

    fn links(&self, path: &BookPath) -> Vec<String> {
        (self.links)(path)
    }
}
