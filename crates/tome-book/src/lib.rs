//! Manifest parsing and document tree construction for tome.
//!
//! This crate turns a navigation manifest (`SUMMARY.md`) into a [`DocumentTree`]:
//! - [`ManifestParser`] reads the manifest into an ordered list of entries
//! - [`TreeBuilder`] nests the entries, resolves chapter targets through a
//!   [`PathResolver`] and assigns slug ids and section numbers
//! - [`extract_links`] pulls link destinations out of chapter bodies for
//!   cross-reference checking

#![warn(missing_docs)]

mod build;
mod error;
mod links;
mod load;
mod manifest;
mod node;
mod path;
mod slug;
mod tree;

pub use build::TreeBuilder;
pub use error::{BookError, StructuralError};
pub use links::extract_links;
pub use load::{build_from_str, load_book};
pub use manifest::{EntryKind, Manifest, ManifestEntry, ManifestOptions, ManifestParser};
pub use node::{DocumentNode, NodeId, NodeKind, SectionNumber};
pub use path::{BookPath, PathResolver, ResolvedLink};
pub use slug::{Slugifier, base_slug};
pub use tree::{DocumentTree, PreorderIter};
