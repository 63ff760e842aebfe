//! Error types for manifest parsing and tree construction.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while turning a manifest into a document tree.
#[derive(Debug, Error)]
pub enum BookError {
    /// Failed to read the manifest file.
    #[error("failed to read manifest {path}: {source}")]
    ReadManifest {
        /// Path to the manifest that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A link target is empty or contains characters no filesystem accepts.
    #[error("malformed link '{link}': {reason}")]
    MalformedLink {
        /// The raw link text.
        link: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A relative link climbs above the repository root.
    #[error("link '{link}' escapes the repository root")]
    PathEscapesRoot {
        /// The raw link text.
        link: String,
    },

    /// The manifest text does not follow the manifest grammar.
    #[error("manifest syntax error on line {line}: {message}")]
    ManifestSyntax {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The manifest parsed but does not describe a well-formed tree.
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl BookError {
    /// Short machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReadManifest { .. } => "read-manifest",
            Self::MalformedLink { .. } => "malformed-link",
            Self::PathEscapesRoot { .. } => "path-escapes-root",
            Self::ManifestSyntax { .. } => "manifest-syntax",
            Self::Structural(e) => e.kind(),
        }
    }
}

/// Structural problems detected while building the tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    /// An entry is nested more than one level below its predecessor.
    #[error("line {line}: '{title}' is at depth {depth} but its parent is at most depth {max}")]
    SkippedDepth {
        /// 1-based manifest line.
        line: usize,
        /// Title of the offending entry.
        title: String,
        /// Depth of the offending entry.
        depth: usize,
        /// Deepest depth an entry could have at this point.
        max: usize,
    },

    /// Two chapters resolve to the same file.
    #[error("line {line}: '{title}' points at {path}, already used by '{first_title}'")]
    DuplicatePath {
        /// 1-based manifest line of the second occurrence.
        line: usize,
        /// Title of the second occurrence.
        title: String,
        /// Title of the first occurrence.
        first_title: String,
        /// The shared resolved path.
        path: String,
    },

    /// A chapter target is an external URL or a bare anchor.
    #[error("line {line}: '{title}' must point at a file in the book, not '{target}'")]
    NonLocalTarget {
        /// 1-based manifest line.
        line: usize,
        /// Title of the offending entry.
        title: String,
        /// The raw target.
        target: String,
    },
}

impl StructuralError {
    /// Short machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SkippedDepth { .. } => "skipped-depth",
            Self::DuplicatePath { .. } => "duplicate-path",
            Self::NonLocalTarget { .. } => "non-local-target",
        }
    }
}
