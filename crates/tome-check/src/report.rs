//! Validation findings.
//!
//! All collections are ordered sets so that a report is deterministic to print
//! and compare, and so that a finding recorded twice is stored once.

use std::{collections::BTreeSet, fmt};

use serde::Serialize;
use tome_book::BookPath;

/// A chapter whose content file does not exist.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MissingTarget {
    /// Slug id of the chapter node.
    pub node_id: String,
    /// Resolved path that was looked up.
    pub path: BookPath,
}

/// Why an in-body link is dangling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum DanglingReason {
    /// The link resolves to a path that does not exist.
    MissingTarget {
        /// Resolved path of the link.
        path: BookPath,
    },
    /// The link climbs above the repository root.
    EscapesRoot,
    /// The link text cannot be resolved at all.
    Malformed {
        /// Description of the problem.
        message: String,
    },
}

impl fmt::Display for DanglingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget { path } => write!(f, "target {path} does not exist"),
            Self::EscapesRoot => write!(f, "escapes the repository root"),
            Self::Malformed { message } => write!(f, "is malformed ({message})"),
        }
    }
}

/// An in-body link that does not resolve to a document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DanglingReference {
    /// Document containing the link.
    pub source: BookPath,
    /// Link destination as written.
    pub link: String,
    /// What is wrong with it.
    #[serde(flatten)]
    pub reason: DanglingReason,
}

/// Everything found wrong with a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Chapters whose file is absent.
    pub missing_targets: BTreeSet<MissingTarget>,
    /// In-body links that do not resolve.
    pub dangling_cross_references: BTreeSet<DanglingReference>,
    /// Paths claimed by more than one chapter.
    pub duplicate_paths: BTreeSet<BookPath>,
}

impl ValidationReport {
    /// Returns true when nothing was found.
    pub fn is_empty(&self) -> bool {
        self.missing_targets.is_empty()
            && self.dangling_cross_references.is_empty()
            && self.duplicate_paths.is_empty()
    }

    /// Returns the total number of findings.
    pub fn len(&self) -> usize {
        self.missing_targets.len() + self.dangling_cross_references.len() + self.duplicate_paths.len()
    }

    /// Flattens the report into printable findings.
    pub fn findings(&self) -> Vec<Finding> {
        let missing = self.missing_targets.iter().map(|m| Finding {
            path: m.path.clone(),
            kind: FindingKind::MissingTarget,
            detail: format!("chapter '{}' points at a file that does not exist", m.node_id),
        });
        let dangling = self.dangling_cross_references.iter().map(|d| Finding {
            path: d.source.clone(),
            kind: FindingKind::DanglingReference,
            detail: format!("link '{}' {}", d.link, d.reason),
        });
        let duplicates = self.duplicate_paths.iter().map(|path| Finding {
            path: path.clone(),
            kind: FindingKind::DuplicatePath,
            detail: "referenced by more than one chapter".to_string(),
        });
        missing.chain(dangling).chain(duplicates).collect()
    }
}

/// Category of a [`Finding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// See [`MissingTarget`].
    MissingTarget,
    /// See [`DanglingReference`].
    DanglingReference,
    /// A path referenced by several chapters.
    DuplicatePath,
}

impl FindingKind {
    /// Returns the kebab-case name used in output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingTarget => "missing-target",
            Self::DanglingReference => "dangling-reference",
            Self::DuplicatePath => "duplicate-path",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of human-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Document the finding is about.
    pub path: BookPath,
    /// Category.
    pub kind: FindingKind,
    /// Explanation.
    pub detail: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} — {}", self.path, self.kind, self.detail)
    }
}
