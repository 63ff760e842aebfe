//! Nodes of the document tree.
//!
//! Nodes live in a flat arena owned by [`DocumentTree`](crate::DocumentTree) and
//! refer to each other through [`NodeId`] indices. Children are kept in manifest
//! order; the parent link is a plain index, never an owning reference.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::BookPath;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// What a node represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// A part heading grouping the chapters after it.
    Part,
    /// A placeholder chapter without a file.
    Draft,
    /// A chapter backed by a content file.
    Chapter {
        /// Resolved path of the content file.
        path: BookPath,
    },
}

/// Hierarchical section number such as `2.1.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionNumber(Vec<usize>);

impl SectionNumber {
    /// Creates a number from its components, outermost first.
    pub fn new(parts: Vec<usize>) -> Self {
        Self(parts)
    }

    /// Returns the number of the `n`th (1-based) child of this section.
    pub fn child(&self, n: usize) -> Self {
        let mut parts = self.0.clone();
        parts.push(n);
        Self(parts)
    }

    /// Returns the components, outermost first.
    pub fn parts(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.0 {
            write!(f, "{part}.")?;
        }
        Ok(())
    }
}

impl Serialize for SectionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single entry of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    /// Unique slug id, stable across rebuilds of the same manifest.
    pub id: String,

    /// Display title from the manifest.
    pub title: String,

    /// Nesting depth; roots are at depth 0.
    pub depth: usize,

    /// 1-based manifest line the node came from.
    pub line: usize,

    /// Position among siblings, in manifest order.
    pub sequence_index: usize,

    /// Part, draft or chapter payload.
    pub kind: NodeKind,

    /// Section number; parts have none.
    pub number: Option<SectionNumber>,

    /// Enclosing node, `None` for roots.
    pub parent: Option<NodeId>,

    /// Child nodes in manifest order.
    pub children: Vec<NodeId>,
}

impl DocumentNode {
    /// Returns true for parts and drafts.
    pub fn is_divider(&self) -> bool {
        !matches!(self.kind, NodeKind::Chapter { .. })
    }

    /// Returns the content file path for chapters.
    pub fn path(&self) -> Option<&BookPath> {
        match &self.kind {
            NodeKind::Chapter { path } => Some(path),
            NodeKind::Part | NodeKind::Draft => None,
        }
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
