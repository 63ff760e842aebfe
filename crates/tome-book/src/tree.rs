//! The document tree.
//!
//! A [`DocumentTree`] is a forest: part headings and top-level chapters are its
//! roots, and every other node hangs off exactly one parent. Nodes are stored in
//! manifest order, so arena order, preorder traversal order and reading order
//! coincide.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    node::{DocumentNode, NodeId, NodeKind, SectionNumber},
    slug::Slugifier,
};

/// Ordered, hierarchical view of a book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTree {
    /// Book title from the manifest, if any.
    title: Option<String>,
    /// Node arena in manifest order.
    nodes: Vec<DocumentNode>,
    /// Top-level nodes in manifest order.
    roots: Vec<NodeId>,
    /// Lookup from slug id to node.
    by_id: HashMap<String, NodeId>,
}

impl DocumentTree {
    /// Creates an empty tree.
    pub(crate) fn new(title: Option<String>) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    /// Appends a node under `parent` (or as a root) and returns its id.
    ///
    /// `sequence_index`, `parent` and `children` are filled in here; the id and
    /// number are assigned once the whole tree is known.
    pub(crate) fn push(
        &mut self,
        parent: Option<NodeId>,
        title: String,
        depth: usize,
        line: usize,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let siblings = match parent {
            Some(parent) => &mut self.nodes[parent.0].children,
            None => &mut self.roots,
        };
        let sequence_index = siblings.len();
        siblings.push(id);

        self.nodes.push(DocumentNode {
            id: String::new(),
            title,
            depth,
            line,
            sequence_index,
            kind,
            number: None,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Assigns deduplicated slug ids in manifest order.
    pub(crate) fn assign_ids(&mut self) {
        let mut slugifier = Slugifier::new();
        self.by_id.clear();
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            node.id = slugifier.slugify(&node.title);
            self.by_id.insert(node.id.clone(), NodeId(idx));
        }
    }

    /// Assigns section numbers to drafts and chapters.
    ///
    /// Parts are skipped and do not reset numbering: the first chapter after a
    /// part continues from the last top-level number before it.
    pub(crate) fn assign_numbers(&mut self) {
        let mut top_level = 0;
        let mut numbered_children: HashMap<NodeId, usize> = HashMap::new();

        for idx in 0..self.nodes.len() {
            if self.nodes[idx].kind == NodeKind::Part {
                continue;
            }
            let parent_number = self.nodes[idx]
                .parent
                .and_then(|parent| self.nodes[parent.0].number.clone().map(|n| (parent, n)));

            let number = match parent_number {
                Some((parent, number)) => {
                    let count = numbered_children.entry(parent).or_insert(0);
                    *count += 1;
                    number.child(*count)
                }
                None => {
                    top_level += 1;
                    SectionNumber::new(vec![top_level])
                }
            };
            self.nodes[idx].number = Some(number);
        }
    }

    /// Returns the book title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the top-level nodes in manifest order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the node with the given arena id.
    pub fn node(&self, id: NodeId) -> Option<&DocumentNode> {
        self.nodes.get(id.0)
    }

    /// Looks up a node by its slug id.
    pub fn get_by_id(&self, id: &str) -> Option<&DocumentNode> {
        self.by_id.get(id).and_then(|&node| self.node(node))
    }

    /// Returns the children of a node; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &DocumentNode> {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&child| self.node(child))
    }

    /// Iterates over all nodes depth-first, parents before children.
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Iterates over chapters in reading order, skipping parts and drafts.
    pub fn chapters(&self) -> impl Iterator<Item = (NodeId, &DocumentNode)> {
        self.iter_preorder()
            .filter(|(_, node)| !node.is_divider())
    }

    /// Returns the chapter read after `id`.
    pub fn next_chapter(&self, id: NodeId) -> Option<NodeId> {
        self.chapters()
            .map(|(chapter, _)| chapter)
            .skip_while(|&chapter| chapter != id)
            .nth(1)
    }

    /// Returns the chapter read before `id`.
    pub fn previous_chapter(&self, id: NodeId) -> Option<NodeId> {
        self.chapters()
            .map(|(chapter, _)| chapter)
            .take_while(|&chapter| chapter != id)
            .last()
            .filter(|_| self.chapters().any(|(chapter, _)| chapter == id))
    }

    /// Returns every node's depth in preorder.
    ///
    /// For a tree built from a manifest this equals the entries' depths.
    pub fn depths(&self) -> Vec<usize> {
        self.iter_preorder().map(|(_, node)| node.depth).collect()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serializes the subtree rooted at `id`.
    fn serialize_node(&self, id: NodeId) -> Option<SerializedNode<'_>> {
        let node = self.node(id)?;
        Some(SerializedNode {
            id: &node.id,
            title: &node.title,
            number: node.number.as_ref(),
            line: node.line,
            kind: &node.kind,
            children: node
                .children
                .iter()
                .filter_map(|&child| self.serialize_node(child))
                .collect(),
        })
    }
}

/// Nested JSON shape of a node.
#[derive(Serialize)]
struct SerializedNode<'a> {
    /// Slug id.
    id: &'a str,
    /// Display title.
    title: &'a str,
    /// Section number, absent for parts.
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<&'a SectionNumber>,
    /// Manifest line.
    line: usize,
    /// Kind tag and path.
    #[serde(flatten)]
    kind: &'a NodeKind,
    /// Nested children.
    children: Vec<SerializedNode<'a>>,
}

impl Serialize for DocumentTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<_> = self
            .roots
            .iter()
            .filter_map(|&root| self.serialize_node(root))
            .collect();
        let mut state = serializer.serialize_struct("DocumentTree", 2)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("nodes", &nodes)?;
        state.end()
    }
}

/// Preorder iterator over a [`DocumentTree`].
pub struct PreorderIter<'a> {
    /// Tree being walked.
    tree: &'a DocumentTree,
    /// Nodes still to visit, next on top.
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = (NodeId, &'a DocumentNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id)?;
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}
