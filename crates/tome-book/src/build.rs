//! Tree construction from a parsed manifest.
//!
//! The builder walks the manifest entries once, keeping a stack of the ancestors
//! of the current position. An entry at depth `d` becomes a child of the node at
//! stack position `d - 1`; deeper stack entries are popped first. An entry more
//! than one level deeper than the stack allows is rejected.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    BookError, BookPath, PathResolver, ResolvedLink, StructuralError,
    manifest::{EntryKind, Manifest, ManifestEntry},
    node::{NodeId, NodeKind},
    tree::DocumentTree,
};

/// Builds [`DocumentTree`]s by resolving manifest entries against a repository.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    /// Resolver used for chapter targets.
    resolver: &'a PathResolver,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder that resolves targets with `resolver`.
    pub fn new(resolver: &'a PathResolver) -> Self {
        Self { resolver }
    }

    /// Builds a tree from `manifest`.
    ///
    /// Chapter targets are resolved relative to `manifest_dir`, the directory
    /// holding the manifest. Fails on the first structural problem.
    pub fn build(
        &self,
        manifest: &Manifest,
        manifest_dir: &BookPath,
    ) -> Result<DocumentTree, BookError> {
        let mut tree = DocumentTree::new(manifest.title.clone());
        let mut stack: Vec<NodeId> = Vec::new();
        let mut seen_paths: HashMap<BookPath, &str> = HashMap::new();

        for entry in &manifest.entries {
            if entry.depth > stack.len() {
                return Err(StructuralError::SkippedDepth {
                    line: entry.line,
                    title: entry.title.clone(),
                    depth: entry.depth,
                    max: stack.len(),
                }
                .into());
            }
            stack.truncate(entry.depth);

            let kind = self.node_kind(entry, manifest_dir)?;
            if let NodeKind::Chapter { path } = &kind
                && let Some(first_title) = seen_paths.insert(path.clone(), &entry.title)
            {
                return Err(StructuralError::DuplicatePath {
                    line: entry.line,
                    title: entry.title.clone(),
                    first_title: first_title.to_string(),
                    path: path.to_string(),
                }
                .into());
            }

            let id = tree.push(
                stack.last().copied(),
                entry.title.clone(),
                entry.depth,
                entry.line,
                kind,
            );
            stack.push(id);
        }

        tree.assign_ids();
        tree.assign_numbers();

        debug!(
            nodes = tree.len(),
            chapters = tree.chapters().count(),
            "built document tree"
        );
        Ok(tree)
    }

    /// Resolves an entry into its node payload.
    fn node_kind(
        &self,
        entry: &ManifestEntry,
        manifest_dir: &BookPath,
    ) -> Result<NodeKind, BookError> {
        let target = match &entry.kind {
            EntryKind::Part => return Ok(NodeKind::Part),
            EntryKind::Draft => return Ok(NodeKind::Draft),
            EntryKind::Chapter { target } => target,
        };

        match self.resolver.resolve(manifest_dir, target)? {
            ResolvedLink::Local { path, .. } => Ok(NodeKind::Chapter { path }),
            ResolvedLink::External(_) | ResolvedLink::Anchor(_) => {
                Err(StructuralError::NonLocalTarget {
                    line: entry.line,
                    title: entry.title.clone(),
                    target: target.clone(),
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::manifest::ManifestParser;

    fn build(text: &str) -> Result<DocumentTree, BookError> {
        let manifest = ManifestParser::default().parse(text).unwrap();
        let resolver = PathResolver::new("/book");
        TreeBuilder::new(&resolver).build(&manifest, &BookPath::root())
    }

    fn structural(text: &str) -> StructuralError {
        match build(text) {
            Err(BookError::Structural(e)) => e,
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    const TOUR: &str = "\
# Summary

- [Intro](introduction.md)

# Getting Started

- [Getting Started](getting-started/README.md)
  - [Installation and Setup](getting-started/installation.md)
";

    #[test]
    fn test_builds_nested_tree() {
        let tree = build(TOUR).unwrap();

        assert_eq!(tree.title(), Some("Summary"));
        assert_eq!(tree.roots().len(), 2);

        let intro = tree.node(tree.roots()[0]).unwrap();
        assert_eq!(intro.id, "intro");
        assert_eq!(intro.path().map(BookPath::as_str), Some("introduction.md"));

        let part = tree.node(tree.roots()[1]).unwrap();
        assert_eq!(part.kind, NodeKind::Part);
        assert_eq!(part.children.len(), 1);

        let chapter = tree.node(part.children[0]).unwrap();
        assert_eq!(chapter.id, "getting-started-1");
        assert_eq!(chapter.children.len(), 1);

        let install = tree.node(chapter.children[0]).unwrap();
        assert_eq!(install.title, "Installation and Setup");
        assert_eq!(install.depth, 2);
        assert_eq!(install.sequence_index, 0);
        assert_eq!(install.parent, Some(part.children[0]));
        assert_eq!(
            install.path().map(BookPath::as_str),
            Some("getting-started/installation.md")
        );
        assert_eq!(install.number.as_ref().map(ToString::to_string).as_deref(), Some("2.1."));
    }

    #[test]
    fn test_skipped_depth() {
        let err = structural("- [A](a.md)\n    - [B](b.md)\n");
        assert_eq!(
            err,
            StructuralError::SkippedDepth {
                line: 2,
                title: "B".into(),
                depth: 2,
                max: 1,
            }
        );
    }

    #[test]
    fn test_first_entry_cannot_be_nested() {
        let err = structural("  - [A](a.md)\n");
        assert!(matches!(err, StructuralError::SkippedDepth { depth: 1, max: 0, .. }));
    }

    #[test]
    fn test_duplicate_path_detected_after_normalisation() {
        let err = structural("- [A](basics/a.md)\n- [B](./basics/../basics/a.md)\n");
        assert_eq!(
            err,
            StructuralError::DuplicatePath {
                line: 2,
                title: "B".into(),
                first_title: "A".into(),
                path: "basics/a.md".into(),
            }
        );
    }

    #[test]
    fn test_fragment_does_not_make_path_distinct() {
        let err = structural("- [A](a.md)\n- [A again](a.md#section)\n");
        assert_eq!(err.kind(), "duplicate-path");
    }

    #[test]
    fn test_non_local_target() {
        let err = structural("- [Reference](https://en.cppreference.com/index.md)\n");
        assert_eq!(err.kind(), "non-local-target");
    }

    #[test]
    fn test_angle_bracketed_url_target_is_non_local() {
        let err = structural("- [Ref](<https://en.cppreference.com/index.md>)\n");
        assert_eq!(err.kind(), "non-local-target");
    }

    #[test]
    fn test_escaping_target_propagates_resolver_error() {
        let err = build("- [Secrets](../../etc/passwd.md)\n").unwrap_err();
        assert!(matches!(err, BookError::PathEscapesRoot { .. }));
    }

    #[test]
    fn test_drafts_are_dividers_but_can_nest() {
        let tree = build("- [Later]()\n  - [Sub](sub.md)\n").unwrap();
        let draft = tree.node(tree.roots()[0]).unwrap();
        assert_eq!(draft.kind, NodeKind::Draft);
        assert!(draft.is_divider());
        assert_eq!(tree.children(tree.roots()[0]).count(), 1);
    }

    #[test]
    fn test_targets_resolve_against_manifest_directory() {
        let manifest = ManifestParser::default()
            .parse("- [Intro](intro.md)\n- [Shared](../shared/notes.md)\n")
            .unwrap();
        let resolver = PathResolver::new("/book");
        let dir = BookPath::from_relative(Path::new("src")).unwrap();
        let tree = TreeBuilder::new(&resolver).build(&manifest, &dir).unwrap();

        let paths: Vec<_> = tree
            .chapters()
            .filter_map(|(_, n)| n.path().map(BookPath::as_str))
            .collect();
        assert_eq!(paths, vec!["src/intro.md", "shared/notes.md"]);
    }

    #[test]
    fn test_order_depth_and_idempotence() {
        let text = "\
# Book
- [Zeta](z.md)
- [Alpha](a.md)
  - [Alpha One](a1.md)
  - [Alpha Two](a2.md)
    - [Deep](deep.md)
  - [Alpha Three](a3.md)
# Appendix
- [Mu](m.md)
";
        let manifest = ManifestParser::default().parse(text).unwrap();
        let resolver = PathResolver::new("/book");
        let builder = TreeBuilder::new(&resolver);
        let first = builder.build(&manifest, &BookPath::root()).unwrap();
        let second = builder.build(&manifest, &BookPath::root()).unwrap();

        assert_eq!(first, second);

        let entry_depths: Vec<_> = manifest.entries.iter().map(|e| e.depth).collect();
        assert_eq!(first.depths(), entry_depths);

        let alpha = first.get_by_id("alpha").unwrap();
        let children: Vec<_> = alpha
            .children
            .iter()
            .map(|&c| first.node(c).unwrap().title.as_str())
            .collect();
        assert_eq!(children, vec!["Alpha One", "Alpha Two", "Alpha Three"]);

        let mut paths: Vec<_> = first.chapters().filter_map(|(_, n)| n.path()).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }
}
