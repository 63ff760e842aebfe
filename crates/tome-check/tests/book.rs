//! End-to-end checks of books on disk: load the manifest, build the tree and
//! validate it against the filesystem.

// Integration tests live outside cfg(test).
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use tome_book::{BookPath, DocumentTree, ManifestOptions, PathResolver, load_book};
use tome_check::{FsCorpus, ValidationReport, validate};
use tome_config::CompiledLinkPatterns;

/// Manifest mirroring the layout of a typical tutorial book.
const SUMMARY: &str = "\
# A Tour of C++

- [Introduction](introduction.md)

# The Basics

- [Basics](basics/README.md)
  - [Types](basics/types.md)
- [Control Flow](control-flow/README.md)
  - [Switch](control-flow/switch.md)

# Abstraction

- [Memory](memory/README.md)
  - [RAII](memory/raii.md)
- [Templates](templates/README.md)
";

/// Every chapter file referenced by [`SUMMARY`].
const CHAPTERS: &[&str] = &[
    "introduction.md",
    "basics/README.md",
    "basics/types.md",
    "control-flow/README.md",
    "control-flow/switch.md",
    "memory/README.md",
    "memory/raii.md",
    "templates/README.md",
];

/// Temporary book directory.
struct Book {
    /// Owned temporary directory.
    dir: tempfile::TempDir,
}

impl Book {
    /// Writes the manifest and all chapters except `skip`.
    fn new(skip: &[&str]) -> Self {
        let book = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        book.write("SUMMARY.md", SUMMARY);
        for chapter in CHAPTERS.iter().filter(|c| !skip.contains(c)) {
            book.write(chapter, &format!("# {chapter}\n"));
        }
        book
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn resolver(&self) -> PathResolver {
        PathResolver::new(self.dir.path())
    }

    fn tree(&self) -> DocumentTree {
        let manifest = BookPath::from_relative(Path::new("SUMMARY.md")).unwrap();
        load_book(&self.resolver(), &manifest, ManifestOptions::default()).unwrap()
    }

    fn check(&self) -> ValidationReport {
        let resolver = self.resolver();
        validate(
            &self.tree(),
            &FsCorpus::new(&resolver),
            &resolver,
            &CompiledLinkPatterns::default(),
        )
    }
}

#[test]
fn test_complete_book_is_clean() {
    let book = Book::new(&[]);
    let report = book.check();
    assert!(report.is_empty(), "unexpected findings: {:?}", report.findings());
}

#[test]
fn test_missing_switch_chapter() {
    let book = Book::new(&["control-flow/switch.md"]);
    let report = book.check();

    assert_eq!(report.missing_targets.len(), 1);
    assert!(report.dangling_cross_references.is_empty());
    let missing = report.missing_targets.iter().next().unwrap();
    assert_eq!(missing.path.as_str(), "control-flow/switch.md");
    assert_eq!(missing.node_id, "switch");
}

#[test]
fn test_cross_reference_to_existing_readme() {
    let book = Book::new(&[]);
    book.write(
        "memory/raii.md",
        "# RAII\n\nSee the [Templates Overview](../templates/README.md).\n",
    );
    assert!(book.check().dangling_cross_references.is_empty());
}

#[test]
fn test_cross_reference_to_missing_file() {
    let book = Book::new(&[]);
    book.write(
        "memory/raii.md",
        "# RAII\n\n[Smart pointers](smart-pointers.md) and [vectors](https://en.cppreference.com/w/cpp/container/vector).\n",
    );
    let report = book.check();

    assert_eq!(report.dangling_cross_references.len(), 1);
    let line = report.findings()[0].to_string();
    assert_eq!(
        line,
        "memory/raii.md: dangling-reference — link 'smart-pointers.md' target memory/smart-pointers.md does not exist"
    );
}

#[test]
fn test_deleting_n_files_reports_exactly_n() {
    let deleted = ["basics/types.md", "memory/README.md", "templates/README.md"];
    let book = Book::new(&deleted);
    let report = book.check();

    let mut missing: Vec<_> = report
        .missing_targets
        .iter()
        .map(|m| m.path.as_str().to_string())
        .collect();
    missing.sort();
    let mut expected: Vec<_> = deleted.iter().map(ToString::to_string).collect();
    expected.sort();
    assert_eq!(missing, expected);
}

#[test]
fn test_tree_shape_matches_manifest() {
    let tree = Book::new(&[]).tree();

    assert_eq!(tree.title(), Some("A Tour of C++"));
    assert_eq!(tree.roots().len(), 3);
    let numbers: Vec<_> = tree
        .chapters()
        .map(|(_, n)| n.number.as_ref().map(ToString::to_string).unwrap_or_default())
        .collect();
    assert_eq!(
        numbers,
        vec!["1.", "2.", "2.1.", "3.", "3.1.", "4.", "4.1.", "5."]
    );
}
