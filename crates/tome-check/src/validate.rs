//! Chapter and cross-reference validation.

use std::collections::BTreeMap;

use tome_book::{BookError, BookPath, DocumentTree, PathResolver, ResolvedLink};
use tome_config::CompiledLinkPatterns;
use tracing::debug;

use crate::{
    Corpus,
    report::{DanglingReason, DanglingReference, MissingTarget, ValidationReport},
};

/// Checks every chapter of `tree` against `corpus`.
///
/// - A chapter whose file does not exist is a missing target.
/// - Every link in an existing chapter is resolved relative to that chapter's
///   directory. External URLs and anchors are skipped, as are links matching
///   `ignore`. Links that fail to resolve or point at nothing are dangling.
/// - Paths shared by several chapters are reported as duplicates.
///
/// Never fails and never stops early: the report holds every finding.
pub fn validate(
    tree: &DocumentTree,
    corpus: &impl Corpus,
    resolver: &PathResolver,
    ignore: &CompiledLinkPatterns,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut claims: BTreeMap<&BookPath, usize> = BTreeMap::new();

    for (_, node) in tree.chapters() {
        let Some(path) = node.path() else {
            continue;
        };
        *claims.entry(path).or_insert(0) += 1;

        if !corpus.exists(path) {
            report.missing_targets.insert(MissingTarget {
                node_id: node.id.clone(),
                path: path.clone(),
            });
            continue;
        }

        check_links(path, corpus, resolver, ignore, &mut report);
    }

    report.duplicate_paths.extend(
        claims
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(path, _)| path.clone()),
    );

    debug!(
        missing = report.missing_targets.len(),
        dangling = report.dangling_cross_references.len(),
        duplicates = report.duplicate_paths.len(),
        "validated book"
    );
    report
}

/// Records the dangling links of one existing document.
fn check_links(
    source: &BookPath,
    corpus: &impl Corpus,
    resolver: &PathResolver,
    ignore: &CompiledLinkPatterns,
    report: &mut ValidationReport,
) {
    let base = source.parent();
    for link in corpus.links(source) {
        let reason = match resolver.resolve(&base, &link) {
            Ok(ResolvedLink::External(_) | ResolvedLink::Anchor(_)) => continue,
            Ok(ResolvedLink::Local { path, .. }) => {
                if ignore.is_ignored(&link, Some(path.as_str())) || corpus.exists(&path) {
                    continue;
                }
                DanglingReason::MissingTarget { path }
            }
            Err(e) => {
                if ignore.is_ignored(&link, None) {
                    continue;
                }
                match e {
                    BookError::PathEscapesRoot { .. } => DanglingReason::EscapesRoot,
                    other => DanglingReason::Malformed {
                        message: other.to_string(),
                    },
                }
            }
        };

        report.dangling_cross_references.insert(DanglingReference {
            source: source.clone(),
            link,
            reason,
        });
    }
}
