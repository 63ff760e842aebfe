//! Chapter and cross-reference validation for tome books.
//!
//! Given a [`DocumentTree`](tome_book::DocumentTree) and a [`Corpus`], [`validate`]
//! collects every chapter whose file is missing, every in-body link that does not
//! resolve, and every path claimed by more than one chapter into a
//! [`ValidationReport`].

#![warn(missing_docs)]

mod corpus;
mod report;
mod validate;

pub use corpus::{Corpus, FnCorpus, FsCorpus};
pub use report::{
    DanglingReason, DanglingReference, Finding, FindingKind, MissingTarget, ValidationReport,
};
pub use validate::validate;
