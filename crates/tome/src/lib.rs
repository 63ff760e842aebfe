//! tome: manifest-driven book tree builder and link checker.
//!
//! tome reads the navigation manifest of an mdBook-style book (`SUMMARY.md`),
//! builds the ordered chapter tree it describes, and checks that every chapter
//! file exists and every relative link between chapters resolves.

#![warn(missing_docs)]

pub mod cli;
