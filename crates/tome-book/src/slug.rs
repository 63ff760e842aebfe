//! Stable node identifiers derived from titles.
//!
//! A slug keeps the title's ASCII alphanumerics, lowercased. Runs of
//! whitespace, `-`, `_` and `/` between them become a single hyphen; any other
//! character is dropped.
//! Titles that produce the same slug are disambiguated with a `-N` suffix in
//! the order they are encountered, so ids are a pure function of the manifest.

use std::collections::{HashMap, HashSet};

/// Slug used when a title contains no ASCII alphanumerics.
const FALLBACK_SLUG: &str = "section";

/// Hands out unique slugs in encounter order.
#[derive(Debug, Default)]
pub struct Slugifier {
    /// Next suffix to try for each base slug.
    next_suffix: HashMap<String, usize>,
    /// Every slug handed out so far.
    taken: HashSet<String>,
}

impl Slugifier {
    /// Creates a slugifier with nothing taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a slug for `title` that has not been returned before.
    pub fn slugify(&mut self, title: &str) -> String {
        let base = base_slug(title);
        if self.taken.insert(base.clone()) {
            return base;
        }

        let suffix = self.next_suffix.entry(base.clone()).or_insert(1);
        loop {
            let candidate = format!("{base}-{suffix}");
            *suffix += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Computes the slug of a title without deduplication.
pub fn base_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' || c == '/' {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
