//! Link-ignore pattern compilation and matching.
//!
//! Compiles the `check.ignore_links` globs into a single matcher that the link
//! validator consults before checking a cross-reference.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::ConfigError;

/// Compiled glob patterns for link targets that should never be checked.
///
/// A link is ignored when either its raw text or its resolved repository-relative
/// path matches at least one pattern.
#[derive(Debug, Clone)]
pub struct CompiledLinkPatterns {
    /// Combined matcher for all patterns.
    set: GlobSet,
    /// Source patterns, kept for display.
    patterns: Vec<String>,
}

impl Default for CompiledLinkPatterns {
    fn default() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }
}

impl CompiledLinkPatterns {
    /// Compiles a list of glob patterns.
    pub fn compile(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(compile_glob(pattern)?);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: "<combined ignore_links patterns>".to_string(),
            source: e,
        })?;

        Ok(Self {
            set,
            patterns: patterns.to_vec(),
        })
    }

    /// Returns true if the raw link text or its resolved path is ignored.
    pub fn is_ignored(&self, raw: &str, resolved: Option<&str>) -> bool {
        if self.set.is_empty() {
            return false;
        }
        self.set.is_match(raw) || resolved.is_some_and(|path| self.set.is_match(path))
    }

    /// Returns the source patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if no patterns were configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Compiles a single glob pattern.
pub(crate) fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}
