//! Link resolution against the repository root.
//!
//! Every document in a book is addressed by a [`BookPath`]: a canonical,
//! `/`-separated path relative to the repository root with no `.` or `..`
//! segments. [`PathResolver`] turns the raw target of a link (as written in the
//! manifest or in a chapter body) into one of those, or classifies it as an
//! external URL or a same-page anchor.

use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::BookError;

/// Canonical repository-relative path.
///
/// The empty path denotes the repository root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookPath(String);

impl BookPath {
    /// The repository root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Converts a relative filesystem path into a canonical book path.
    ///
    /// `.` segments are dropped and `..` segments are folded into their parent.
    /// Absolute paths and paths that climb above the root are rejected.
    pub fn from_relative(path: &Path) -> Result<Self, BookError> {
        let mut segments: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(BookError::PathEscapesRoot {
                            link: path.display().to_string(),
                        });
                    }
                }
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(BookError::MalformedLink {
                        link: path.display().to_string(),
                        reason: "expected a path relative to the repository root".to_string(),
                    });
                }
            }
        }
        Ok(Self(segments.join("/")))
    }

    /// Returns the path as a `/`-separated string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the directory containing this path (the root for top-level files).
    pub fn parent(&self) -> Self {
        match self.0.rfind('/') {
            Some(idx) => Self(self.0[..idx].to_string()),
            None => Self::root(),
        }
    }

    /// Iterates over the non-empty segments.
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for BookPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Classification of a raw link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLink {
    /// A URL with a scheme (`https:`, `mailto:`) or a protocol-relative `//host` link.
    External(String),
    /// A same-page anchor; holds the fragment without the leading `#`.
    Anchor(String),
    /// A document inside the repository.
    Local {
        /// Canonical target path.
        path: BookPath,
        /// Fragment after `#`, if present.
        fragment: Option<String>,
    },
}

/// Resolves raw link text against a base directory inside a repository.
///
/// Resolution is purely lexical; the filesystem is only consulted through
/// [`PathResolver::to_fs_path`] by callers that want to check existence.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Repository root on disk.
    root: PathBuf,
}

impl PathResolver {
    /// Creates a resolver for the repository at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a canonical book path onto the filesystem.
    pub fn to_fs_path(&self, path: &BookPath) -> PathBuf {
        path.segments()
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// Resolves `raw` relative to the directory `base`.
    ///
    /// A `<...>` wrapper is removed before anything else. Then:
    ///
    /// - Links with a URI scheme or starting with `//` are [`ResolvedLink::External`].
    /// - Links starting with `#` are [`ResolvedLink::Anchor`].
    /// - Everything else is a POSIX path: `?query` and `#fragment` are stripped,
    ///   percent-escapes are decoded, a leading `/` means the repository root,
    ///   and `.`/`..` are normalized.
    pub fn resolve(&self, base: &BookPath, raw: &str) -> Result<ResolvedLink, BookError> {
        let link = unwrap_link(raw);
        if link.is_empty() {
            return Err(malformed(raw, "link is empty"));
        }
        if let Some(anchor) = link.strip_prefix('#') {
            return Ok(ResolvedLink::Anchor(anchor.to_string()));
        }
        if link.starts_with("//") || has_scheme(link) {
            return Ok(ResolvedLink::External(link.to_string()));
        }

        let (path_part, fragment) = match link.split_once('#') {
            Some((path, frag)) => (path, Some(frag.to_string())),
            None => (link, None),
        };
        let path_part = path_part.split_once('?').map_or(path_part, |(p, _)| p);
        if path_part.is_empty() {
            return Err(malformed(raw, "link has no path"));
        }

        let decoded = percent_decode_str(path_part)
            .decode_utf8()
            .map_err(|_| malformed(raw, "percent-encoding is not valid UTF-8"))?;
        if decoded.chars().any(char::is_control) {
            return Err(malformed(raw, "path contains control characters"));
        }

        let mut segments: Vec<&str> = if decoded.starts_with('/') {
            Vec::new()
        } else {
            base.segments().collect()
        };
        for component in decoded.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(BookError::PathEscapesRoot {
                            link: raw.to_string(),
                        });
                    }
                }
                _ => segments.push(component),
            }
        }

        Ok(ResolvedLink::Local {
            path: BookPath(segments.join("/")),
            fragment,
        })
    }
}

/// Builds a `MalformedLink` error.
fn malformed(raw: &str, reason: &str) -> BookError {
    BookError::MalformedLink {
        link: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Trims `raw` and removes a surrounding `<...>` wrapper.
fn unwrap_link(raw: &str) -> &str {
    let link = raw.trim();
    link.strip_prefix('<')
        .and_then(|l| l.strip_suffix('>'))
        .map_or(link, str::trim)
}

/// Returns true if `link` is an external URL or a same-page anchor.
pub(crate) fn is_non_local(link: &str) -> bool {
    let link = unwrap_link(link);
    link.starts_with('#') || link.starts_with("//") || has_scheme(link)
}

/// Returns true if `link` starts with an RFC 3986 scheme followed by `:`.
///
/// Single-letter schemes are not accepted so `C:` style drive prefixes stay paths.
fn has_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    scheme.len() > 1
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
