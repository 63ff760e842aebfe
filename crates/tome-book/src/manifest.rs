//! Navigation manifest parsing.
//!
//! A manifest (`SUMMARY.md`) is a Markdown document with a small structural
//! grammar:
//!
//! ```text
//! # Summary                          <- book title (first heading, before any entry)
//!
//! - [Introduction](introduction.md)  <- chapter at depth 0
//!
//! # Getting Started                  <- part divider at depth 0
//!
//! - [Getting Started](getting-started/README.md)       <- depth 1 (inside the part)
//!   - [Installation](getting-started/installation.md)  <- depth 2
//! - [Coming Soon]()                                     <- draft (no target)
//! ```
//!
//! The document is read with pulldown-cmark, so headings, list items, links,
//! code spans and escapes follow CommonMark. Everything that is neither a
//! heading nor a list item (prose, rules, HTML comments, fenced code) is
//! ignored. Entries keep source order.

use std::{iter, mem};

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};
use tracing::debug;

use crate::{BookError, path::is_non_local};

/// Options controlling the manifest grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOptions {
    /// Spaces consumed by one nesting level. A tab always counts as one level.
    pub indent_width: usize,
    /// Lowercase extensions (without the dot) a chapter target may end in.
    pub extensions: Vec<String>,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

/// What a manifest entry points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A part heading that groups the entries after it.
    Part,
    /// A list item whose link target is empty.
    Draft,
    /// A list item pointing at a content file.
    Chapter {
        /// Link destination as parsed (trimmed).
        target: String,
    },
}

/// One structural line of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Nesting depth; part headings are always 0.
    pub depth: usize,
    /// Display title.
    pub title: String,
    /// Divider or chapter payload.
    pub kind: EntryKind,
    /// 1-based source line.
    pub line: usize,
}

impl ManifestEntry {
    /// Returns true for entries without a content file.
    pub fn is_divider(&self) -> bool {
        !matches!(self.kind, EntryKind::Chapter { .. })
    }
}

/// A parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Book title from a leading heading, if any.
    pub title: Option<String>,
    /// Entries in source order.
    pub entries: Vec<ManifestEntry>,
}

/// Manifest parser driven by pulldown-cmark events.
#[derive(Debug, Clone, Default)]
pub struct ManifestParser {
    /// Grammar options.
    options: ManifestOptions,
}

/// Maps byte offsets to lines of the manifest text.
struct LineIndex<'t> {
    /// The manifest text.
    text: &'t str,
    /// Byte offset at which each line starts.
    starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    /// Indexes the line starts of `text`.
    fn new(text: &'t str) -> Self {
        let starts = iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self { text, starts }
    }

    /// Returns the 1-based line containing `offset`.
    fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    /// Returns the text of the 1-based line `line`, without its newline.
    fn text(&self, line: usize) -> &'t str {
        let start = self.starts[line - 1];
        let end = self.starts.get(line).map_or(self.text.len(), |&next| next - 1);
        self.text[start..end].trim_end_matches('\r')
    }
}

/// A list item whose entry has not been completed yet.
struct OpenItem {
    /// 1-based line of the list marker.
    line: usize,
    /// Entry depth.
    depth: usize,
    /// Progress through the item's leading link.
    link: LinkState,
}

/// Where an open list item is in reading its `[Title](target)` link.
enum LinkState {
    /// Nothing but block structure seen yet.
    Awaiting,
    /// Inside the link; title text accumulates.
    Reading {
        /// Link destination.
        target: String,
        /// Title collected so far.
        title: String,
    },
    /// The entry has been recorded; the rest of the item is ignored.
    Done,
}

/// A heading whose text is being collected.
struct OpenHeading {
    /// 1-based line of the heading.
    line: usize,
    /// Text collected so far.
    text: String,
}

/// Per-parse state.
#[derive(Default)]
struct ParseState {
    /// Result under construction.
    manifest: Manifest,
    /// A part heading has been seen, so list items nest under it.
    in_part: bool,
    /// Heading being read, if any.
    heading: Option<OpenHeading>,
    /// List items currently open, innermost last.
    items: Vec<OpenItem>,
}

impl ParseState {
    /// Appends text to the open heading or the title of the link being read.
    fn push_text(&mut self, text: &str) {
        if let Some(heading) = &mut self.heading {
            heading.text.push_str(text);
        } else if let Some(OpenItem {
            link: LinkState::Reading { title, .. },
            ..
        }) = self.items.last_mut()
        {
            title.push_str(text);
        }
    }

    /// Records a finished heading as the book title or a part.
    fn finish_heading(&mut self, heading: OpenHeading) -> Result<(), BookError> {
        let title = heading.text.trim();
        if title.is_empty() {
            return Err(syntax(heading.line, "heading has no text"));
        }
        if self.manifest.title.is_none() && self.manifest.entries.is_empty() && !self.in_part {
            self.manifest.title = Some(title.to_string());
        } else {
            self.in_part = true;
            self.manifest.entries.push(ManifestEntry {
                depth: 0,
                title: title.to_string(),
                kind: EntryKind::Part,
                line: heading.line,
            });
        }
        Ok(())
    }
}

impl ManifestParser {
    /// Creates a parser. An indent width of zero is treated as one.
    pub fn new(mut options: ManifestOptions) -> Self {
        options.indent_width = options.indent_width.max(1);
        for ext in &mut options.extensions {
            *ext = ext.trim_start_matches('.').to_ascii_lowercase();
        }
        Self { options }
    }

    /// Parses manifest text into an ordered entry list.
    pub fn parse(&self, text: &str) -> Result<Manifest, BookError> {
        let lines = LineIndex::new(text);
        let mut state = ParseState::default();

        for (event, range) in Parser::new_ext(text, Options::empty()).into_offset_iter() {
            self.handle(&mut state, &lines, event, range.start)?;
        }

        let manifest = state.manifest;
        debug!(
            entries = manifest.entries.len(),
            title = manifest.title.as_deref().unwrap_or(""),
            "parsed manifest"
        );
        Ok(manifest)
    }

    /// Feeds one pulldown-cmark event into the parse state.
    fn handle(
        &self,
        state: &mut ParseState,
        lines: &LineIndex<'_>,
        event: Event<'_>,
        offset: usize,
    ) -> Result<(), BookError> {
        // An item must open with its link; anything else first is malformed.
        if let Some(item) = state.items.last()
            && matches!(item.link, LinkState::Awaiting)
            && !matches!(event, Event::Start(Tag::Paragraph | Tag::Link { .. }))
        {
            return Err(not_a_link(item.line));
        }

        match event {
            Event::Start(Tag::Heading { .. }) if state.items.is_empty() => {
                state.heading = Some(OpenHeading {
                    line: lines.line(offset),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = state.heading.take() {
                    state.finish_heading(heading)?;
                }
            }
            Event::Start(Tag::Item) => {
                let line = lines.line(offset);
                let level = self.nesting_level(lines.text(line), line)?;
                state.items.push(OpenItem {
                    line,
                    depth: level + usize::from(state.in_part),
                    link: LinkState::Awaiting,
                });
            }
            Event::End(TagEnd::Item) => {
                state.items.pop();
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                ..
            }) if state.heading.is_none() => {
                if let Some(item) = state.items.last_mut()
                    && matches!(item.link, LinkState::Awaiting)
                {
                    if matches!(link_type, LinkType::Autolink | LinkType::Email) {
                        return Err(not_a_link(item.line));
                    }
                    item.link = LinkState::Reading {
                        target: dest_url.trim().to_string(),
                        title: String::new(),
                    };
                }
            }
            Event::End(TagEnd::Link) => {
                if let Some(item) = state.items.last_mut()
                    && let LinkState::Reading { target, title } =
                        mem::replace(&mut item.link, LinkState::Done)
                {
                    let entry = self.entry(item, &title, &target)?;
                    state.manifest.entries.push(entry);
                }
            }
            Event::Text(text) => state.push_text(&text),
            Event::Code(code) => state.push_text(&format!("`{code}`")),
            Event::SoftBreak | Event::HardBreak => state.push_text(" "),
            _ => {}
        }
        Ok(())
    }

    /// Computes the nesting level of a list item from its leading whitespace.
    fn nesting_level(&self, line: &str, line_no: usize) -> Result<usize, BookError> {
        let width = self.options.indent_width;
        let mut tabs = 0;
        let mut spaces = 0;
        for c in line.chars() {
            match c {
                '\t' => tabs += 1,
                ' ' => spaces += 1,
                _ => break,
            }
        }
        if spaces % width != 0 {
            return Err(syntax(
                line_no,
                &format!("indentation of {spaces} spaces is not a multiple of {width}"),
            ));
        }
        Ok(tabs + spaces / width)
    }

    /// Turns a completed item link into an entry.
    fn entry(&self, item: &OpenItem, title: &str, target: &str) -> Result<ManifestEntry, BookError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(syntax(item.line, "entry has an empty title"));
        }

        let kind = if target.is_empty() {
            EntryKind::Draft
        } else {
            if !is_non_local(target) && !self.has_content_extension(target) {
                return Err(syntax(
                    item.line,
                    &format!(
                        "target '{target}' does not end in a recognised extension ({})",
                        self.options.extensions.join(", ")
                    ),
                ));
            }
            EntryKind::Chapter {
                target: target.to_string(),
            }
        };

        Ok(ManifestEntry {
            depth: item.depth,
            title: title.to_string(),
            kind,
            line: item.line,
        })
    }

    /// Checks the path part of a target against the configured extensions.
    fn has_content_extension(&self, target: &str) -> bool {
        let path = target.split(['#', '?']).next().unwrap_or_default();
        let name = path.rsplit('/').next().unwrap_or_default();
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_ascii_lowercase();
                self.options.extensions.iter().any(|e| *e == ext)
            }
            _ => false,
        }
    }
}

/// Builds the error for a list item that does not open with a link.
fn not_a_link(line: usize) -> BookError {
    syntax(line, "list item must be a link of the form [Title](target)")
}

/// Builds a `ManifestSyntax` error.
fn syntax(line: usize, message: &str) -> BookError {
    BookError::ManifestSyntax {
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Manifest {
        ManifestParser::default().parse(text).unwrap()
    }

    fn parse_err(text: &str) -> (usize, String) {
        match ManifestParser::default().parse(text) {
            Err(BookError::ManifestSyntax { line, message }) => (line, message),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    fn summary(entries: &[ManifestEntry]) -> Vec<(usize, &str)> {
        entries.iter().map(|e| (e.depth, e.title.as_str())).collect()
    }

    const TOUR: &str = "\
# Summary

- [Intro](introduction.md)

# Getting Started

- [Getting Started](getting-started/README.md)
  - [Installation and Setup](getting-started/installation.md)
";

    #[test]
    fn test_title_parts_and_nesting() {
        let manifest = parse(TOUR);

        assert_eq!(manifest.title.as_deref(), Some("Summary"));
        assert_eq!(
            summary(&manifest.entries),
            vec![
                (0, "Intro"),
                (0, "Getting Started"),
                (1, "Getting Started"),
                (2, "Installation and Setup"),
            ]
        );
        assert_eq!(manifest.entries[1].kind, EntryKind::Part);
        assert_eq!(
            manifest.entries[3].kind,
            EntryKind::Chapter {
                target: "getting-started/installation.md".into()
            }
        );
        assert_eq!(manifest.entries[3].line, 8);
    }

    #[test]
    fn test_no_title_when_entries_come_first() {
        let manifest = parse("- [Intro](intro.md)\n# Basics\n- [Types](basics/types.md)\n");

        assert!(manifest.title.is_none());
        assert_eq!(
            summary(&manifest.entries),
            vec![(0, "Intro"), (0, "Basics"), (1, "Types")]
        );
    }

    #[test]
    fn test_consecutive_headings_are_title_then_part() {
        let manifest = parse("# Tour of C++\n## Basics\n- [Types](types.md)\n");

        assert_eq!(manifest.title.as_deref(), Some("Tour of C++"));
        assert_eq!(manifest.entries[0].kind, EntryKind::Part);
        assert_eq!(manifest.entries[0].title, "Basics");
        assert_eq!(manifest.entries[1].depth, 1);
    }

    #[test]
    fn test_order_is_preserved() {
        let manifest = parse("- [Zeta](z.md)\n- [Alpha](a.md)\n- [Mu](m.md)\n");
        let titles: Vec<_> = manifest.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_whitespace_target_is_draft() {
        let manifest = parse("- [Coming Soon](   )\n- [Later]()\n");
        assert!(manifest.entries.iter().all(|e| e.kind == EntryKind::Draft));
        assert!(manifest.entries.iter().all(ManifestEntry::is_divider));
    }

    #[test]
    fn test_prose_blank_lines_and_separators_ignored() {
        let manifest = parse(
            "# Summary\n\nSome introductory prose.\n\n---\n\n- [Intro](intro.md)\n\n***\nMore prose\n",
        );
        assert_eq!(manifest.entries.len(), 1);
    }

    #[test]
    fn test_fenced_code_and_comments_ignored() {
        let manifest = parse(
            "```\n- [Fake](fake.md)\n# Not a part\n```\n<!--\n- [Hidden](hidden.md)\n-->\n<!-- one line -->\n- [Real](real.md)\n",
        );
        assert_eq!(summary(&manifest.entries), vec![(0, "Real")]);
    }

    #[test]
    fn test_bad_indentation() {
        let (line, message) = parse_err("- [A](a.md)\n   - [B](b.md)\n");
        assert_eq!(line, 2);
        assert!(message.contains("not a multiple of 2"));
    }

    #[test]
    fn test_custom_indent_width() {
        let parser = ManifestParser::new(ManifestOptions {
            indent_width: 4,
            ..ManifestOptions::default()
        });
        let manifest = parser
            .parse("- [A](a.md)\n    - [B](b.md)\n        - [C](c.md)\n")
            .unwrap();
        assert_eq!(summary(&manifest.entries), vec![(0, "A"), (1, "B"), (2, "C")]);

        assert!(parser.parse("- [A](a.md)\n  - [B](b.md)\n").is_err());
    }

    #[test]
    fn test_tabs_count_as_one_level() {
        let manifest = parse("- [A](a.md)\n\t- [B](b.md)\n");
        assert_eq!(manifest.entries[1].depth, 1);
    }

    #[test]
    fn test_unrecognised_extension() {
        let (line, message) = parse_err("- [Vector](examples/vector.cpp)\n");
        assert_eq!(line, 1);
        assert!(message.contains("vector.cpp"));
    }

    #[test]
    fn test_extension_check_ignores_fragment_and_case() {
        let manifest = parse("- [A](A.MD#top)\n- [B](<b file.markdown>)\n");
        assert_eq!(manifest.entries.len(), 2);
    }

    #[test]
    fn test_external_target_left_for_builder() {
        let manifest = parse("- [Reference](https://en.cppreference.com)\n");
        assert!(matches!(manifest.entries[0].kind, EntryKind::Chapter { .. }));
    }

    #[test]
    fn test_list_item_without_link() {
        let (_, message) = parse_err("- Just some text\n");
        assert!(message.contains("[Title](target)"));
    }

    #[test]
    fn test_empty_title() {
        let (_, message) = parse_err("- [ ](a.md)\n");
        assert!(message.contains("empty title"));
    }

    #[test]
    fn test_nested_brackets_and_escapes_in_title() {
        let manifest = parse(
            "- [The [[nodiscard]] attribute](attrs.md)\n- [Arrays \\[\\]](arrays.md)\n- [Call (f)](calls/f(x).md)\n",
        );
        assert_eq!(manifest.entries[0].title, "The [[nodiscard]] attribute");
        assert_eq!(manifest.entries[1].title, "Arrays []");
        assert_eq!(
            manifest.entries[2].kind,
            EntryKind::Chapter {
                target: "calls/f(x).md".into()
            }
        );
    }

    #[test]
    fn test_code_span_title_may_contain_bracket() {
        let manifest = parse("- [`operator]` overloads](ops.md)\n");
        assert_eq!(manifest.entries[0].title, "`operator]` overloads");
        assert_eq!(
            manifest.entries[0].kind,
            EntryKind::Chapter {
                target: "ops.md".into()
            }
        );
    }

    #[test]
    fn test_ordered_list_items() {
        let manifest = parse("1. [Intro](intro.md)\n2. [Types](types.md)\n- [Basics](basics.md)\n  1. [Integers](integers.md)\n");
        assert_eq!(
            summary(&manifest.entries),
            vec![(0, "Intro"), (0, "Types"), (0, "Basics"), (1, "Integers")]
        );
    }

    #[test]
    fn test_angle_bracket_target_is_unwrapped() {
        let manifest = parse("- [Ref](<https://en.cppreference.com/index.md>)\n");
        assert_eq!(
            manifest.entries[0].kind,
            EntryKind::Chapter {
                target: "https://en.cppreference.com/index.md".into()
            }
        );
    }

    #[test]
    fn test_autolink_is_not_an_entry() {
        let (line, message) = parse_err("- [A](a.md)\n- <https://example.com>\n");
        assert_eq!(line, 2);
        assert!(message.contains("[Title](target)"));
    }

    #[test]
    fn test_alternative_markers() {
        let manifest = parse("* [A](a.md)\n+ [B](b.md)\n");
        assert_eq!(manifest.entries.len(), 2);
    }

    #[test]
    fn test_empty_heading_is_error() {
        let (line, _) = parse_err("- [A](a.md)\n#\n");
        assert_eq!(line, 2);
    }

    #[test]
    fn test_hashtag_text_is_not_heading() {
        let manifest = parse("#hashtag\n- [A](a.md)\n");
        assert!(manifest.title.is_none());
        assert_eq!(manifest.entries.len(), 1);
    }
}
