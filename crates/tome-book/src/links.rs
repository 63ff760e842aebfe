//! Link extraction from chapter bodies.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};

/// Returns the raw destinations of all inline, reference and image links in
/// `markdown`, in document order.
///
/// Autolinks (`<https://...>`, `<user@example.com>`) are skipped since they can
/// never point into the book. Text inside code spans and fenced blocks is not
/// scanned, so example code that looks like a link is never reported.
pub fn extract_links(markdown: &str) -> Vec<String> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    Parser::new_ext(markdown, options)
        .filter_map(|event| match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                ..
            })
            | Event::Start(Tag::Image {
                link_type,
                dest_url,
                ..
            }) if !matches!(link_type, LinkType::Autolink | LinkType::Email) => {
                Some(dest_url.into_string())
            }
            _ => None,
        })
        .collect()
}
