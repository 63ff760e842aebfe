//! Terminal styling for tome's command-line output.
//!
//! Two pieces live here:
//! - [`Palette`], which wraps text in ANSI colours when the output stream is a
//!   terminal and leaves it untouched otherwise
//! - [`Highlighter`], which syntax-highlights the TOML and JSON documents the CLI
//!   prints

#![warn(missing_docs)]

use std::{
    env,
    io::{self, IsTerminal},
};

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// ANSI escape sequences.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text, used for headers.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text, used for success.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text, used for warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text, used for errors.
    pub const RED: &str = "\x1b[31m";
    /// Dim text, used for secondary details.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
}

/// Which output stream a palette styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Applies colours to text, or passes it through when colour is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Whether escapes are emitted.
    enabled: bool,
}

impl Palette {
    /// Creates a palette with colour explicitly on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables colour when `stream` is a terminal and `NO_COLOR` is unset.
    pub fn detect(stream: Stream) -> Self {
        let is_terminal = match stream {
            Stream::Stdout => io::stdout().is_terminal(),
            Stream::Stderr => io::stderr().is_terminal(),
        };
        let no_color = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(is_terminal && !no_color)
    }

    /// Returns true if escapes are emitted.
    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Wraps `text` in the given escape sequences.
    fn paint(self, codes: &[&str], text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!("{}{text}{}", codes.concat(), colors::RESET)
    }

    /// Bold cyan header.
    pub fn header(self, text: &str) -> String {
        self.paint(&[colors::BOLD, colors::CYAN], text)
    }

    /// Bold subheader.
    pub fn subheader(self, text: &str) -> String {
        self.paint(&[colors::BOLD], text)
    }

    /// Dimmed secondary text.
    pub fn dim(self, text: &str) -> String {
        self.paint(&[colors::DIM], text)
    }

    /// Green success text.
    pub fn success(self, text: &str) -> String {
        self.paint(&[colors::GREEN], text)
    }

    /// Yellow warning text.
    pub fn warning(self, text: &str) -> String {
        self.paint(&[colors::YELLOW], text)
    }

    /// Red error text.
    pub fn error(self, text: &str) -> String {
        self.paint(&[colors::RED], text)
    }

    /// Horizontal rule of the given width.
    pub fn rule(self, width: usize) -> String {
        self.dim(&"─".repeat(width))
    }
}

/// Syntax highlighter for structured CLI output.
pub struct Highlighter {
    /// Language definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Bundled themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme in use.
    theme: EmbeddedThemeName,
    /// When false, input is returned unchanged.
    enabled: bool,
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new(palette: Palette) -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
            enabled: palette.is_enabled(),
        }
    }

    /// Highlights a TOML document.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights a JSON document.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights `content` as the language with the given extension or name.
    ///
    /// Unknown languages are rendered as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        if !self.enabled {
            return content.to_string();
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// Indents every non-empty line of `content` by `width` spaces.
pub fn indent(content: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
