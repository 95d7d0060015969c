//! Plain-text flattening of HTML fragments.

use crate::extractor::scanner::{Attributes, MarkupSink, scan};

/// Collects all text content, inserting newlines at paragraph-ish tags so
/// the flattened result keeps the posting's visual line structure.
#[derive(Debug, Default)]
pub struct TextFlattener {
    parts: Vec<String>,
}

impl MarkupSink for TextFlattener {
    fn on_start(&mut self, tag: &str, _attrs: &Attributes) {
        if matches!(tag, "br" | "p" | "li") {
            self.parts.push("\n".to_string());
        }
    }

    fn on_end(&mut self, tag: &str) {
        if matches!(tag, "p" | "li" | "ul" | "ol") {
            self.parts.push("\n".to_string());
        }
    }

    fn on_text(&mut self, text: &str) {
        self.parts.push(text.to_string());
    }
}

impl TextFlattener {
    /// Joined text with blank lines dropped and every line trimmed.
    pub fn into_text(self) -> String {
        clean_lines(&self.parts.concat())
    }
}

/// Flatten an HTML fragment to trimmed, newline-separated plain text.
pub fn strip_html(markup: &str) -> String {
    let mut flattener = TextFlattener::default();
    scan(markup, &mut flattener);
    flattener.into_text()
}

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim every line and drop the empty ones, keeping the line structure.
pub fn clean_lines(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_at_paragraphs_and_list_items() {
        let html = "<div><p>First</p><ul><li>One</li><li>Two</li></ul>Tail</div>";
        assert_eq!(strip_html(html), "First\nOne\nTwo\nTail");
    }

    #[test]
    fn br_splits_lines() {
        assert_eq!(strip_html("a<br>b<br/>c"), "a\nb\nc");
    }

    #[test]
    fn drops_blank_lines_and_trims() {
        let html = "<p>  spaced  </p>\n\n<p></p><p>next</p>";
        assert_eq!(strip_html(html), "spaced\nnext");
    }

    #[test]
    fn inline_markup_does_not_break_lines() {
        assert_eq!(strip_html("<p>keep <b>it</b> together</p>"), "keep it together");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(strip_html("<p>Fish &amp; Chips</p>"), "Fish & Chips");
    }

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a \t b\n\nc  "), "a b c");
        assert_eq!(clean_text("\u{a0} nb \u{a0} sp \u{a0}"), "nb sp");
    }

    #[test]
    fn clean_lines_preserves_structure() {
        assert_eq!(clean_lines("  a  \n\n  b\nc  \n"), "a\nb\nc");
    }
}
