//! Streaming tag-soup scanner the extraction strategies are built on.
//!
//! The scanner walks raw HTML once and reports start tags, end tags, and
//! text runs to a [`MarkupSink`]. It is deliberately not a DOM: job boards
//! serve enormous, malformed pages, and the consumers only need shallow
//! structural cues (depth counters and attribute probes) to find the title,
//! company, and description.
//!
//! Behavior contract, which the consumers rely on:
//! - tag and attribute names are ASCII-lowercased;
//! - duplicate attributes keep the last occurrence, even a valueless one;
//! - character references are decoded in text and attribute values, but not
//!   inside `<script>`/`<style>` raw text;
//! - `<tag/>` reports a start immediately followed by an end;
//! - void elements get no special casing, so a bare `<br>` opens an element
//!   that never closes;
//! - comments, doctypes, and processing instructions are skipped;
//! - a `<` that opens nothing is plain text, and a tag truncated by end of
//!   input is surfaced as text rather than dropped.

use std::borrow::Cow;

/// Receiver for scanner events. Implement only the callbacks you need.
pub trait MarkupSink {
    fn on_start(&mut self, _tag: &str, _attrs: &Attributes) {}
    fn on_end(&mut self, _tag: &str) {}
    fn on_text(&mut self, _text: &str) {}
}

/// Attributes of a start tag, in document order.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    /// Value of `name`, honoring last-wins duplicate semantics. A valueless
    /// attribute (or a valueless duplicate shadowing an earlier value)
    /// yields `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether `name` appears at all, with or without a value.
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    fn push(&mut self, name: String, value: Option<String>) {
        self.entries.push((name, value));
    }
}

/// Scan `html` once, reporting every event to `sink`.
pub fn scan(html: &str, sink: &mut dyn MarkupSink) {
    let bytes = html.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        let Some(lt) = find_byte(bytes, pos, b'<') else {
            emit_text(&html[pos..], sink);
            break;
        };
        if lt > pos {
            emit_text(&html[pos..lt], sink);
        }
        pos = scan_markup(html, lt, sink);
    }
}

fn emit_text(raw: &str, sink: &mut dyn MarkupSink) {
    if raw.is_empty() {
        return;
    }
    sink.on_text(&decode_entities(raw));
}

fn find_byte(bytes: &[u8], from: usize, byte: u8) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == byte).map(|i| from + i)
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b':' | b'_')
}

/// Dispatch on the construct starting at the `<` at `lt`; returns the new
/// cursor position.
fn scan_markup(html: &str, lt: usize, sink: &mut dyn MarkupSink) -> usize {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let rest = &html[lt..];
    if rest.starts_with("<!--") {
        return match html[lt + 4..].find("-->") {
            Some(i) => lt + 4 + i + 3,
            None => len,
        };
    }
    if rest.starts_with("<!") || rest.starts_with("<?") {
        return match find_byte(bytes, lt + 2, b'>') {
            Some(gt) => gt + 1,
            None => len,
        };
    }
    if rest.starts_with("</") {
        return scan_end_tag(html, lt, sink);
    }
    match bytes.get(lt + 1) {
        Some(b) if b.is_ascii_alphabetic() => scan_start_tag(html, lt, sink),
        _ => {
            // A '<' that opens nothing is data.
            sink.on_text("<");
            lt + 1
        }
    }
}

fn scan_end_tag(html: &str, lt: usize, sink: &mut dyn MarkupSink) -> usize {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = lt + 2;
    while i < len && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let name_start = i;
    while i < len && is_tag_name_byte(bytes[i]) {
        i += 1;
    }
    let name = html[name_start..i].to_ascii_lowercase();
    match find_byte(bytes, i, b'>') {
        Some(gt) => {
            if !name.is_empty() {
                sink.on_end(&name);
            }
            gt + 1
        }
        None => {
            emit_text(&html[lt..], sink);
            len
        }
    }
}

fn scan_start_tag(html: &str, lt: usize, sink: &mut dyn MarkupSink) -> usize {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = lt + 1;
    let name_start = i;
    while i < len && is_tag_name_byte(bytes[i]) {
        i += 1;
    }
    let tag = html[name_start..i].to_ascii_lowercase();
    let mut attrs = Attributes::default();
    let mut self_closing = false;
    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            // Truncated tag at end of input becomes data.
            emit_text(&html[lt..], sink);
            return len;
        }
        match bytes[i] {
            b'>' => {
                i += 1;
                break;
            }
            b'/' if matches!(bytes.get(i + 1), Some(b'>')) => {
                self_closing = true;
                i += 2;
                break;
            }
            b'/' => {
                // Stray slash between attributes.
                i += 1;
            }
            _ => {
                let (next, name, value) = scan_attribute(html, i);
                i = next;
                if !name.is_empty() {
                    attrs.push(name, value);
                }
            }
        }
    }
    sink.on_start(&tag, &attrs);
    if self_closing {
        sink.on_end(&tag);
        return i;
    }
    if tag == "script" || tag == "style" {
        return scan_raw_text(html, i, &tag, sink);
    }
    i
}

/// Parse one attribute starting at `start`; always advances the cursor.
fn scan_attribute(html: &str, start: usize) -> (usize, String, Option<String>) {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = start;
    let name_start = i;
    while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
        i += 1;
    }
    if i == name_start {
        return (i + 1, String::new(), None);
    }
    let name = html[name_start..i].to_ascii_lowercase();
    let mut j = i;
    while j < len && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    if j < len && bytes[j] == b'=' {
        j += 1;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let (end, raw) = if j < len && (bytes[j] == b'"' || bytes[j] == b'\'') {
            let quote = bytes[j];
            let value_start = j + 1;
            match find_byte(bytes, value_start, quote) {
                Some(q) => (q + 1, &html[value_start..q]),
                None => (len, &html[value_start..]),
            }
        } else {
            let mut k = j;
            while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                k += 1;
            }
            (k, &html[j..k])
        };
        let value = decode_entities(raw).into_owned();
        return (end, name, Some(value));
    }
    (i, name, None)
}

/// Consume `<script>`/`<style>` content up to the matching close tag.
///
/// Only `</script` (or `</style`) followed by optional whitespace and `>`
/// terminates the run, so `a < b` and even `</scripts>` stay inside the raw
/// text. Without a close tag the rest of the input is raw text.
fn scan_raw_text(html: &str, content_start: usize, tag: &str, sink: &mut dyn MarkupSink) -> usize {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = content_start;
    while let Some(lt) = find_byte(bytes, i, b'<') {
        if let Some(resume) = match_raw_terminator(html, lt, tag) {
            if lt > content_start {
                sink.on_text(&html[content_start..lt]);
            }
            sink.on_end(tag);
            return resume;
        }
        i = lt + 1;
    }
    if content_start < len {
        sink.on_text(&html[content_start..]);
    }
    len
}

fn match_raw_terminator(html: &str, lt: usize, tag: &str) -> Option<usize> {
    let bytes = html.as_bytes();
    let len = bytes.len();
    if !matches!(bytes.get(lt + 1), Some(b'/')) {
        return None;
    }
    let name_start = lt + 2;
    let name_end = name_start + tag.len();
    // Compare bytes; a fixed-width str slice could split a multibyte char.
    if name_end > len || !bytes[name_start..name_end].eq_ignore_ascii_case(tag.as_bytes()) {
        return None;
    }
    let mut i = name_end;
    while i < len && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i < len && bytes[i] == b'>' { Some(i + 1) } else { None }
}

/// Decode HTML character references in `raw`.
///
/// Handles numeric references and the named entities that actually occur in
/// job postings; anything unrecognized is passed through untouched.
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match parse_reference(rest) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn parse_reference(s: &str) -> Option<(String, usize)> {
    let body = &s[1..];
    // Byte search keeps the 32-byte lookahead safe on multibyte content.
    let end = body.bytes().take(32).position(|b| b == b';')?;
    let name = &body[..end];
    if name.is_empty() {
        return None;
    }
    let consumed = end + 2;
    if let Some(num) = name.strip_prefix('#') {
        let value = if let Some(hex) = num.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        let c = char::from_u32(value).unwrap_or('\u{fffd}');
        return Some((c.to_string(), consumed));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    named_reference(name).map(|text| (text.to_string(), consumed))
}

fn named_reference(name: &str) -> Option<&'static str> {
    let text = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "eacute" => "\u{e9}",
        "egrave" => "\u{e8}",
        "agrave" => "\u{e0}",
        "ccedil" => "\u{e7}",
        _ => return None,
    };
    Some(text)
}
