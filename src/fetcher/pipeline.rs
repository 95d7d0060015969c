use crate::fetcher::types::{PageSource, RawPage};
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// How much of the body head is searched for charset hints.
const SNIFF_WINDOW: usize = 4096;

/// Decode a fetched body into a [`RawPage`].
///
/// Decoding is lossy: a page with a few mangled bytes is still worth
/// extracting from, so invalid sequences become replacement characters
/// instead of failing the fetch.
pub fn decode_page(
    source: PageSource,
    status: Option<StatusCode>,
    content_type: Option<&str>,
    body_bytes: &[u8],
) -> RawPage {
    let encoding = detect_charset(content_type, body_bytes);
    let (decoded, _, _) = encoding.decode(body_bytes);
    RawPage {
        source,
        status,
        body: decoded.into_owned(),
        charset: encoding.name(),
        fetched_at: Utc::now(),
    }
}

fn detect_charset(content_type: Option<&str>, body_bytes: &[u8]) -> &'static Encoding {
    // 1. Check Content-Type header for charset
    if let Some(content_type) = content_type
        && let Some(captures) = CHARSET_REGEX.captures(content_type)
        && let Some(label) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(label.as_str().to_lowercase().as_bytes())
    {
        return encoding;
    }

    // 2. Check for <meta charset> in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_WINDOW)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(captures) = META_CHARSET_REGEX.captures(&search_str)
        && let Some(label) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(label.as_str().to_lowercase().as_bytes())
    {
        return encoding;
    }

    if let Some(captures) = META_HTTP_EQUIV_REGEX.captures(&search_str)
        && let Some(label) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(label.as_str().to_lowercase().as_bytes())
    {
        return encoding;
    }

    // 3. Heuristic detection over the same window
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_charset_from_content_type() {
        let body = b"<html><head><title>Test</title></head></html>";
        let encoding = detect_charset(Some("text/html; charset=utf-8"), body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn detect_charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";
        let encoding = detect_charset(Some("text/html"), body);
        // encoding_rs maps ISO-8859-1 to its windows-1252 superset
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn detect_charset_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head></html>";
        let encoding = detect_charset(Some("text/html"), body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn header_charset_wins_over_meta() {
        let body = b"<meta charset=\"shift_jis\">";
        let encoding = detect_charset(Some("text/html; charset=utf-8"), body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn decode_page_handles_windows_1252() {
        let body = b"<html>R\xe9sum\xe9</html>";
        let page = decode_page(
            PageSource::Local("test.html".into()),
            None,
            Some("text/html; charset=windows-1252"),
            body,
        );
        assert!(page.body.contains("R\u{e9}sum\u{e9}"));
        assert_eq!(page.charset, "windows-1252");
    }

    #[test]
    fn decode_page_is_lossy_not_fallible() {
        let body = b"<html>ok \xff\xfe broken</html>";
        let page = decode_page(
            PageSource::Local("test.html".into()),
            None,
            Some("text/html; charset=utf-8"),
            body,
        );
        assert!(page.body.contains("ok"));
        assert!(page.body.contains('\u{fffd}'));
    }
}
