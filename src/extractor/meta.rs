//! Index of `<meta>` tags for Open Graph and friends.

use crate::extractor::scanner::{Attributes, MarkupSink, scan};
use std::collections::HashMap;

/// Maps a meta tag's key to its `content`. The key is `property` when
/// present and non-empty, otherwise `name`; later tags overwrite earlier
/// ones under the same key.
#[derive(Debug, Default)]
pub struct MetaIndex {
    entries: HashMap<String, String>,
}

impl MarkupSink for MetaIndex {
    fn on_start(&mut self, tag: &str, attrs: &Attributes) {
        if tag != "meta" {
            return;
        }
        let key = attrs
            .get("property")
            .filter(|v| !v.is_empty())
            .or_else(|| attrs.get("name").filter(|v| !v.is_empty()));
        let content = attrs.get("content").filter(|v| !v.is_empty());
        if let (Some(key), Some(content)) = (key, content) {
            self.entries.insert(key.to_string(), content.to_string());
        }
    }
}

impl MetaIndex {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// First non-empty value among `keys`, in the given priority order.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }
}

/// Scan `html` and index all of its meta tags.
pub fn index_meta(html: &str) -> MetaIndex {
    let mut index = MetaIndex::default();
    scan(html, &mut index);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_property_and_name_tags() {
        let html = concat!(
            "<meta property=\"og:title\" content=\"Engineer at Acme\">",
            "<meta name=\"description\" content=\"A role\">",
        );
        let meta = index_meta(html);
        assert_eq!(meta.get("og:title"), Some("Engineer at Acme"));
        assert_eq!(meta.get("description"), Some("A role"));
    }

    #[test]
    fn property_takes_priority_over_name() {
        let html = r#"<meta property="og:title" name="ignored" content="Real Title">"#;
        let meta = index_meta(html);
        assert_eq!(meta.get("og:title"), Some("Real Title"));
        assert_eq!(meta.get("ignored"), None);
    }

    #[test]
    fn empty_property_falls_back_to_name() {
        let html = r#"<meta property="" name="twitter:title" content="T">"#;
        assert_eq!(index_meta(html).get("twitter:title"), Some("T"));
    }

    #[test]
    fn tags_without_content_are_skipped() {
        let html = r#"<meta property="og:title" content=""><meta name="lonely">"#;
        let meta = index_meta(html);
        assert_eq!(meta.get("og:title"), None);
        assert_eq!(meta.get("lonely"), None);
    }

    #[test]
    fn later_tag_overwrites_earlier() {
        let html = concat!(
            "<meta name=\"dup\" content=\"first\">",
            "<meta name=\"dup\" content=\"second\">",
        );
        assert_eq!(index_meta(html).get("dup"), Some("second"));
    }

    #[test]
    fn first_of_respects_priority_order() {
        let html = r#"<meta name="twitter:title" content="TW">"#;
        let meta = index_meta(html);
        assert_eq!(meta.first_of(&["og:title", "twitter:title"]), Some("TW"));
    }
}
