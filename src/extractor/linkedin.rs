//! Extraction for LinkedIn job pages.
//!
//! Public LinkedIn pages put the useful bits in `og:` meta tags, with the
//! title encoded as `Company hiring Title in Location | LinkedIn`. The
//! description sits in a `show-more-less-html__markup` container, fished
//! out with a regex because the surrounding markup shifts too often to
//! track structurally.

use crate::extractor::meta::index_meta;
use crate::extractor::model::JobRecord;
use crate::extractor::text::{clean_lines, clean_text, strip_html};
use once_cell::sync::Lazy;
use regex::Regex;

static HIRING_TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+hiring\s+(.+?)\s+in\s+.+").unwrap());

static LINKEDIN_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s*LinkedIn\s*$").unwrap());

static DESCRIPTION_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)show-more-less-html__markup[^>]*>(.*?)</div>").unwrap());

static ORG_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)topcard__org-name-link[^>]*>([^<]+)</a>").unwrap());

static COMPANY_CLASS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)class="[^"]*company[^"]*"[^>]*>([^<]+)<"#).unwrap());

/// Phrases that only appear on the logged-out interstitial.
const AUTH_WALL_MARKERS: &[&str] = &[
    "sign in to view",
    "join now to see",
    "authwall",
    "sign in or join",
    "login-form",
    "\"isloggedin\":false",
];

pub fn parse(html: &str) -> Option<JobRecord> {
    let meta = index_meta(html);
    let og_title = meta.get("og:title").unwrap_or("");

    let mut title = String::new();
    let mut company = String::new();
    if let Some(captures) = HIRING_TITLE_REGEX.captures(og_title) {
        company = captures[1].trim().to_string();
        title = captures[2].trim().to_string();
    } else if !og_title.is_empty() {
        title = LINKEDIN_SUFFIX_REGEX
            .replace(og_title, "")
            .trim()
            .to_string();
    }

    let description = match DESCRIPTION_BLOCK_REGEX.captures(html) {
        Some(captures) => strip_html(&captures[1]),
        None => meta
            .first_of(&["og:description", "description"])
            .map(strip_html)
            .unwrap_or_default(),
    };

    if company.is_empty() {
        if let Some(captures) = ORG_LINK_REGEX.captures(html) {
            company = clean_text(&captures[1]);
        } else if let Some(captures) = COMPANY_CLASS_REGEX.captures(html) {
            company = clean_text(&captures[1]);
        }
    }

    if title.is_empty() && company.is_empty() && description.is_empty() {
        return None;
    }
    Some(JobRecord {
        title: clean_text(&title),
        company: clean_text(&company),
        description: clean_lines(&description).trim().to_string(),
    })
}

/// Whether the page is the logged-out wall rather than the posting.
pub fn is_auth_wall(html: &str) -> bool {
    let lowered = html.to_lowercase();
    AUTH_WALL_MARKERS.iter().any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_company_and_title_from_og_title() {
        let html = r#"<meta property="og:title" content="Acme hiring Senior Engineer in Toronto, ON | LinkedIn">"#;
        let record = parse(html).unwrap();
        assert_eq!(record.company, "Acme");
        assert_eq!(record.title, "Senior Engineer");
    }

    #[test]
    fn strips_linkedin_suffix_when_pattern_misses() {
        let html = r#"<meta property="og:title" content="Staff Developer | LinkedIn">"#;
        let record = parse(html).unwrap();
        assert_eq!(record.title, "Staff Developer");
        assert_eq!(record.company, "");
    }

    #[test]
    fn pulls_description_from_markup_container() {
        let html = concat!(
            r#"<meta property="og:title" content="Acme hiring Dev in Berlin | LinkedIn">"#,
            "<section><div class=\"show-more-less-html__markup relative\">\n",
            "<p>About the role.</p>\n<ul><li>Do things</li></ul>\n</div></section>",
        );
        let record = parse(html).unwrap();
        assert_eq!(record.description, "About the role.\nDo things");
    }

    #[test]
    fn description_container_matches_case_insensitively() {
        let html = r#"<div class="SHOW-MORE-LESS-HTML__MARKUP">Body text</div>"#;
        assert_eq!(parse(html).unwrap().description, "Body text");
    }

    #[test]
    fn falls_back_to_meta_description() {
        let html = concat!(
            r#"<meta property="og:title" content="Dev | LinkedIn">"#,
            r#"<meta property="og:description" content="Short blurb">"#,
        );
        assert_eq!(parse(html).unwrap().description, "Short blurb");
    }

    #[test]
    fn company_falls_back_to_topcard_link() {
        let html = concat!(
            r#"<meta property="og:title" content="Dev | LinkedIn">"#,
            r#"<a class="topcard__org-name-link" href="/c">  Beta Labs  </a>"#,
        );
        assert_eq!(parse(html).unwrap().company, "Beta Labs");
    }

    #[test]
    fn company_falls_back_to_company_class() {
        let html = concat!(
            r#"<meta property="og:title" content="Dev | LinkedIn">"#,
            r#"<span class="jobs-company-name">Gamma</span>"#,
        );
        assert_eq!(parse(html).unwrap().company, "Gamma");
    }

    #[test]
    fn company_fallbacks_match_case_insensitively() {
        let html = r#"<a class="Topcard__org-name-link" href="/c">Beta Labs</a>"#;
        assert_eq!(parse(html).unwrap().company, "Beta Labs");
        let html = r#"<span class="jobs-Company-name">Gamma</span>"#;
        assert_eq!(parse(html).unwrap().company, "Gamma");
    }

    #[test]
    fn empty_page_yields_none() {
        assert_eq!(parse("<html><body></body></html>"), None);
    }

    #[test]
    fn detects_auth_wall_markers() {
        assert!(is_auth_wall("<div class=\"authwall\">Join now</div>"));
        assert!(is_auth_wall("Sign In To View this job"));
        assert!(is_auth_wall(r#"<script>{"isLoggedIn":false}</script>"#));
        assert!(!is_auth_wall("<h1>Regular posting</h1>"));
    }
}
