//! Markup extraction for Indeed-style job pages.
//!
//! The interesting regions (title `h1`, company node, description node) are
//! recognized by their attributes, then tracked with plain depth counters:
//! when a region is open, every start tag bumps its counter and every end
//! tag drops it, so text is captured until the region's subtree closes.
//! The scanner does not auto-close void elements, which means a bare `<br>`
//! inside a region holds it open past the region's own end tag; pages are
//! messy enough that this overshoot is accepted and cleaned up by the
//! whitespace normalizers.

use crate::extractor::meta::index_meta;
use crate::extractor::model::JobRecord;
use crate::extractor::scanner::{Attributes, MarkupSink, scan};
use crate::extractor::text::{clean_lines, clean_text, strip_html};

#[derive(Debug, Default)]
struct RegionExtractor {
    title_parts: Vec<String>,
    company_parts: Vec<String>,
    description_parts: Vec<String>,
    title_depth: u32,
    company_depth: u32,
    description_depth: u32,
}

impl MarkupSink for RegionExtractor {
    fn on_start(&mut self, tag: &str, attrs: &Attributes) {
        if self.title_depth > 0 {
            self.title_depth += 1;
        }
        if self.company_depth > 0 {
            self.company_depth += 1;
        }
        if self.description_depth > 0 {
            self.description_depth += 1;
        }
        if self.title_depth == 0 && tag == "h1" {
            self.title_depth = 1;
        }
        if self.company_depth == 0 && is_company_tag(attrs) {
            self.company_depth = 1;
        }
        if self.description_depth == 0 && is_description_tag(attrs) {
            self.description_depth = 1;
        }
        if self.description_depth > 0 && matches!(tag, "br" | "p" | "li") {
            self.description_parts.push("\n".to_string());
        }
        // Some layouts carry the company right in an attribute; grab it
        // wherever it appears.
        let company_attr = attrs
            .get("data-company-name")
            .filter(|v| !v.is_empty())
            .or_else(|| attrs.get("data-companyname").filter(|v| !v.is_empty()));
        if let Some(value) = company_attr
            && looks_like_name(value)
        {
            self.company_parts.push(value.to_string());
        }
    }

    fn on_end(&mut self, tag: &str) {
        if self.description_depth > 0 && matches!(tag, "p" | "li" | "ul" | "ol") {
            self.description_parts.push("\n".to_string());
        }
        if self.title_depth > 0 {
            self.title_depth -= 1;
        }
        if self.company_depth > 0 {
            self.company_depth -= 1;
        }
        if self.description_depth > 0 {
            self.description_depth -= 1;
        }
    }

    fn on_text(&mut self, text: &str) {
        if self.title_depth > 0 {
            self.title_parts.push(text.to_string());
        }
        if self.company_depth > 0 {
            self.company_parts.push(text.to_string());
        }
        if self.description_depth > 0 {
            self.description_parts.push(text.to_string());
        }
    }
}

impl RegionExtractor {
    fn title(&self) -> String {
        clean_text(&self.title_parts.join(" "))
    }

    fn company(&self) -> String {
        clean_text(&self.company_parts.join(" "))
    }

    fn description(&self) -> String {
        clean_lines(&self.description_parts.concat())
    }
}

/// Company markers, matched case-insensitively: the attribute flavors vary
/// across page versions.
fn is_company_tag(attrs: &Attributes) -> bool {
    if attrs.has("data-company-name") || attrs.has("data-companyname") {
        return true;
    }
    let testid = attrs
        .get("data-testid")
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    if matches!(testid.as_str(), "company-name" | "companyname" | "company-name-link") {
        return true;
    }
    if testid.contains("company") && testid.contains("name") {
        return true;
    }
    let classes = attrs.get("class").unwrap_or("").to_ascii_lowercase();
    classes.contains("companyname") || classes.contains("company-name")
}

/// Description markers. These are matched exactly as served, since the id
/// and testid values are stable camel-case strings.
fn is_description_tag(attrs: &Attributes) -> bool {
    if attrs.get("id") == Some("jobDescriptionText") {
        return true;
    }
    let testid = attrs.get("data-testid").unwrap_or("").trim();
    if matches!(testid, "jobDescriptionText" | "job-description") {
        return true;
    }
    let classes = attrs.get("class").unwrap_or("");
    classes.contains("jobDescriptionText") || classes.contains("jobsearch-jobDescriptionText")
}

/// Attribute values like `true` or bare counters are flags, not companies.
fn looks_like_name(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    let lower = value.to_ascii_lowercase();
    if lower == "true" || lower == "false" {
        return false;
    }
    value.chars().any(char::is_alphabetic)
}

/// Extract a job record from board markup, topping up missing fields from
/// meta tags.
pub fn parse(html: &str) -> Option<JobRecord> {
    let mut extractor = RegionExtractor::default();
    scan(html, &mut extractor);
    let mut title = extractor.title();
    let company = extractor.company();
    let mut description = extractor.description();
    if title.is_empty() || description.is_empty() {
        let meta = index_meta(html);
        if title.is_empty() {
            title = clean_text(meta.first_of(&["og:title", "twitter:title"]).unwrap_or(""));
        }
        if description.is_empty() {
            description = strip_html(
                meta.first_of(&["og:description", "twitter:description", "description"])
                    .unwrap_or(""),
            );
        }
    }
    if title.is_empty() && company.is_empty() && description.is_empty() {
        return None;
    }
    Some(JobRecord {
        title: title.trim().to_string(),
        company: company.trim().to_string(),
        description: description.trim().to_string(),
    })
}
