//! Structured-data extraction from `application/ld+json` script blocks.
//!
//! Most job boards embed a schema.org `JobPosting` object, which is far
//! more reliable than scraping markup. Each candidate script is parsed
//! independently so one malformed block does not hide the others, and the
//! first `JobPosting` node in document order wins.

use crate::extractor::model::JobRecord;
use crate::extractor::scripts::collect_scripts;
use crate::extractor::text::{clean_text, strip_html};
use serde_json::Value;

const JSON_LD_TYPE: &str = "application/ld+json";

/// Extract a job record from the page's JSON-LD, if any block carries one.
pub fn parse(html: &str) -> Option<JobRecord> {
    for payload in collect_payloads(html) {
        if let Some(posting) = find_job_posting(&payload) {
            return Some(normalize(posting));
        }
    }
    None
}

/// Parse every candidate script block, skipping malformed JSON.
///
/// Blocks with no `type` attribute are included: some sites omit it and
/// the JobPosting probe below rejects unrelated payloads anyway.
fn collect_payloads(html: &str) -> Vec<Value> {
    let mut payloads = Vec::new();
    for block in collect_scripts(html) {
        if block.body.is_empty() {
            continue;
        }
        if let Some(declared) = &block.declared_type
            && !declared.trim().eq_ignore_ascii_case(JSON_LD_TYPE)
        {
            continue;
        }
        if let Ok(value) = serde_json::from_str::<Value>(&block.body) {
            payloads.push(value);
        }
    }
    payloads
}

/// Depth-first search for the first node whose `@type` is `JobPosting`.
fn find_job_posting(payload: &Value) -> Option<&Value> {
    match payload {
        Value::Object(map) => {
            if is_job_posting_type(map.get("@type")) {
                return Some(payload);
            }
            map.values().find_map(find_job_posting)
        }
        Value::Array(items) => items.iter().find_map(find_job_posting),
        _ => None,
    }
}

fn is_job_posting_type(type_value: Option<&Value>) -> bool {
    match type_value {
        Some(Value::String(s)) => s == "JobPosting",
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| matches!(item, Value::String(s) if s == "JobPosting")),
        _ => false,
    }
}

fn normalize(posting: &Value) -> JobRecord {
    let title = scalar_field(posting, "title")
        .filter(|t| !t.is_empty())
        .or_else(|| scalar_field(posting, "name").filter(|n| !n.is_empty()))
        .unwrap_or_default();
    let company = hiring_organization(posting).unwrap_or_default();
    let description = posting
        .get("description")
        .and_then(Value::as_str)
        .map(strip_html)
        .unwrap_or_default();
    JobRecord {
        title: clean_text(&title),
        company: clean_text(&company),
        description: description.trim().to_string(),
    }
}

/// `hiringOrganization` is usually an object but sometimes a list; take
/// the first entry carrying a non-empty `name`.
fn hiring_organization(posting: &Value) -> Option<String> {
    match posting.get("hiringOrganization")? {
        Value::Object(org) => org.get("name").and_then(value_to_text),
        Value::Array(orgs) => orgs
            .iter()
            .filter_map(|item| item.get("name").and_then(value_to_text))
            .find(|name| !name.is_empty()),
        _ => None,
    }
}

fn scalar_field(posting: &Value, key: &str) -> Option<String> {
    posting.get(key).and_then(value_to_text)
}

/// Stringify scalar JSON values; feeds occasionally encode titles as bare
/// numbers.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
