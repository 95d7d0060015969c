//! Job data extraction from fetched pages.
//!
//! Extraction runs a fixed cascade of strategies against the page: the
//! structured-data locator first, then a host-gated LinkedIn parser, then
//! the generic board markup parser. The first strategy returning a usable
//! record wins. When the whole cascade misses, the page is inspected to
//! diagnose why, so the operator gets told "blocked" or "sign in" instead
//! of a generic shrug.

pub mod errors;
pub mod indeed;
pub mod jsonld;
pub mod linkedin;
pub mod meta;
pub mod model;
pub mod scanner;
pub mod scripts;
pub mod text;

#[cfg(test)]
mod tests;

pub use errors::ExtractError;
pub use model::JobRecord;

use tracing::{debug, instrument};

type HostPredicate = fn(&str) -> bool;
type ParseFn = fn(&str) -> Option<JobRecord>;

/// Ordered extraction strategies. Adding a site means adding a row.
const STRATEGIES: &[(&str, HostPredicate, ParseFn)] = &[
    ("json-ld", any_host, jsonld::parse),
    ("linkedin", is_linkedin_host, linkedin::parse),
    ("board-markup", any_host, indeed::parse),
];

fn any_host(_host: &str) -> bool {
    true
}

fn is_linkedin_host(host: &str) -> bool {
    host.contains("linkedin.com")
}

/// Run the extraction cascade over `html`.
///
/// `source_host` is the lowercased host the page came from, or the raw
/// input string for local files; it gates host-specific strategies and
/// informs failure diagnosis.
#[instrument(skip_all, fields(host = %source_host))]
pub fn extract_job(html: &str, source_host: &str) -> Result<JobRecord, ExtractError> {
    let host = source_host.to_ascii_lowercase();
    for (name, applies, parse) in STRATEGIES {
        if !applies(&host) {
            continue;
        }
        if let Some(record) = parse(html).filter(JobRecord::is_usable) {
            debug!(strategy = name, title = %record.title, "strategy produced a record");
            return Ok(record);
        }
    }
    Err(diagnose_failure(html, &host))
}

/// Decide why nothing was extracted, from most to least specific.
fn diagnose_failure(html: &str, host: &str) -> ExtractError {
    let lowered = html.to_lowercase();
    if lowered.contains("captcha") || lowered.contains("verify you are a human") {
        return ExtractError::Blocked;
    }
    if is_linkedin_host(host) && linkedin::is_auth_wall(html) {
        return ExtractError::AuthRequired;
    }
    ExtractError::NoData
}
