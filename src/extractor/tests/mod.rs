use std::fs;

use crate::extractor::{ExtractError, extract_job};

fn load_fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn extracts_job_posting_from_structured_data() {
    let html = load_fixture("jsonld.html");

    let record = extract_job(&html, "careers.acme.example").expect("Failed to extract job");

    assert_eq!(record.title, "Senior Software Engineer");
    assert_eq!(record.company, "Acme Studios");
    assert_eq!(
        record.description,
        "Build & ship backend services.\nDesign APIs in Rust\nReview code with the team"
    );
}

#[test]
fn structured_data_wins_over_page_markup() {
    let html = load_fixture("jsonld.html");

    let record = extract_job(&html, "careers.acme.example").expect("Failed to extract job");

    // The page also carries an h1 and og:title, but the JSON-LD block is
    // tried first and its usable record ends the cascade.
    assert_ne!(record.title, "Join our team!");
    assert_ne!(record.title, "Careers at Acme Studios");
}

#[test]
fn skips_malformed_structured_data_blocks() {
    // The fixture's first ld+json script is truncated JSON; the second one
    // holds the posting and must still be found.
    let html = load_fixture("jsonld.html");

    let record = extract_job(&html, "careers.acme.example").expect("Failed to extract job");

    assert_eq!(record.company, "Acme Studios");
}

#[test]
fn extracts_job_posting_from_board_markup() {
    let html = load_fixture("indeed.html");

    let record = extract_job(&html, "de.indeed.com").expect("Failed to extract job");

    assert_eq!(record.title, "Platform Engineer");
    assert_eq!(record.company, "Northwind Traders");
    assert!(
        record
            .description
            .starts_with("We run the build and deploy platform for 40 product teams.")
    );
    assert!(record.description.contains("Operate our Kubernetes clusters"));
    assert!(record.description.contains("Remote-friendly, 30 vacation days."));
    // The recommendations sidebar sits outside the description container.
    assert!(!record.description.contains("Similar jobs"));
}

#[test]
fn extracts_job_posting_from_linkedin_page() {
    let html = load_fixture("linkedin.html");

    let record = extract_job(&html, "www.linkedin.com").expect("Failed to extract job");

    assert_eq!(record.title, "Data Engineer");
    assert_eq!(record.company, "Maple Analytics");
    assert!(
        record
            .description
            .starts_with("Maple Analytics builds reporting tools")
    );
    assert!(record.description.contains("Model warehouse tables in dbt"));
}

#[test]
fn host_matching_ignores_case() {
    let html = load_fixture("linkedin.html");

    let record = extract_job(&html, "WWW.LINKEDIN.COM").expect("Failed to extract job");

    assert_eq!(record.company, "Maple Analytics");
}

#[test]
fn linkedin_title_pattern_only_applies_to_linkedin_hosts() {
    let html = load_fixture("linkedin.html");

    let record = extract_job(&html, "jobs.example.com").expect("Failed to extract job");

    // On a foreign host the board-markup strategy handles the page; the h1
    // still yields a title but the "X hiring Y" split never runs.
    assert_eq!(record.title, "Data Engineer");
    assert!(record.company.is_empty());
}

#[test]
fn unusable_record_falls_through_to_next_strategy() {
    let html = concat!(
        r#"<script type="application/ld+json">{"@type":"JobPosting","title":"","description":""}</script>"#,
        "<h1>Backup Analyst</h1>",
        r#"<div data-company-name="true">Initech</div>"#,
    );

    let record = extract_job(html, "jobs.example.com").expect("Failed to extract job");

    assert_eq!(record.title, "Backup Analyst");
    assert_eq!(record.company, "Initech");
}

#[test]
fn challenge_page_is_reported_as_blocked() {
    let html = load_fixture("blocked.html");

    let result = extract_job(&html, "www.indeed.com");

    assert_eq!(result, Err(ExtractError::Blocked));
}

#[test]
fn linkedin_auth_wall_is_reported_as_auth_required() {
    let html = load_fixture("authwall.html");

    let result = extract_job(&html, "www.linkedin.com");

    assert_eq!(result, Err(ExtractError::AuthRequired));
}

#[test]
fn auth_wall_markers_on_other_hosts_stay_generic() {
    let html = load_fixture("authwall.html");

    let result = extract_job(&html, "www.fabrikam.com");

    assert_eq!(result, Err(ExtractError::NoData));
}

#[test]
fn page_without_job_data_is_no_data() {
    let html = load_fixture("empty.html");

    let result = extract_job(&html, "www.fabrikam.com");

    assert_eq!(result, Err(ExtractError::NoData));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(html in ".*", host in "[a-z0-9.-]{0,40}") {
            // Should never panic regardless of input
            let _ = extract_job(&html, &host);
        }

        #[test]
        fn extracted_fields_are_trimmed(html in ".*") {
            if let Ok(record) = extract_job(&html, "example.com") {
                prop_assert_eq!(record.title.trim(), record.title.as_str());
                prop_assert_eq!(record.company.trim(), record.company.as_str());
                prop_assert_eq!(record.description.trim(), record.description.as_str());
            }
        }
    }
}
