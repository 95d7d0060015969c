//! Turning a scraped job record into an application folder on disk.

use crate::artifacts;
use crate::config::Config;
use crate::extractor::{JobRecord, extract_job};
use crate::fetcher::{FetchContext, fetch_page, source_host};
use crate::naming::{make_folder_name, sanitize_folder_name};
use crate::prompts;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

/// Placeholder written when a posting carried no description.
const MISSING_DESCRIPTION: &str = "Description not found.";

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("scraped data has neither a title nor a company; nothing to name the folder after")]
    MissingFields,

    #[error("folder name is empty")]
    EmptyName,

    #[error("template not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What got created for one application.
#[derive(Debug)]
pub struct ProcessedJob {
    pub folder_name: String,
    pub folder_path: PathBuf,
    pub description_path: Option<PathBuf>,
    pub prompt_path: PathBuf,
    pub cover_prompt_path: PathBuf,
    pub resume_template_path: Option<PathBuf>,
}

/// Materialize the folder and files for `record` under `base_dir`.
///
/// A record missing both title and company is rejected: a folder named
/// after nothing helps nobody. A missing description is fine and gets a
/// placeholder.
#[instrument(skip_all, fields(title = %record.title, company = %record.company))]
pub fn process_job(
    record: &JobRecord,
    base_dir: &Path,
    source_url: Option<&str>,
    french: bool,
    templates_root: &Path,
) -> Result<ProcessedJob, ProcessError> {
    let title = record.title.trim();
    let company = record.company.trim();
    let description = record.description.trim();
    if title.is_empty() && company.is_empty() {
        return Err(ProcessError::MissingFields);
    }

    let folder_name = make_folder_name(title, company);
    let folder_path = artifacts::ensure_job_folder(base_dir, &folder_name)?;

    let description_text = if description.is_empty() {
        MISSING_DESCRIPTION
    } else {
        description
    };
    let description_path = artifacts::write_description(
        &folder_path,
        &format!("{folder_name}.txt"),
        description_text,
        source_url,
    )?;
    let prompt_path = artifacts::write_prompt_file(
        &folder_path,
        "prompt.txt",
        &prompts::main_prompt_text(templates_root, french)?,
        description_text,
    )?;
    let cover_prompt_path = artifacts::write_prompt_file(
        &folder_path,
        "prompt-cover.txt",
        &prompts::cover_prompt_text(templates_root, french)?,
        description_text,
    )?;
    let resume_template = prompts::template_path(templates_root, french, prompts::RESUME_TEMPLATE_FILE);
    let resume_template_path = artifacts::copy_template_file(
        &resume_template,
        &folder_path,
        prompts::RESUME_TEMPLATE_FILE,
    )?;

    info!(folder = %folder_path.display(), "application folder ready");
    Ok(ProcessedJob {
        folder_name,
        folder_path,
        description_path: Some(description_path),
        prompt_path,
        cover_prompt_path,
        resume_template_path,
    })
}

/// Create a bare application folder with prompts and template but no
/// scraped description, for postings that cannot be fetched at all.
pub fn process_empty_job(
    name: &str,
    base_dir: &Path,
    french: bool,
    templates_root: &Path,
) -> Result<ProcessedJob, ProcessError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProcessError::EmptyName);
    }
    let folder_name = sanitize_folder_name(name);
    let folder_path = artifacts::ensure_job_folder(base_dir, &folder_name)?;
    let prompt_path = artifacts::write_prompt_file(
        &folder_path,
        "prompt.txt",
        &prompts::main_prompt_text(templates_root, french)?,
        "",
    )?;
    let cover_prompt_path = artifacts::write_prompt_file(
        &folder_path,
        "prompt-cover.txt",
        &prompts::cover_prompt_text(templates_root, french)?,
        "",
    )?;
    let resume_template = prompts::template_path(templates_root, french, prompts::RESUME_TEMPLATE_FILE);
    let resume_template_path = artifacts::copy_template_file(
        &resume_template,
        &folder_path,
        prompts::RESUME_TEMPLATE_FILE,
    )?;

    info!(folder = %folder_path.display(), "empty application folder ready");
    Ok(ProcessedJob {
        folder_name,
        folder_path,
        description_path: None,
        prompt_path,
        cover_prompt_path,
        resume_template_path,
    })
}

/// End-to-end run for one target: fetch, extract, then build the folder.
pub async fn scrape_and_process(
    target: &str,
    base_dir: &Path,
    french: bool,
    config: &Config,
) -> anyhow::Result<ProcessedJob> {
    let ctx = FetchContext::new(config)?;
    let page = fetch_page(target, &ctx).await?;
    let host = source_host(target);
    let record = extract_job(&page.body, &host)?;
    info!(
        title = %record.title,
        company = %record.company,
        source = %page.source,
        charset = page.charset,
        "job record extracted"
    );
    let processed = process_job(
        &record,
        base_dir,
        Some(target),
        french,
        config.templates_root(),
    )?;
    Ok(processed)
}
