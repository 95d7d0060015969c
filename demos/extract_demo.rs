use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use turbo_apply::extractor::extract_job;
use turbo_apply::fetcher::source_host;
use turbo_apply::naming::make_folder_name;

/// Demo program that runs the extraction cascade over a saved HTML page
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: extract_demo <saved-page.html> [source-host]");
    };
    // The host gates site-specific strategies; default to the file name so
    // a page saved as linkedin.com-posting.html picks the right parser.
    let host = args.next().unwrap_or_else(|| source_host(&path));

    let html = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let record = extract_job(&html, &host)?;

    println!("Title:   {}", record.title);
    println!("Company: {}", record.company);
    println!("Folder:  {}", make_folder_name(&record.title, &record.company));
    println!();
    println!("{}", record.description);

    Ok(())
}
