use anyhow::bail;
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing_subscriber::EnvFilter;
use turbo_apply::config::Config;
use turbo_apply::fetcher::FetchError;
use turbo_apply::latex;
use turbo_apply::paths;
use turbo_apply::processor::{self, ProcessedJob};

/// Scrape a job posting into an application folder, or compile a resume.
#[derive(Parser)]
#[command(name = "turbo-apply", version, about)]
struct Cli {
    /// Job posting URL, saved HTML page, or .tex resume to compile
    target: Option<String>,

    /// Use the French prompt and resume templates
    #[arg(short = 'f', long)]
    french: bool,

    /// Create an empty application folder with this name instead of scraping
    #[arg(short = 'e', long, value_name = "NAME")]
    empty: Option<String>,

    /// Base directory for the application folder (defaults to the current directory)
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let base_dir = match cli.out_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    if let Some(name) = cli.empty.as_deref() {
        let processed =
            processor::process_empty_job(name, &base_dir, cli.french, config.templates_root())?;
        announce(&processed);
        return Ok(());
    }

    let target = match cli.target {
        Some(target) => target,
        None => prompt_for_target()?,
    };
    let target = target.trim().to_string();
    if target.is_empty() {
        bail!("a job posting URL, saved HTML page, or .tex file is required");
    }

    if is_tex_target(&target) {
        let tex_path = paths::parse_path_arg(&target);
        let pdf = latex::compile_resume(&tex_path).await?;
        println!("Compiled: {}", pdf.display());
        return Ok(());
    }

    match processor::scrape_and_process(&target, &base_dir, cli.french, &config).await {
        Ok(processed) => {
            announce(&processed);
            Ok(())
        }
        Err(err) => {
            if let Some(advice) = fetch_advice(&err, &target) {
                eprintln!("{advice}");
            }
            Err(err)
        }
    }
}

fn prompt_for_target() -> io::Result<String> {
    print!("Job posting link or .tex path: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// A .tex argument switches the tool into compile mode. URLs ending in
/// `.tex` still count as scrape targets.
fn is_tex_target(target: &str) -> bool {
    let lowered = target.to_ascii_lowercase();
    lowered.ends_with(".tex")
        && !lowered.starts_with("http://")
        && !lowered.starts_with("https://")
}

/// Site-specific recovery hints for the anti-bot rejections we can name.
fn fetch_advice(err: &anyhow::Error, target: &str) -> Option<&'static str> {
    let fetch = err.downcast_ref::<FetchError>()?;
    let status = fetch.status()?.as_u16();
    let lowered = target.to_ascii_lowercase();
    match status {
        999 if lowered.contains("linkedin.com") => Some(
            "LinkedIn answered with HTTP 999 (bot detection). Export your browser cookies to \
             cookies.txt next to the binary, or open the job in your browser, save it as HTML, \
             and pass the file path.",
        ),
        403 if lowered.contains("indeed.") => Some(
            "Indeed answered with HTTP 403. Refresh cookies.txt from a logged-in browser \
             session, or save the job page as HTML and pass the file path.",
        ),
        _ => None,
    }
}

fn announce(processed: &ProcessedJob) {
    println!("Created: {}", processed.folder_path.display());
    if let Some(template) = &processed.resume_template_path {
        println!("Resume template: {}", template.display());
    }
    if open_in_vscode(&processed.folder_path) {
        println!("Opened in VS Code.");
    }
}

/// Best-effort editor hand-off; failure to find an editor is not an error.
fn open_in_vscode(path: &Path) -> bool {
    for program in ["code", "code.cmd"] {
        let spawned = Command::new(program)
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if spawned.is_ok() {
            return true;
        }
    }
    false
}
