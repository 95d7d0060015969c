//! Writing the per-application folder and its files.
//!
//! Writes are whole-buffer and rerunnable: text files are overwritten with
//! freshly scraped content, while template copies are skipped when the
//! target exists so a tailored resume never gets clobbered by a re-scrape.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const WRAP_WIDTH: usize = 80;

/// Create (or reuse) the application folder under `base_dir`.
pub fn ensure_job_folder(base_dir: &Path, folder_name: &str) -> io::Result<PathBuf> {
    let folder = base_dir.join(folder_name);
    fs::create_dir_all(&folder)?;
    Ok(folder)
}

/// Write the description file, prefixed with a `Source:` line when the
/// posting came from a URL.
pub fn write_description(
    folder: &Path,
    filename: &str,
    description: &str,
    source_url: Option<&str>,
) -> io::Result<PathBuf> {
    let path = folder.join(filename);
    let mut lines: Vec<String> = Vec::new();
    if let Some(url) = source_url {
        lines.push(format!("Source: {}", url.trim()));
        lines.push(String::new());
    }
    let wrapped = wrap_text(description, WRAP_WIDTH);
    if !wrapped.is_empty() {
        lines.push(wrapped);
    }
    let payload = format!("{}\n", lines.join("\n").trim_end());
    fs::write(&path, payload)?;
    Ok(path)
}

/// Write a prompt file: the template text, a blank line, then the job
/// description, each block word-wrapped. Empty blocks are dropped.
pub fn write_prompt_file(
    folder: &Path,
    filename: &str,
    prompt_text: &str,
    description: &str,
) -> io::Result<PathBuf> {
    let path = folder.join(filename);
    let blocks: Vec<String> = [prompt_text, description]
        .into_iter()
        .map(|block| wrap_text(block, WRAP_WIDTH).trim_end().to_string())
        .filter(|block| !block.is_empty())
        .collect();
    let payload = format!("{}\n", blocks.join("\n\n").trim_end());
    fs::write(&path, payload)?;
    Ok(path)
}

/// Copy a template into the folder unless the copy already exists.
///
/// Returns `Ok(None)` when the template itself is missing, which is not an
/// error: the rest of the folder is still useful without it.
pub fn copy_template_file(
    template: &Path,
    target_dir: &Path,
    target_name: &str,
) -> io::Result<Option<PathBuf>> {
    if !template.is_file() {
        return Ok(None);
    }
    let target = target_dir.join(target_name);
    if target.exists() {
        return Ok(Some(target));
    }
    fs::copy(template, &target)?;
    Ok(Some(target))
}

/// Re-wrap `text` to `width` columns, paragraph structure preserved.
///
/// Words longer than the width stay on their own overlong line rather than
/// being split mid-word.
fn wrap_text(text: &str, width: usize) -> String {
    let mut out: Vec<String> = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        wrap_line(line, width, &mut out);
    }
    out.join("\n")
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;
    for word in line.split_whitespace() {
        let word_width = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}
