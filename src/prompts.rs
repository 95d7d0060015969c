//! Locating and reading the bundled prompt and resume templates.
//!
//! Templates live in `templates/` next to the binary, with French variants
//! in `templates_vf/`. The French lookup falls back to the English file
//! when a variant is missing, so a partial translation set still works.

use crate::processor::ProcessError;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROMPT_TEMPLATE_FILE: &str = "prompt-template.txt";
pub const COVER_TEMPLATE_FILE: &str = "cover-letter-template.txt";
pub const RESUME_TEMPLATE_FILE: &str = "resume-template.tex";

const TEMPLATES_DIR: &str = "templates";
const TEMPLATES_DIR_FRENCH: &str = "templates_vf";

/// Path of template `file_name` under `root`, honoring the French variant.
pub fn template_path(root: &Path, french: bool, file_name: &str) -> PathBuf {
    if french {
        let localized = root.join(TEMPLATES_DIR_FRENCH).join(file_name);
        if localized.is_file() {
            return localized;
        }
    }
    root.join(TEMPLATES_DIR).join(file_name)
}

/// The resume-tailoring prompt text.
pub fn main_prompt_text(root: &Path, french: bool) -> Result<String, ProcessError> {
    read_template(&template_path(root, french, PROMPT_TEMPLATE_FILE))
}

/// The cover-letter prompt text.
pub fn cover_prompt_text(root: &Path, french: bool) -> Result<String, ProcessError> {
    read_template(&template_path(root, french, COVER_TEMPLATE_FILE))
}

fn read_template(path: &Path) -> Result<String, ProcessError> {
    if !path.is_file() {
        return Err(ProcessError::TemplateMissing {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn reads_the_english_prompt() {
        let dir = tempdir().unwrap();
        write(dir.path(), "templates/prompt-template.txt", "Tailor it.\n");
        assert_eq!(main_prompt_text(dir.path(), false).unwrap(), "Tailor it.");
    }

    #[test]
    fn french_variant_wins_when_present() {
        let dir = tempdir().unwrap();
        write(dir.path(), "templates/prompt-template.txt", "English");
        write(dir.path(), "templates_vf/prompt-template.txt", "Français");
        assert_eq!(main_prompt_text(dir.path(), true).unwrap(), "Français");
    }

    #[test]
    fn french_falls_back_to_english_file() {
        let dir = tempdir().unwrap();
        write(dir.path(), "templates/cover-letter-template.txt", "Cover");
        assert_eq!(cover_prompt_text(dir.path(), true).unwrap(), "Cover");
    }

    #[test]
    fn missing_template_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let err = main_prompt_text(dir.path(), false).unwrap_err();
        match err {
            ProcessError::TemplateMissing { path } => {
                assert!(path.ends_with("templates/prompt-template.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
