//! Compiling a tailored resume to PDF with pdflatex.
//!
//! The output is always named `Resume.pdf` regardless of the source file,
//! and LaTeX's auxiliary droppings are removed both before and after the
//! run so the application folder stays clean.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Basename for the compiled PDF, passed to pdflatex as the job name.
const OUTPUT_STEM: &str = "Resume";

/// Environment override for the pdflatex binary location.
pub const ENV_PDFLATEX: &str = "TURBO_APPLY_PDFLATEX";

const AUX_EXTENSIONS: &[&str] = &[
    ".aux",
    ".log",
    ".out",
    ".toc",
    ".nav",
    ".snm",
    ".fls",
    ".fdb_latexmk",
    ".synctex.gz",
];

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("not a .tex file: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("pdflatex not found; install TeX Live or MiKTeX, or set {ENV_PDFLATEX}")]
    ToolchainMissing,

    #[error("pdflatex failed:\n{output}")]
    Failed { output: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compile `tex_path` in its own directory, producing `Resume.pdf` there.
pub async fn compile_resume(tex_path: &Path) -> Result<PathBuf, CompileError> {
    let is_tex = tex_path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("tex"))
        .unwrap_or(false);
    if !is_tex || !tex_path.is_file() {
        return Err(CompileError::InvalidInput(tex_path.to_path_buf()));
    }
    let dir = tex_path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let Some(file_name) = tex_path.file_name() else {
        return Err(CompileError::InvalidInput(tex_path.to_path_buf()));
    };

    let Some(pdflatex) = find_pdflatex() else {
        return Err(CompileError::ToolchainMissing);
    };
    debug!(pdflatex = %pdflatex.display(), "compiling resume");

    cleanup_aux_files(dir, OUTPUT_STEM);
    let result = Command::new(&pdflatex)
        .arg("-interaction=nonstopmode")
        .arg(format!("-jobname={OUTPUT_STEM}"))
        .arg(file_name)
        .current_dir(dir)
        .output()
        .await;
    cleanup_aux_files(dir, OUTPUT_STEM);

    let output = result?;
    if !output.status.success() {
        return Err(CompileError::Failed {
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
        });
    }
    let pdf = dir.join(format!("{OUTPUT_STEM}.pdf"));
    info!(pdf = %pdf.display(), "resume compiled");
    Ok(pdf)
}

/// Remove LaTeX auxiliary files for `stem` in `dir`; missing files are fine.
fn cleanup_aux_files(dir: &Path, stem: &str) {
    for ext in AUX_EXTENSIONS {
        let _ = fs::remove_file(dir.join(format!("{stem}{ext}")));
    }
}

/// Locate pdflatex: the env override first, then PATH, then the usual
/// Windows install locations.
fn find_pdflatex() -> Option<PathBuf> {
    if let Some(configured) = env::var_os(ENV_PDFLATEX) {
        return Some(PathBuf::from(configured));
    }
    let exe_name = format!("pdflatex{}", env::consts::EXE_SUFFIX);
    if let Some(path_var) = env::var_os("PATH") {
        for dir in env::split_paths(&path_var) {
            let candidate = dir.join(&exe_name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    windows_install_candidates()
        .into_iter()
        .find(|candidate| candidate.is_file())
}

#[cfg(windows)]
fn windows_install_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from(r"C:\Program Files\MiKTeX\miktex\bin\x64\pdflatex.exe"),
        PathBuf::from(r"C:\Program Files (x86)\MiKTeX\miktex\bin\pdflatex.exe"),
        PathBuf::from(r"C:\texlive\2024\bin\windows\pdflatex.exe"),
        PathBuf::from(r"C:\texlive\2023\bin\windows\pdflatex.exe"),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.insert(
            0,
            home.join(r"AppData\Local\Programs\MiKTeX\miktex\bin\x64\pdflatex.exe"),
        );
    }
    candidates
}

#[cfg(not(windows))]
fn windows_install_candidates() -> Vec<PathBuf> {
    Vec::new()
}
