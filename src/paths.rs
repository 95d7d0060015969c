//! Local path handling for arguments that may be plain paths, `~` paths, or
//! `file://` URIs saved out of a browser.

use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use url::Url;

/// Resolve `value` to an existing local file, if it points at one.
///
/// Accepts plain paths, `~`-prefixed paths, and `file://` URIs. Returns
/// `None` when the value does not name a file that exists, which callers
/// treat as "this is a remote URL".
pub fn resolve_existing(value: &str) -> Option<PathBuf> {
    let candidate = if is_file_uri(value) {
        file_uri_to_path(value)?
    } else {
        expand_user(value)
    };
    if candidate.is_file() { Some(candidate) } else { None }
}

pub fn is_file_uri(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("file://")
}

/// Convert a `file://` URI into a filesystem path.
///
/// `Url::to_file_path` rejects URIs with a remote host, but browsers on
/// Windows produce `file://server/share/...` for UNC paths, so those are
/// rebuilt by hand from the decoded path.
pub fn file_uri_to_path(value: &str) -> Option<PathBuf> {
    let url = Url::parse(value).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    if let Ok(path) = url.to_file_path() {
        return Some(path);
    }
    let host = url.host_str().unwrap_or("");
    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    Some(PathBuf::from(format!("//{host}{path}")))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_user(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\'))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches(['/', '\\']));
    }
    PathBuf::from(value)
}

/// Normalize a path-like CLI argument, canonicalizing when the file exists.
pub fn parse_path_arg(value: &str) -> PathBuf {
    let path = if is_file_uri(value) {
        file_uri_to_path(value).unwrap_or_else(|| PathBuf::from(value))
    } else {
        expand_user(value)
    };
    std::fs::canonicalize(&path).unwrap_or(path)
}
