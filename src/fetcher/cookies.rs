//! Loading a Netscape-format `cookies.txt` into the HTTP client.
//!
//! Sites like LinkedIn only serve full postings to a logged-in browser, so
//! the operator can export their session cookies and drop the file next to
//! the binary. Expiry fields are ignored on purpose: a stale session that
//! still works is better than none.

use reqwest::cookie::Jar;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// Fields per line in the Netscape format:
/// domain, subdomain flag, path, secure flag, expiry, name, value.
const FIELD_COUNT: usize = 7;

/// Build a cookie jar from `path`, or `None` when there is no usable file.
pub fn load_cookie_jar(path: &Path) -> Option<Jar> {
    if !path.is_file() {
        return None;
    }
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read cookie file");
            return None;
        }
    };
    let jar = Jar::default();
    let mut loaded = 0usize;
    for line in contents.lines() {
        // The #HttpOnly_ prefix marks a real cookie line, not a comment.
        let line = line.strip_prefix("#HttpOnly_").unwrap_or(line);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.splitn(FIELD_COUNT, '\t').collect();
        if fields.len() < FIELD_COUNT {
            continue;
        }
        let domain = fields[0].trim_start_matches('.');
        let cookie_path = fields[2];
        let secure = fields[3].eq_ignore_ascii_case("TRUE");
        let name = fields[5];
        let value = fields[6];
        if domain.is_empty() || name.is_empty() {
            continue;
        }
        let scheme = if secure { "https" } else { "http" };
        let Ok(url) = Url::parse(&format!("{scheme}://{domain}/")) else {
            continue;
        };
        let mut cookie = format!("{name}={value}; Domain={domain}; Path={cookie_path}");
        if secure {
            cookie.push_str("; Secure");
        }
        jar.add_cookie_str(&cookie, &url);
        loaded += 1;
    }
    debug!(path = %path.display(), count = loaded, "loaded cookie file");
    Some(jar)
}
