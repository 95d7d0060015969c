use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use url::Url;

/// Where a page's bytes came from.
#[derive(Debug, Clone)]
pub enum PageSource {
    Remote(Url),
    Local(PathBuf),
}

impl Display for PageSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSource::Remote(url) => write!(f, "{url}"),
            PageSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A fetched page, decoded to UTF-8 and ready for extraction.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub source: PageSource,
    /// HTTP status, absent for local files.
    pub status: Option<StatusCode>,
    pub body: String,
    /// Name of the encoding the body was decoded from.
    pub charset: &'static str,
    pub fetched_at: DateTime<Utc>,
}
