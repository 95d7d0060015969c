use crate::config::Config;
use crate::fetcher::{
    cookies, headers,
    errors::FetchError,
    pipeline::decode_page,
    types::{PageSource, RawPage},
};
use crate::paths;
use reqwest::header::{CONTENT_TYPE, HeaderMap, REFERER};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Everything one fetch run needs: the client (with cookies installed) and
/// the header profiles to rotate through. Built per invocation so callers
/// control cookie and timeout settings instead of a process-wide default.
pub struct FetchContext {
    client: Client,
    profiles: &'static [HeaderMap],
}

impl FetchContext {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.http_timeout())
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(jar) = cookies::load_cookie_jar(config.cookies_file()) {
            builder = builder.cookie_provider(Arc::new(jar));
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::Client(err.to_string()))?;
        Ok(Self {
            client,
            profiles: headers::browser_profiles(),
        })
    }
}

/// Statuses that mean "a bot was suspected", worth retrying under a
/// different header profile. 999 is LinkedIn's custom rejection code.
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 403 | 429 | 999)
}

/// Fetch `target`, which may be a URL, a local file path, or a `file://`
/// URI pointing at a page saved from a browser.
#[instrument(skip_all, fields(target = %target))]
pub async fn fetch_page(target: &str, ctx: &FetchContext) -> Result<RawPage, FetchError> {
    if let Some(path) = paths::resolve_existing(target) {
        return read_local(path);
    }
    if paths::is_file_uri(target) {
        let path = paths::file_uri_to_path(target).unwrap_or_else(|| PathBuf::from(target));
        return Err(FetchError::FileNotFound(path));
    }

    let url = url::Url::parse(target)?;
    let referer = headers::site_root_referer(&url);
    let mut last_error: Option<FetchError> = None;

    for (attempt, profile) in ctx.profiles.iter().enumerate() {
        if attempt > 0 {
            tokio::time::sleep(RETRY_DELAY).await;
        }
        let mut request_headers = profile.clone();
        if let Ok(value) = referer.parse() {
            request_headers.insert(REFERER, value);
        }

        let response = ctx
            .client
            .get(url.clone())
            .headers(request_headers)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            let final_url = response.url().clone();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body_bytes = response
                .bytes()
                .await
                .map_err(FetchError::from_reqwest_error)?;
            debug!(status = %status, bytes = body_bytes.len(), "fetched page");
            return Ok(decode_page(
                PageSource::Remote(final_url),
                Some(status),
                content_type.as_deref(),
                &body_bytes,
            ));
        }

        let error = FetchError::Http {
            status,
            retriable: is_retryable_status(status),
        };
        if !error.should_retry() {
            return Err(error);
        }
        warn!(status = %status, attempt, "anti-bot status, rotating header profile");
        last_error = Some(error);
    }

    Err(last_error.unwrap_or_else(|| FetchError::Transport("no header profiles configured".to_string())))
}

fn read_local(path: PathBuf) -> Result<RawPage, FetchError> {
    let bytes = std::fs::read(&path).map_err(|source| FetchError::FileRead {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read local page");
    Ok(decode_page(PageSource::Local(path), None, None, &bytes))
}

/// Hostname used to gate site-specific extraction strategies.
///
/// For URLs this is the lowercased host; for anything else, local paths
/// included, the whole input string lowercased, so a saved file named
/// `linkedin.com-posting.html` still selects the LinkedIn strategy.
pub fn source_host(target: &str) -> String {
    url::Url::parse(target)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_else(|| target.to_ascii_lowercase())
}
