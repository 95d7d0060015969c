use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("local file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("http error {status}")]
    Http { status: StatusCode, retriable: bool },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("could not build http client: {0}")]
    Client(String),
}

impl FetchError {
    /// Whether trying again with a different header profile can help.
    ///
    /// Only anti-bot status rejections qualify; transport failures and
    /// ordinary HTTP errors end the attempt immediately.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Http { retriable, .. } => *retriable,
            Self::InvalidUrl(_)
            | Self::FileNotFound(_)
            | Self::FileRead { .. }
            | Self::Transport(_)
            | Self::Client(_) => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Http {
                status,
                retriable: super::client::is_retryable_status(status),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}
