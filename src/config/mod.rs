//! Runtime configuration for the scraper and folder generator.
//!
//! Everything has a working default so the binary can run with no setup:
//! cookies and templates are looked up next to the executable, which is how
//! the tool is normally distributed. Environment variables override each
//! location individually.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable names. Public so tests can refer to them.
pub const ENV_COOKIES_FILE: &str = "TURBO_APPLY_COOKIES_FILE";
pub const ENV_TEMPLATES_ROOT: &str = "TURBO_APPLY_TEMPLATES_ROOT";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "TURBO_APPLY_HTTP_TIMEOUT_SECS";

/// Defaults used when environment variables are absent.
const DEFAULT_COOKIES_FILE: &str = "cookies.txt";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    cookies_file: PathBuf,
    templates_root: PathBuf,
    http_timeout: Duration,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        cookies_file: impl Into<PathBuf>,
        templates_root: impl Into<PathBuf>,
        http_timeout: Duration,
    ) -> Self {
        Self {
            cookies_file: cookies_file.into(),
            templates_root: templates_root.into(),
            http_timeout,
        }
    }

    /// Load from environment variables, falling back to paths next to the
    /// running executable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_dir = default_app_dir();
        let cookies_file = env::var(ENV_COOKIES_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_dir.join(DEFAULT_COOKIES_FILE));
        let templates_root = env::var(ENV_TEMPLATES_ROOT)
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_dir.clone());
        let http_timeout = match env::var(ENV_HTTP_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_HTTP_TIMEOUT_SECS,
                    reason: format!("expected a number of seconds, got '{raw}'"),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };
        Ok(Self {
            cookies_file,
            templates_root,
            http_timeout,
        })
    }

    /// Netscape-format cookie file loaded into the HTTP client, if present.
    pub fn cookies_file(&self) -> &Path {
        &self.cookies_file
    }
    /// Directory containing `templates/` and `templates_vf/`.
    pub fn templates_root(&self) -> &Path {
        &self.templates_root
    }
    /// Overall request timeout for a single fetch attempt.
    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

/// Directory the executable lives in, used as the base for bundled files.
fn default_app_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [ENV_COOKIES_FILE, ENV_TEMPLATES_ROOT, ENV_HTTP_TIMEOUT_SECS] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert!(cfg.cookies_file().ends_with(DEFAULT_COOKIES_FILE));
        assert_eq!(cfg.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_COOKIES_FILE, "/tmp/jar.txt");
            env::set_var(ENV_TEMPLATES_ROOT, "/tmp/templates");
            env::set_var(ENV_HTTP_TIMEOUT_SECS, "5");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.cookies_file(), Path::new("/tmp/jar.txt"));
        assert_eq!(cfg.templates_root(), Path::new("/tmp/templates"));
        assert_eq!(cfg.http_timeout(), Duration::from_secs(5));
        clear_env();
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_HTTP_TIMEOUT_SECS, "soon");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        clear_env();
    }
}
