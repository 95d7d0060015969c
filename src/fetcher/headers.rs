//! Browser-shaped header profiles for sites that reject plain clients.
//!
//! Job boards fingerprint requests aggressively, so every request carries a
//! full desktop Chrome header set. Two profiles differing in language and
//! cache hints are tried in order when a site answers with an anti-bot
//! status.

use once_cell::sync::Lazy;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, HeaderMap, HeaderName, HeaderValue,
    PRAGMA, USER_AGENT,
};
use url::Url;

const CHROME_UA_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
const CHROME_UA_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

static PROFILES: Lazy<Vec<HeaderMap>> = Lazy::new(build_profiles);

/// The header profiles, in the order they should be attempted.
pub fn browser_profiles() -> &'static [HeaderMap] {
    &PROFILES
}

/// Referer pointing at the site root, e.g. `https://www.example.com/`.
pub fn site_root_referer(url: &Url) -> String {
    format!("{}/", url.origin().ascii_serialization())
}

// Accept-Encoding is deliberately absent: the client negotiates it itself,
// and a hand-set value would turn off transparent decompression.
fn build_profiles() -> Vec<HeaderMap> {
    let user_agent = if cfg!(windows) {
        CHROME_UA_WINDOWS
    } else {
        CHROME_UA_LINUX
    };
    let platform = if cfg!(windows) {
        "\"Windows\""
    } else {
        "\"Linux\""
    };

    let mut base = HeaderMap::new();
    base.insert(USER_AGENT, HeaderValue::from_static(user_agent));
    base.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
    );
    base.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    base.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    base.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    base.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    base.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    base.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    base.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    base.insert(
        HeaderName::from_static("sec-ch-ua"),
        HeaderValue::from_static(
            "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
    );
    base.insert(
        HeaderName::from_static("sec-ch-ua-mobile"),
        HeaderValue::from_static("?0"),
    );
    base.insert(
        HeaderName::from_static("sec-ch-ua-platform"),
        HeaderValue::from_static(platform),
    );
    base.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));

    let mut alternate = base.clone();
    alternate.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-GB,en-US;q=0.9,en;q=0.8"),
    );
    alternate.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    alternate.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    alternate.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    alternate.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));

    vec![base, alternate]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provides_two_distinct_profiles() {
        let profiles = browser_profiles();
        assert_eq!(profiles.len(), 2);
        assert_ne!(
            profiles[0].get(ACCEPT_LANGUAGE),
            profiles[1].get(ACCEPT_LANGUAGE)
        );
    }

    #[test]
    fn profiles_look_like_a_browser() {
        for profile in browser_profiles() {
            let ua = profile.get(USER_AGENT).unwrap().to_str().unwrap();
            assert!(ua.contains("Chrome/"));
            assert!(profile.get("sec-ch-ua").is_some());
            assert!(profile.get("accept-encoding").is_none());
        }
    }

    #[test]
    fn referer_is_the_site_root() {
        let url = Url::parse("https://www.indeed.com/viewjob?jk=abc").unwrap();
        assert_eq!(site_root_referer(&url), "https://www.indeed.com/");
    }
}
