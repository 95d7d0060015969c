//! Deterministic folder names for job applications.
//!
//! A posting's title and company are reduced to an ASCII slug like
//! `Seni-Soft-Engi-Acme` that is safe on every filesystem the tool runs on.
//! Scraped company strings frequently drag in CSS junk from markup-heavy
//! pages, so company tokens pass through a noise filter before joining.

const MAX_SLUG_LEN: usize = 80;
const TITLE_TOKEN_LEN: usize = 4;
const MAX_COMPANY_TOKENS: usize = 6;
const RAW_COMPANY_TOKENS: usize = 4;
const FALLBACK_NAME: &str = "Job-Posting";

/// Style keywords that show up when a page's CSS leaks into scraped text.
const NOISE_STOP_WORDS: &[&str] = &[
    "webkit", "ms", "inline", "block", "flex", "display", "margin", "padding", "size", "color",
    "inherit", "vertical", "align", "start", "end", "auto", "rem", "em", "px",
];

/// Names Windows reserves for devices regardless of extension.
const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Build the application folder name for a scraped posting.
///
/// The title contributes each of its words abbreviated to four characters;
/// the company contributes up to six noise-filtered words verbatim. Either
/// side may be empty, and `Job-Posting` stands in when both are.
pub fn make_folder_name(title: &str, company: &str) -> String {
    let title_part = abbreviate_title(title);
    let company_part = company_slug(company);
    let slug = if !title_part.is_empty() && !company_part.is_empty() {
        trim_slug(&format!("{title_part}-{company_part}"))
    } else if !title_part.is_empty() {
        trim_slug(&title_part)
    } else if !company_part.is_empty() {
        trim_slug(&company_part)
    } else {
        FALLBACK_NAME.to_string()
    };
    trim_slug(&normalize_for_filesystem(&slug))
}

/// Turn a user-supplied folder name into a safe slug, for `--empty` mode.
pub fn sanitize_folder_name(name: &str) -> String {
    let joined = split_words(name).join("-");
    let slug = trim_slug(&joined);
    let slug = if slug.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        slug
    };
    trim_slug(&normalize_for_filesystem(&slug))
}

/// ASCII-alphanumeric runs of `text`; every other character separates words.
fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Each title word clipped to its first four characters, joined with `-`.
fn abbreviate_title(title: &str) -> String {
    split_words(title)
        .iter()
        .map(|word| {
            if word.len() <= TITLE_TOKEN_LEN {
                *word
            } else {
                &word[..TITLE_TOKEN_LEN]
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn company_slug(company: &str) -> String {
    let words = split_words(company);
    let kept = filter_company_words(&words);
    if kept.is_empty() {
        // Everything looked like noise; keep the leading raw words rather
        // than dropping the company entirely.
        return words
            .iter()
            .take(RAW_COMPANY_TOKENS)
            .copied()
            .collect::<Vec<_>>()
            .join("-");
    }
    kept.join("-")
}

/// Keep company words until the first noise word after a real one.
///
/// Noise before any accepted word is skipped so leaked markup ahead of the
/// name does not blank the slug, but noise after acceptance ends the name:
/// whatever follows is almost always styling junk, not part of the company.
fn filter_company_words<'a>(words: &[&'a str]) -> Vec<&'a str> {
    let mut kept = Vec::new();
    for word in words {
        if is_noise_word(word) {
            if !kept.is_empty() {
                break;
            }
            continue;
        }
        kept.push(*word);
        if kept.len() >= MAX_COMPANY_TOKENS {
            break;
        }
    }
    kept
}

fn is_noise_word(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    if lower == "true" || lower == "false" {
        return true;
    }
    if lower.starts_with("css") {
        return true;
    }
    if NOISE_STOP_WORDS.contains(&lower.as_str()) {
        return true;
    }
    if word.len() > 24 {
        return true;
    }
    // Long letter-digit mixtures are generated class names, not words.
    word.len() > 4
        && word.chars().any(|c| c.is_ascii_digit())
        && word.chars().any(|c| c.is_ascii_alphabetic())
}

/// Collapse separator runs and enforce the length cap on whole tokens.
///
/// The first token is always kept; if it alone exceeds the cap the slug is
/// hard-truncated so the result never exceeds `MAX_SLUG_LEN`.
fn trim_slug(slug: &str) -> String {
    let collapsed = collapse_separators(slug);
    if collapsed.len() <= MAX_SLUG_LEN {
        return collapsed;
    }
    let mut kept: Vec<&str> = Vec::new();
    let mut kept_len = 0;
    for part in collapsed.split('-') {
        if kept.is_empty() {
            kept_len = part.len();
            kept.push(part);
            continue;
        }
        if kept_len + 1 + part.len() > MAX_SLUG_LEN {
            break;
        }
        kept_len += 1 + part.len();
        kept.push(part);
    }
    let joined = kept.join("-");
    if joined.is_empty() || joined.len() > MAX_SLUG_LEN {
        truncate_at_boundary(&collapsed, MAX_SLUG_LEN)
            .trim_end_matches('-')
            .to_string()
    } else {
        joined
    }
}

fn collapse_separators(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut prev_dash = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_dash {
                out.push('-');
            }
            prev_dash = true;
        } else {
            out.push(c);
            prev_dash = false;
        }
    }
    out.trim_matches('-').to_string()
}

fn truncate_at_boundary(s: &str, max: usize) -> &str {
    let mut end = max.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Guard against names every platform cannot hold.
///
/// Applied unconditionally so a folder created on Linux stays usable when
/// the tree is synced to a Windows machine.
fn normalize_for_filesystem(slug: &str) -> String {
    let cleaned = slug.trim_matches([' ', '.']);
    if cleaned.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    let base = cleaned
        .split('.')
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    if RESERVED_DEVICE_NAMES.contains(&base.as_str()) {
        return format!("{cleaned}-job");
    }
    cleaned.to_string()
}
