//! Eligibility scan run on every submission before it is turned into a QR code.
//!
//! Rules run in a fixed order and the first failing rule decides the reason,
//! so a rejection implies every earlier rule passed.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

const MAX_INPUT_CHARS: usize = 5000;
const MAX_URL_CHARS: usize = 2000;
const MAX_TEXT_CHARS: usize = 800;

const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];
const BLOCKED_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];
const FLAGGED_TERMS: [&str; 4] = ["hack", "malware", "phishing", "exploit"];

// Unicode whitespace plus the ASCII file/group/record/unit separators.
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

// scheme, host (everything up to the first '/'), optional path
static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z][a-z0-9+.\-]*://)([^/]+)(/.*)?$").expect("URL shape pattern is valid")
});

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Input is empty.")]
    Empty,

    #[error("Input is too long. Keep it under 5000 characters.")]
    InputTooLong,

    #[error("Input contains invalid control characters.")]
    ControlCharacters,

    #[error("Only http/https links are allowed.")]
    UnsupportedScheme,

    #[error("Local/loopback links are not allowed.")]
    LoopbackHost,

    #[error("URL is too long. Keep it under 2000 characters.")]
    UrlTooLong,

    #[error("URL failed the safety scan.")]
    UrlFlagged,

    #[error("Text is too long. Keep it under 800 characters.")]
    TextTooLong,

    #[error("Text failed the safety scan.")]
    TextFlagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Url,
    PlainText,
}

/// A submission that passed every rule.
#[derive(Debug)]
pub struct Submission {
    raw: String,
    trimmed_len: usize,
    shape: Shape,
}

impl Submission {
    pub fn parse(s: String) -> Result<Self, Rejection> {
        let trimmed = s.trim_matches(is_trimmable);

        if trimmed.is_empty() {
            return Err(Rejection::Empty);
        }

        let trimmed_len = trimmed.chars().count();

        if trimmed_len > MAX_INPUT_CHARS {
            return Err(Rejection::InputTooLong);
        }

        if trimmed.chars().any(|c| c < '\u{9}') {
            return Err(Rejection::ControlCharacters);
        }

        let shape = match URL_SHAPE.captures(trimmed) {
            Some(caps) => {
                let scheme = caps.get(1).map_or("", |m| m.as_str());
                let host = caps.get(2).map_or("", |m| m.as_str());
                check_url(trimmed, trimmed_len, scheme, host)?;
                Shape::Url
            }
            None => {
                check_text(trimmed, trimmed_len)?;
                Shape::PlainText
            }
        };

        Ok(Self {
            raw: s,
            trimmed_len,
            shape,
        })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn trimmed(&self) -> &str {
        self.raw.trim_matches(is_trimmable)
    }

    pub fn trimmed_len(&self) -> usize {
        self.trimmed_len
    }
}

impl AsRef<str> for Submission {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

fn check_url(text: &str, len: usize, scheme: &str, host: &str) -> Result<(), Rejection> {
    let scheme = scheme.to_lowercase();
    if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
        return Err(Rejection::UnsupportedScheme);
    }

    // Compared with any port still attached, so "localhost:8000" passes.
    let host = host.to_lowercase();
    if BLOCKED_HOSTS.contains(&host.as_str()) {
        return Err(Rejection::LoopbackHost);
    }

    if len > MAX_URL_CHARS {
        return Err(Rejection::UrlTooLong);
    }

    if contains_flagged_term(text) {
        return Err(Rejection::UrlFlagged);
    }

    Ok(())
}

fn check_text(text: &str, len: usize) -> Result<(), Rejection> {
    if len > MAX_TEXT_CHARS {
        return Err(Rejection::TextTooLong);
    }

    if contains_flagged_term(text) {
        return Err(Rejection::TextFlagged);
    }

    Ok(())
}

fn contains_flagged_term(text: &str) -> bool {
    let lowered = text.to_lowercase();
    FLAGGED_TERMS.iter().any(|term| lowered.contains(term))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub accepted: bool,
    pub reason: String,
}

impl Verdict {
    pub const OK: &'static str = "OK";
}

impl From<&Result<Submission, Rejection>> for Verdict {
    fn from(result: &Result<Submission, Rejection>) -> Self {
        match result {
            Ok(_) => Self {
                accepted: true,
                reason: Verdict::OK.to_string(),
            },
            Err(rejection) => Self {
                accepted: false,
                reason: rejection.to_string(),
            },
        }
    }
}

/// Runs the scan and reports the outcome as an accept/reject pair.
pub fn evaluate(text: &str) -> Verdict {
    Verdict::from(&Submission::parse(text.to_string()))
}
