//! Compiled regular expressions shared by the extraction stages.
//!
//! `Regex` keeps no scan position between calls, so a single instance can be
//! reused across scans and threads.

use once_cell::sync::Lazy;
use regex::Regex;

/// Loose address shape used to pull candidates out of arbitrary text.
pub(crate) static CANDIDATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("candidate pattern is a valid regex")
});

/// Strict, fully anchored address grammar applied after normalization.
pub(crate) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Tracking-id style prefix such as `a1b2c3-.`.
pub(crate) static HEX_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f-]+\.").expect("hex prefix pattern is a valid regex"));

/// Short injected label such as `s.` or `pa.`.
pub(crate) static SHORT_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{1,10}\.").expect("short prefix pattern is a valid regex"));

pub(crate) static TRAILING_PUNCTUATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,;:!?]+$").expect("punctuation pattern is a valid regex"));

/// Link text glued after the TLD, e.g. `.harryinvoice`.
pub(crate) static TRAILING_GARBAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[a-zA-Z]{4,}$").expect("trailing garbage pattern is a valid regex"));
