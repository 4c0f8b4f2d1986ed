//! Cleans up candidates that the mail UI has mangled.
//!
//! Each step undoes one kind of damage seen in the rendered message list:
//! tracking ids and labels glued in front of the address, punctuation and link
//! text glued behind it, and top-level domains cut short by truncation. The
//! steps run in a fixed order; prefixes come off before trailing text so a
//! short prefix is never mistaken for garbage left by a neighbouring match.

use super::patterns::{
    HEX_PREFIX_REGEX, SHORT_PREFIX_REGEX, TRAILING_GARBAGE_REGEX, TRAILING_PUNCTUATION_REGEX,
};
use crate::core::config::Config;

fn strip_hex_prefix(email: &str) -> String {
    HEX_PREFIX_REGEX.replace(email, "").into_owned()
}

/// Drops a 1-10 letter label and its dot, unless nothing would be left.
fn strip_short_prefix(email: &str) -> String {
    match SHORT_PREFIX_REGEX.find(email) {
        Some(m) if m.end() < email.len() => email[m.end()..].to_string(),
        _ => email.to_string(),
    }
}

/// Drops the longest configured noise prefix, once.
fn strip_noise_prefix(config: &Config, email: &str) -> String {
    config
        .noise_prefixes
        .iter()
        .filter(|prefix| email.starts_with(prefix.as_str()))
        .max_by_key(|prefix| prefix.len())
        .map(|prefix| email[prefix.len()..].to_string())
        .unwrap_or_else(|| email.to_string())
}

fn strip_trailing_punctuation(email: &str) -> String {
    TRAILING_PUNCTUATION_REGEX.replace(email, "").into_owned()
}

fn strip_trailing_garbage(email: &str) -> String {
    TRAILING_GARBAGE_REGEX.replace(email, "").into_owned()
}

/// Rewrites the first truncated suffix found in the table, in table order.
fn repair_truncated_domain(config: &Config, email: &str) -> String {
    for (truncated, full) in &config.domain_fixes {
        if let Some(stem) = email.strip_suffix(truncated.as_str()) {
            return format!("{}{}", stem, full);
        }
    }
    email.to_string()
}

fn apply_address_correction(config: &Config, email: &str) -> String {
    config
        .address_corrections
        .get(email)
        .cloned()
        .unwrap_or_else(|| email.to_string())
}

/// Runs the full cleanup sequence on one candidate.
///
/// Always returns a string; whether it is a usable address is decided later by
/// [`crate::is_valid_email`].
pub fn normalize_candidate(config: &Config, candidate: &str) -> String {
    let mut email = candidate.to_lowercase();
    email = strip_hex_prefix(&email);
    email = strip_short_prefix(&email);
    email = strip_noise_prefix(config, &email);
    email = strip_trailing_punctuation(&email);
    email = strip_trailing_garbage(&email);
    email = repair_truncated_domain(config, &email);
    email = apply_address_correction(config, &email);
    let email = email.trim().to_string();

    if email != candidate {
        tracing::trace!(target: "normalize", "Normalized '{}' -> '{}'", candidate, email);
    }
    email
}
