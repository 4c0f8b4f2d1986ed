//! Final syntactic gate for normalized addresses.

use super::patterns::EMAIL_REGEX;

const MIN_EMAIL_LEN: usize = 5;
const MAX_EMAIL_LEN: usize = 100;

/// Returns true when `email` is an acceptable address as-is.
///
/// No cleanup is attempted: surrounding whitespace or punctuation makes the
/// address invalid.
pub fn is_valid_email(email: &str) -> bool {
    (MIN_EMAIL_LEN..=MAX_EMAIL_LEN).contains(&email.len())
        && EMAIL_REGEX.is_match(email)
        && !email.contains("..")
        && !email.contains("@@")
        && !email.starts_with('.')
        && !email.ends_with('.')
}
