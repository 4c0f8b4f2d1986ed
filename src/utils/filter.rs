//! Decides which validated addresses are worth reporting as senders.

use super::domain::split_address;
use crate::core::config::Config;

/// Returns false for provider infrastructure domains, automated local parts,
/// and one- or two-character domains. Everything else is kept.
pub fn should_include_email(config: &Config, email: &str) -> bool {
    let Some((local, domain)) = split_address(email) else {
        return true;
    };
    let domain = domain.to_ascii_lowercase();

    if config.excluded_domains.contains(&domain) {
        tracing::trace!(target: "sender_scan", "Excluding '{}': platform domain", email);
        return false;
    }
    if config
        .excluded_local_parts
        .contains(&local.to_ascii_lowercase())
    {
        tracing::trace!(target: "sender_scan", "Excluding '{}': automated sender", email);
        return false;
    }
    if (1..=2).contains(&domain.chars().count()) {
        tracing::trace!(target: "sender_scan", "Excluding '{}': domain too short", email);
        return false;
    }
    true
}
