//! Contains validation logic for the final Config struct.

use super::{Config, Result};
use crate::core::error::AppError;

/// Validates the configuration after loading and overrides.
/// Normalizes values where that is unambiguous and rejects the rest.
pub(crate) fn validate_config(config: &mut Config) -> Result<()> {
    if config.fallback_threshold == 0 {
        tracing::info!("Fallback threshold is 0; the page-wide fallback scan is disabled.");
    }

    config.webmail_host = config.webmail_host.trim().to_ascii_lowercase();
    if config.webmail_host.is_empty() {
        return Err(AppError::Config("Webmail host cannot be empty.".to_string()));
    }

    for prefix in config.noise_prefixes.iter_mut() {
        *prefix = prefix.trim().to_ascii_lowercase();
        if prefix.len() < 2 || !prefix.ends_with('.') {
            return Err(AppError::Config(format!(
                "Noise prefix '{}' must be a label followed by '.'",
                prefix
            )));
        }
    }

    for (truncated, full) in config.domain_fixes.iter_mut() {
        *truncated = truncated.trim().to_ascii_lowercase();
        *full = full.trim().to_ascii_lowercase();
        if truncated.len() < 2 || !truncated.starts_with('.') || !full.starts_with('.') {
            return Err(AppError::Config(format!(
                "Domain fix '{}' -> '{}' must map one '.suffix' to another",
                truncated, full
            )));
        }
    }

    // Candidates are lower-cased before the exact-match lookup.
    config.address_corrections = config
        .address_corrections
        .iter()
        .map(|(from, to)| (from.trim().to_ascii_lowercase(), to.trim().to_ascii_lowercase()))
        .collect();
    if config
        .address_corrections
        .keys()
        .chain(config.address_corrections.values())
        .any(|address| !address.contains('@'))
    {
        return Err(AppError::Config(
            "Address corrections must map full addresses to full addresses.".to_string(),
        ));
    }

    config.excluded_domains = config
        .excluded_domains
        .iter()
        .map(|d| d.trim().to_ascii_lowercase())
        .filter(|d| !d.is_empty())
        .collect();
    config.excluded_local_parts = config
        .excluded_local_parts
        .iter()
        .map(|l| l.trim().to_ascii_lowercase())
        .filter(|l| !l.is_empty())
        .collect();
    if config.excluded_domains.is_empty() && config.excluded_local_parts.is_empty() {
        tracing::warn!("Inclusion filter has no exclusions; service senders will be kept.");
    }

    Ok(())
}
