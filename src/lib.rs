//! # Sender Sleuth Core Library
//!
//! Recovers sender email addresses from the raw strings a page scanner pulls
//! out of a webmail spam folder: attribute values, link targets and rendered
//! text. Candidates are cleaned of the prefixes, suffixes and truncations the
//! mail UI introduces, validated, filtered against service senders, and
//! returned deduplicated and sorted.
//!
//! It is designed to be used either directly as a library or via the
//! `sender-sleuth` command-line tool.

mod core;
mod utils;

pub use crate::core::config::{Config, ConfigBuilder, ConfigFile, DomainFix};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{
    FragmentKind, FragmentScope, PageContext, PageScan, RawFragment, ScanOutcome,
};
pub use crate::core::sleuth::SenderSleuth;
pub use crate::utils::filter::should_include_email;
pub use crate::utils::normalize::normalize_candidate;
pub use crate::utils::validate::is_valid_email;

/// Returns the distinct sender addresses in `fragments`, sorted ascending,
/// using the default configuration.
///
/// Pure: the same fragments always produce the same result.
pub fn extract_sender_addresses(fragments: &[RawFragment]) -> Vec<String> {
    SenderSleuth::new(Config::default()).extract(fragments)
}

/// Processes a page scanner payload with the given configuration.
///
/// # Errors
/// * `AppError::InvalidInput` if the payload has no fragment list.
pub fn scan_page(config: &Config, scan: &PageScan) -> Result<ScanOutcome> {
    SenderSleuth::new(config.clone()).scan_page(scan)
}
