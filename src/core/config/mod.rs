//! Configuration for the extraction pipeline.
//!
//! The lookup tables used by the normalizer and the inclusion filter live here
//! as plain data so they can be overridden from a TOML file or programmatically
//! through [`ConfigBuilder`].

mod builder;
mod loading;
mod validation;

pub use builder::ConfigBuilder;
pub(crate) use super::error::Result;

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Minimum number of distinct addresses the item-scoped pass must produce
/// before the page-wide fallback is skipped.
pub const DEFAULT_FALLBACK_THRESHOLD: usize = 5;

pub const DEFAULT_WEBMAIL_HOST: &str = "mail.google.com";

/// Labels the mail UI glues in front of real addresses.
pub const DEFAULT_NOISE_PREFIXES: &[&str] = &[
    "important.",
    "urgent.",
    "priority.",
    "high.",
    "low.",
    "new.",
    "old.",
    "temp.",
    "test.",
    "demo.",
    "sample.",
    "example.",
    "admin.",
    "support.",
    "info.",
    "contact.",
    "sales.",
    "marketing.",
    "newsletter.",
    "notification.",
    "alert.",
    "reminder.",
    "update.",
    "message.",
    "mail.",
    "email.",
    "user.",
    "customer.",
    "client.",
    "member.",
    "account.",
    "service.",
    "system.",
    "automated.",
    "auto.",
    "robot.",
    "bot.",
    "noreply.",
    "no-reply.",
    "donotreply.",
    "do-not-reply.",
];

/// Truncated top-level domain suffixes and their repaired form, checked in order.
/// The last three entries map to themselves and are kept as observed.
pub const DEFAULT_DOMAIN_FIXES: &[(&str, &str)] = &[
    (".co", ".com"),
    (".sho", ".shop"),
    (".sit", ".site"),
    (".pen", ".pen"),
    (".tra", ".tra"),
    (".por", ".por"),
];

/// Whole-address corrections, matched by exact equality.
pub const DEFAULT_ADDRESS_CORRECTIONS: &[(&str, &str)] = &[("support@am.har", "support@amazon.com")];

/// The webmail provider's own infrastructure domains.
pub const DEFAULT_EXCLUDED_DOMAINS: &[&str] = &[
    "google.com",
    "googleusercontent.com",
    "googleapis.com",
    "googlemail.com",
];

/// Local parts used by automated or service senders.
pub const DEFAULT_EXCLUDED_LOCAL_PARTS: &[&str] = &[
    "no-reply",
    "noreply",
    "donotreply",
    "spam",
    "junk",
    "automated",
    "system",
    "admin",
];

/// Effective configuration used by [`crate::SenderSleuth`].
#[derive(Debug, Clone)]
pub struct Config {
    pub fallback_threshold: usize,
    pub noise_prefixes: Vec<String>,
    pub domain_fixes: Vec<(String, String)>,
    pub address_corrections: BTreeMap<String, String>,
    pub excluded_domains: BTreeSet<String>,
    pub excluded_local_parts: BTreeSet<String>,
    pub webmail_host: String,
    /// Path of the configuration file that was applied, if any.
    pub loaded_config_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            noise_prefixes: DEFAULT_NOISE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            domain_fixes: DEFAULT_DOMAIN_FIXES
                .iter()
                .map(|(t, f)| (t.to_string(), f.to_string()))
                .collect(),
            address_corrections: DEFAULT_ADDRESS_CORRECTIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            excluded_domains: DEFAULT_EXCLUDED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            excluded_local_parts: DEFAULT_EXCLUDED_LOCAL_PARTS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            webmail_host: DEFAULT_WEBMAIL_HOST.to_string(),
            loaded_config_path: None,
        }
    }
}

/// On-disk representation of the configuration. Every field is optional;
/// unset fields leave the defaults untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub pipeline: PipelineSection,
    pub normalization: NormalizationSection,
    pub filter: FilterSection,
    pub page: PageSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    pub fallback_threshold: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizationSection {
    pub noise_prefixes: Option<Vec<String>>,
    pub domain_fixes: Option<Vec<DomainFix>>,
    pub address_corrections: Option<BTreeMap<String, String>>,
}

/// A single truncated-suffix repair, e.g. `{ truncated = ".co", full = ".com" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainFix {
    pub truncated: String,
    pub full: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub excluded_domains: Option<Vec<String>>,
    pub excluded_local_parts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageSection {
    pub webmail_host: Option<String>,
}
