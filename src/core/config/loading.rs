//! Handles loading configuration from files and applying it to the Config struct.

use super::{Config, ConfigFile};
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Loads configuration settings from a TOML file.
/// Returns the parsed `ConfigFile` content.
pub(crate) fn load_config_file(file_path: &str) -> anyhow::Result<ConfigFile> {
    let path = Path::new(file_path);
    if !path.is_file() {
        return Err(anyhow::anyhow!(
            "File not found or is not a file: {}",
            file_path
        ));
    }
    tracing::debug!("Attempting to read config file: {}", file_path);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", file_path))?;

    let config_file_content: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML configuration from {}", file_path))?;

    tracing::debug!("Successfully parsed configuration file: {}", file_path);
    Ok(config_file_content)
}

/// Merges the settings present in `file_config` onto `config`.
/// Tables are replaced wholesale, not merged entry by entry.
pub(crate) fn apply_file_config(config: &mut Config, file_config: &ConfigFile) {
    // Pipeline
    if let Some(threshold) = file_config.pipeline.fallback_threshold {
        config.fallback_threshold = threshold;
    }

    // Normalization
    if let Some(ref prefixes) = file_config.normalization.noise_prefixes {
        config.noise_prefixes = prefixes.clone();
    }
    if let Some(ref fixes) = file_config.normalization.domain_fixes {
        config.domain_fixes = fixes
            .iter()
            .map(|fix| (fix.truncated.clone(), fix.full.clone()))
            .collect();
    }
    if let Some(ref corrections) = file_config.normalization.address_corrections {
        config.address_corrections = corrections.clone();
    }

    // Filter
    if let Some(ref domains) = file_config.filter.excluded_domains {
        config.excluded_domains = domains.iter().cloned().collect();
    }
    if let Some(ref locals) = file_config.filter.excluded_local_parts {
        config.excluded_local_parts = locals.iter().cloned().collect();
    }

    // Page
    if let Some(ref host) = file_config.page.webmail_host {
        config.webmail_host = host.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_and_apply_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[pipeline]
fallback_threshold = 3

[[normalization.domain_fixes]]
truncated = ".ne"
full = ".net"

[filter]
excluded_local_parts = ["bounce"]
"#
        )
        .unwrap();

        let parsed = load_config_file(file.path().to_str().unwrap()).unwrap();
        let mut config = Config::default();
        apply_file_config(&mut config, &parsed);

        assert_eq!(config.fallback_threshold, 3);
        assert_eq!(
            config.domain_fixes,
            vec![(".ne".to_string(), ".net".to_string())]
        );
        assert_eq!(config.excluded_local_parts.len(), 1);
        assert!(config.excluded_local_parts.contains("bounce"));
        // Untouched sections keep their defaults.
        assert_eq!(config.webmail_host, "mail.google.com");
        assert!(config.excluded_domains.contains("google.com"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_config_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline\nfallback_threshold = ").unwrap();
        assert!(load_config_file(file.path().to_str().unwrap()).is_err());
    }
}
