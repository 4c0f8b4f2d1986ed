//! Provides the `ConfigBuilder` for fluent configuration construction.

use super::loading::{apply_file_config, load_config_file};
use super::validation::validate_config;
use super::{Config, ConfigFile, DomainFix, Result};
use crate::AppError;
use std::collections::BTreeMap;
use std::path::Path;

/// Builder pattern for creating `Config` instances fluently.
///
/// Defaults are applied first, then a configuration file (explicit or found in
/// a default location), then the builder's own overrides, then validation.
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
    config_file_path: Option<String>,
    skip_default_locations: bool,
    overrides: ConfigFile,
}

impl ConfigBuilder {
    /// Creates a new builder with default configuration values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify an optional configuration file path to load.
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file_path = Some(path.into());
        self
    }

    /// Do not look for `./sender-sleuth.toml` or `./config.toml` when no
    /// explicit file is given.
    pub fn skip_default_locations(mut self) -> Self {
        self.skip_default_locations = true;
        self
    }

    pub fn fallback_threshold(mut self, value: usize) -> Self {
        self.overrides.pipeline.fallback_threshold = Some(value);
        self
    }
    pub fn noise_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.overrides.normalization.noise_prefixes = Some(prefixes);
        self
    }
    pub fn domain_fixes(mut self, fixes: Vec<(String, String)>) -> Self {
        self.overrides.normalization.domain_fixes = Some(
            fixes
                .into_iter()
                .map(|(truncated, full)| DomainFix { truncated, full })
                .collect(),
        );
        self
    }
    pub fn address_corrections(mut self, corrections: BTreeMap<String, String>) -> Self {
        self.overrides.normalization.address_corrections = Some(corrections);
        self
    }
    pub fn excluded_domains(mut self, domains: Vec<String>) -> Self {
        self.overrides.filter.excluded_domains = Some(domains);
        self
    }
    pub fn excluded_local_parts(mut self, locals: Vec<String>) -> Self {
        self.overrides.filter.excluded_local_parts = Some(locals);
        self
    }
    pub fn webmail_host(mut self, host: impl Into<String>) -> Self {
        self.overrides.page.webmail_host = Some(host.into());
        self
    }

    /// Builds the final `Config` object, applying defaults, file settings, overrides, and validation.
    pub fn build(mut self) -> Result<Config> {
        let mut loaded_path: Option<String> = None;

        if let Some(ref path) = self.config_file_path {
            match load_config_file(path) {
                Ok(file_config) => {
                    apply_file_config(&mut self.config, &file_config);
                    loaded_path = Some(path.clone());
                    tracing::info!("Loaded base configuration from specified file: {}", path);
                }
                Err(e) => {
                    tracing::error!("Failed to load specified config file '{}': {}", path, e);
                    return Err(AppError::Config(format!(
                        "Failed to load specified configuration file '{}': {:#}",
                        path, e
                    )));
                }
            }
        } else if !self.skip_default_locations {
            tracing::debug!("No config file specified, checking default locations.");
            for path_str in ["./sender-sleuth.toml", "./config.toml"] {
                if !Path::new(path_str).exists() {
                    continue;
                }
                match load_config_file(path_str) {
                    Ok(file_config) => {
                        apply_file_config(&mut self.config, &file_config);
                        loaded_path = Some(path_str.to_string());
                        tracing::info!(
                            "Loaded base configuration from default location: {}",
                            path_str
                        );
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load or parse default config '{}': {:#}",
                            path_str,
                            e
                        );
                    }
                }
            }
            if loaded_path.is_none() {
                tracing::debug!("No configuration file found. Using default values and overrides.");
            }
        }

        apply_file_config(&mut self.config, &self.overrides);
        self.config.loaded_config_path = loaded_path;
        validate_config(&mut self.config)?;

        tracing::debug!("Final configuration built successfully.");
        Ok(self.config)
    }
}
