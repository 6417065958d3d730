//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::provider::EvolutionConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated gateway configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Gateway base URL (required)
    pub base_url: Url,

    /// Gateway API key (required)
    pub api_key: String,

    /// Gateway instance name (required)
    pub instance: String,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Number of retries after a failed attempt
    pub max_retries: u32,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, instance: {}, api_key: ***, timeout: {}s, max_retries: {} }}",
            self.base_url,
            self.instance,
            self.timeout.as_secs(),
            self.max_retries,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`base_url`, `api_key`, `instance`)
    /// - The base URL is invalid
    /// - The API key cannot be sent as a header
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let gateway = toml.map(|t| &t.gateway);

        let base_url = Self::resolve_base_url(cli, toml)?;

        let api_key = cli
            .api_key
            .as_deref()
            .or_else(|| gateway.and_then(|g| g.api_key.as_deref()))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_KEY,
                    "Use --api-key or set gateway.api_key in config file",
                )
            })?;
        HeaderValue::from_str(api_key).map_err(|e| ConfigError::InvalidApiKey {
            reason: e.to_string(),
        })?;

        let instance = cli
            .instance
            .as_deref()
            .or_else(|| gateway.and_then(|g| g.instance.as_deref()))
            .filter(|instance| !instance.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(
                    field::INSTANCE,
                    "Use --instance or set gateway.instance in config file",
                )
            })?;

        let timeout = Self::resolve_timeout(cli, toml)?;

        // Priority: CLI explicit > TOML > default
        let max_retries = cli
            .max_retries
            .or_else(|| gateway.and_then(|g| g.max_retries))
            .unwrap_or(defaults::MAX_RETRIES);

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            instance: instance.to_string(),
            timeout,
            max_retries,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Converts to the provider's connection settings.
    #[must_use]
    pub fn to_evolution_config(&self) -> EvolutionConfig {
        EvolutionConfig::new(self.base_url.as_str(), &self.api_key, &self.instance)
            .with_timeout(self.timeout)
            .with_max_retries(self.max_retries)
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.gateway.base_url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::BASE_URL,
                    "Use --base-url or set gateway.base_url in config file",
                )
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.gateway.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
