//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Gateway connection section
    #[serde(default)]
    pub gateway: GatewaySection,
}

/// Gateway connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    /// Gateway base URL
    pub base_url: Option<String>,

    /// Gateway API key
    pub api_key: Option<String>,

    /// Gateway instance name
    pub instance: Option<String>,

    /// Per-attempt request timeout in seconds
    pub timeout: Option<u64>,

    /// Number of retries after a failed attempt
    pub max_retries: Option<u32>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# whatsapi Configuration File

[gateway]
# Evolution API base URL (required, can be overridden by --base-url)
base_url = "http://localhost:8080"

# API key sent in the `apikey` header (required)
# api_key = "your-api-key"

# WhatsApp instance name on the gateway (required)
# instance = "my-instance"

# Per-attempt request timeout in seconds (default: 30)
# timeout = 30

# Retries after a failed attempt, made immediately (default: 3)
# max_retries = 3
"#
    .to_string()
}
