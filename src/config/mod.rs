//! Configuration layer for whatsapi.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the `[gateway]` section
//! 3. **Built-in defaults** - `timeout` (30s) and `max_retries` (3) only
//!
//! `base_url`, `api_key` and `instance` have no defaults; an empty value
//! counts as missing.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{GatewaySection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
