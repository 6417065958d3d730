//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice, running the `status` command
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["whatsapi"];
    full_args.extend(args);
    full_args.push("status");
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// CLI arguments that satisfy every required field
const REQUIRED: [&str; 6] = [
    "--base-url",
    "http://localhost:8080",
    "--api-key",
    "secret",
    "--instance",
    "main",
];
