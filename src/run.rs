//! Command execution logic.
//!
//! Gateway commands build an [`EvolutionProvider`], run one operation and
//! print the gateway's JSON response. `translate` works offline on a file.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use whatsapi::config::{Command, ValidatedConfig};
use whatsapi::provider::{
    EvolutionProvider, MediaMessage, ProviderError, WebhookSettings, WhatsAppProvider,
};
use whatsapi::transport::HttpClient;
use whatsapi::webhook::WebhookTranslator;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// A gateway operation failed.
    #[error("Gateway request failed: {0}")]
    Gateway(#[from] ProviderError),

    /// The command does not talk to the gateway.
    #[error("Command does not use the gateway")]
    NotAGatewayCommand,

    /// Failed to read a webhook payload file.
    #[error("Failed to read payload file '{}': {source}", path.display())]
    PayloadRead {
        /// Path to the payload file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The payload did not contain a message the translator accepts.
    #[error("Payload does not contain a translatable message")]
    NotTranslated,

    /// Failed to render output as JSON.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Executes a gateway command and prints the response.
///
/// The provider's session is closed whether or not the command succeeded.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the operation fails.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    let provider = EvolutionProvider::from_config(config.to_evolution_config())?;

    let result = dispatch(&provider, command).await;
    provider.close();

    println!("{}", render(&result?)?);
    Ok(())
}

/// Translates a webhook payload file and prints the normalized message.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no translatable message.
pub fn translate(path: &Path) -> Result<(), RunError> {
    println!("{}", render(&translate_file(path)?)?);
    Ok(())
}

/// Runs one gateway command against `provider`.
async fn dispatch<H: HttpClient>(
    provider: &EvolutionProvider<H>,
    command: Command,
) -> Result<Value, RunError> {
    let response = match command {
        Command::Status => provider.get_instance_status().await?,
        Command::SendText { to, text } => provider.send_text_message(&to, &text).await?,
        Command::SendMedia {
            to,
            url,
            media_type,
            caption,
            mime_type,
            file_name,
        } => {
            let media = MediaMessage {
                url,
                media_type,
                caption,
                mime_type,
                file_name,
            };
            provider.send_media_message(&to, &media).await?
        }
        Command::SetupWebhook {
            url,
            no_by_events,
            base64,
            events,
        } => {
            let mut settings = WebhookSettings::new(url)
                .with_by_events(!no_by_events)
                .with_base64(base64);
            if !events.is_empty() {
                settings = settings.with_events(events);
            }
            provider.setup_webhook(&settings).await?
        }
        Command::DeleteMessage { id, to } => provider.delete_message(&id, &to).await?,
        Command::React {
            id,
            to,
            emoji,
            from_me,
        } => provider.send_reaction(&id, &to, &emoji, from_me).await?,
        Command::ProfilePicture { phone } => provider.get_profile_picture(&phone).await?,
        Command::Init { .. } | Command::Translate { .. } => {
            return Err(RunError::NotAGatewayCommand);
        }
    };

    Ok(response)
}

/// Reads and translates a webhook payload file into message JSON.
fn translate_file(path: &Path) -> Result<Value, RunError> {
    let body = std::fs::read(path).map_err(|source| RunError::PayloadRead {
        path: path.to_path_buf(),
        source,
    })?;

    let message = WebhookTranslator::new()
        .translate_slice(&body)
        .ok_or(RunError::NotTranslated)?;

    tracing::info!("{message}");
    Ok(message.to_value()?)
}

/// Formats a JSON value for display.
fn render(value: &Value) -> Result<String, RunError> {
    Ok(serde_json::to_string_pretty(value)?)
}
