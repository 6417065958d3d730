//! Error types for webhook translation.

use thiserror::Error;

/// Reason a webhook payload could not be translated.
///
/// These never escape [`WebhookTranslator::translate`]; they are logged and
/// the payload is dropped.
///
/// [`WebhookTranslator::translate`]: super::WebhookTranslator::translate
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The request body is not valid JSON.
    #[error("Webhook body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload lacks the `event`/`data` envelope.
    #[error("Invalid webhook structure: expected an object with 'event' and 'data'")]
    InvalidEnvelope,

    /// A field that must hold an object holds something else.
    #[error("Field '{0}' is not an object")]
    NotAnObject(&'static str),

    /// A field that must hold a string holds something else.
    #[error("Field '{0}' is not a string")]
    NotAString(&'static str),

    /// `data.key.id` is missing or empty.
    #[error("Message ID not found")]
    MissingMessageId,

    /// `messageTimestamp` is not a valid unix time in seconds.
    #[error("Invalid message timestamp: {0}")]
    InvalidTimestamp(String),
}
