//! Provider capability contract.

use std::future::Future;

use serde_json::Value;

use super::{MediaMessage, ProviderError, WebhookSettings};

/// Operations every WhatsApp gateway backend offers.
///
/// Callers hold a concrete provider (or are generic over this trait), so a
/// new backend only needs a new implementor.
///
/// Every operation returns the gateway's JSON response unvalidated.
///
/// # Implementation Notes
///
/// Implementations should handle retries internally if appropriate,
/// returning [`ProviderError::RetriesExhausted`] when all attempts fail.
pub trait WhatsAppProvider: Send + Sync {
    /// Sends a text message.
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient phone number, with or without a leading `+`
    /// * `text` - Message body
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the gateway call fails.
    fn send_text_message(
        &self,
        to: &str,
        text: &str,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;

    /// Sends an image, video, audio or document referenced by URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnsupportedMediaType`] without contacting the
    /// gateway if the media type is not supported, or another
    /// [`ProviderError`] if the gateway call fails.
    fn send_media_message(
        &self,
        to: &str,
        media: &MediaMessage,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;

    /// Fetches the connection state of the gateway session.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the gateway call fails.
    fn get_instance_status(&self) -> impl Future<Output = Result<Value, ProviderError>> + Send;

    /// Points the gateway's webhook at the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the gateway call fails.
    fn setup_webhook(
        &self,
        settings: &WebhookSettings,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;

    /// Deletes a message for everyone in the chat with `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the gateway call fails.
    fn delete_message(
        &self,
        message_id: &str,
        to: &str,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;

    /// Releases provider resources. Safe to call repeatedly.
    ///
    /// The default implementation holds no resources.
    fn close(&self) {}
}
