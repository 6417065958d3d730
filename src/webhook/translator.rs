//! Webhook payload to normalized message translation.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::jid::{is_group_jid, jid_to_phone};
use crate::message::{MessageDirection, WhatsAppMessage};
use crate::time::{Clock, SystemClock};

use super::TranslateError;
use super::event::is_message_upsert;
use super::extract::{detect_type, extract_content, integer};

/// Translates gateway webhook payloads into [`WhatsAppMessage`]s.
///
/// Only new-message events (`messages.upsert` / `MESSAGES_UPSERT`) produce a
/// message. Other events are ignored with a debug log; structurally invalid
/// payloads are dropped with a warning. Translation never returns an error.
///
/// # Type Parameters
///
/// - `C`: The clock used to stamp messages that carry no timestamp
///   (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use whatsapi::webhook::WebhookTranslator;
///
/// let translator = WebhookTranslator::new();
/// let payload = json!({
///     "event": "messages.upsert",
///     "data": {
///         "key": {"id": "ABC", "remoteJid": "972501234567@s.whatsapp.net", "fromMe": false},
///         "message": {"conversation": "hello"},
///         "messageTimestamp": 1700000000,
///         "pushName": "Dana"
///     }
/// });
///
/// let message = translator.translate(&payload).unwrap();
/// assert_eq!(message.from_number, "+972501234567");
/// assert_eq!(message.text(), Some("hello"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WebhookTranslator<C = SystemClock> {
    clock: C,
}

impl WebhookTranslator<SystemClock> {
    /// Creates a translator that uses the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C> WebhookTranslator<C> {
    /// Replaces the clock used for missing timestamps.
    ///
    /// This is primarily useful for tests that assert on the fallback time.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> WebhookTranslator<C2> {
        WebhookTranslator { clock }
    }
}

impl<C: Clock> WebhookTranslator<C> {
    /// Translates a decoded webhook payload.
    ///
    /// Returns `None` when the payload is not a new-message event or cannot
    /// be translated; the reason is logged.
    #[must_use]
    pub fn translate(&self, payload: &Value) -> Option<WhatsAppMessage> {
        self.try_translate(payload).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding webhook payload");
            None
        })
    }

    /// Translates a raw webhook request body.
    ///
    /// Bodies that are not valid JSON are logged and yield `None`.
    #[must_use]
    pub fn translate_slice(&self, body: &[u8]) -> Option<WhatsAppMessage> {
        match serde_json::from_slice::<Value>(body) {
            Ok(payload) => self.translate(&payload),
            Err(e) => {
                tracing::warn!(error = %TranslateError::from(e), "Discarding webhook payload");
                None
            }
        }
    }

    fn try_translate(&self, payload: &Value) -> Result<Option<WhatsAppMessage>, TranslateError> {
        let (Some(event), Some(data)) = (payload.get("event"), payload.get("data")) else {
            return Err(TranslateError::InvalidEnvelope);
        };

        match event.as_str() {
            Some(name) if is_message_upsert(name) => self.translate_upsert(data).map(Some),
            _ => {
                tracing::debug!(%event, "Unsupported event type");
                Ok(None)
            }
        }
    }

    /// Translates the `data` of a new-message event.
    fn translate_upsert(&self, data: &Value) -> Result<WhatsAppMessage, TranslateError> {
        let fields = data.as_object().ok_or(TranslateError::NotAnObject("data"))?;
        let empty = Map::new();
        let key = optional_object(fields, "key")?.unwrap_or(&empty);
        let message = optional_object(fields, "message")?.unwrap_or(&empty);

        let message_id = key
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(TranslateError::MissingMessageId)?;

        let remote_jid = match key.get("remoteJid") {
            None | Some(Value::Null) => "",
            Some(value) => value
                .as_str()
                .ok_or(TranslateError::NotAString("remoteJid"))?,
        };
        let from_me = key.get("fromMe").and_then(Value::as_bool).unwrap_or(false);

        let kind = detect_type(message);
        let content = extract_content(kind, message)?;
        let timestamp = self.timestamp(fields.get("messageTimestamp"))?;

        let mut translated = WhatsAppMessage::new(
            message_id,
            jid_to_phone(remote_jid),
            MessageDirection::from_me(from_me),
            timestamp,
            content,
        );

        if is_group_jid(remote_jid) {
            translated = translated.with_group(remote_jid);
        }

        if let Some(push_name) = fields
            .get("pushName")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
        {
            translated = translated.with_sender_name(push_name);
        }

        tracing::debug!(
            message_id,
            message_type = %kind,
            direction = %translated.direction,
            "Translated webhook message"
        );

        Ok(translated.with_raw_data(data.clone()))
    }

    /// Resolves `messageTimestamp` (unix seconds) or falls back to the clock.
    fn timestamp(&self, raw: Option<&Value>) -> Result<DateTime<Utc>, TranslateError> {
        let Some(raw) = raw.filter(|value| !is_unset(value)) else {
            return Ok(self.clock.now());
        };

        let seconds =
            integer(raw).ok_or_else(|| TranslateError::InvalidTimestamp(raw.to_string()))?;
        if seconds == 0 {
            return Ok(self.clock.now());
        }

        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| TranslateError::InvalidTimestamp(raw.to_string()))
    }
}

/// Returns the object under `name`, treating an absent or null field as missing.
fn optional_object<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<Option<&'a Map<String, Value>>, TranslateError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_object()
            .map(Some)
            .ok_or(TranslateError::NotAnObject(name)),
    }
}

/// Null and empty-string timestamps mean "not provided".
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
