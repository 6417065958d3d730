//! Translation of inbound gateway webhooks into [`WhatsAppMessage`]s.
//!
//! The gateway posts a JSON envelope `{"event": ..., "data": ...}` for every
//! event it is subscribed to. [`WebhookTranslator`] turns the message events
//! into normalized messages and ignores everything else. Translation never
//! fails loudly: malformed payloads are logged and yield `None`, so a webhook
//! receiver cannot be brought down by a bad request.
//!
//! [`WhatsAppMessage`]: crate::message::WhatsAppMessage

mod error;
pub mod event;
mod extract;
mod translator;


pub use error::TranslateError;
pub use translator::WebhookTranslator;
