//! Outbound messaging through a WhatsApp gateway.
//!
//! [`WhatsAppProvider`] is the capability contract callers program against.
//! [`EvolutionProvider`] implements it for the Evolution API gateway, turning
//! each operation into one authenticated JSON request with fixed-count retry.

mod error;
mod evolution;
mod media;
mod settings;
mod traits;

#[cfg(test)]
mod evolution_tests;

pub use error::{ProviderError, RequestError};
pub use evolution::{EvolutionConfig, EvolutionProvider};
pub use media::{MediaKind, MediaMessage};
pub use settings::WebhookSettings;
pub use traits::WhatsAppProvider;
