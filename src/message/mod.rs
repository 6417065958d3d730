//! Provider-agnostic message representation.
//!
//! [`WhatsAppMessage`] is what the webhook translator produces for every
//! inbound message, regardless of which gateway delivered it. The
//! type-specific fields live in [`MessageContent`], so a message carries
//! exactly the fields that belong to its [`MessageType`].

mod content;
mod model;


pub use content::{Contact, Location, Media, MessageContent, MessageType};
pub use model::{MessageDirection, WhatsAppMessage};
