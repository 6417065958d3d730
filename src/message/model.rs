//! The normalized message value type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Contact, Location, Media, MessageContent, MessageType};

/// Characters of text shown by the `Display` preview.
const PREVIEW_CHARS: usize = 50;

/// Whether a message was received or sent by the connected account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    /// Sent by someone else to the connected account.
    Incoming,
    /// Sent by the connected account.
    Outgoing,
}

impl MessageDirection {
    /// Maps the gateway's `fromMe` flag to a direction.
    #[must_use]
    pub const fn from_me(from_me: bool) -> Self {
        if from_me { Self::Outgoing } else { Self::Incoming }
    }

    /// Returns the lowercase wire name of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for MessageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WhatsApp message in a provider-agnostic format.
///
/// Built once, by the webhook translator for inbound traffic or by the
/// application for outbound traffic, and not modified afterwards.
///
/// # Serialization
///
/// [`to_value`](Self::to_value) produces a flat JSON object with snake_case
/// keys: the content fields sit next to the envelope fields and are tagged by
/// `message_type`, the timestamp is an RFC 3339 string, and absent values are
/// `null`. [`from_value`](Self::from_value) reverses it losslessly.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppMessage {
    /// Gateway-assigned message ID.
    pub message_id: String,
    /// Sender phone number with a leading `+`.
    pub from_number: String,
    /// Recipient phone number, when known.
    #[serde(default)]
    pub to_number: Option<String>,
    /// Whether the message was received or sent.
    pub direction: MessageDirection,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
    /// Type-specific content.
    #[serde(flatten)]
    pub content: MessageContent,
    /// True if the chat is a group.
    #[serde(default)]
    pub is_group: bool,
    /// Group JID, set for group chats.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Group subject, when the gateway provides it.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Display name of the sender.
    #[serde(default)]
    pub sender_name: Option<String>,
    /// The unmodified gateway payload, kept for diagnostics.
    #[serde(default)]
    pub raw_data: Option<serde_json::Value>,
}

impl WhatsAppMessage {
    /// Creates a one-to-one message with no recipient, sender name or raw payload.
    #[must_use]
    pub fn new(
        message_id: impl Into<String>,
        from_number: impl Into<String>,
        direction: MessageDirection,
        timestamp: DateTime<Utc>,
        content: MessageContent,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            from_number: from_number.into(),
            to_number: None,
            direction,
            timestamp,
            content,
            is_group: false,
            group_id: None,
            group_name: None,
            sender_name: None,
            raw_data: None,
        }
    }

    /// Sets the recipient number.
    #[must_use]
    pub fn with_to_number(mut self, to_number: impl Into<String>) -> Self {
        self.to_number = Some(to_number.into());
        self
    }

    /// Marks the message as belonging to the given group chat.
    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.is_group = true;
        self.group_id = Some(group_id.into());
        self
    }

    /// Sets the group subject.
    #[must_use]
    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    /// Sets the sender display name.
    #[must_use]
    pub fn with_sender_name(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = Some(sender_name.into());
        self
    }

    /// Attaches the original gateway payload.
    #[must_use]
    pub fn with_raw_data(mut self, raw_data: serde_json::Value) -> Self {
        self.raw_data = Some(raw_data);
        self
    }

    /// Returns the message type implied by the content.
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.content.message_type()
    }

    /// Returns true for text messages.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.content, MessageContent::Text { .. })
    }

    /// Returns true for image, video, audio, document and sticker messages.
    #[must_use]
    pub const fn is_media(&self) -> bool {
        self.message_type().is_media()
    }

    /// Returns true if the message replies to another message.
    #[must_use]
    pub const fn has_quoted_message(&self) -> bool {
        self.quoted_message_id().is_some()
    }

    /// Returns the text body of a text message.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    /// Returns the caption of an image, video or document message.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.media().and_then(|media| media.caption.as_deref())
    }

    /// Returns the ID of the message this one replies to.
    #[must_use]
    pub const fn quoted_message_id(&self) -> Option<&String> {
        match &self.content {
            MessageContent::Text {
                quoted_message_id, ..
            } => quoted_message_id.as_ref(),
            _ => None,
        }
    }

    /// Returns the text of the message this one replies to.
    #[must_use]
    pub fn quoted_message_text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text {
                quoted_message_text,
                ..
            } => quoted_message_text.as_deref(),
            _ => None,
        }
    }

    /// Returns the media fields of a media message.
    #[must_use]
    pub const fn media(&self) -> Option<&Media> {
        self.content.media()
    }

    /// Returns the location of a location message.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        match &self.content {
            MessageContent::Location(location) => Some(location),
            _ => None,
        }
    }

    /// Returns the contact of a contact message.
    #[must_use]
    pub const fn contact(&self) -> Option<&Contact> {
        match &self.content {
            MessageContent::Contact(contact) => Some(contact),
            _ => None,
        }
    }

    /// Converts the message into a flat JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error only if a location coordinate is not finite.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Rebuilds a message from an object produced by [`to_value`](Self::to_value).
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or have the wrong type,
    /// or if `message_type`, `direction` or `timestamp` cannot be parsed.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl fmt::Debug for WhatsAppMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatsAppMessage")
            .field("message_id", &self.message_id)
            .field("from_number", &self.from_number)
            .field("to_number", &self.to_number)
            .field("direction", &self.direction)
            .field("timestamp", &self.timestamp)
            .field("content", &self.content)
            .field("is_group", &self.is_group)
            .field("group_id", &self.group_id)
            .field("group_name", &self.group_name)
            .field("sender_name", &self.sender_name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for WhatsAppMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.message_type();
        match self.text() {
            Some(text) if !text.is_empty() => {
                let preview: String = text.chars().take(PREVIEW_CHARS).collect();
                let ellipsis = if text.chars().count() > PREVIEW_CHARS {
                    "..."
                } else {
                    ""
                };
                write!(
                    f,
                    "WhatsAppMessage({kind} from {}: {preview}{ellipsis})",
                    self.from_number
                )
            }
            _ => write!(f, "WhatsAppMessage({kind} from {})", self.from_number),
        }
    }
}
