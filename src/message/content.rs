//! Message classification and per-type content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of content a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain or extended text.
    Text,
    /// Image with optional caption.
    Image,
    /// Video with optional caption.
    Video,
    /// Audio clip or voice note.
    Audio,
    /// Arbitrary file.
    Document,
    /// Shared location.
    Location,
    /// Shared contact card.
    Contact,
    /// Sticker.
    Sticker,
    /// Anything the translator does not recognize.
    Unknown,
}

impl MessageType {
    /// Returns the lowercase wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Location => "location",
            Self::Contact => "contact",
            Self::Sticker => "sticker",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true for types whose content is a downloadable media file.
    #[must_use]
    pub const fn is_media(self) -> bool {
        matches!(
            self,
            Self::Image | Self::Video | Self::Audio | Self::Document | Self::Sticker
        )
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media attachment fields shared by image, video, audio, document and sticker messages.
///
/// Audio and sticker messages never carry a caption; only documents carry a filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Download URL of the media file.
    #[serde(rename = "media_url", default)]
    pub url: Option<String>,
    /// MIME type reported by the sender.
    #[serde(rename = "media_mime_type", default)]
    pub mime_type: Option<String>,
    /// File size in bytes.
    #[serde(rename = "media_size", default)]
    pub size: Option<u64>,
    /// Original file name (documents only).
    #[serde(rename = "media_filename", default)]
    pub filename: Option<String>,
    /// Caption text (image, video and document only).
    #[serde(default)]
    pub caption: Option<String>,
}

/// A shared location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Place name.
    #[serde(rename = "location_name", default)]
    pub name: Option<String>,
    /// Street address.
    #[serde(rename = "location_address", default)]
    pub address: Option<String>,
}

/// A shared contact card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// The raw vCard.
    #[serde(rename = "contact_vcard", default)]
    pub vcard: Option<String>,
    /// Display name of the contact.
    #[serde(rename = "contact_name", default)]
    pub name: Option<String>,
}

/// Type-specific content of a message.
///
/// Each variant holds only the fields that belong to its [`MessageType`],
/// so no message can carry, say, both a location and a media URL.
///
/// Serialized flat, tagged by a `message_type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "lowercase")]
pub enum MessageContent {
    /// Text, optionally replying to an earlier message.
    Text {
        /// Message body.
        #[serde(default)]
        text: Option<String>,
        /// ID of the message being replied to.
        #[serde(default)]
        quoted_message_id: Option<String>,
        /// Text of the message being replied to.
        #[serde(default)]
        quoted_message_text: Option<String>,
    },
    /// Image attachment.
    Image(Media),
    /// Video attachment.
    Video(Media),
    /// Audio attachment.
    Audio(Media),
    /// Document attachment.
    Document(Media),
    /// Sticker.
    Sticker(Media),
    /// Shared location.
    Location(Location),
    /// Shared contact.
    Contact(Contact),
    /// Unrecognized content.
    Unknown,
}

impl MessageContent {
    /// Creates text content without reply context.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: Some(text.into()),
            quoted_message_id: None,
            quoted_message_text: None,
        }
    }

    /// Returns the [`MessageType`] this content belongs to.
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::Text { .. } => MessageType::Text,
            Self::Image(_) => MessageType::Image,
            Self::Video(_) => MessageType::Video,
            Self::Audio(_) => MessageType::Audio,
            Self::Document(_) => MessageType::Document,
            Self::Sticker(_) => MessageType::Sticker,
            Self::Location(_) => MessageType::Location,
            Self::Contact(_) => MessageType::Contact,
            Self::Unknown => MessageType::Unknown,
        }
    }

    /// Returns the media fields for media content.
    #[must_use]
    pub const fn media(&self) -> Option<&Media> {
        match self {
            Self::Image(media)
            | Self::Video(media)
            | Self::Audio(media)
            | Self::Document(media)
            | Self::Sticker(media) => Some(media),
            _ => None,
        }
    }
}
