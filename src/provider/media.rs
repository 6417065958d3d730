//! Outbound media message description.

use std::fmt;
use std::str::FromStr;

use super::ProviderError;

/// MIME type used when a media type has no specific default.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Media types the gateway can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Image file.
    Image,
    /// Video file.
    Video,
    /// Audio file.
    Audio,
    /// Any other file.
    Document,
}

impl MediaKind {
    /// All supported kinds.
    pub const ALL: [Self; 4] = [Self::Image, Self::Video, Self::Audio, Self::Document];

    /// Returns the gateway's name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
        }
    }

    /// MIME type sent when the caller does not specify one.
    #[must_use]
    pub const fn default_mime_type(self) -> &'static str {
        match self {
            Self::Image => "image/png",
            Self::Video => "video/mp4",
            Self::Audio => "audio/ogg",
            Self::Document => "application/pdf",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProviderError::UnsupportedMediaType(s.to_string()))
    }
}

/// Returns the default MIME type for a media type name.
///
/// Unrecognized names fall back to [`FALLBACK_MIME_TYPE`].
#[must_use]
pub fn default_mime_type(media_type: &str) -> &'static str {
    media_type
        .parse::<MediaKind>()
        .map_or(FALLBACK_MIME_TYPE, MediaKind::default_mime_type)
}

/// A media file to send, referenced by URL.
///
/// The media type is kept as given and validated when the message is sent,
/// so an unsupported type fails before any request is made.
///
/// # Example
///
/// ```
/// use whatsapi::provider::MediaMessage;
///
/// let media = MediaMessage::new("https://example.com/invoice.pdf", "document")
///     .with_caption("March invoice")
///     .with_file_name("invoice-03.pdf");
/// assert_eq!(media.media_type, "document");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMessage {
    /// URL the gateway downloads the file from.
    pub url: String,
    /// One of `image`, `video`, `audio`, `document`.
    pub media_type: String,
    /// Caption shown with the media.
    pub caption: Option<String>,
    /// Explicit MIME type; defaults per media type when absent.
    pub mime_type: Option<String>,
    /// File name shown to the recipient.
    pub file_name: Option<String>,
}

impl MediaMessage {
    /// Creates a media message with no caption, MIME type or file name.
    #[must_use]
    pub fn new(url: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_type: media_type.into(),
            caption: None,
            mime_type: None,
            file_name: None,
        }
    }

    /// Sets the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Sets the file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Validates the media type.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnsupportedMediaType`] for unknown types.
    pub fn kind(&self) -> Result<MediaKind, ProviderError> {
        self.media_type.parse()
    }

    /// Returns the explicit MIME type, or the default for the media type.
    #[must_use]
    pub fn resolved_mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|mime| !mime.is_empty())
            .unwrap_or_else(|| default_mime_type(&self.media_type))
    }
}
