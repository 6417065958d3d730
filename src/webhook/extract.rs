//! Field extraction from the gateway's `message` object.
//!
//! The type of a message is encoded by which marker key its `message` object
//! contains; the marker's value holds the type-specific fields.

use serde_json::{Map, Value};

use crate::message::{Contact, Location, Media, MessageContent, MessageType};

use super::TranslateError;

type Object = Map<String, Value>;

/// Marker keys in precedence order. The first key present decides the type.
pub(super) const TYPE_MARKERS: [(&str, MessageType); 9] = [
    ("conversation", MessageType::Text),
    ("extendedTextMessage", MessageType::Text),
    ("imageMessage", MessageType::Image),
    ("videoMessage", MessageType::Video),
    ("audioMessage", MessageType::Audio),
    ("documentMessage", MessageType::Document),
    ("stickerMessage", MessageType::Sticker),
    ("locationMessage", MessageType::Location),
    ("contactMessage", MessageType::Contact),
];

/// Which optional media fields a media type carries.
#[derive(Clone, Copy)]
struct MediaShape {
    caption: bool,
    filename: bool,
}

const CAPTIONED: MediaShape = MediaShape {
    caption: true,
    filename: false,
};
const BARE: MediaShape = MediaShape {
    caption: false,
    filename: false,
};
const DOCUMENT: MediaShape = MediaShape {
    caption: true,
    filename: true,
};

/// Detects the message type from the marker keys present in `message`.
pub(super) fn detect_type(message: &Object) -> MessageType {
    if let Some((_, kind)) = TYPE_MARKERS
        .iter()
        .find(|(marker, _)| message.contains_key(*marker))
    {
        return *kind;
    }

    tracing::debug!(
        keys = ?message.keys().collect::<Vec<_>>(),
        "Unknown message type"
    );
    MessageType::Unknown
}

/// Extracts the text of a message object.
///
/// Prefers `conversation`, then `extendedTextMessage.text`, then a bare `text`.
/// Shared by top-level messages and quoted messages.
pub(super) fn extract_text(message: &Object) -> Option<String> {
    if let Some(conversation) = message.get("conversation") {
        return string(conversation);
    }

    if let Some(extended) = message.get("extendedTextMessage") {
        return extended.get("text").and_then(string);
    }

    message.get("text").and_then(string)
}

/// Extracts the content fields for `kind` from `message`.
pub(super) fn extract_content(
    kind: MessageType,
    message: &Object,
) -> Result<MessageContent, TranslateError> {
    let content = match kind {
        MessageType::Text => extract_text_content(message)?,
        MessageType::Image => {
            MessageContent::Image(extract_media(marker(message, "imageMessage")?, CAPTIONED))
        }
        MessageType::Video => {
            MessageContent::Video(extract_media(marker(message, "videoMessage")?, CAPTIONED))
        }
        MessageType::Audio => {
            MessageContent::Audio(extract_media(marker(message, "audioMessage")?, BARE))
        }
        MessageType::Document => MessageContent::Document(extract_media(
            marker(message, "documentMessage")?,
            DOCUMENT,
        )),
        MessageType::Sticker => {
            MessageContent::Sticker(extract_media(marker(message, "stickerMessage")?, BARE))
        }
        MessageType::Location => {
            MessageContent::Location(extract_location(marker(message, "locationMessage")?))
        }
        MessageType::Contact => {
            MessageContent::Contact(extract_contact(marker(message, "contactMessage")?))
        }
        MessageType::Unknown => MessageContent::Unknown,
    };

    Ok(content)
}

fn extract_text_content(message: &Object) -> Result<MessageContent, TranslateError> {
    let text = extract_text(message);

    let context = match message.get("extendedTextMessage") {
        Some(extended) => object(extended, "extendedTextMessage")?
            .get("contextInfo")
            .and_then(Value::as_object)
            .filter(|context| !context.is_empty()),
        None => None,
    };

    let quoted_message_id = context
        .and_then(|context| context.get("stanzaId"))
        .and_then(string);
    let quoted_message_text = context
        .and_then(|context| context.get("quotedMessage"))
        .and_then(Value::as_object)
        .filter(|quoted| !quoted.is_empty())
        .and_then(extract_text);

    Ok(MessageContent::Text {
        text,
        quoted_message_id,
        quoted_message_text,
    })
}

fn extract_media(fields: &Object, shape: MediaShape) -> Media {
    Media {
        url: fields.get("url").and_then(string),
        mime_type: fields.get("mimetype").and_then(string),
        size: fields.get("fileLength").and_then(file_length),
        filename: if shape.filename {
            fields.get("fileName").and_then(string)
        } else {
            None
        },
        caption: if shape.caption {
            fields.get("caption").and_then(string)
        } else {
            None
        },
    }
}

fn extract_location(fields: &Object) -> Location {
    Location {
        latitude: fields.get("degreesLatitude").and_then(Value::as_f64),
        longitude: fields.get("degreesLongitude").and_then(Value::as_f64),
        name: fields.get("name").and_then(string),
        address: fields.get("address").and_then(string),
    }
}

fn extract_contact(fields: &Object) -> Contact {
    Contact {
        vcard: fields.get("vcard").and_then(string),
        name: fields.get("displayName").and_then(string),
    }
}

/// Returns the object stored under a type marker.
fn marker<'a>(message: &'a Object, key: &'static str) -> Result<&'a Object, TranslateError> {
    message
        .get(key)
        .ok_or(TranslateError::NotAnObject(key))
        .and_then(|value| object(value, key))
}

fn object<'a>(value: &'a Value, name: &'static str) -> Result<&'a Object, TranslateError> {
    value.as_object().ok_or(TranslateError::NotAnObject(name))
}

fn string(value: &Value) -> Option<String> {
    value.as_str().map(ToOwned::to_owned)
}

/// Reads an integer the gateway may encode as a number, a numeric string,
/// or a protobuf `Long` object (`{"low": .., "high": .., "unsigned": ..}`).
pub(super) fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole_float)),
        Value::String(text) => text.trim().parse().ok(),
        Value::Object(long) => {
            let low = long.get("low")?.as_i64()?;
            let high = long.get("high")?.as_i64()?;
            // Both halves are 32-bit; `low` is reinterpreted as unsigned.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let low = i64::from(low as u32);
            Some((high << 32) | low)
        }
        _ => None,
    }
}

/// Accepts floats with no fractional part, such as `1700000000.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_float(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then(|| value as i64)
}

fn file_length(value: &Value) -> Option<u64> {
    integer(value).and_then(|n| u64::try_from(n).ok())
}
