//! Gateway event names.

/// Event names under which the gateway delivers new messages.
///
/// Gateway versions disagree on casing, so both spellings are accepted.
pub const MESSAGES_UPSERT: [&str; 2] = ["messages.upsert", "MESSAGES_UPSERT"];

/// Events subscribed to when webhook setup does not name any.
pub const DEFAULT_SUBSCRIPTIONS: [&str; 5] = [
    "QRCODE_UPDATED",
    "MESSAGES_UPSERT",
    "MESSAGES_UPDATE",
    "SEND_MESSAGE",
    "CONNECTION_UPDATE",
];

/// Returns true if `name` is a new-message event.
#[must_use]
pub fn is_message_upsert(name: &str) -> bool {
    MESSAGES_UPSERT.contains(&name)
}
