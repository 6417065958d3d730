//! Conversions between phone numbers and gateway chat identifiers (JIDs).
//!
//! A JID has the form `<id>@<server>`: `@s.whatsapp.net` for individual
//! chats and `@g.us` for groups.

/// Server part of an individual chat JID.
pub const USER_SERVER: &str = "s.whatsapp.net";

/// Marker contained in every group JID.
pub const GROUP_MARKER: &str = "@g.us";

/// Converts a JID into a phone number with a leading `+`.
///
/// Everything after the first `@` is dropped. Empty input yields an empty
/// string, which callers should treat as missing data rather than an error.
///
/// ```
/// use whatsapi::jid::jid_to_phone;
///
/// assert_eq!(jid_to_phone("972501234567@s.whatsapp.net"), "+972501234567");
/// assert_eq!(jid_to_phone(""), "");
/// ```
#[must_use]
pub fn jid_to_phone(jid: &str) -> String {
    if jid.is_empty() {
        return String::new();
    }

    let local = jid.split_once('@').map_or(jid, |(local, _)| local);
    if local.starts_with('+') {
        local.to_string()
    } else {
        format!("+{local}")
    }
}

/// Returns true if the JID designates a group chat.
#[must_use]
pub fn is_group_jid(jid: &str) -> bool {
    jid.contains(GROUP_MARKER)
}

/// Strips every leading `+` from a phone number, as the gateway expects bare digits.
#[must_use]
pub fn strip_plus(phone: &str) -> &str {
    phone.trim_start_matches('+')
}

/// Builds the individual chat JID for a phone number.
///
/// ```
/// use whatsapi::jid::phone_to_jid;
///
/// assert_eq!(phone_to_jid("+15550001111"), "15550001111@s.whatsapp.net");
/// ```
#[must_use]
pub fn phone_to_jid(phone: &str) -> String {
    format!("{}@{USER_SERVER}", strip_plus(phone))
}
