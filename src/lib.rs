//! whatsapi: WhatsApp gateway adapter
//!
//! A library for talking to WhatsApp through an Evolution API gateway:
//! outbound operations ([`provider`]) with fixed-count retry, and
//! translation of the gateway's webhook payloads into normalized
//! [`message::WhatsAppMessage`]s ([`webhook`]).

pub mod config;
pub mod jid;
pub mod message;
pub mod provider;
pub mod time;
pub mod transport;
pub mod webhook;
