//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// whatsapi: WhatsApp gateway adapter
///
/// Sends messages through an Evolution API gateway and translates its
/// webhook payloads into normalized messages.
#[derive(Debug, Parser)]
#[command(name = "whatsapi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Gateway base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Gateway API key
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Gateway instance name
    #[arg(long, global = true)]
    pub instance: Option<String>,

    /// Per-attempt request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Number of retries after a failed attempt
    #[arg(long = "max-retries", global = true)]
    pub max_retries: Option<u32>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for whatsapi
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "whatsapi.toml")]
        output: PathBuf,
    },

    /// Show the connection state of the gateway instance
    Status,

    /// Send a text message
    SendText {
        /// Recipient phone number
        to: String,
        /// Message body
        text: String,
    },

    /// Send an image, video, audio or document by URL
    SendMedia {
        /// Recipient phone number
        to: String,
        /// URL the gateway downloads the media from
        url: String,
        /// Media type: image, video, audio or document
        #[arg(value_name = "TYPE")]
        media_type: String,
        /// Caption shown with the media
        #[arg(long)]
        caption: Option<String>,
        /// MIME type (defaults per media type)
        #[arg(long = "mime-type")]
        mime_type: Option<String>,
        /// File name shown to the recipient
        #[arg(long = "file-name")]
        file_name: Option<String>,
    },

    /// Point the gateway's webhook at a URL
    SetupWebhook {
        /// URL the gateway posts events to
        url: String,
        /// Deliver all events to the same URL
        #[arg(long = "no-by-events")]
        no_by_events: bool,
        /// Embed media as base64 in event payloads
        #[arg(long)]
        base64: bool,
        /// Event to subscribe to (can be specified multiple times)
        #[arg(long = "event", value_name = "EVENT")]
        events: Vec<String>,
    },

    /// Delete a message for everyone
    DeleteMessage {
        /// Message ID
        id: String,
        /// Phone number of the chat
        to: String,
    },

    /// React to a message with an emoji
    React {
        /// Message ID
        id: String,
        /// Phone number of the chat
        to: String,
        /// Reaction emoji (empty removes the reaction)
        emoji: String,
        /// The message was sent by this account
        #[arg(long = "from-me")]
        from_me: bool,
    },

    /// Fetch the profile picture URL of a phone number
    ProfilePicture {
        /// Phone number
        phone: String,
    },

    /// Translate a webhook payload file into a normalized message
    Translate {
        /// Path to a JSON webhook payload
        file: PathBuf,
    },
}

impl Command {
    /// Returns true if the command talks to the gateway and needs its configuration.
    #[must_use]
    pub const fn needs_gateway(&self) -> bool {
        !matches!(self, Self::Init { .. } | Self::Translate { .. })
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
