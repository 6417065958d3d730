//! Webhook subscription settings.

use crate::webhook::event::DEFAULT_SUBSCRIPTIONS;

/// Where and how the gateway should deliver webhook events.
///
/// # Defaults
///
/// - `by_events`: true (one request per event type)
/// - `base64`: false (media is referenced by URL)
/// - `events`: `None`, meaning [`DEFAULT_SUBSCRIPTIONS`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    /// URL the gateway posts events to.
    pub url: String,
    /// Send each event type to its own sub-path.
    pub by_events: bool,
    /// Embed media as base64 in the event payload.
    pub base64: bool,
    /// Events to subscribe to.
    pub events: Option<Vec<String>>,
}

impl WebhookSettings {
    /// Creates settings for `url` with the default options.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            by_events: true,
            base64: false,
            events: None,
        }
    }

    /// Sets whether events are delivered per event type.
    #[must_use]
    pub const fn with_by_events(mut self, by_events: bool) -> Self {
        self.by_events = by_events;
        self
    }

    /// Sets whether media is embedded as base64.
    #[must_use]
    pub const fn with_base64(mut self, base64: bool) -> Self {
        self.base64 = base64;
        self
    }

    /// Sets the events to subscribe to.
    #[must_use]
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the configured events, or the defaults when none were set.
    #[must_use]
    pub fn resolved_events(&self) -> Vec<String> {
        self.events.clone().unwrap_or_else(|| {
            DEFAULT_SUBSCRIPTIONS
                .iter()
                .map(ToString::to_string)
                .collect()
        })
    }
}
