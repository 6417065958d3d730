//! Evolution API gateway provider.

use std::fmt;
use std::time::Duration;

use http::{HeaderName, HeaderValue, Method};
use serde_json::{Value, json};

use crate::jid::{phone_to_jid, strip_plus};
use crate::transport::{HttpClient, HttpRequest, HttpResponse, ReqwestClient, RetryPolicy};

use super::{MediaMessage, ProviderError, RequestError, WebhookSettings, WhatsAppProvider};

/// Header carrying the gateway API key.
const API_KEY_HEADER: &str = "apikey";

/// Connection settings for an Evolution API gateway.
///
/// # Defaults
///
/// - `timeout`: 30 seconds per attempt
/// - `max_retries`: 3
#[derive(Clone, PartialEq, Eq)]
pub struct EvolutionConfig {
    /// Gateway base URL, without trailing slashes.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Name of the WhatsApp instance on the gateway.
    pub instance: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Attempts made after the first one fails.
    pub max_retries: u32,
}

impl EvolutionConfig {
    /// Default per-attempt timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = RetryPolicy::DEFAULT_MAX_RETRIES;

    /// Creates a configuration with default timeout and retries.
    ///
    /// Trailing slashes are stripped from `base_url`.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            instance: instance.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl fmt::Debug for EvolutionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("instance", &self.instance)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// WhatsApp provider backed by an Evolution API gateway.
///
/// Each operation sends one JSON request to
/// `{base_url}/{resource}/{action}/{instance}` with the API key in the
/// `apikey` header. Failed attempts are repeated immediately, up to the
/// configured number of retries.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use whatsapi::provider::{EvolutionConfig, EvolutionProvider, WhatsAppProvider};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = EvolutionConfig::new("http://localhost:8080", "secret", "main");
/// let provider = EvolutionProvider::from_config(config)?;
/// provider.send_text_message("+972501234567", "hello").await?;
/// provider.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EvolutionProvider<H = ReqwestClient> {
    client: H,
    base_url: String,
    api_key: HeaderValue,
    instance: String,
    retry_policy: RetryPolicy,
}

impl EvolutionProvider<ReqwestClient> {
    /// Creates a provider with a [`ReqwestClient`] bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or API key is invalid.
    pub fn from_config(config: EvolutionConfig) -> Result<Self, ProviderError> {
        let client = ReqwestClient::with_timeout(config.timeout);
        Self::new(client, config)
    }
}

impl<H> EvolutionProvider<H> {
    /// Creates a provider that sends requests through `client`.
    ///
    /// `config.timeout` is not applied here; it is the client's concern.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] if the base URL does not parse,
    /// or [`ProviderError::InvalidApiKey`] if the key cannot be sent as a header.
    pub fn new(client: H, config: EvolutionConfig) -> Result<Self, ProviderError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|source| ProviderError::InvalidUrl {
            url: base_url.clone(),
            source,
        })?;

        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| ProviderError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        tracing::info!(
            base_url = %base_url,
            instance = %config.instance,
            "Evolution API provider initialized"
        );

        Ok(Self {
            client,
            base_url,
            api_key,
            instance: config.instance,
            retry_policy: RetryPolicy::new().with_max_retries(config.max_retries),
        })
    }

    /// Returns the gateway base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the gateway instance name.
    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Returns the path of an instance-scoped endpoint.
    fn endpoint(&self, action: &str) -> String {
        format!("/{action}/{}", self.instance)
    }
}

impl<H: HttpClient> EvolutionProvider<H> {
    /// Reacts to a message with an emoji.
    ///
    /// # Arguments
    ///
    /// * `message_id` - ID of the message to react to
    /// * `to` - Phone number of the chat
    /// * `emoji` - Reaction; an empty string removes an earlier reaction
    /// * `from_me` - Whether the target message was sent by this account
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the gateway call fails.
    pub async fn send_reaction(
        &self,
        message_id: &str,
        to: &str,
        emoji: &str,
        from_me: bool,
    ) -> Result<Value, ProviderError> {
        let payload = json!({
            "key": {
                "remoteJid": phone_to_jid(to),
                "fromMe": from_me,
                "id": message_id,
            },
            "reaction": emoji,
        });

        tracing::info!(message_id, emoji, "Sending reaction");
        self.request(
            Method::POST,
            &self.endpoint("message/sendReaction"),
            Some(&payload),
        )
        .await
    }

    /// Fetches the profile picture URL of a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the gateway call fails.
    pub async fn get_profile_picture(&self, phone: &str) -> Result<Value, ProviderError> {
        let payload = json!({ "number": strip_plus(phone) });

        tracing::info!(phone, "Fetching profile picture");
        self.request(
            Method::POST,
            &self.endpoint("chat/fetchProfilePictureUrl"),
            Some(&payload),
        )
        .await
    }

    /// Sends one logical request, retrying failed attempts.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ProviderError> {
        let request = self.build_request(method, endpoint, payload)?;

        let mut attempt = 1;
        loop {
            match self.execute_request(&request).await {
                Ok(response) => {
                    tracing::debug!(method = %request.method, endpoint, "Request successful");
                    return decode_response(&response);
                }
                Err(e) => {
                    tracing::error!(
                        method = %request.method,
                        endpoint,
                        attempt,
                        error = %e,
                        "Request failed"
                    );

                    if !e.is_retryable() {
                        return Err(ProviderError::Request(e));
                    }

                    if !self.retry_policy.should_retry(attempt) {
                        return Err(ProviderError::RetriesExhausted {
                            attempts: attempt,
                            last_error: e,
                        });
                    }

                    tracing::info!(
                        "Retrying... (attempt {}/{})",
                        attempt,
                        self.retry_policy.max_retries
                    );
                    attempt += 1;
                }
            }
        }
    }

    fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<HttpRequest, ProviderError> {
        let raw = format!("{}{endpoint}", self.base_url);
        let url = url::Url::parse(&raw)
            .map_err(|source| ProviderError::InvalidUrl { url: raw, source })?;

        let request = HttpRequest::new(method, url)
            .with_header(HeaderName::from_static(API_KEY_HEADER), self.api_key.clone());

        match payload {
            Some(payload) => request.with_json(payload).map_err(ProviderError::Encode),
            None => Ok(request),
        }
    }

    /// Executes a single attempt.
    async fn execute_request(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let response = self.client.request(request.clone()).await?;

        if response.is_success() {
            return Ok(response);
        }

        Err(RequestError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }
}

/// Decodes a successful response body. An empty body decodes to `null`.
fn decode_response(response: &HttpResponse) -> Result<Value, ProviderError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&response.body).map_err(ProviderError::InvalidResponse)
}

impl<H: HttpClient> WhatsAppProvider for EvolutionProvider<H> {
    async fn send_text_message(&self, to: &str, text: &str) -> Result<Value, ProviderError> {
        let payload = json!({
            "number": strip_plus(to),
            "text": text,
        });

        tracing::info!(to, "Sending text message");
        self.request(
            Method::POST,
            &self.endpoint("message/sendText"),
            Some(&payload),
        )
        .await
    }

    async fn send_media_message(
        &self,
        to: &str,
        media: &MediaMessage,
    ) -> Result<Value, ProviderError> {
        let kind = media.kind()?;

        let mut payload = json!({
            "number": strip_plus(to),
            "mediatype": kind.as_str(),
            "mimetype": media.resolved_mime_type(),
            "media": media.url,
        });
        if let Some(caption) = media.caption.as_deref().filter(|c| !c.is_empty()) {
            payload["caption"] = json!(caption);
        }
        if let Some(file_name) = media.file_name.as_deref().filter(|f| !f.is_empty()) {
            payload["fileName"] = json!(file_name);
        }

        tracing::info!(to, media_type = %kind, "Sending media message");
        self.request(
            Method::POST,
            &self.endpoint("message/sendMedia"),
            Some(&payload),
        )
        .await
    }

    async fn get_instance_status(&self) -> Result<Value, ProviderError> {
        tracing::info!(instance = %self.instance, "Checking instance status");
        self.request(Method::GET, &self.endpoint("instance/connectionState"), None)
            .await
    }

    async fn setup_webhook(&self, settings: &WebhookSettings) -> Result<Value, ProviderError> {
        let payload = json!({
            "enabled": true,
            "url": settings.url,
            "webhookByEvents": settings.by_events,
            "webhookBase64": settings.base64,
            "events": settings.resolved_events(),
        });

        tracing::info!(url = %settings.url, "Setting up webhook");
        self.request(Method::POST, &self.endpoint("webhook/set"), Some(&payload))
            .await
    }

    async fn delete_message(&self, message_id: &str, to: &str) -> Result<Value, ProviderError> {
        let payload = json!({
            "id": message_id,
            "remoteJid": phone_to_jid(to),
        });

        tracing::info!(message_id, "Deleting message");
        self.request(
            Method::DELETE,
            &self.endpoint("message/delete"),
            Some(&payload),
        )
        .await
    }

    fn close(&self) {
        self.client.close();
        tracing::debug!(instance = %self.instance, "Evolution API provider closed");
    }
}
