//! Tests for `EvolutionProvider` and `EvolutionConfig`.

use super::{
    EvolutionConfig, EvolutionProvider, MediaMessage, ProviderError, RequestError,
    WebhookSettings, WhatsAppProvider,
};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
struct MockClient {
    responses: std::sync::Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: std::sync::Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
    close_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            requests: std::sync::Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            close_count: AtomicUsize::new(0),
        }
    }

    fn replying(value: &Value) -> Self {
        Self::new(vec![Ok(HttpResponse::json(http::StatusCode::OK, value))])
    }

    fn ok() -> Self {
        Self::replying(&json!({"status": "ok"}))
    }

    fn raw(status: http::StatusCode, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::new(
            status,
            http::HeaderMap::new(),
            body.as_bytes().to_vec(),
        ))])
    }

    fn failing_then_success(failures: usize) -> Self {
        let mut responses = Vec::new();
        for _ in 0..failures {
            responses.push(Err(HttpError::Timeout));
        }
        responses.push(Ok(HttpResponse::json(
            http::StatusCode::OK,
            &json!({"key": {"id": "MSG1"}}),
        )));
        Self::new(responses)
    }

    fn always_status(status: http::StatusCode, count: usize) -> Self {
        let responses = (0..count)
            .map(|_| {
                Ok(HttpResponse::new(
                    status,
                    http::HeaderMap::new(),
                    b"gateway down".to_vec(),
                ))
            })
            .collect();
        Self::new(responses)
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn closes(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> HttpRequest {
        let requests = self.captured_requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }

    fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }

    fn close(&self) {
        (**self).close();
    }
}

fn test_config() -> EvolutionConfig {
    EvolutionConfig::new("http://gateway.local:8080", "secret-key", "main")
}

fn provider_with(
    client: MockClient,
    max_retries: u32,
) -> (EvolutionProvider<Arc<MockClient>>, Arc<MockClient>) {
    let client = Arc::new(client);
    let config = test_config().with_max_retries(max_retries);
    let provider = EvolutionProvider::new(Arc::clone(&client), config).unwrap();
    (provider, client)
}

fn provider(client: MockClient) -> (EvolutionProvider<Arc<MockClient>>, Arc<MockClient>) {
    provider_with(client, 3)
}

mod config {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = test_config();

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = EvolutionConfig::new("http://gateway.local:8080//", "k", "main");
        assert_eq!(config.base_url, "http://gateway.local:8080");
    }

    #[test]
    fn builders_override_defaults() {
        let config = test_config()
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(0);

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", test_config());

        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}

mod construction {
    use super::*;

    #[test]
    fn exposes_settings() {
        let (provider, _) = provider_with(MockClient::ok(), 5);

        assert_eq!(provider.base_url(), "http://gateway.local:8080");
        assert_eq!(provider.instance(), "main");
        assert_eq!(provider.retry_policy().max_retries, 5);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = EvolutionConfig::new("not a url", "k", "main");
        let result = EvolutionProvider::new(MockClient::ok(), config);

        assert!(matches!(result, Err(ProviderError::InvalidUrl { .. })));
    }

    #[test]
    fn api_key_with_newline_is_rejected() {
        let config = EvolutionConfig::new("http://gateway.local", "bad\nkey", "main");
        let result = EvolutionProvider::new(MockClient::ok(), config);

        assert!(matches!(result, Err(ProviderError::InvalidApiKey)));
    }

    #[test]
    fn debug_does_not_leak_api_key() {
        let (provider, _) = provider(MockClient::ok());
        assert!(!format!("{provider:?}").contains("secret-key"));
    }

    #[test]
    fn from_config_applies_timeout_to_client() {
        let config = test_config().with_timeout(Duration::from_secs(7));
        let provider = EvolutionProvider::from_config(config).unwrap();

        assert_eq!(provider.client().timeout(), Some(Duration::from_secs(7)));
        assert!(!provider.client().is_open());
    }
}

mod send_text {
    use super::*;

    #[tokio::test]
    async fn posts_stripped_number_and_text() {
        let (provider, client) = provider(MockClient::ok());

        let response = provider.send_text_message("+1555000", "hi").await.unwrap();

        assert_eq!(response, json!({"status": "ok"}));
        let request = client.only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            request.url.as_str(),
            "http://gateway.local:8080/message/sendText/main"
        );
        assert_eq!(
            request.json_body(),
            Some(json!({"number": "1555000", "text": "hi"}))
        );
    }

    #[tokio::test]
    async fn sends_api_key_and_content_type() {
        let (provider, client) = provider(MockClient::ok());

        provider.send_text_message("1555000", "hi").await.unwrap();

        let request = client.only_request();
        assert_eq!(request.headers.get("apikey").unwrap(), "secret-key");
        assert_eq!(
            request.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn number_without_plus_is_unchanged() {
        let (provider, client) = provider(MockClient::ok());

        provider.send_text_message("972501234567", "x").await.unwrap();

        let body = client.only_request().json_body().unwrap();
        assert_eq!(body["number"], "972501234567");
    }
}

mod send_media {
    use super::*;

    #[tokio::test]
    async fn image_without_mime_type_uses_default() {
        let (provider, client) = provider(MockClient::ok());
        let media = MediaMessage::new("https://cdn.example.com/a.png", "image");

        provider.send_media_message("+1555000", &media).await.unwrap();

        let request = client.only_request();
        assert_eq!(
            request.url.as_str(),
            "http://gateway.local:8080/message/sendMedia/main"
        );
        assert_eq!(
            request.json_body(),
            Some(json!({
                "number": "1555000",
                "mediatype": "image",
                "mimetype": "image/png",
                "media": "https://cdn.example.com/a.png"
            }))
        );
    }

    #[tokio::test]
    async fn caption_file_name_and_mime_type_are_sent() {
        let (provider, client) = provider(MockClient::ok());
        let media = MediaMessage::new("https://cdn.example.com/r.pdf", "document")
            .with_caption("report")
            .with_file_name("r.pdf")
            .with_mime_type("application/x-custom");

        provider.send_media_message("1555000", &media).await.unwrap();

        let body = client.only_request().json_body().unwrap();
        assert_eq!(body["mediatype"], "document");
        assert_eq!(body["mimetype"], "application/x-custom");
        assert_eq!(body["caption"], "report");
        assert_eq!(body["fileName"], "r.pdf");
    }

    #[tokio::test]
    async fn empty_caption_is_omitted() {
        let (provider, client) = provider(MockClient::ok());
        let media = MediaMessage::new("https://cdn.example.com/v.mp4", "video").with_caption("");

        provider.send_media_message("1555000", &media).await.unwrap();

        let body = client.only_request().json_body().unwrap();
        assert!(body.get("caption").is_none());
        assert!(body.get("fileName").is_none());
        assert_eq!(body["mimetype"], "video/mp4");
    }

    #[tokio::test]
    async fn unsupported_type_fails_without_request() {
        let (provider, client) = provider(MockClient::ok());
        let media = MediaMessage::new("https://cdn.example.com/s.webp", "sticker");

        let result = provider.send_media_message("1555000", &media).await;

        assert!(
            matches!(result, Err(ProviderError::UnsupportedMediaType(ref t)) if t == "sticker")
        );
        assert_eq!(client.calls(), 0);
    }
}

mod other_operations {
    use super::*;

    #[tokio::test]
    async fn instance_status_is_a_get_without_body() {
        let state = json!({"instance": {"instanceName": "main", "state": "open"}});
        let (provider, client) = provider(MockClient::replying(&state));

        let response = provider.get_instance_status().await.unwrap();

        assert_eq!(response, state);
        let request = client.only_request();
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(
            request.url.as_str(),
            "http://gateway.local:8080/instance/connectionState/main"
        );
        assert!(request.body.is_none());
        assert!(request.headers.get("apikey").is_some());
    }

    #[tokio::test]
    async fn webhook_uses_default_events() {
        let (provider, client) = provider(MockClient::ok());

        provider
            .setup_webhook(&WebhookSettings::new("https://bot.example.com/hook"))
            .await
            .unwrap();

        let request = client.only_request();
        assert_eq!(
            request.url.as_str(),
            "http://gateway.local:8080/webhook/set/main"
        );
        assert_eq!(
            request.json_body(),
            Some(json!({
                "enabled": true,
                "url": "https://bot.example.com/hook",
                "webhookByEvents": true,
                "webhookBase64": false,
                "events": [
                    "QRCODE_UPDATED",
                    "MESSAGES_UPSERT",
                    "MESSAGES_UPDATE",
                    "SEND_MESSAGE",
                    "CONNECTION_UPDATE"
                ]
            }))
        );
    }

    #[tokio::test]
    async fn webhook_custom_settings() {
        let (provider, client) = provider(MockClient::ok());
        let settings = WebhookSettings::new("https://bot.example.com/hook")
            .with_by_events(false)
            .with_base64(true)
            .with_events(["MESSAGES_UPSERT"]);

        provider.setup_webhook(&settings).await.unwrap();

        let body = client.only_request().json_body().unwrap();
        assert_eq!(body["webhookByEvents"], false);
        assert_eq!(body["webhookBase64"], true);
        assert_eq!(body["events"], json!(["MESSAGES_UPSERT"]));
    }

    #[tokio::test]
    async fn delete_message_targets_user_jid() {
        let (provider, client) = provider(MockClient::ok());

        provider.delete_message("MSG1", "+1555000").await.unwrap();

        let request = client.only_request();
        assert_eq!(request.method, http::Method::DELETE);
        assert_eq!(
            request.url.as_str(),
            "http://gateway.local:8080/message/delete/main"
        );
        assert_eq!(
            request.json_body(),
            Some(json!({"id": "MSG1", "remoteJid": "1555000@s.whatsapp.net"}))
        );
    }

    #[tokio::test]
    async fn reaction_payload() {
        let (provider, client) = provider(MockClient::ok());

        provider
            .send_reaction("MSG1", "+1555000", "👍", true)
            .await
            .unwrap();

        let request = client.only_request();
        assert_eq!(
            request.url.as_str(),
            "http://gateway.local:8080/message/sendReaction/main"
        );
        assert_eq!(
            request.json_body(),
            Some(json!({
                "key": {"remoteJid": "1555000@s.whatsapp.net", "fromMe": true, "id": "MSG1"},
                "reaction": "👍"
            }))
        );
    }

    #[tokio::test]
    async fn profile_picture_payload() {
        let picture = json!({"profilePictureUrl": "https://pps.example.com/p.jpg"});
        let (provider, client) = provider(MockClient::replying(&picture));

        let response = provider.get_profile_picture("+1555000").await.unwrap();

        assert_eq!(response, picture);
        let request = client.only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            request.url.as_str(),
            "http://gateway.local:8080/chat/fetchProfilePictureUrl/main"
        );
        assert_eq!(request.json_body(), Some(json!({"number": "1555000"})));
    }

    #[test]
    fn close_delegates_to_client() {
        let (provider, client) = provider(MockClient::ok());

        provider.close();
        provider.close();

        assert_eq!(client.closes(), 2);
    }
}

mod retries {
    use super::*;

    #[tokio::test]
    async fn succeeds_after_two_failures() {
        let (provider, client) = provider_with(MockClient::failing_then_success(2), 3);

        let response = provider.send_text_message("1555000", "hi").await.unwrap();

        assert_eq!(response["key"]["id"], "MSG1");
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn every_attempt_resends_the_same_request() {
        let (provider, client) = provider_with(MockClient::failing_then_success(1), 3);

        provider.send_text_message("1555000", "hi").await.unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, requests[1].url);
        assert_eq!(requests[0].body, requests[1].body);
    }

    #[tokio::test]
    async fn exhausted_after_retries_plus_one_attempts() {
        let (provider, client) = provider_with(
            MockClient::always_status(http::StatusCode::INTERNAL_SERVER_ERROR, 3),
            2,
        );

        let result = provider.send_text_message("1555000", "hi").await;

        assert_eq!(client.calls(), 3);
        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
        match err {
            ProviderError::RetriesExhausted {
                attempts,
                last_error: RequestError::NonSuccessStatus { body, .. },
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(body.as_deref(), Some("gateway down"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_errors_are_retried_too() {
        let (provider, client) = provider_with(
            MockClient::always_status(http::StatusCode::NOT_FOUND, 2),
            1,
        );

        let result = provider.get_instance_status().await;

        assert_eq!(client.calls(), 2);
        assert!(matches!(
            result,
            Err(ProviderError::RetriesExhausted { attempts: 2, .. })
        ));
    }

    #[tokio::test]
    async fn zero_retries_makes_one_attempt() {
        let (provider, client) = provider_with(MockClient::failing_then_success(1), 0);

        let result = provider.send_text_message("1555000", "hi").await;

        assert_eq!(client.calls(), 1);
        assert!(matches!(
            result,
            Err(ProviderError::RetriesExhausted {
                attempts: 1,
                last_error: RequestError::Http(HttpError::Timeout),
            })
        ));
    }

    #[tokio::test]
    async fn invalid_url_is_not_retried() {
        let client = MockClient::new(vec![Err(HttpError::InvalidUrl("bad".to_string()))]);
        let (provider, client) = provider_with(client, 3);

        let result = provider.send_text_message("1555000", "hi").await;

        assert_eq!(client.calls(), 1);
        assert!(matches!(
            result,
            Err(ProviderError::Request(RequestError::Http(
                HttpError::InvalidUrl(_)
            )))
        ));
    }
}

mod responses {
    use super::*;

    #[tokio::test]
    async fn empty_body_is_null() {
        let (provider, _) = provider(MockClient::raw(http::StatusCode::OK, ""));

        let response = provider.send_text_message("1555000", "hi").await.unwrap();

        assert_eq!(response, Value::Null);
    }

    #[tokio::test]
    async fn non_json_success_body_is_not_retried() {
        let (provider, client) = provider(MockClient::raw(http::StatusCode::OK, "<html>"));

        let result = provider.send_text_message("1555000", "hi").await;

        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn created_status_counts_as_success() {
        let (provider, _) = provider(MockClient::raw(http::StatusCode::CREATED, r#"{"a":1}"#));

        let response = provider.send_text_message("1555000", "hi").await.unwrap();

        assert_eq!(response, json!({"a": 1}));
    }
}
