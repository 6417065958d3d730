//! Production HTTP client implementation using reqwest.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// The underlying `reqwest::Client` (connection pool and TLS state) is built
/// on the first request and reused for every request after that. [`close`]
/// drops it; the next request builds a fresh one.
///
/// [`close`]: HttpClient::close
///
/// # Example
///
/// ```no_run
/// use whatsapi::transport::{ReqwestClient, HttpClient, HttpRequest};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_timeout(Duration::from_secs(30));
/// let url = Url::parse("http://localhost:8080/instance/connectionState/main")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ReqwestClient {
    timeout: Option<Duration>,
    session: Mutex<Option<reqwest::Client>>,
}

impl ReqwestClient {
    /// Creates a new HTTP client with reqwest's default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an HTTP client whose requests are each bounded by `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            session: Mutex::new(None),
        }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// The given client is used as the open session. After [`close`] the
    /// replacement session uses the default configuration.
    ///
    /// [`close`]: HttpClient::close
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            timeout: None,
            session: Mutex::new(Some(client)),
        }
    }

    /// Returns the configured per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns true if a session is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock_session().is_some()
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<reqwest::Client>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the open session, building it first if needed.
    fn session(&self) -> Result<reqwest::Client, HttpError> {
        let mut guard = self.lock_session();
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpError::Connection(Box::new(e)))?;

        tracing::debug!("Created new HTTP session");
        *guard = Some(client.clone());
        Ok(client)
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let session = self.session()?;

        let mut builder = session.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(map_send_error)?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }

    fn close(&self) {
        if self.lock_session().take().is_some() {
            tracing::info!("HTTP session closed");
        }
    }
}

fn map_send_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
