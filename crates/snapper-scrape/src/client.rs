//! Reqwest-based HTTP client for scrape forwarding.

use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::ScrapeConfig;
use crate::service::ScrapeService;
use crate::{Error, ErrorKind, Result, ScrapeProvider, TRACING_TARGET};

/// Inner client that holds the HTTP client and configuration.
struct ScrapeClientInner {
    http: Client,
    endpoint: Url,
    config: ScrapeConfig,
}

/// Reqwest-based client that forwards request bodies to the scraping API.
///
/// The client implements [`ScrapeProvider`] and carries no state besides
/// the connection pool; cloning is cheap.
#[derive(Clone)]
pub struct ScrapeClient {
    inner: Arc<ScrapeClientInner>,
}

impl std::fmt::Debug for ScrapeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapeClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ScrapeClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            timeout_ms = timeout.as_millis(),
            "Creating scrape client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(|err| {
                Error::new(ErrorKind::Configuration)
                    .with_message("Failed to create HTTP client")
                    .with_source(err)
            })?;

        let inner = ScrapeClientInner {
            http,
            endpoint,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ScrapeConfig {
        &self.inner.config
    }

    /// Converts this client into a [`ScrapeService`] for dependency
    /// injection.
    pub fn into_service(self) -> ScrapeService {
        ScrapeService::new(self)
    }

    fn map_transport_error(err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::new(ErrorKind::Timeout)
                .with_message("Request to scraping service timed out")
                .with_source(err)
        } else if err.is_connect() {
            Error::new(ErrorKind::NetworkError)
                .with_message("Failed to connect to scraping service")
                .with_source(err)
        } else if err.is_decode() {
            Error::new(ErrorKind::Serialization)
                .with_message("Scraping service returned invalid JSON")
                .with_source(err)
        } else {
            let message = err.to_string();
            Error::new(ErrorKind::NetworkError)
                .with_message(message)
                .with_source(err)
        }
    }
}

#[async_trait::async_trait]
impl ScrapeProvider for ScrapeClient {
    async fn forward(&self, body: &Value) -> Result<Value> {
        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %self.inner.endpoint,
            "Forwarding scrape request"
        );

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .json(body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();

        tracing::debug!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            "Received scrape response"
        );

        if !status.is_success() {
            return Err(Error::new(ErrorKind::ExternalError)
                .with_message(format!("Scraping service error: {}", status.as_u16())));
        }

        response
            .json::<Value>()
            .await
            .map_err(Self::map_transport_error)
    }
}
