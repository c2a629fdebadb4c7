//! Scrape client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use snapper_core::{Error, ErrorKind, Result};
use url::Url;

/// Default forwarding endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://agents.toolhouse.ai/7078fef9-081e-4f8c-b8ac-c816ef13c75f";

/// Default timeout for forwarded requests: 60 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the scrape forwarding client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(clap::Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ScrapeConfig {
    /// URL the request body is forwarded to.
    #[cfg_attr(
        feature = "config",
        arg(id = "scrape-endpoint", long = "scrape-endpoint", env = "SCRAPE_ENDPOINT", default_value = DEFAULT_ENDPOINT)
    )]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Timeout for forwarded requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "scrape-timeout", env = "SCRAPE_TIMEOUT", default_value = "60")
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header to send with forwarded requests.
    #[cfg_attr(
        feature = "config",
        arg(long = "scrape-user-agent", env = "SCRAPE_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ScrapeConfig {
    /// Parses and validates the configured endpoint.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).map_err(|err| {
            Error::new(ErrorKind::Configuration)
                .with_message(format!("invalid scrape endpoint: {}", self.endpoint))
                .with_source(err)
        })
    }

    /// Returns the timeout as a Duration, falling back to the default when
    /// configured as zero.
    #[must_use]
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }

    /// Returns the effective user agent, using the default if not set.
    #[must_use]
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("snapper/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
