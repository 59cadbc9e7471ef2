//! HTTP transport
//!
//! The router talks to the network through [`HttpTransport`] so tests can
//! substitute canned responses. [`ReqwestTransport`] is the blocking
//! production implementation.

use crate::RouterError;
use crate::config::RouterConfig;
use crate::url_builder::redact_api_key;

/// Performs a single GET and hands back the raw body.
pub trait HttpTransport {
    /// Fetches `url` and returns the response body.
    ///
    /// Non-success HTTP statuses are not errors here: the catalog reports
    /// its failures in the body, which the router classifies.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::Transport` when the request cannot be sent or
    /// the body cannot be read.
    fn get(&self, url: &str) -> Result<String, RouterError>;
}

/// Blocking reqwest-based transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds the underlying HTTP client from the router configuration.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::Config` if the client cannot be built.
    pub fn new(config: &RouterConfig) -> Result<Self, RouterError> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RouterError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<String, RouterError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| RouterError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        tracing::debug!(url = %redact_api_key(url), status = status.as_u16(), "TMDB API response");

        response
            .text()
            .map_err(|e| RouterError::Transport(e.without_url().to_string()))
    }
}
