//! Router configuration
//!
//! Each router owns its credential, base URL and language. Nothing here is
//! process-global.

use crate::RouterError;
use std::time::Duration;

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default language tag.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Settings a router is constructed from.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Static credential sent as the `api_key` query parameter
    pub api_key: String,
    /// Initial language tag; can be changed later on the router
    pub language: String,
    /// Base URL without trailing slash
    pub base_url: String,
    /// Skip TLS certificate verification. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
    /// User-Agent header for outgoing requests
    pub user_agent: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl RouterConfig {
    /// Creates a new builder.
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::default()
    }
}

/// Builder for [`RouterConfig`].
#[derive(Debug, Default)]
pub struct RouterConfigBuilder {
    api_key: Option<String>,
    language: Option<String>,
    base_url: Option<String>,
    accept_invalid_certs: bool,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl RouterConfigBuilder {
    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the language tag (default: `en-US`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Overrides the base URL (for local test servers).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Disables TLS certificate verification.
    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Sets the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::Config` when no API key was set or it is blank.
    pub fn build(self) -> Result<RouterConfig, RouterError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RouterError::Config("api_key is required".to_string()))?;

        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(RouterConfig {
            api_key,
            language: self.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            base_url,
            accept_invalid_certs: self.accept_invalid_certs,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("tmdb_router/{}", env!("CARGO_PKG_VERSION"))),
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = RouterConfig::builder().language("fr-FR").build();

        assert!(matches!(result, Err(RouterError::Config(ref msg)) if msg.contains("api_key")));
        assert!(RouterConfig::builder().api_key("  ").build().is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = RouterConfig::builder().api_key("k").build().unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert!(!config.accept_invalid_certs);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("tmdb_router/"));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = RouterConfig::builder()
            .api_key("k")
            .base_url("http://localhost:8080/3/")
            .accept_invalid_certs(true)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/3");
        assert!(config.accept_invalid_certs);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
