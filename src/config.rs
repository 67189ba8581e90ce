//! client configuration
//!
//! build a [`ClientConfig`] with the api url and optional overrides, then
//! pass it to [`crate::Client::new`] to create a client. anilist allows
//! anonymous queries, so the bearer token is optional.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// default anilist graphql endpoint
pub const API_URL: &str = "https://graphql.anilist.co";

/// configuration for the anilist client
#[derive(Clone)]
pub struct ClientConfig {
    /// original api url input
    pub(crate) raw_api_url: String,

    /// graphql endpoint url
    pub(crate) api_url: Url,

    /// whether the provided api url parsed successfully
    pub(crate) api_url_valid: bool,

    /// bearer token for authorized queries
    pub(crate) token: Option<String>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// whether to verify ssl certificates
    pub(crate) verify_ssl: bool,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// prebuilt http client (takes precedence over http_client_builder)
    pub(crate) http_client: Option<reqwest::Client>,

    /// callback to customize the http client builder before building
    pub(crate) http_client_builder:
        Option<Arc<dyn Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(API_URL)
    }
}

impl ClientConfig {
    /// create a new client configuration
    ///
    /// # arguments
    ///
    /// * `api_url` - the graphql endpoint (normally [`API_URL`])
    ///
    /// # example
    ///
    /// ```
    /// use anilist::ClientConfig;
    ///
    /// let config = ClientConfig::default().with_token("your-token-here");
    /// ```
    pub fn new(api_url: impl AsRef<str>) -> Self {
        let api_url_str = api_url.as_ref();

        let normalized = api_url_str.trim_end_matches('/');

        let (api_url, api_url_valid) = match Url::parse(normalized)
            .or_else(|_| Url::parse(&format!("https://{}", normalized)))
        {
            Ok(url) => (url, true),
            Err(_) => (Url::parse("https://invalid.invalid").unwrap(), false),
        };

        Self {
            raw_api_url: api_url_str.to_string(),
            api_url,
            api_url_valid,
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("anilist-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            extra_headers: HeaderMap::new(),
            http_client: None,
            http_client_builder: None,
        }
    }

    /// set the bearer token for authorized queries
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// access extra headers configured on this client
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// inject a prebuilt http client.
    ///
    /// when set, this client is used as-is and takes precedence over
    /// `with_http_client_builder`. all transport configuration comes from the
    /// prebuilt client; the corresponding `ClientConfig` fields are ignored,
    /// including the bearer token.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// customize the http client builder before the client is created.
    ///
    /// the callback receives a builder that already has the auth header,
    /// extra headers, user agent, timeout, and ssl settings applied.
    /// use this to add proxy config, custom tls roots, or other transport
    /// settings without reimplementing the defaults.
    ///
    /// ignored if `with_http_client` is also set.
    pub fn with_http_client_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync + 'static,
    {
        self.http_client_builder = Some(Arc::new(f));
        self
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.api_url_valid {
            return Err(Error::Config(format!(
                "invalid api url: {}",
                self.raw_api_url
            )));
        }

        if self.api_url.scheme() != "http" && self.api_url.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.api_url.scheme()
            )));
        }

        if let Some(token) = &self.token {
            if token.is_empty() {
                return Err(Error::Config("api token cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    /// the graphql endpoint url
    pub(crate) fn graphql_url(&self) -> Url {
        self.api_url.clone()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .field("extra_headers", &self.extra_headers.len())
            .field("http_client", &self.http_client.is_some())
            .field("http_client_builder", &self.http_client_builder.is_some())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.graphql_url().as_str().trim_end_matches('/'), API_URL);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_validation() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());

        let with_token = ClientConfig::default().with_token("token");
        assert!(with_token.validate().is_ok());

        let empty_token = ClientConfig::default().with_token("");
        assert!(matches!(empty_token.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = ClientConfig::default();
        config.api_url_valid = false;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let config = ClientConfig::new("ftp://example.com");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_helpers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-test"),
            HeaderValue::from_static("value"),
        );

        let config = ClientConfig::default()
            .with_token("token")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("anilist-test")
            .with_ssl_verification(false)
            .with_headers(headers.clone())
            .with_header(
                HeaderName::from_static("x-other"),
                HeaderValue::from_static("other"),
            );

        assert_eq!(config.token.as_deref(), Some("token"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "anilist-test");
        assert!(!config.verify_ssl);
        assert_eq!(config.extra_headers.get("x-test").unwrap(), "value");
        assert_eq!(config.extra_headers.get("x-other").unwrap(), "other");
        assert_eq!(config.extra_headers(), &config.extra_headers);
    }

    #[test]
    fn test_with_http_client() {
        let prebuilt = reqwest::Client::new();
        let config = ClientConfig::default().with_http_client(prebuilt);
        assert!(config.http_client.is_some());
        assert!(config.http_client_builder.is_none());
    }

    #[test]
    fn test_with_http_client_builder() {
        let config =
            ClientConfig::default().with_http_client_builder(|b| b.connection_verbose(true));
        assert!(config.http_client.is_none());
        assert!(config.http_client_builder.is_some());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::default().with_token("secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret"));
    }
}
