//! reqwest-backed [`Transport`] talking to the live routing service.
//!
//! The [`Transport`] trait is synchronous so the calculator stays usable from
//! plain `main` functions. This transport bridges the async HTTP calls by
//! blocking on a Tokio runtime internally.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use serde_json::Value;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use wrc_core::transport::{Query, Transport, TransportError};

/// Service root used when no base URL is given.
pub const DEFAULT_BASE_URL: &str = "https://www.waze.com/";

/// Browser-like user agent; the service rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Referer sent with every request.
pub const DEFAULT_REFERER: &str = "https://www.waze.com/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for [`HttpTransport`] construction failures.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    /// The base URL could not be parsed.
    #[error("invalid base URL {url}: {source}")]
    BaseUrl {
        /// The URL as configured.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The referer is not a valid header value.
    #[error("invalid referer header: {0}")]
    Referer(#[from] reqwest::header::InvalidHeaderValue),
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Service root; request paths are resolved against it.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// `referer` header value.
    pub referer: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            referer: DEFAULT_REFERER.to_owned(),
        }
    }
}

impl HttpTransportConfig {
    /// Create a configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the `referer` header.
    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }
}

/// Blocking JSON-over-HTTP transport.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the transport blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime (detected via
/// [`Handle::try_current()`] and [`RuntimeFlavor::MultiThread`]) it uses that
/// runtime's handle with [`tokio::task::block_in_place`]. Inside a
/// `current_thread` runtime it blocks the caller while a scoped helper thread
/// drives the request on the transport's own runtime, so any task waiting on
/// the caller's runtime stalls until the reply arrives.
///
/// # Examples
///
/// ```no_run
/// use wrc_core::transport::Transport;
/// use wrc_http::HttpTransport;
///
/// let transport = HttpTransport::new()?;
/// let reply = transport.get_json(
///     "row-SearchServer/mozi",
///     &vec![("q", "Budapest".to_owned()), ("lang", "eng".to_owned())],
/// )?;
/// assert!(reply.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
    base: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport for the public service with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, TransportBuildError> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or referer is invalid, or if the
    /// HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpTransportConfig) -> Result<Self, TransportBuildError> {
        let base = parse_base_url(&config.base_url)?;
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_str(&config.referer)?);
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(TransportBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            base,
            runtime,
        })
    }

    /// Settings this transport was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Absolute URL for `path` (without query).
    fn build_url(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| TransportError::Network {
                url: format!("{}{path}", self.base),
                message: err.to_string(),
            })
    }

    async fn get_json_async(&self, path: &str, query: &Query) -> Result<Option<Value>, TransportError> {
        let url = self.build_url(path)?;
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("{url} answered {status}");
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        match serde_json::from_slice(&body) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                log::debug!("{url} sent a body that is not JSON: {err}");
                Ok(None)
            }
        }
    }

    /// Convert a reqwest error to a `TransportError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        TransportError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportBuildError> {
    let mut base = Url::parse(raw).map_err(|source| TransportBuildError::BaseUrl {
        url: raw.to_owned(),
        source,
    })?;
    // `Url::join` replaces the last segment unless the path ends in a slash.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

impl Transport for HttpTransport {
    /// Issue the request, blocking until the body has been read.
    ///
    /// Safe to call from plain threads and from either Tokio runtime flavour.
    fn get_json(&self, path: &str, query: &Query) -> Result<Option<Value>, TransportError> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.get_json_async(path, query)))
            }
            // A runtime cannot block on another from its own thread.
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| self.runtime.block_on(self.get_json_async(path, query)))
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            }),
            Err(_) => self.runtime.block_on(self.get_json_async(path, query)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://www.waze.com/", "https://www.waze.com/row-SearchServer/mozi")]
    #[case("http://127.0.0.1:8080", "http://127.0.0.1:8080/row-SearchServer/mozi")]
    #[case("http://mock.test/prefix", "http://mock.test/prefix/row-SearchServer/mozi")]
    fn build_url_appends_path_to_base(#[case] base: &str, #[case] expected: &str) {
        let transport = HttpTransport::with_config(HttpTransportConfig::new(base))
            .expect("transport should build");

        let url = transport
            .build_url("row-SearchServer/mozi")
            .expect("url should join");

        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn invalid_base_url_is_rejected() {
        let err = HttpTransport::with_config(HttpTransportConfig::new("not a url"))
            .expect_err("should fail");
        assert!(matches!(err, TransportBuildError::BaseUrl { .. }));
    }

    #[rstest]
    fn invalid_referer_is_rejected() {
        let config = HttpTransportConfig::default().with_referer("bad\nvalue");
        let err = HttpTransport::with_config(config).expect_err("should fail");
        assert!(matches!(err, TransportBuildError::Referer(_)));
    }

    #[rstest]
    fn defaults_mimic_a_browser() {
        let config = HttpTransportConfig::default();
        assert_eq!(config.base_url, "https://www.waze.com/");
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.referer, "https://www.waze.com/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpTransportConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0")
            .with_referer("http://example.com/");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.referer, "http://example.com/");
    }

    #[rstest]
    fn unreachable_host_is_a_network_error() {
        let config = HttpTransportConfig::new("http://127.0.0.1:1/")
            .with_timeout(Duration::from_secs(5));
        let transport = HttpTransport::with_config(config).expect("transport should build");

        let err = transport
            .get_json("SearchServer/mozi", &Query::new())
            .expect_err("should fail");

        assert!(
            matches!(err, TransportError::Network { ref url, .. } if url == "http://127.0.0.1:1/SearchServer/mozi"),
            "expected network error, got {err:?}"
        );
    }
}
