use thiserror::Error;

/// Failures raised by a [`crate::transport::Transport`] before any body is read.
///
/// HTTP error statuses and undecodable bodies are not errors; transports
/// report them as an absent body so the caller can try the next endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be delivered (DNS, refused connection, TLS).
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Description supplied by the HTTP client.
        message: String,
    },
    /// The request exceeded the client-side timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
}
