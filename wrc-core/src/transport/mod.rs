//! Blocking JSON-over-HTTP seam between the calculator and the network.
//!
//! The calculator only ever issues `GET` requests with query parameters and
//! reads JSON back. Keeping that behind [`Transport`] lets the core crate stay
//! free of any HTTP client, and lets tests script replies with
//! [`StubTransport`](crate::test_support::StubTransport).

mod error;

use serde_json::Value;

pub use error::TransportError;

/// Ordered query parameters for one request.
pub type Query = Vec<(&'static str, String)>;

/// Issue a `GET` against a path relative to the service root.
///
/// Implementations must return:
/// - `Ok(Some(value))` for a successful status with a JSON body,
/// - `Ok(None)` for a non-success status or a body that is not JSON,
/// - `Err(_)` only when the request itself could not complete.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Value, json};
/// use wrc_core::transport::{Query, Transport, TransportError};
///
/// struct Echo;
///
/// impl Transport for Echo {
///     fn get_json(&self, path: &str, query: &Query) -> Result<Option<Value>, TransportError> {
///         Ok(Some(json!({ "path": path, "params": query.len() })))
///     }
/// }
///
/// let reply = Echo.get_json("SearchServer/mozi", &vec![("q", "Budapest".to_owned())])?;
/// assert_eq!(reply, Some(json!({ "path": "SearchServer/mozi", "params": 1 })));
/// # Ok::<(), TransportError>(())
/// ```
pub trait Transport {
    /// Fetch `path` with `query` and decode the body as JSON.
    fn get_json(&self, path: &str, query: &Query) -> Result<Option<Value>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_json(&self, path: &str, query: &Query) -> Result<Option<Value>, TransportError> {
        (**self).get_json(path, query)
    }
}
