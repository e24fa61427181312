//! Errors surfaced by the route calculator.

use thiserror::Error;

use crate::transport::TransportError;

/// Failures from resolving endpoints, fetching routes, or summing segments.
///
/// None of these are retried locally; they reach the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WrcError {
    /// No geocoding candidate with a city was returned for the address.
    #[error("cannot geocode address: {address}")]
    Geocode {
        /// The address as supplied by the caller.
        address: String,
    },
    /// The routing service answered with an explicit `error` field.
    #[error("routing service error: {message}")]
    Routing {
        /// Message taken from the `error` field.
        message: String,
    },
    /// Every routing endpoint was tried without a usable body.
    #[error("empty response from every routing endpoint")]
    EmptyResponse,
    /// A usable body arrived but held no route object.
    #[error("malformed routing response: {reason}")]
    MalformedResponse {
        /// What was missing or mistyped.
        reason: String,
    },
    /// A route segment lacked a numeric field the aggregator needs.
    #[error("route segment {index} has no numeric {field} field")]
    MalformedSegment {
        /// Position of the segment in the route.
        index: usize,
        /// Logical field name (`time`, `time without real-time` or `length`).
        field: &'static str,
    },
    /// A literal coordinate pair matched the pattern but failed to parse.
    #[error("invalid coordinate pair: {input}")]
    InvalidCoordinates {
        /// The literal as supplied.
        input: String,
    },
    /// The region name is not in the region table.
    #[error("unknown region: {name}")]
    UnknownRegion {
        /// The name as supplied.
        name: String,
    },
    /// The transport could not complete a request.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
