//! Build routing requests and walk the region's endpoint fallback list.

use serde_json::Value;

use crate::transport::{Query, Transport};
use crate::{Coordinate, FetchedRoutes, RawRoute, Region, RouteOption, RouteOptions, VehicleType, WrcError};

/// Server-side routing timeout in milliseconds, passed through verbatim.
pub const ROUTING_TIMEOUT_MS: u32 = 60_000;

/// Everything needed to ask for routes between two resolved points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest<'a> {
    /// Departure point.
    pub start: &'a Coordinate,
    /// Arrival point.
    pub end: &'a Coordinate,
    /// Region whose routing servers are used.
    pub region: Region,
    /// Avoidance flags.
    pub options: RouteOptions,
    /// Vehicle class.
    pub vehicle_type: VehicleType,
    /// Number of alternatives to ask for.
    pub n_paths: u32,
    /// Departure offset in seconds from now.
    pub time_delta: i64,
}

impl RouteRequest<'_> {
    /// Query parameters for the routing endpoint.
    #[must_use]
    pub fn query(&self) -> Query {
        let mut query: Query = vec![
            ("from", self.start.to_waze_point()),
            ("to", self.end.to_waze_point()),
            ("at", self.time_delta.to_string()),
            ("returnJSON", "true".to_owned()),
            ("returnGeometries", "true".to_owned()),
            ("returnInstructions", "true".to_owned()),
            ("timeout", ROUTING_TIMEOUT_MS.to_string()),
            ("nPaths", self.n_paths.to_string()),
            ("options", self.options.to_query_value()),
        ];
        if self.vehicle_type != VehicleType::Default {
            query.push(("vehicleType", self.vehicle_type.as_str().to_owned()));
        }
        if !self.options.get(RouteOption::AvoidSubscriptionRoads) {
            query.push(("subscription", "*".to_owned()));
        }
        query
    }
}

/// Fetch routes, trying the region's routing paths in order.
///
/// The first reply that is a non-empty JSON value without an `error` key is
/// used. Absent, empty, falsy and error replies move on to the next path. An
/// empty `alternatives` list is ignored in favour of `response`.
///
/// # Errors
///
/// - [`WrcError::Routing`] when the last reply carried an `error`.
/// - [`WrcError::EmptyResponse`] when no path produced a usable reply.
/// - [`WrcError::MalformedResponse`] when the usable reply holds no route.
/// - [`WrcError::Transport`] as soon as a request fails outright.
pub fn fetch_routes<T: Transport>(
    transport: &T,
    request: &RouteRequest<'_>,
) -> Result<FetchedRoutes, WrcError> {
    let query = request.query();
    let mut last = None;
    for path in request.region.profile().routing_paths {
        log::debug!("Requesting routes from {path}");
        let reply = transport.get_json(path, &query)?;
        match reply {
            Some(body) if is_usable(&body) => return into_routes(body, request.n_paths),
            Some(body) if body.get("error").is_some() => {
                log::warn!("Routing endpoint {path} returned an error: {}", error_message(&body));
                last = Some(body);
            }
            other => {
                log::warn!("Routing endpoint {path} returned no usable response");
                last = other;
            }
        }
    }
    Err(match last.as_ref().and_then(|body| body.get("error")) {
        Some(error) => WrcError::Routing {
            message: value_message(error),
        },
        None => WrcError::EmptyResponse,
    })
}

fn is_usable(body: &Value) -> bool {
    is_present(body) && body.get("error").is_none()
}

/// `null`, `false`, zero and empty strings, lists or objects carry nothing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn error_message(body: &Value) -> String {
    body.get("error").map(value_message).unwrap_or_default()
}

fn value_message(value: &Value) -> String {
    match value {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    }
}

fn into_routes(mut body: Value, n_paths: u32) -> Result<FetchedRoutes, WrcError> {
    if let Some(Value::Array(alternatives)) = body
        .get_mut("alternatives")
        .filter(|alternatives| is_present(alternatives))
        .map(Value::take)
    {
        let limit = usize::try_from(n_paths).unwrap_or(usize::MAX);
        return alternatives
            .into_iter()
            .take(limit)
            .map(|mut alternative| {
                let response = alternative.get_mut("response").map(Value::take);
                parse_route(response)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FetchedRoutes::Alternatives);
    }
    let route = parse_route(body.get_mut("response").map(Value::take))?;
    Ok(if n_paths > 1 {
        FetchedRoutes::Alternatives(vec![route])
    } else {
        FetchedRoutes::Single(route)
    })
}

fn parse_route(response: Option<Value>) -> Result<RawRoute, WrcError> {
    let object = response.ok_or_else(|| malformed("missing `response` object"))?;
    serde_json::from_value(object).map_err(|err| malformed(&err.to_string()))
}

fn malformed(reason: &str) -> WrcError {
    WrcError::MalformedResponse {
        reason: reason.to_owned(),
    }
}
