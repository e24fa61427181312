//! Raw routes returned by the routing service and their aggregation.
//!
//! Segment objects are kept as JSON maps because two field-naming schemes are
//! in circulation. [`add_up_route`] looks each field up through
//! [`SEGMENT_SCHEMAS`], so a new naming only needs a new table row.

use std::fmt;

use geo::Coord;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{BoundingBox, WrcError};

/// One raw segment object as sent by the service.
pub type Segment = Map<String, Value>;

/// Field names used by one generation of the segment schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSchema {
    /// Travel time including live traffic, in seconds.
    pub time: &'static str,
    /// Travel time from historical data only, in seconds.
    pub time_without_real_time: &'static str,
    /// Segment length in metres.
    pub length: &'static str,
}

/// Known schemas, tried in order for every field of every segment.
pub const SEGMENT_SCHEMAS: [SegmentSchema; 2] = [
    SegmentSchema {
        time: "cross_time",
        time_without_real_time: "cross_time_without_real_time",
        length: "length",
    },
    SegmentSchema {
        time: "crossTime",
        time_without_real_time: "crossTimeWithoutRealTime",
        length: "length",
    },
];

/// The `response` object of one route alternative.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wrc_core::RawRoute;
///
/// let route: RawRoute = serde_json::from_value(json!({
///     "routeType": ["Best"],
///     "shortRouteName": "M1",
///     "results": [{"length": 1000, "crossTime": 60}]
/// }))?;
/// assert_eq!(route.label(), "Best-M1");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRoute {
    /// Ordered route segments.
    pub results: Vec<Segment>,
    /// Route classification tags such as `"Best"` or `"Fastest"`.
    #[serde(default, rename = "routeType")]
    pub route_type: Vec<String>,
    /// Short display name of the route.
    #[serde(default, rename = "shortRouteName")]
    pub short_route_name: Option<String>,
    /// Long display name, used when no short name is present.
    #[serde(default, rename = "routeName")]
    pub route_name: Option<String>,
}

impl RawRoute {
    /// Label keying this route in multi-path summaries.
    ///
    /// Tags are joined with `-` and followed by the route name; untagged
    /// routes are labelled by name alone.
    #[must_use]
    pub fn label(&self) -> String {
        let display_name = self
            .short_route_name
            .as_deref()
            .or(self.route_name.as_deref())
            .filter(|name| !name.is_empty());
        let tags = self.route_type.join("-");
        match (tags.is_empty(), display_name) {
            (false, Some(name)) => format!("{tags}-{name}"),
            (false, None) => tags,
            (true, Some(name)) => name.to_owned(),
            (true, None) => "route".to_owned(),
        }
    }
}

/// Routes returned by one fetch.
///
/// The service replies with a bare route for single-path requests and a list
/// of alternatives otherwise; the variants keep that distinction visible.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRoutes {
    /// One path was requested and the service returned a bare route.
    Single(RawRoute),
    /// Several paths were requested, or the service sent alternatives.
    Alternatives(Vec<RawRoute>),
}

impl FetchedRoutes {
    /// The first (best) route.
    #[must_use]
    pub fn best(&self) -> Option<&RawRoute> {
        match self {
            Self::Single(route) => Some(route),
            Self::Alternatives(routes) => routes.first(),
        }
    }

    /// Flatten into a list, discarding the shape distinction.
    #[must_use]
    pub fn into_vec(self) -> Vec<RawRoute> {
        match self {
            Self::Single(route) => vec![route],
            Self::Alternatives(routes) => routes,
        }
    }
}

/// Total travel time and distance of a route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteSummary {
    /// Travel time in minutes.
    pub minutes: f64,
    /// Distance in kilometres.
    pub kilometres: f64,
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time {:.2} minutes, distance {:.2} km.",
            self.minutes, self.kilometres
        )
    }
}

/// Sum segment times and lengths into minutes and kilometres.
///
/// When `stop_at` is non-empty, segments whose `path` point lies strictly
/// inside any of those boxes are left out of both sums. Empty boxes never
/// exclude anything.
///
/// # Errors
///
/// Returns [`WrcError::MalformedSegment`] when a counted segment has no
/// numeric value for the selected time field or for `length`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wrc_core::{RawRoute, route::add_up_route};
///
/// let route: RawRoute = serde_json::from_value(json!({
///     "results": [
///         {"length": 1000, "crossTime": 120},
///         {"length": 1000, "cross_time": 120}
///     ]
/// }))?;
/// let summary = add_up_route(&route.results, true, &[])?;
/// assert_eq!(summary.minutes, 4.0);
/// assert_eq!(summary.kilometres, 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "segment times and lengths are summed and converted to minutes and kilometres"
)]
pub fn add_up_route(
    segments: &[Segment],
    real_time: bool,
    stop_at: &[BoundingBox],
) -> Result<RouteSummary, WrcError> {
    let mut seconds = 0.0;
    let mut metres = 0.0;
    for (index, segment) in segments.iter().enumerate() {
        if let Some(point) = path_point(segment)
            && stop_at.iter().any(|bounds| bounds.contains_strictly(point))
        {
            continue;
        }
        let time = if real_time {
            lookup(segment, |schema| schema.time)
        } else {
            lookup(segment, |schema| schema.time_without_real_time)
        };
        seconds += time.ok_or(WrcError::MalformedSegment {
            index,
            field: if real_time {
                "time"
            } else {
                "time without real-time"
            },
        })?;
        metres += lookup(segment, |schema| schema.length).ok_or(WrcError::MalformedSegment {
            index,
            field: "length",
        })?;
    }
    Ok(RouteSummary {
        minutes: seconds / 60.0,
        kilometres: metres / 1000.0,
    })
}

fn lookup(segment: &Segment, key: impl Fn(&SegmentSchema) -> &'static str) -> Option<f64> {
    SEGMENT_SCHEMAS
        .iter()
        .find_map(|schema| segment.get(key(schema)).and_then(Value::as_f64))
}

fn path_point(segment: &Segment) -> Option<Coord> {
    let path = segment.get("path")?;
    Some(Coord {
        x: path.get("x")?.as_f64()?,
        y: path.get("y")?.as_f64()?,
    })
}
