//! Calculator tying resolution, fetching and aggregation together.

use std::collections::{BTreeMap, HashMap};

use crate::fetcher::{RouteRequest, fetch_routes};
use crate::route::{self, Segment};
use crate::transport::Transport;
use crate::{
    Coordinate, FetchedRoutes, Region, RouteOptions, RouteSummary, VehicleType, WrcError, resolver,
};

/// Construction-time settings for a [`RouteCalculator`].
///
/// # Examples
///
/// ```
/// use wrc_core::{CalculatorOptions, Region, VehicleType};
///
/// let options = CalculatorOptions::default()
///     .with_region(Region::Us)
///     .with_vehicle_type(VehicleType::Taxi)
///     .with_avoid_toll_roads(true);
/// assert_eq!(options.region, Region::Us);
/// assert!(options.avoid_toll_roads);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculatorOptions {
    /// Region whose servers and geocoding bias are used.
    pub region: Region,
    /// Vehicle class sent with routing requests.
    pub vehicle_type: VehicleType,
    /// Avoid toll roads.
    pub avoid_toll_roads: bool,
    /// Avoid roads that need a subscription or vignette.
    pub avoid_subscription_roads: bool,
    /// Avoid ferries.
    pub avoid_ferries: bool,
}

impl CalculatorOptions {
    /// Set the region.
    #[must_use]
    pub const fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Set the vehicle class.
    #[must_use]
    pub const fn with_vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = vehicle_type;
        self
    }

    /// Set whether toll roads are avoided.
    #[must_use]
    pub const fn with_avoid_toll_roads(mut self, avoid: bool) -> Self {
        self.avoid_toll_roads = avoid;
        self
    }

    /// Set whether subscription roads are avoided.
    #[must_use]
    pub const fn with_avoid_subscription_roads(mut self, avoid: bool) -> Self {
        self.avoid_subscription_roads = avoid;
        self
    }

    /// Set whether ferries are avoided.
    #[must_use]
    pub const fn with_avoid_ferries(mut self, avoid: bool) -> Self {
        self.avoid_ferries = avoid;
        self
    }

    /// Avoidance flags as sent on the wire. Trails are always avoided.
    #[must_use]
    pub fn route_options(&self) -> RouteOptions {
        RouteOptions::default()
            .with_avoid_toll_roads(self.avoid_toll_roads)
            .with_avoid_subscription_roads(self.avoid_subscription_roads)
            .with_avoid_ferries(self.avoid_ferries)
    }
}

/// Per-call knobs for the summary helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    /// Use live-traffic times rather than historical ones.
    pub real_time: bool,
    /// Leave out segments inside the start or end city bounds.
    pub stop_at_bounds: bool,
    /// Departure offset in seconds from now.
    pub time_delta: i64,
}

impl Default for RouteQuery {
    fn default() -> Self {
        Self {
            real_time: true,
            stop_at_bounds: false,
            time_delta: 0,
        }
    }
}

impl RouteQuery {
    /// Set whether live-traffic times are used.
    #[must_use]
    pub const fn with_real_time(mut self, real_time: bool) -> Self {
        self.real_time = real_time;
        self
    }

    /// Set whether segments inside the endpoint cities are excluded.
    #[must_use]
    pub const fn with_stop_at_bounds(mut self, stop_at_bounds: bool) -> Self {
        self.stop_at_bounds = stop_at_bounds;
        self
    }

    /// Set the departure offset in seconds.
    #[must_use]
    pub const fn with_time_delta(mut self, time_delta: i64) -> Self {
        self.time_delta = time_delta;
        self
    }
}

/// Route calculator between two resolved endpoints.
///
/// Both endpoints are resolved once in [`RouteCalculator::new`]; every later
/// call reuses them.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wrc_core::test_support::StubTransport;
/// use wrc_core::{CalculatorOptions, RouteCalculator, RouteQuery};
///
/// let transport = StubTransport::new().with_reply(
///     "row-RoutingManager/routingRequest",
///     json!({"response": {"results": [{"length": 1500, "crossTime": 90}]}}),
/// );
/// let calculator = RouteCalculator::new(
///     transport,
///     "47.4979,19.0402",
///     "47.6875,17.6504",
///     CalculatorOptions::default(),
/// )?;
/// let summary = calculator.calc_route_info(RouteQuery::default())?;
/// assert_eq!(summary.minutes, 1.5);
/// assert_eq!(summary.kilometres, 1.5);
/// # Ok::<(), wrc_core::WrcError>(())
/// ```
#[derive(Debug)]
pub struct RouteCalculator<T> {
    transport: T,
    options: CalculatorOptions,
    start: Coordinate,
    end: Coordinate,
}

impl<T: Transport> RouteCalculator<T> {
    /// Resolve `start` and `end` and build a calculator.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from either endpoint.
    pub fn new(
        transport: T,
        start: &str,
        end: &str,
        options: CalculatorOptions,
    ) -> Result<Self, WrcError> {
        log::info!("From: {start} - to: {end}");
        let start_coords = resolver::resolve(&transport, options.region, start)?;
        log::debug!(
            "Start coords: ({}, {})",
            start_coords.latitude(),
            start_coords.longitude()
        );
        let end_coords = resolver::resolve(&transport, options.region, end)?;
        log::debug!(
            "End coords: ({}, {})",
            end_coords.latitude(),
            end_coords.longitude()
        );
        Ok(Self {
            transport,
            options,
            start: start_coords,
            end: end_coords,
        })
    }

    /// Resolve any address with this calculator's region and transport.
    ///
    /// # Errors
    ///
    /// See [`resolver::resolve`].
    pub fn address_to_coords(&self, address: &str) -> Result<Coordinate, WrcError> {
        resolver::resolve(&self.transport, self.options.region, address)
    }

    /// Fetch up to `n_paths` routes departing `time_delta` seconds from now.
    ///
    /// # Errors
    ///
    /// See [`fetch_routes`].
    pub fn get_route(&self, n_paths: u32, time_delta: i64) -> Result<FetchedRoutes, WrcError> {
        let request = RouteRequest {
            start: &self.start,
            end: &self.end,
            region: self.options.region,
            options: self.options.route_options(),
            vehicle_type: self.options.vehicle_type,
            n_paths,
            time_delta,
        };
        fetch_routes(&self.transport, &request)
    }

    /// Sum `segments`, optionally skipping those inside the endpoint cities.
    ///
    /// # Errors
    ///
    /// See [`route::add_up_route`].
    pub fn add_up_route(
        &self,
        segments: &[Segment],
        real_time: bool,
        stop_at_bounds: bool,
    ) -> Result<RouteSummary, WrcError> {
        let bounds = [*self.start.bounds(), *self.end.bounds()];
        let stop_at: &[_] = if stop_at_bounds { &bounds } else { &[] };
        route::add_up_route(segments, real_time, stop_at)
    }

    /// Fetch the best route and summarise it.
    ///
    /// # Errors
    ///
    /// Propagates fetch and aggregation failures; a reply without any route
    /// is [`WrcError::MalformedResponse`].
    pub fn calc_route_info(&self, query: RouteQuery) -> Result<RouteSummary, WrcError> {
        let fetched = self.get_route(1, query.time_delta)?;
        let best = fetched.best().ok_or_else(|| WrcError::MalformedResponse {
            reason: "no route alternatives".to_owned(),
        })?;
        let summary = self.add_up_route(&best.results, query.real_time, query.stop_at_bounds)?;
        log::info!("{summary}");
        Ok(summary)
    }

    /// Fetch up to `n_paths` alternatives and summarise each by label.
    ///
    /// Labels repeated across alternatives get `#2`, `#3`, ... appended in
    /// route order.
    ///
    /// # Errors
    ///
    /// Propagates fetch and aggregation failures.
    pub fn calc_all_routes_info(
        &self,
        n_paths: u32,
        query: RouteQuery,
    ) -> Result<BTreeMap<String, RouteSummary>, WrcError> {
        let routes = self.get_route(n_paths, query.time_delta)?.into_vec();
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut summaries = BTreeMap::new();
        for raw in &routes {
            let summary = self.add_up_route(&raw.results, query.real_time, query.stop_at_bounds)?;
            let base = raw.label();
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            let label = if *count == 1 {
                base
            } else {
                format!("{base}#{count}")
            };
            summaries.insert(label, summary);
        }
        log_extremes(&summaries);
        Ok(summaries)
    }

    /// Resolved departure point.
    #[must_use]
    pub const fn start(&self) -> &Coordinate {
        &self.start
    }

    /// Resolved arrival point.
    #[must_use]
    pub const fn end(&self) -> &Coordinate {
        &self.end
    }

    /// Region chosen at construction.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.options.region
    }

    /// Settings chosen at construction.
    #[must_use]
    pub const fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

fn log_extremes(summaries: &BTreeMap<String, RouteSummary>) {
    let (Some(min_time), Some(max_time), Some(min_dist), Some(max_dist)) = (
        extreme(summaries, |s| s.minutes, f64::min),
        extreme(summaries, |s| s.minutes, f64::max),
        extreme(summaries, |s| s.kilometres, f64::min),
        extreme(summaries, |s| s.kilometres, f64::max),
    ) else {
        return;
    };
    log::info!(
        "Time {min_time:.2} - {max_time:.2} minutes, distance {min_dist:.2} - {max_dist:.2} km."
    );
}

fn extreme(
    summaries: &BTreeMap<String, RouteSummary>,
    field: impl Fn(&RouteSummary) -> f64,
    pick: fn(f64, f64) -> f64,
) -> Option<f64> {
    summaries.values().map(field).reduce(pick)
}
