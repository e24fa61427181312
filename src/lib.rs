//! Facade crate for the Waze route calculator.
//!
//! This crate re-exports the calculator, its domain types, and the transport
//! seam from `wrc-core`. The reqwest-backed transport is available behind the
//! `http` feature, which is enabled by default.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use wrc_core::{
    BoundingBox, CalculatorOptions, Coordinate, FetchedRoutes, RawRoute, Region, RegionProfile,
    RouteCalculator, RouteOption, RouteOptions, RouteQuery, RouteSummary, Transport,
    TransportError, VehicleType, WrcError, fetcher, resolver, route, transport,
};

#[cfg(feature = "test-support")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub use wrc_core::test_support;

#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub use wrc_http::{HttpTransport, HttpTransportConfig, TransportBuildError};

/// Errors raised while building a calculator over the live service.
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
#[derive(Debug, thiserror::Error)]
pub enum HttpCalculatorError {
    /// The HTTP client or its runtime could not be created.
    #[error(transparent)]
    Transport(#[from] TransportBuildError),
    /// An endpoint could not be resolved.
    #[error(transparent)]
    Route(#[from] WrcError),
}

/// Build a calculator that talks to the live service with default settings.
///
/// Both endpoints are resolved before this returns, so an address costs one
/// geocoding request.
///
/// # Errors
///
/// Returns [`HttpCalculatorError::Transport`] when the client cannot be built
/// and [`HttpCalculatorError::Route`] when either endpoint fails to resolve.
///
/// # Examples
///
/// ```no_run
/// use waze_route_calculator::{CalculatorOptions, RouteQuery, http_calculator};
///
/// let calculator = http_calculator(
///     "Budapest, Hungary",
///     "Gyor, Hungary",
///     CalculatorOptions::default(),
/// )?;
/// let summary = calculator.calc_route_info(RouteQuery::default())?;
/// println!("{summary}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub fn http_calculator(
    start: &str,
    end: &str,
    options: CalculatorOptions,
) -> Result<RouteCalculator<HttpTransport>, HttpCalculatorError> {
    let transport = HttpTransport::new()?;
    Ok(RouteCalculator::new(transport, start, end, options)?)
}
