//! Core of the Waze route calculator.
//!
//! Responsibilities:
//! - Resolve addresses or literal `lat,lon` pairs into coordinates.
//! - Build routing requests and walk the region's endpoint fallback list.
//! - Sum route segments into travel time and distance.
//!
//! Boundaries:
//! - No HTTP client lives here; requests go through [`transport::Transport`].
//! - No log output is configured; records go through the `log` facade.
//!
//! Invariants:
//! - Bounding boxes are normalised on receipt.
//! - Resolution happens once per calculator.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod calculator;
mod coordinate;
mod error;
pub mod fetcher;
mod options;
mod region;
pub mod resolver;
pub mod route;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use calculator::{CalculatorOptions, RouteCalculator, RouteQuery};
pub use coordinate::{BoundingBox, Coordinate};
pub use error::WrcError;
pub use options::{RouteOption, RouteOptions, VehicleType};
pub use region::{Region, RegionProfile};
pub use route::{FetchedRoutes, RawRoute, RouteSummary};
pub use transport::{Transport, TransportError};
