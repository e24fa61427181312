//! HTTP transport for the Waze route calculator.
//!
//! [`HttpTransport`] implements [`wrc_core::transport::Transport`] with a
//! reqwest client, so a [`wrc_core::RouteCalculator`] can talk to the live
//! service.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use wrc_core::{CalculatorOptions, RouteCalculator, RouteQuery};
//! use wrc_http::{HttpTransport, HttpTransportConfig};
//!
//! let config = HttpTransportConfig::default().with_timeout(Duration::from_secs(10));
//! let transport = HttpTransport::with_config(config)?;
//! let calculator = RouteCalculator::new(
//!     transport,
//!     "Budapest, Hungary",
//!     "Gyor, Hungary",
//!     CalculatorOptions::default(),
//! )?;
//! let summary = calculator.calc_route_info(RouteQuery::default())?;
//! println!("{summary}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod transport;

pub use transport::{
    DEFAULT_BASE_URL, DEFAULT_REFERER, DEFAULT_USER_AGENT, HttpTransport, HttpTransportConfig,
    TransportBuildError,
};
