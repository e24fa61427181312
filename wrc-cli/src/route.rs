//! `route` command: summarise the drive between two places.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wrc_core::transport::Transport;
use wrc_core::{CalculatorOptions, Region, RouteCalculator, RouteQuery, VehicleType};
use wrc_http::HttpTransportConfig;

use crate::transport::TransportFactory;
use crate::{ARG_FROM, ARG_TO, CliError, ENV_FROM, ENV_TO};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve both endpoints (addresses or lat,lon pairs), ask \
                 the routing service for one or more routes and print the \
                 travel time and distance of each. Options can come from \
                 CLI flags, configuration files, or environment variables.",
    about = "Summarise travel time and distance between two places"
)]
#[ortho_config(prefix = "WRC")]
pub(crate) struct RouteArgs {
    /// Departure address or `lat,lon` pair.
    #[arg(long = ARG_FROM, value_name = "place")]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// Arrival address or `lat,lon` pair.
    #[arg(long = ARG_TO, value_name = "place")]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// Routing region: US (alias NA), EU, IL or AU. Defaults to EU.
    #[arg(long, value_name = "region")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// Vehicle type: TAXI or MOTORCYCLE; anything else uses a private car.
    #[arg(long, value_name = "type")]
    #[serde(default)]
    pub(crate) vehicle_type: Option<String>,
    /// Number of alternative routes to summarise. Defaults to 1.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) paths: Option<u32>,
    /// Departure offset passed to the service as `at`. Defaults to now.
    #[arg(long, value_name = "offset", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) time_delta: Option<i64>,
    /// Use historical travel times instead of live traffic.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) historic: Option<bool>,
    /// Leave out the parts of the route inside the start and end cities.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) stop_at_bounds: Option<bool>,
    /// Avoid toll roads.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) avoid_toll_roads: Option<bool>,
    /// Avoid roads that need a subscription or vignette.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) avoid_subscription_roads: Option<bool>,
    /// Avoid ferries.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) avoid_ferries: Option<bool>,
    /// Override the service root (e.g. "https://www.waze.com/").
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Client-side request timeout in seconds. Defaults to 30.
    #[arg(long, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    /// Departure place.
    pub(crate) from: String,
    /// Arrival place.
    pub(crate) to: String,
    /// Calculator settings.
    pub(crate) options: CalculatorOptions,
    /// Per-call knobs.
    pub(crate) query: RouteQuery,
    /// Number of alternatives; `1` prints a single summary.
    pub(crate) paths: u32,
    /// HTTP transport settings.
    pub(crate) transport: HttpTransportConfig,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let from = args.from.ok_or(CliError::MissingArgument {
            field: ARG_FROM,
            env: ENV_FROM,
        })?;
        let to = args.to.ok_or(CliError::MissingArgument {
            field: ARG_TO,
            env: ENV_TO,
        })?;

        let region = args
            .region
            .as_deref()
            .map(str::parse::<Region>)
            .transpose()?
            .unwrap_or_default();
        let vehicle_type = args
            .vehicle_type
            .as_deref()
            .map(VehicleType::from_name)
            .unwrap_or_default();
        let options = CalculatorOptions::default()
            .with_region(region)
            .with_vehicle_type(vehicle_type)
            .with_avoid_toll_roads(args.avoid_toll_roads.unwrap_or(false))
            .with_avoid_subscription_roads(args.avoid_subscription_roads.unwrap_or(false))
            .with_avoid_ferries(args.avoid_ferries.unwrap_or(false));
        let query = RouteQuery::default()
            .with_real_time(!args.historic.unwrap_or(false))
            .with_stop_at_bounds(args.stop_at_bounds.unwrap_or(false))
            .with_time_delta(args.time_delta.unwrap_or(0));

        let mut transport = HttpTransportConfig::default();
        if let Some(base_url) = args.base_url {
            transport.base_url = base_url;
        }
        if let Some(secs) = args.timeout_secs {
            transport.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            from,
            to,
            options,
            query,
            paths: args.paths.unwrap_or(1).max(1),
            transport,
        })
    }
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    factory: &dyn TransportFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let transport = factory.build(&config.transport)?;
    write_route_summaries(&config, &*transport, writer)
}

/// Resolve, fetch and print according to `config`.
pub(crate) fn write_route_summaries(
    config: &RouteConfig,
    transport: &dyn Transport,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let calculator = RouteCalculator::new(transport, &config.from, &config.to, config.options)?;
    if config.paths == 1 {
        let summary = calculator.calc_route_info(config.query)?;
        writeln!(writer, "{summary}").map_err(CliError::WriteOutput)?;
        return Ok(());
    }
    let summaries = calculator.calc_all_routes_info(config.paths, config.query)?;
    for (label, summary) in &summaries {
        writeln!(writer, "{label}: {summary}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
