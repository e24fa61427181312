//! Command-line interface for the Waze route calculator.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod error;
mod geocode;
mod route;
mod transport;

pub use error::CliError;

use geocode::{GeocodeArgs, run_geocode_with};
use route::{RouteArgs, run_route_with};
use transport::{HttpTransportFactory, TransportFactory};

const ARG_FROM: &str = "from";
const ARG_TO: &str = "to";
const ARG_ADDRESS: &str = "address";
const ENV_FROM: &str = "WRC_CMDS_ROUTE_FROM";
const ENV_TO: &str = "WRC_CMDS_ROUTE_TO";
const ENV_ADDRESS: &str = "WRC_CMDS_GEOCODE_ADDRESS";

/// Run the `wrc` CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, or
/// when the lookup itself fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &HttpTransportFactory, &mut stdout)
}

fn dispatch(
    command: Command,
    factory: &dyn TransportFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Route(args) => run_route_with(args, factory, writer),
        Command::Geocode(args) => run_geocode_with(args, factory, writer),
    }
}

/// Install `env_logger` on stderr; `RUST_LOG` wins over the default filter.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .target(env_logger::Target::Stderr)
    .format_timestamp(None)
    .format_module_path(false)
    .try_init();
    if result.is_err() {
        log::debug!("logger already installed");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wrc",
    about = "Travel time and distance lookups against the Waze routing service",
    version
)]
struct Cli {
    /// Log requests and resolved coordinates.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarise travel time and distance between two places.
    Route(RouteArgs),
    /// Resolve a place to coordinates.
    Geocode(GeocodeArgs),
}

#[cfg(test)]
mod tests;
