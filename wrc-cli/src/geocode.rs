//! `geocode` command: resolve one place to coordinates.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wrc_core::transport::Transport;
use wrc_core::{Region, resolver};
use wrc_http::HttpTransportConfig;

use crate::transport::TransportFactory;
use crate::{ARG_ADDRESS, CliError, ENV_ADDRESS};

/// CLI arguments for the `geocode` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Resolve an address or lat,lon pair to coordinates")]
#[ortho_config(prefix = "WRC")]
pub(crate) struct GeocodeArgs {
    /// Address or `lat,lon` pair to resolve.
    #[arg(value_name = "place")]
    #[serde(default)]
    pub(crate) address: Option<String>,
    /// Region whose geocoder is queried. Defaults to EU.
    #[arg(long, value_name = "region")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// Override the service root.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

/// Resolved `geocode` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GeocodeConfig {
    pub(crate) address: String,
    pub(crate) region: Region,
    pub(crate) transport: HttpTransportConfig,
}

impl TryFrom<GeocodeArgs> for GeocodeConfig {
    type Error = CliError;

    fn try_from(args: GeocodeArgs) -> Result<Self, Self::Error> {
        let address = args.address.ok_or(CliError::MissingArgument {
            field: ARG_ADDRESS,
            env: ENV_ADDRESS,
        })?;
        let region = match args.region.as_deref() {
            Some(name) => name.parse()?,
            None => Region::default(),
        };
        let transport = args
            .base_url
            .map_or_else(HttpTransportConfig::default, HttpTransportConfig::new);
        Ok(Self {
            address,
            region,
            transport,
        })
    }
}

pub(crate) fn run_geocode_with(
    args: GeocodeArgs,
    factory: &dyn TransportFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = GeocodeConfig::try_from(merged)?;
    let transport = factory.build(&config.transport)?;
    write_coordinates(&config, &*transport, writer)
}

pub(crate) fn write_coordinates(
    config: &GeocodeConfig,
    transport: &dyn Transport,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let coordinate = resolver::resolve(&transport, config.region, &config.address)?;
    writeln!(
        writer,
        "{},{}",
        coordinate.latitude(),
        coordinate.longitude()
    )
    .map_err(CliError::WriteOutput)?;
    let bounds = coordinate.bounds();
    if !bounds.is_empty() {
        writeln!(
            writer,
            "bounds: top {} bottom {} left {} right {}",
            bounds.top, bounds.bottom, bounds.left, bounds.right
        )
        .map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
