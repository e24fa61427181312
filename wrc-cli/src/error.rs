//! Error types emitted by the `wrc` CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use thiserror::Error;
use wrc_core::WrcError;
use wrc_http::TransportBuildError;

/// Errors emitted by the `wrc` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Constructing the HTTP transport failed.
    #[error("failed to build HTTP transport for {base_url:?}: {source}")]
    BuildTransport {
        /// Base URL the transport was configured with.
        base_url: String,
        /// Underlying failure.
        #[source]
        source: TransportBuildError,
    },
    /// Resolving, fetching or summing a route failed.
    #[error(transparent)]
    Route(#[from] WrcError),
    /// Writing results failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
