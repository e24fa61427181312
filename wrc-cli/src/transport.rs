//! Construction seam for the transport used by CLI commands.

use wrc_core::transport::Transport;
use wrc_http::{HttpTransport, HttpTransportConfig};

use crate::CliError;

/// Builds the transport for the current invocation.
pub(crate) trait TransportFactory {
    fn build(&self, config: &HttpTransportConfig) -> Result<Box<dyn Transport>, CliError>;
}

/// Factory producing the live [`HttpTransport`].
pub(crate) struct HttpTransportFactory;

impl TransportFactory for HttpTransportFactory {
    fn build(&self, config: &HttpTransportConfig) -> Result<Box<dyn Transport>, CliError> {
        let transport =
            HttpTransport::with_config(config.clone()).map_err(|source| {
                CliError::BuildTransport {
                    base_url: config.base_url.clone(),
                    source,
                }
            })?;
        Ok(Box::new(transport))
    }
}
