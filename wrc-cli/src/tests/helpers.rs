//! Test helpers wiring scripted transports into CLI commands.

use super::*;
use serde_json::{Value, json};
use std::rc::Rc;
use wrc_core::test_support::StubTransport;
use wrc_core::transport::{Query, Transport, TransportError};
use wrc_http::HttpTransportConfig;

pub(super) const ROW_ROUTING: &str = "row-RoutingManager/routingRequest";
pub(super) const ROW_SEARCH: &str = "row-SearchServer/mozi";
pub(super) const START: &str = "47.4979,19.0402";
pub(super) const END: &str = "47.6875,17.6504";

/// Hands out views of one shared [`StubTransport`] so tests can inspect the
/// recorded requests after the command has consumed its transport.
#[derive(Debug, Default, Clone)]
pub(super) struct StubFactory {
    stub: Rc<StubTransport>,
}

impl StubFactory {
    pub(super) fn new(stub: StubTransport) -> Self {
        Self {
            stub: Rc::new(stub),
        }
    }

    pub(super) fn stub(&self) -> &StubTransport {
        &self.stub
    }
}

struct SharedStub(Rc<StubTransport>);

impl Transport for SharedStub {
    fn get_json(&self, path: &str, query: &Query) -> Result<Option<Value>, TransportError> {
        self.0.get_json(path, query)
    }
}

impl TransportFactory for StubFactory {
    fn build(&self, _config: &HttpTransportConfig) -> Result<Box<dyn Transport>, CliError> {
        Ok(Box::new(SharedStub(Rc::clone(&self.stub))))
    }
}

pub(super) fn two_segment_route() -> Value {
    json!({"response": {"results": [
        {"length": 1000, "crossTime": 120},
        {"length": 1000, "crossTime": 120}
    ]}})
}

pub(super) fn two_alternatives() -> Value {
    json!({"alternatives": [
        {"response": {"routeType": ["Best"], "shortRouteName": "test1",
            "results": [{"length": 400, "crossTime": 60}]}},
        {"response": {"routeType": ["Best"], "shortRouteName": "test2",
            "results": [{"length": 410, "crossTime": 62}]}}
    ]})
}

/// Parse `args` as a full `wrc` invocation and run it against `factory`.
pub(super) fn run_with(args: &[&str], factory: &StubFactory) -> Result<String, CliError> {
    let mut invocation = vec!["wrc"];
    invocation.extend_from_slice(args);
    let cli = Cli::try_parse_from(invocation)?;
    let mut output = Vec::new();
    dispatch(cli.command, factory, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
