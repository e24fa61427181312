//! Exercises the calculator through the facade's re-exports.

use rstest::rstest;
use serde_json::json;
use waze_route_calculator::{CalculatorOptions, Region, RouteCalculator, RouteQuery};
use wrc_core::test_support::StubTransport;

#[rstest]
fn facade_exposes_a_working_calculator() {
    let stub = StubTransport::new().with_reply(
        "RoutingManager/routingRequest",
        json!({"response": {"results": [{"length": 3000, "crossTime": 180}]}}),
    );
    let options = CalculatorOptions::default().with_region(Region::Us);
    let calculator = RouteCalculator::new(&stub, "40.7128,-74.0060", "40.7306,-73.9352", options)
        .expect("literal coordinates resolve");

    let summary = calculator
        .calc_route_info(RouteQuery::default())
        .expect("route summary");

    assert_eq!(summary.minutes, 3.0);
    assert_eq!(summary.kilometres, 3.0);
    assert_eq!(stub.requested_paths(), vec!["RoutingManager/routingRequest"]);
}

#[cfg(feature = "http")]
#[rstest]
fn facade_exposes_the_http_transport() {
    let config = waze_route_calculator::HttpTransportConfig::default();
    assert_eq!(config.base_url, "https://www.waze.com/");
}

#[cfg(feature = "http")]
#[rstest]
fn http_calculator_resolves_literal_endpoints_offline() {
    let calculator = waze_route_calculator::http_calculator(
        "47.4979,19.0402",
        "47.6875,17.6504",
        CalculatorOptions::default(),
    )
    .expect("literal endpoints need no network");
    assert_eq!(calculator.region(), Region::Eu);
    assert_eq!(calculator.start().latitude(), 47.4979);
}
