//! Focused unit tests covering route and geocode configuration.

use super::helpers::{END, ROW_ROUTING, START, StubFactory, run_with, two_segment_route};
use super::*;
use crate::geocode::GeocodeConfig;
use crate::route::{RouteConfig, config_from_layers_for_test};
use rstest::rstest;
use std::time::Duration;
use wrc_core::test_support::StubTransport;
use wrc_core::{Region, VehicleType, WrcError};
use wrc_http::HttpTransportConfig;

fn route_args() -> RouteArgs {
    RouteArgs {
        from: Some(START.to_owned()),
        to: Some(END.to_owned()),
        ..RouteArgs::default()
    }
}

#[rstest]
#[case(None, Some(END), ARG_FROM, ENV_FROM)]
#[case(Some(START), None, ARG_TO, ENV_TO)]
fn converting_without_endpoints_errors(
    #[case] from: Option<&str>,
    #[case] to: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = RouteArgs {
        from: from.map(str::to_owned),
        to: to.map(str::to_owned),
        ..RouteArgs::default()
    };
    let err = RouteConfig::try_from(args).expect_err("missing endpoint should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn route_config_defaults() {
    let config = RouteConfig::try_from(route_args()).expect("config should build");
    assert_eq!(config.options.region, Region::Eu);
    assert_eq!(config.options.vehicle_type, VehicleType::Default);
    assert!(!config.options.avoid_toll_roads);
    assert!(config.query.real_time);
    assert!(!config.query.stop_at_bounds);
    assert_eq!(config.query.time_delta, 0);
    assert_eq!(config.paths, 1);
    assert_eq!(config.transport, HttpTransportConfig::default());
}

#[rstest]
fn route_flags_map_onto_config() {
    let cli = Cli::try_parse_from([
        "wrc",
        "route",
        "--from",
        START,
        "--to",
        END,
        "--region",
        "na",
        "--vehicle-type",
        "taxi",
        "--paths",
        "2",
        "--time-delta",
        "-15",
        "--historic",
        "--stop-at-bounds",
        "--avoid-toll-roads",
        "--avoid-ferries",
        "false",
        "--base-url",
        "http://localhost:9000/",
        "--timeout-secs",
        "5",
    ])
    .expect("arguments should parse");
    let Command::Route(args) = cli.command else {
        panic!("expected the route command");
    };

    let config = RouteConfig::try_from(args).expect("config should build");

    assert_eq!(config.options.region, Region::Us);
    assert_eq!(config.options.vehicle_type, VehicleType::Taxi);
    assert!(config.options.avoid_toll_roads);
    assert!(!config.options.avoid_ferries);
    assert!(!config.query.real_time);
    assert!(config.query.stop_at_bounds);
    assert_eq!(config.query.time_delta, -15);
    assert_eq!(config.paths, 2);
    assert_eq!(config.transport.base_url, "http://localhost:9000/");
    assert_eq!(config.transport.timeout, Duration::from_secs(5));
}

#[rstest]
fn unknown_region_is_rejected() {
    let args = RouteArgs {
        region: Some("mars".to_owned()),
        ..route_args()
    };
    let err = RouteConfig::try_from(args).expect_err("unknown region should error");
    assert!(
        matches!(err, CliError::Route(WrcError::UnknownRegion { ref name }) if name == "mars"),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn zero_paths_means_one() {
    let args = RouteArgs {
        paths: Some(0),
        ..route_args()
    };
    let config = RouteConfig::try_from(args).expect("config should build");
    assert_eq!(config.paths, 1);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "paths": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "from": "Budapest",
            "region": "IL",
            "vehicle_type": "MOTORCYCLE",
        }),
        None,
    );
    composer.push_environment(json!({
        "to": "Gyor",
        "region": "US",
    }));
    composer.push_cli(json!({
        "from": START,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.from, START);
    assert_eq!(config.to, "Gyor");
    assert_eq!(config.options.region, Region::Us);
    assert_eq!(config.options.vehicle_type, VehicleType::Motorcycle);
}

#[rstest]
fn geocode_requires_an_address() {
    let err = GeocodeConfig::try_from(GeocodeArgs::default()).expect_err("missing address");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_ADDRESS);
            assert_eq!(env, ENV_ADDRESS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn geocode_base_url_overrides_default() {
    let args = GeocodeArgs {
        address: Some("Budapest".to_owned()),
        region: Some("il".to_owned()),
        base_url: Some("http://localhost:9000/".to_owned()),
    };
    let config = GeocodeConfig::try_from(args).expect("config should build");
    assert_eq!(config.region, Region::Il);
    assert_eq!(config.transport.base_url, "http://localhost:9000/");
    assert_eq!(config.transport.user_agent, "Mozilla/5.0");
}

#[rstest]
fn http_factory_reports_bad_base_url() {
    let config = HttpTransportConfig::new("not a url");
    let Err(err) = HttpTransportFactory.build(&config) else {
        panic!("expected a build failure");
    };
    match err {
        CliError::BuildTransport { base_url, .. } => assert_eq!(base_url, "not a url"),
        other => panic!("expected BuildTransport, found {other:?}"),
    }
}

#[rstest]
fn routing_failures_surface_as_route_errors() {
    let factory = StubFactory::new(StubTransport::new());
    let err = run_with(&["route", "--from", START, "--to", END], &factory)
        .expect_err("absent replies should fail");
    assert!(
        matches!(err, CliError::Route(WrcError::EmptyResponse)),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn literal_geocode_skips_the_network() {
    let factory = StubFactory::new(
        StubTransport::new().with_reply(ROW_ROUTING, two_segment_route()),
    );
    let output = run_with(&["geocode", START], &factory).expect("literal resolves");
    assert_eq!(output, "47.4979,19.0402\n");
    assert!(factory.stub().requests().is_empty());
}
