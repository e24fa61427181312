//! Turn an address or a literal `lat,lon` pair into a [`Coordinate`].
//!
//! Literal pairs are recognised locally and never touch the network. Anything
//! else is sent to the region's geocoding endpoint, and the first candidate
//! that names a city wins.

use serde::Deserialize;
use serde_json::Value;

use crate::transport::{Query, Transport};
use crate::{BoundingBox, Coordinate, Region, WrcError};

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    location: Option<Location>,
    #[serde(default)]
    bounds: Option<BoundingBox>,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lon: f64,
}

/// Resolve `address` for `region`, geocoding only when it is not a literal.
///
/// # Errors
///
/// Returns [`WrcError::Geocode`] when no candidate names a city,
/// [`WrcError::InvalidCoordinates`] for an unparsable literal, and
/// [`WrcError::Transport`] when the request fails.
pub fn resolve<T: Transport>(
    transport: &T,
    region: Region,
    address: &str,
) -> Result<Coordinate, WrcError> {
    if let Some(literal) = parse_literal(address) {
        return literal;
    }
    geocode(transport, region, address)
}

/// Recognise `lat,lon` literals.
///
/// Returns `None` when `input` does not have the literal shape, so the caller
/// should geocode it instead.
///
/// # Examples
///
/// ```
/// use wrc_core::resolver::parse_literal;
///
/// let coordinate = parse_literal("47.4979, 19.0402").expect("literal").expect("valid");
/// assert_eq!(coordinate.latitude(), 47.4979);
/// assert!(parse_literal("Budapest, Hungary").is_none());
/// ```
#[must_use]
pub fn parse_literal(input: &str) -> Option<Result<Coordinate, WrcError>> {
    let (lat, raw_lon) = input.split_once(',')?;
    let lon = strip_one_whitespace(raw_lon);
    if !is_decimal(lat, 2, true) || !is_decimal(lon, 3, false) {
        return None;
    }
    let parsed = lat
        .trim()
        .parse::<f64>()
        .ok()
        .zip(lon.trim().parse::<f64>().ok());
    Some(
        parsed
            .map(|(latitude, longitude)| Coordinate::new(latitude, longitude))
            .ok_or_else(|| WrcError::InvalidCoordinates {
                input: input.to_owned(),
            }),
    )
}

fn strip_one_whitespace(value: &str) -> &str {
    let mut chars = value.chars();
    match chars.next() {
        Some(ch) if ch.is_whitespace() => chars.as_str(),
        _ => value,
    }
}

/// Optional sign, `1..=max_int_digits` digits, then a `.digits` fraction that
/// is mandatory when `fraction_required`.
fn is_decimal(value: &str, max_int_digits: usize, fraction_required: bool) -> bool {
    let unsigned = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(integer) || integer.len() > max_int_digits {
        return false;
    }
    match fraction {
        Some(decimals) => digits(decimals),
        None => !fraction_required,
    }
}

fn geocode<T: Transport>(
    transport: &T,
    region: Region,
    address: &str,
) -> Result<Coordinate, WrcError> {
    let bias = region.base_coords();
    let query: Query = vec![
        ("q", address.to_owned()),
        ("lang", "eng".to_owned()),
        ("origin", "livemap".to_owned()),
        ("lat", bias.y.to_string()),
        ("lon", bias.x.to_string()),
    ];
    let reply = transport.get_json(region.profile().geocode_path, &query)?;
    let coordinate = reply
        .as_ref()
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.iter().find_map(qualifying_candidate))
        .ok_or_else(|| WrcError::Geocode {
            address: address.to_owned(),
        })?;
    log::debug!(
        "Resolved {address:?} to ({}, {})",
        coordinate.longitude(),
        coordinate.latitude()
    );
    Ok(coordinate)
}

fn qualifying_candidate(value: &Value) -> Option<Coordinate> {
    let candidate = match Candidate::deserialize(value) {
        Ok(candidate) => candidate,
        Err(err) => {
            log::debug!("Skipping unreadable geocode candidate: {err}");
            return None;
        }
    };
    if candidate.city.as_deref().is_none_or(str::is_empty) {
        return None;
    }
    let location = candidate.location?;
    let coordinate = Coordinate::new(location.lat, location.lon);
    Some(match candidate.bounds {
        Some(bounds) => coordinate.with_bounds(bounds),
        None => coordinate,
    })
}
