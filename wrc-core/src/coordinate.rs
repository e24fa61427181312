//! Resolved positions and the city extents attached to them.
//!
//! A [`Coordinate`] is produced once per endpoint and never mutated. Its
//! [`BoundingBox`] is normalised on receipt so later containment checks can
//! rely on `top >= bottom` and `left <= right`.

use geo::Coord;
use serde::Deserialize;

/// Rectangle approximating a city's extent, in degrees.
///
/// The empty box (all edges zero) stands in for "no bounds known" and
/// contains no point.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use wrc_core::BoundingBox;
///
/// let bounds = BoundingBox::new(47.0, 48.0, 20.0, 19.0);
/// assert_eq!(bounds.top, 48.0);
/// assert_eq!(bounds.left, 19.0);
/// assert!(bounds.contains_strictly(Coord { x: 19.5, y: 47.5 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    /// Northern edge (latitude).
    pub top: f64,
    /// Southern edge (latitude).
    pub bottom: f64,
    /// Western edge (longitude).
    pub left: f64,
    /// Eastern edge (longitude).
    pub right: f64,
}

impl BoundingBox {
    /// The placeholder for "no bounds known".
    pub const EMPTY: Self = Self {
        top: 0.0,
        bottom: 0.0,
        left: 0.0,
        right: 0.0,
    };

    /// Build a normalised box from raw edges in any order.
    #[must_use]
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
        .normalised()
    }

    /// Swap edges so that `top >= bottom` and `left <= right`.
    ///
    /// Already normalised boxes are returned unchanged.
    #[must_use]
    pub const fn normalised(self) -> Self {
        Self {
            top: self.top.max(self.bottom),
            bottom: self.top.min(self.bottom),
            left: self.left.min(self.right),
            right: self.left.max(self.right),
        }
    }

    /// Whether this is the empty placeholder box.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Strict containment: points on an edge are outside.
    #[must_use]
    pub const fn contains_strictly(&self, point: Coord) -> bool {
        self.left < point.x && point.x < self.right && self.bottom < point.y && point.y < self.top
    }
}

/// A resolved geographic position.
///
/// # Examples
///
/// ```
/// use wrc_core::Coordinate;
///
/// let coordinate = Coordinate::new(47.4979, 19.0402);
/// assert_eq!(coordinate.point().x, 19.0402);
/// assert!(coordinate.bounds().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    bounds: BoundingBox,
}

impl Coordinate {
    /// A coordinate with no known city extent.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            bounds: BoundingBox::EMPTY,
        }
    }

    /// Attach a city extent, normalising it first.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds.normalised();
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// City extent; empty when none was reported.
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Position as a `geo` coordinate.
    #[must_use]
    pub const fn point(&self) -> Coord {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Point syntax used by the routing endpoint, `x:{lon} y:{lat}`.
    ///
    /// Whole degrees keep their decimal point (`x:19.0 y:47.0`).
    #[must_use]
    pub fn to_waze_point(&self) -> String {
        format!(
            "x:{} y:{}",
            waze_degrees(self.longitude),
            waze_degrees(self.latitude)
        )
    }
}

fn waze_degrees(value: f64) -> String {
    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BoundingBox { top: 1.0, bottom: 2.0, left: 3.0, right: 4.0 })]
    #[case(BoundingBox { top: 2.0, bottom: 1.0, left: 4.0, right: 3.0 })]
    #[case(BoundingBox { top: 1.0, bottom: 2.0, left: 4.0, right: 3.0 })]
    fn normalising_orders_edges(#[case] raw: BoundingBox) {
        let bounds = raw.normalised();
        assert_eq!(bounds.top, 2.0);
        assert_eq!(bounds.bottom, 1.0);
        assert_eq!(bounds.left, 3.0);
        assert_eq!(bounds.right, 4.0);
    }

    #[rstest]
    fn normalising_is_idempotent() {
        let bounds = BoundingBox::new(47.6, 47.3, 18.9, 19.3);
        assert_eq!(bounds.normalised(), bounds);
    }

    #[rstest]
    #[case(19.0, 47.5, true)]
    #[case(18.9, 47.5, false)]
    #[case(19.3, 47.5, false)]
    #[case(19.0, 47.6, false)]
    #[case(20.0, 47.5, false)]
    fn containment_is_strict(#[case] x: f64, #[case] y: f64, #[case] inside: bool) {
        let bounds = BoundingBox::new(47.6, 47.3, 18.9, 19.3);
        assert_eq!(bounds.contains_strictly(Coord { x, y }), inside);
    }

    #[rstest]
    fn empty_box_contains_nothing() {
        let bounds = BoundingBox::default();
        assert!(bounds.is_empty());
        assert!(!bounds.contains_strictly(Coord { x: 0.0, y: 0.0 }));
    }

    #[rstest]
    fn missing_edges_default_to_zero() {
        let bounds: BoundingBox =
            serde_json::from_str(r#"{"top": 48.0, "left": 19.0}"#).expect("bounds should parse");
        assert_eq!(bounds.bottom, 0.0);
        assert_eq!(bounds.right, 0.0);
    }

    #[rstest]
    fn attaching_bounds_normalises_them() {
        let coordinate = Coordinate::new(47.5, 19.0).with_bounds(BoundingBox {
            top: 47.3,
            bottom: 47.6,
            left: 19.3,
            right: 18.9,
        });
        let bounds = coordinate.bounds();
        assert!(bounds.top >= bounds.bottom);
        assert!(bounds.left <= bounds.right);
    }

    #[rstest]
    fn waze_point_is_longitude_first() {
        let coordinate = Coordinate::new(47.5, 19.25);
        assert_eq!(coordinate.to_waze_point(), "x:19.25 y:47.5");
    }

    #[rstest]
    #[case(Coordinate::new(47.0, 19.0), "x:19.0 y:47.0")]
    #[case(Coordinate::new(-35.0, 149.128), "x:149.128 y:-35.0")]
    #[case(Coordinate::new(0.00001, -0.5), "x:-0.5 y:0.00001")]
    fn waze_point_keeps_a_decimal_part(#[case] coordinate: Coordinate, #[case] expected: &str) {
        assert_eq!(coordinate.to_waze_point(), expected);
    }
}
