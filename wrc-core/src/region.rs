//! Routing regions and their server layout.
//!
//! Each [`Region`] maps to one [`RegionProfile`] row in a static table, so
//! adding a region is a data change.

use std::fmt;
use std::str::FromStr;

use geo::Coord;

use crate::WrcError;

/// Geographic routing zone served by a distinct set of backend paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// United States and Canada. `NA` is accepted as an alias.
    Us,
    /// Europe and the rest of the world.
    #[default]
    Eu,
    /// Israel.
    Il,
    /// Australia.
    Au,
}

/// Server layout and geocoding bias for one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionProfile {
    /// Canonical upper-case name.
    pub name: &'static str,
    /// Latitude used to bias geocoding results.
    pub base_lat: f64,
    /// Longitude used to bias geocoding results.
    pub base_lon: f64,
    /// Geocoding path relative to the service root.
    pub geocode_path: &'static str,
    /// Routing paths to try in order, most specific first.
    pub routing_paths: &'static [&'static str],
}

const US_ROUTING: &str = "RoutingManager/routingRequest";
const ROW_ROUTING: &str = "row-RoutingManager/routingRequest";
const IL_ROUTING: &str = "il-RoutingManager/routingRequest";

static US: RegionProfile = RegionProfile {
    name: "US",
    base_lat: 40.713,
    base_lon: -74.006,
    geocode_path: "SearchServer/mozi",
    routing_paths: &[US_ROUTING],
};

static EU: RegionProfile = RegionProfile {
    name: "EU",
    base_lat: 47.498,
    base_lon: 19.040,
    geocode_path: "row-SearchServer/mozi",
    routing_paths: &[ROW_ROUTING, US_ROUTING],
};

static IL: RegionProfile = RegionProfile {
    name: "IL",
    base_lat: 31.768,
    base_lon: 35.214,
    geocode_path: "il-SearchServer/mozi",
    routing_paths: &[IL_ROUTING, ROW_ROUTING, US_ROUTING],
};

static AU: RegionProfile = RegionProfile {
    name: "AU",
    base_lat: -35.281,
    base_lon: 149.128,
    geocode_path: "row-SearchServer/mozi",
    routing_paths: &[ROW_ROUTING, US_ROUTING],
};

impl Region {
    /// Every supported region.
    pub const ALL: [Self; 4] = [Self::Us, Self::Eu, Self::Il, Self::Au];

    /// Table row for this region.
    #[must_use]
    pub const fn profile(self) -> &'static RegionProfile {
        match self {
            Self::Us => &US,
            Self::Eu => &EU,
            Self::Il => &IL,
            Self::Au => &AU,
        }
    }

    /// Coordinates used to bias geocoding (`x` longitude, `y` latitude).
    #[must_use]
    pub const fn base_coords(self) -> Coord {
        let profile = self.profile();
        Coord {
            x: profile.base_lon,
            y: profile.base_lat,
        }
    }

    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.profile().name
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = WrcError;

    /// Parse a region name case-insensitively, treating `NA` as `US`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.trim().to_ascii_uppercase();
        let canonical = if upper == "NA" { "US" } else { upper.as_str() };
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == canonical)
            .ok_or_else(|| WrcError::UnknownRegion {
                name: value.to_owned(),
            })
    }
}
