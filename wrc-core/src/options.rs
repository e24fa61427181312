//! Routing preferences sent with every routing request.

use std::fmt;
use std::str::FromStr;

/// Named avoidance flags understood by the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteOption {
    /// Avoid unpaved trails.
    AvoidTrails,
    /// Avoid toll roads.
    AvoidTollRoads,
    /// Avoid roads that require a subscription or vignette.
    AvoidSubscriptionRoads,
    /// Avoid ferries.
    AvoidFerries,
}

impl RouteOption {
    /// Every option in wire order.
    pub const ALL: [Self; 4] = [
        Self::AvoidTrails,
        Self::AvoidTollRoads,
        Self::AvoidSubscriptionRoads,
        Self::AvoidFerries,
    ];

    /// Wire name of the option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AvoidTrails => "AVOID_TRAILS",
            Self::AvoidTollRoads => "AVOID_TOLL_ROADS",
            Self::AvoidSubscriptionRoads => "AVOID_SUBSCRIPTION_ROADS",
            Self::AvoidFerries => "AVOID_FERRIES",
        }
    }
}

/// The full set of avoidance flags for a calculator.
///
/// Every flag is always serialised, false ones included.
///
/// # Examples
///
/// ```
/// use wrc_core::RouteOptions;
///
/// let options = RouteOptions::default().with_avoid_ferries(true);
/// assert_eq!(
///     options.to_query_value(),
///     "AVOID_TRAILS:t,AVOID_TOLL_ROADS:f,AVOID_SUBSCRIPTION_ROADS:f,AVOID_FERRIES:t"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    avoid_trails: bool,
    avoid_toll_roads: bool,
    avoid_subscription_roads: bool,
    avoid_ferries: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            avoid_trails: true,
            avoid_toll_roads: false,
            avoid_subscription_roads: false,
            avoid_ferries: false,
        }
    }
}

impl RouteOptions {
    /// Set whether trails are avoided.
    #[must_use]
    pub const fn with_avoid_trails(mut self, avoid: bool) -> Self {
        self.avoid_trails = avoid;
        self
    }

    /// Set whether toll roads are avoided.
    #[must_use]
    pub const fn with_avoid_toll_roads(mut self, avoid: bool) -> Self {
        self.avoid_toll_roads = avoid;
        self
    }

    /// Set whether subscription roads are avoided.
    #[must_use]
    pub const fn with_avoid_subscription_roads(mut self, avoid: bool) -> Self {
        self.avoid_subscription_roads = avoid;
        self
    }

    /// Set whether ferries are avoided.
    #[must_use]
    pub const fn with_avoid_ferries(mut self, avoid: bool) -> Self {
        self.avoid_ferries = avoid;
        self
    }

    /// Current value of one flag.
    #[must_use]
    pub const fn get(&self, option: RouteOption) -> bool {
        match option {
            RouteOption::AvoidTrails => self.avoid_trails,
            RouteOption::AvoidTollRoads => self.avoid_toll_roads,
            RouteOption::AvoidSubscriptionRoads => self.avoid_subscription_roads,
            RouteOption::AvoidFerries => self.avoid_ferries,
        }
    }

    /// Comma-joined `NAME:t|f` pairs for the `options` query parameter.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        RouteOption::ALL
            .iter()
            .map(|option| {
                let flag = if self.get(*option) { 't' } else { 'f' };
                format!("{}:{flag}", option.as_str())
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Vehicle class used for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VehicleType {
    /// The service's default private car; omitted from requests.
    #[default]
    Default,
    /// Taxi lanes and restrictions apply.
    Taxi,
    /// Motorcycle routing.
    Motorcycle,
}

impl VehicleType {
    /// Wire value; empty for [`VehicleType::Default`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Taxi => "TAXI",
            Self::Motorcycle => "MOTORCYCLE",
        }
    }

    /// Lenient parse: unknown names fall back to [`VehicleType::Default`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "TAXI" => Self::Taxi,
            "MOTORCYCLE" => Self::Motorcycle,
            _ => Self::Default,
        }
    }
}

impl FromStr for VehicleType {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(value))
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_avoid_only_trails() {
        assert_eq!(
            RouteOptions::default().to_query_value(),
            "AVOID_TRAILS:t,AVOID_TOLL_ROADS:f,AVOID_SUBSCRIPTION_ROADS:f,AVOID_FERRIES:f"
        );
    }

    #[rstest]
    fn builder_sets_each_flag() {
        let options = RouteOptions::default()
            .with_avoid_trails(false)
            .with_avoid_toll_roads(true)
            .with_avoid_subscription_roads(true)
            .with_avoid_ferries(true);
        assert!(!options.get(RouteOption::AvoidTrails));
        assert!(options.get(RouteOption::AvoidTollRoads));
        assert!(options.get(RouteOption::AvoidSubscriptionRoads));
        assert!(options.get(RouteOption::AvoidFerries));
        assert_eq!(
            options.to_query_value(),
            "AVOID_TRAILS:f,AVOID_TOLL_ROADS:t,AVOID_SUBSCRIPTION_ROADS:t,AVOID_FERRIES:t"
        );
    }

    #[rstest]
    #[case("TAXI", VehicleType::Taxi)]
    #[case("taxi", VehicleType::Taxi)]
    #[case("MOTORCYCLE", VehicleType::Motorcycle)]
    #[case("", VehicleType::Default)]
    #[case("TRUCK", VehicleType::Default)]
    fn vehicle_types_parse_leniently(#[case] name: &str, #[case] expected: VehicleType) {
        assert_eq!(VehicleType::from_name(name), expected);
    }

    #[rstest]
    fn default_vehicle_has_empty_wire_value() {
        assert_eq!(VehicleType::Default.as_str(), "");
        assert_eq!(VehicleType::Taxi.to_string(), "TAXI");
    }
}
