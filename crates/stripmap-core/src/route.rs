//! Route model: stops, directional trips and the route that groups them.
//!
//! A [`RouteData`] value is supplied wholesale and never mutated
//! incrementally. Every derived layout is a pure function of it.
//!
//! Trip sequences may reference stop ids that are missing from
//! [`RouteData::stops`]. Such ids are tolerated: they display under their raw
//! id (see [`RouteData::stop_name`]) and later stages omit them from geometry
//! that needs a position.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Travel direction of a trip sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Both directions in processing order.
    pub const ALL: [Direction; 2] = [Direction::Inbound, Direction::Outbound];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lon: Option<f64>,
}

impl Stop {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat: None,
            lon: None,
        }
    }

    /// Attaches geographic coordinates (builder style).
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic `(lat, lon)` if both were supplied.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

/// Display color of a trip as three 0-255 sRGB components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripColor([u8; 3]);

impl TripColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn components(self) -> [u8; 3] {
        self.0
    }

    /// CSS `rgb()` notation, suitable for SVG attributes.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.0;
        format!("rgb({r}, {g}, {b})")
    }
}

impl From<[u8; 3]> for TripColor {
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

/// One directional service definition with ordered outbound and inbound stop lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    id: String,
    name: String,
    color: TripColor,
    #[serde(default)]
    outbound: Vec<String>,
    #[serde(default)]
    inbound: Vec<String>,
}

impl Trip {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: TripColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    /// Sets the inbound stop sequence (builder style).
    pub fn with_inbound<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inbound = stops.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the outbound stop sequence (builder style).
    pub fn with_outbound<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outbound = stops.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> TripColor {
        self.color
    }

    pub fn inbound(&self) -> &[String] {
        &self.inbound
    }

    pub fn outbound(&self) -> &[String] {
        &self.outbound
    }

    /// The stop sequence this trip runs in `direction`.
    pub fn stops(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Inbound => &self.inbound,
            Direction::Outbound => &self.outbound,
        }
    }
}

/// A route: ordered trips plus the stops they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteData {
    trips: Vec<Trip>,
    stops: Vec<Stop>,
}

impl RouteData {
    pub fn new(trips: Vec<Trip>, stops: Vec<Stop>) -> Self {
        Self { trips, stops }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty() && self.stops.is_empty()
    }

    pub fn trip(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == id)
    }

    pub fn stop(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == id)
    }

    /// Display name for a stop id, falling back to the id itself when the
    /// stop is not part of [`RouteData::stops`].
    pub fn stop_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.stop(id).map_or(id, Stop::name)
    }

    /// Stop ids referenced by some trip sequence but absent from the stops
    /// collection, in first-appearance order without duplicates.
    pub fn unresolved_stop_ids(&self) -> Vec<&str> {
        let mut unresolved: Vec<&str> = Vec::new();
        for trip in &self.trips {
            for direction in Direction::ALL {
                for id in trip.stops(direction) {
                    if self.stop(id).is_none() && !unresolved.contains(&id.as_str()) {
                        unresolved.push(id);
                    }
                }
            }
        }
        unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> RouteData {
        RouteData::new(
            vec![
                Trip::new("t1", "Local", TripColor::new(255, 0, 0))
                    .with_inbound(["A", "B", "C"])
                    .with_outbound(["C", "B", "A"]),
                Trip::new("t2", "Branch", TripColor::new(0, 0, 255))
                    .with_inbound(["A", "B", "X"]),
            ],
            vec![Stop::new("A", "Alpha"), Stop::new("B", "Bravo"), Stop::new("C", "Charlie")],
        )
    }

    #[test]
    fn test_trip_stops_by_direction() {
        let route = sample_route();
        let trip = route.trip("t1").unwrap();
        assert_eq!(trip.stops(Direction::Inbound), ["A", "B", "C"]);
        assert_eq!(trip.stops(Direction::Outbound), ["C", "B", "A"]);
    }

    #[test]
    fn test_stop_name_fallback() {
        let route = sample_route();
        assert_eq!(route.stop_name("A"), "Alpha");
        assert_eq!(route.stop_name("X"), "X");
    }

    #[test]
    fn test_unresolved_stop_ids() {
        let route = sample_route();
        assert_eq!(route.unresolved_stop_ids(), vec!["X"]);
    }

    #[test]
    fn test_stop_coordinates() {
        assert_eq!(Stop::new("A", "Alpha").coordinates(), None);

        let stop = Stop::new("A", "Alpha").with_coordinates(52.37, 4.89);
        assert_eq!(stop.coordinates(), Some((52.37, 4.89)));

        let json = serde_json::to_value(&stop).unwrap();
        assert_eq!(json["lat"], 52.37);
        assert!(serde_json::to_value(Stop::new("B", "Bravo")).unwrap().get("lat").is_none());
    }

    #[test]
    fn test_trip_color_css() {
        assert_eq!(TripColor::new(234, 179, 8).to_css(), "rgb(234, 179, 8)");
    }

    #[test]
    fn test_deserialize_route() {
        let json = r#"{
            "trips": [
                {"id": "t1", "name": "Local", "color": [10, 20, 30], "inbound": ["A", "B"]}
            ],
            "stops": [{"id": "A", "name": "Alpha", "lat": 1.5, "lon": 2.5}]
        }"#;
        let route: RouteData = serde_json::from_str(json).unwrap();
        let trip = &route.trips()[0];
        assert_eq!(trip.color().components(), [10, 20, 30]);
        assert!(trip.outbound().is_empty());
        assert_eq!(route.stops()[0].coordinates(), Some((1.5, 2.5)));
    }

    #[test]
    fn test_color_component_out_of_range_rejected() {
        let json = r#"{"id": "t1", "name": "Local", "color": [256, 0, 0]}"#;
        assert!(serde_json::from_str::<Trip>(json).is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Inbound.to_string(), "inbound");
        assert_eq!(
            serde_json::to_string(&Direction::Outbound).unwrap(),
            "\"outbound\""
        );
    }
}
