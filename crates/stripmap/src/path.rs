//! Renderable path geometry for trips.
//!
//! Paths are generated from each direction's own stop positions, so an
//! outbound path follows the mirrored outbound band rather than the merged
//! per-stop record. Normalization is applied afterwards: length
//! equalization first, then optional orthogonal straightening.

mod generate;
mod normalize;

pub use generate::octilinear_path;
pub use normalize::{extend_path_to_match_length, straighten_path};

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use stripmap_core::{
    geometry::{PathPoint, Point},
    route::{Direction, RouteData, Trip},
};

use crate::{config::LayoutConfig, layout::RouteLayout};

/// A trip together with its rendered inbound and outbound polylines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPath {
    #[serde(flatten)]
    trip: Trip,
    inbound_path: Vec<PathPoint>,
    outbound_path: Vec<PathPoint>,
}

impl TripPath {
    pub fn new(trip: Trip, inbound_path: Vec<PathPoint>, outbound_path: Vec<PathPoint>) -> Self {
        Self {
            trip,
            inbound_path,
            outbound_path,
        }
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn id(&self) -> &str {
        self.trip.id()
    }

    pub fn inbound_path(&self) -> &[PathPoint] {
        &self.inbound_path
    }

    pub fn outbound_path(&self) -> &[PathPoint] {
        &self.outbound_path
    }

    pub fn path(&self, direction: Direction) -> &[PathPoint] {
        match direction {
            Direction::Inbound => &self.inbound_path,
            Direction::Outbound => &self.outbound_path,
        }
    }

    /// Both paths joined, inbound first, as drawn by a single polyline.
    pub fn combined_path(&self) -> impl Iterator<Item = PathPoint> + '_ {
        self.inbound_path
            .iter()
            .chain(&self.outbound_path)
            .copied()
    }
}

/// Generates the octilinear paths of every trip, without normalization.
pub fn generate_trip_paths(
    route: &RouteData,
    layout: &RouteLayout,
    config: &LayoutConfig,
) -> Vec<TripPath> {
    let inbound_positions = direction_positions(layout, Direction::Inbound);
    let outbound_positions = direction_positions(layout, Direction::Outbound);

    route
        .trips()
        .iter()
        .map(|trip| {
            TripPath::new(
                trip.clone(),
                octilinear_path(trip.inbound(), &inbound_positions, config.grid_unit()),
                octilinear_path(trip.outbound(), &outbound_positions, config.grid_unit()),
            )
        })
        .collect()
}

/// Applies the normalization steps enabled in `config`.
pub fn normalize_trip_path(path: TripPath, config: &LayoutConfig) -> TripPath {
    let TripPath {
        trip,
        mut inbound_path,
        mut outbound_path,
    } = path;

    if config.equalize_lengths() {
        (inbound_path, outbound_path) =
            extend_path_to_match_length(inbound_path, outbound_path, config.length_epsilon());
    }

    if config.straighten() {
        inbound_path = straighten_path(&inbound_path);
        outbound_path = straighten_path(&outbound_path);
    }

    TripPath::new(trip, inbound_path, outbound_path)
}

/// Generates and normalizes the paths of every trip.
pub fn trip_paths(route: &RouteData, layout: &RouteLayout, config: &LayoutConfig) -> Vec<TripPath> {
    let paths: Vec<TripPath> = generate_trip_paths(route, layout, config)
        .into_iter()
        .map(|path| normalize_trip_path(path, config))
        .collect();

    debug!(
        trips = paths.len(),
        points = paths
            .iter()
            .map(|p| p.inbound_path.len() + p.outbound_path.len())
            .sum::<usize>();
        "Trip paths generated"
    );

    paths
}

fn direction_positions(layout: &RouteLayout, direction: Direction) -> HashMap<&str, Point> {
    layout
        .direction(direction)
        .stops()
        .iter()
        .map(|stop| (stop.stop_id(), stop.position()))
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use stripmap_core::{
        geometry::polyline_length,
        route::{Stop, TripColor},
    };

    use super::*;
    use crate::layout::layout_route;

    fn route() -> RouteData {
        RouteData::new(
            vec![
                Trip::new("main", "Main", TripColor::new(200, 30, 30))
                    .with_inbound(["A", "B", "C"])
                    .with_outbound(["C", "B", "A"]),
                Trip::new("short", "Short", TripColor::new(30, 30, 200))
                    .with_inbound(["A", "D", "C"])
                    .with_outbound(["C", "A"]),
            ],
            ["A", "B", "C", "D"]
                .map(|id| Stop::new(id, format!("Stop {id}")))
                .to_vec(),
        )
    }

    #[test]
    fn test_generated_paths_follow_own_direction() {
        let route = route();
        let config = LayoutConfig::default();
        let layout = layout_route(&route, &config);
        let paths = generate_trip_paths(&route, &layout, &config);

        let main = &paths[0];
        assert_eq!(main.id(), "main");
        assert!(main.inbound_path().iter().all(|p| p.y() <= 0.0));
        assert!(main.outbound_path().iter().all(|p| p.y() >= 200.0));
        assert!(main.combined_path().all(|p| p.z() == 0.0));
    }

    #[test]
    fn test_branch_path_gets_diagonal_points() {
        let route = route();
        let config = LayoutConfig::default();
        let layout = layout_route(&route, &config);
        let paths = generate_trip_paths(&route, &layout, &config);

        // A (0, 0) → D (100, -60) → C (200, 0): both hops are one grid unit
        // wide, so no intermediate points are needed.
        let short = &paths[1];
        assert_eq!(
            short
                .inbound_path()
                .iter()
                .map(|p| (p.x(), p.y()))
                .collect::<Vec<_>>(),
            [(0.0, 0.0), (100.0, -60.0), (200.0, 0.0)]
        );
    }

    #[test]
    fn test_normalized_lengths_match() {
        let route = route();
        let config = LayoutConfig::default();
        let layout = layout_route(&route, &config);

        for path in trip_paths(&route, &layout, &config) {
            assert_approx_eq!(
                f64,
                polyline_length(path.inbound_path()),
                polyline_length(path.outbound_path()),
                epsilon = 0.001
            );
        }
    }

    #[test]
    fn test_straightening_is_optional() {
        let route = route();
        let config = LayoutConfig::default()
            .with_equalize_lengths(false)
            .with_straighten(true);
        let layout = layout_route(&route, &config);

        let short = &trip_paths(&route, &layout, &config)[1];
        assert_eq!(short.inbound_path().len(), 5);
        for pair in short.inbound_path().windows(2) {
            assert!(pair[0].x() == pair[1].x() || pair[0].y() == pair[1].y());
        }
    }

    #[test]
    fn test_trip_path_serializes_flat() {
        let path = TripPath::new(
            Trip::new("t", "T", TripColor::new(1, 2, 3)).with_inbound(["A"]),
            vec![PathPoint::new(0.0, 0.0, 0.0)],
            Vec::new(),
        );
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["id"], "t");
        assert_eq!(json["color"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["inboundPath"], serde_json::json!([[0.0, 0.0, 0.0]]));
        assert_eq!(json["outboundPath"], serde_json::json!([]));
    }
}
