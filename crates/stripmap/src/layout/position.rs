//! Mapping of (layer, lane, direction) onto diagram coordinates and the
//! per-stop records handed to the renderer.
//!
//! Inbound stops run left to right: `x = layer × spacing`, and their lanes
//! stack upward from the inbound base line. Outbound stops are mirrored
//! horizontally, `x = (max_layer − layer) × spacing`, so the outbound line reads
//! right to left, and their lanes stack downward from the outbound base line.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use stripmap_core::{
    geometry::Point,
    route::{Direction, RouteData},
};

use super::{connection::Connection, lane::LaneAssignment, layer::LayerAssignment};
use crate::config::LayoutConfig;

/// A positioned stop in one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLayout {
    stop_id: String,
    name: String,
    direction: Direction,
    layer: usize,
    lane: usize,
    x: f64,
    y: f64,
}

impl StopLayout {
    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    /// Display name, the raw id when the stop is not in the route's stop list.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The merged, per-stop record consumed by rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPosition {
    x: f64,
    y: f64,
    level: usize,
    trip_ids: Vec<String>,
}

impl StopPosition {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Layer of the stop in the direction its coordinates were taken from.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Trips with a connection touching this stop, in first-touch order.
    pub fn trip_ids(&self) -> &[String] {
        &self.trip_ids
    }

    /// Served by more than one trip.
    pub fn is_shared(&self) -> bool {
        self.trip_ids.len() > 1
    }
}

/// Stop positions keyed by stop id, in first-layout order.
pub type StopPositions = IndexMap<String, StopPosition>;

/// Converts layers and lanes of one direction into positioned stops.
///
/// Stops without a layer (precedence cycles) are not positioned. The result
/// follows layer traversal order.
pub fn position_stops(
    route: &RouteData,
    direction: Direction,
    layers: &LayerAssignment<'_>,
    lanes: &LaneAssignment<'_>,
    config: &LayoutConfig,
) -> Vec<StopLayout> {
    let max_layer = layers.max_layer();

    layers
        .iter()
        .map(|(stop, layer)| {
            let lane = lanes.stop_lane(stop).unwrap_or(0);
            let position = map_position(direction, layer, lane, max_layer, config);
            StopLayout {
                stop_id: stop.to_string(),
                name: route.stop_name(stop).to_string(),
                direction,
                layer,
                lane,
                x: position.x(),
                y: position.y(),
            }
        })
        .collect()
}

/// Coordinates of a (layer, lane) slot in `direction`.
pub fn map_position(
    direction: Direction,
    layer: usize,
    lane: usize,
    max_layer: usize,
    config: &LayoutConfig,
) -> Point {
    let lane_offset = lane as f64 * config.lane_height();
    match direction {
        Direction::Inbound => Point::new(
            layer as f64 * config.stop_spacing(),
            config.inbound_base_y() - lane_offset,
        ),
        Direction::Outbound => Point::new(
            max_layer.saturating_sub(layer) as f64 * config.stop_spacing(),
            config.outbound_base_y() + lane_offset,
        ),
    }
}

/// Merges both directions' stop layouts into one record per stop id.
///
/// The first layout seen for a stop supplies its coordinates and level, so a
/// stop present in both directions is placed at its inbound position. Trip
/// ids are the union over every connection touching the stop.
pub fn merge_stop_positions<'a>(
    layouts: impl IntoIterator<Item = &'a StopLayout>,
    connections: impl IntoIterator<Item = &'a Connection>,
) -> StopPositions {
    let mut touching: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for connection in connections {
        for stop in [connection.from(), connection.to()] {
            touching
                .entry(stop)
                .or_default()
                .insert(connection.trip_id());
        }
    }

    let mut positions = StopPositions::new();
    for layout in layouts {
        if positions.contains_key(layout.stop_id()) {
            continue;
        }
        let trip_ids = touching
            .get(layout.stop_id())
            .map(|trips| trips.iter().map(|trip| trip.to_string()).collect())
            .unwrap_or_default();
        positions.insert(
            layout.stop_id.clone(),
            StopPosition {
                x: layout.x,
                y: layout.y,
                level: layout.layer,
                trip_ids,
            },
        );
    }
    positions
}
