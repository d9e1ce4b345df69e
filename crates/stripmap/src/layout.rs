//! Layout engine for transit line diagrams.
//!
//! Each direction is laid out independently:
//!
//! ```text
//! trip sequences
//!     ↓ PrecedenceGraph (union of consecutive-stop edges)
//!     ↓ assign_layers   (longest-path rank → x bucket)
//!     ↓ assign_lanes    (first-fit branch separation → y bucket)
//!     ↓ position_stops  ((layer, lane, direction) → (x, y))
//!     ↓ build_connections
//! DirectionLayout
//! ```
//!
//! The two direction layouts are then merged into one [`StopPosition`] per
//! stop id. Layout is a total function of its input: unresolved stop ids and
//! cyclic precedence degrade to fallback names and omitted stops.

mod connection;
mod consensus;
mod graph;
mod lane;
mod layer;
mod position;

pub use connection::Connection;
pub use consensus::merge_sequences;
pub use position::{StopLayout, StopPosition, StopPositions, map_position};

use indexmap::IndexMap;
use log::{debug, info, warn};

use stripmap_core::route::{Direction, RouteData};

use crate::config::LayoutConfig;

/// Layout of one direction of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionLayout {
    direction: Direction,
    stops: Vec<StopLayout>,
    connections: Vec<Connection>,
    dropped: Vec<String>,
    trip_lanes: IndexMap<String, usize>,
    max_layer: usize,
    lane_count: usize,
}

impl DirectionLayout {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Positioned stops in layer traversal order.
    pub fn stops(&self) -> &[StopLayout] {
        &self.stops
    }

    pub fn stop(&self, id: &str) -> Option<&StopLayout> {
        self.stops.iter().find(|stop| stop.stop_id() == id)
    }

    /// Connections of every trip, in trip order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Stops left out because of conflicting orderings across trips.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Lane picked for a trip; trips not running in this direction have none.
    pub fn trip_lane(&self, trip_id: &str) -> Option<usize> {
        self.trip_lanes.get(trip_id).copied()
    }

    pub fn max_layer(&self) -> usize {
        self.max_layer
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
}

/// Full layout of a route: both directions plus the merged stop records.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayout {
    inbound: DirectionLayout,
    outbound: DirectionLayout,
    stop_positions: StopPositions,
    inbound_sequence: Vec<String>,
    outbound_sequence: Vec<String>,
}

impl RouteLayout {
    pub fn direction(&self, direction: Direction) -> &DirectionLayout {
        match direction {
            Direction::Inbound => &self.inbound,
            Direction::Outbound => &self.outbound,
        }
    }

    pub fn inbound(&self) -> &DirectionLayout {
        &self.inbound
    }

    pub fn outbound(&self) -> &DirectionLayout {
        &self.outbound
    }

    /// One record per positioned stop id, inbound stops first.
    pub fn stop_positions(&self) -> &StopPositions {
        &self.stop_positions
    }

    /// Consensus stop ordering of `direction` across all trips.
    pub fn consensus_sequence(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Inbound => &self.inbound_sequence,
            Direction::Outbound => &self.outbound_sequence,
        }
    }

    /// All connections, inbound first.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.inbound
            .connections
            .iter()
            .chain(&self.outbound.connections)
    }
}

/// Lays out both directions of `route` and merges their stop positions.
pub fn layout_route(route: &RouteData, config: &LayoutConfig) -> RouteLayout {
    info!(trips = route.trips().len(), stops = route.stops().len(); "Laying out route");

    let unresolved = route.unresolved_stop_ids();
    if !unresolved.is_empty() {
        warn!(
            count = unresolved.len(),
            ids:? = unresolved;
            "Trips reference stops missing from the stop list, falling back to ids"
        );
    }

    let inbound = layout_direction(route, Direction::Inbound, config);
    let outbound = layout_direction(route, Direction::Outbound, config);

    let stop_positions = position::merge_stop_positions(
        inbound.stops.iter().chain(&outbound.stops),
        inbound.connections.iter().chain(&outbound.connections),
    );

    let inbound_sequence = consensus_for(route, Direction::Inbound);
    let outbound_sequence = consensus_for(route, Direction::Outbound);

    info!(positioned = stop_positions.len(); "Route layout complete");

    RouteLayout {
        inbound,
        outbound,
        stop_positions,
        inbound_sequence,
        outbound_sequence,
    }
}

/// Lays out a single direction of `route`.
pub fn layout_direction(
    route: &RouteData,
    direction: Direction,
    config: &LayoutConfig,
) -> DirectionLayout {
    let trips = route.trips();
    let graph = graph::PrecedenceGraph::from_sequences(trips.iter().map(|t| t.stops(direction)));
    let layers = layer::assign_layers(&graph);
    let lanes = lane::assign_lanes(trips, direction, &layers);

    if !layers.dropped().is_empty() {
        warn!(
            direction:% = direction,
            stops:? = layers.dropped();
            "Conflicting stop orderings form a cycle, leaving stops out of the layout"
        );
    }

    let stops = position::position_stops(route, direction, &layers, &lanes, config);
    let connections = connection::build_connections(trips, direction, &graph, &layers);

    debug!(
        direction:% = direction,
        layered = layers.len(),
        edges = graph.edge_count(),
        connections = connections.len(),
        max_layer = layers.max_layer(),
        lanes = lanes.lane_count();
        "Direction laid out"
    );

    DirectionLayout {
        direction,
        stops,
        connections,
        dropped: layers.dropped().iter().map(|s| s.to_string()).collect(),
        trip_lanes: trips
            .iter()
            .filter_map(|trip| Some((trip.id().to_string(), lanes.trip_lane(trip.id())?)))
            .collect(),
        max_layer: layers.max_layer(),
        lane_count: lanes.lane_count(),
    }
}

fn consensus_for(route: &RouteData, direction: Direction) -> Vec<String> {
    let sequences: Vec<&[String]> = route
        .trips()
        .iter()
        .map(|trip| trip.stops(direction))
        .filter(|stops| !stops.is_empty())
        .collect();
    merge_sequences(&sequences)
}
