//! Per-trip connections between consecutive stops.

use serde::Serialize;

use stripmap_core::route::{Direction, Trip, TripColor};

use super::{graph::PrecedenceGraph, layer::LayerAssignment};

/// An edge between two consecutive stops of one trip in one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    from: String,
    to: String,
    trip_id: String,
    trip_name: String,
    color: TripColor,
    direction: Direction,
    is_express: bool,
    is_branch: bool,
}

impl Connection {
    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn trip_name(&self) -> &str {
        &self.trip_name
    }

    pub fn color(&self) -> TripColor {
        self.color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The edge skips at least one layer, i.e. limited-stop service.
    pub fn is_express(&self) -> bool {
        self.is_express
    }

    /// Not every trip running in this direction uses this edge.
    pub fn is_branch(&self) -> bool {
        self.is_branch
    }
}

/// Emits one connection per consecutive stop pair, per trip, in trip order.
pub fn build_connections(
    trips: &[Trip],
    direction: Direction,
    graph: &PrecedenceGraph<'_>,
    layers: &LayerAssignment<'_>,
) -> Vec<Connection> {
    let running = trips
        .iter()
        .filter(|trip| !trip.stops(direction).is_empty())
        .count();

    let mut connections = Vec::new();
    for trip in trips {
        for pair in trip.stops(direction).windows(2) {
            let (from, to) = (pair[0].as_str(), pair[1].as_str());

            let is_express = match (layers.layer(from), layers.layer(to)) {
                (Some(from_layer), Some(to_layer)) => from_layer.abs_diff(to_layer) > 1,
                _ => false,
            };
            let is_branch = (graph.frequency(from, to) as usize) < running;

            connections.push(Connection {
                from: from.to_string(),
                to: to.to_string(),
                trip_id: trip.id().to_string(),
                trip_name: trip.name().to_string(),
                color: trip.color(),
                direction,
                is_express,
                is_branch,
            });
        }
    }
    connections
}
