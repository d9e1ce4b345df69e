//! Greedy first-fit lane packing for branch separation.
//!
//! Trips are processed in input order. A trip takes the lowest existing lane
//! on which no stop of *another* trip already sits in one of the layers this
//! trip visits; when every lane conflicts a new one is opened. A stop touched
//! by several trips keeps the lowest of their lanes, so trunk stops stay on
//! the main line.
//!
//! This approximates channel assignment without attempting crossing
//! minimization. The worst case is quadratic in the number of trips.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use log::trace;

use stripmap_core::route::{Direction, Trip};

use super::layer::LayerAssignment;

/// Lanes assigned to trips and stops in one direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneAssignment<'a> {
    stop_lanes: IndexMap<&'a str, usize>,
    trip_lanes: IndexMap<&'a str, usize>,
    lane_count: usize,
}

impl<'a> LaneAssignment<'a> {
    /// Final lane of `stop`; stops no trip touches have none.
    pub fn stop_lane(&self, stop: &str) -> Option<usize> {
        self.stop_lanes.get(stop).copied()
    }

    /// Lane picked for `trip`; trips with an empty sequence have none.
    pub fn trip_lane(&self, trip: &str) -> Option<usize> {
        self.trip_lanes.get(trip).copied()
    }

    /// Number of lanes opened.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }
}

/// Packs the trips of `direction` into lanes.
pub fn assign_lanes<'a>(
    trips: &'a [Trip],
    direction: Direction,
    layers: &LayerAssignment<'a>,
) -> LaneAssignment<'a> {
    let mut layer_groups: BTreeMap<usize, Vec<&'a str>> = BTreeMap::new();
    for (stop, layer) in layers.iter() {
        layer_groups.entry(layer).or_default().push(stop);
    }

    let mut assignment = LaneAssignment::default();

    for trip in trips {
        let stops = trip.stops(direction);
        if stops.is_empty() {
            continue;
        }
        let own: HashSet<&str> = stops.iter().map(String::as_str).collect();

        let lane = (0..assignment.lane_count)
            .find(|&lane| !has_conflict(&own, lane, layers, &layer_groups, &assignment))
            .unwrap_or_else(|| {
                assignment.lane_count += 1;
                assignment.lane_count - 1
            });

        assignment.trip_lanes.insert(trip.id(), lane);
        for stop in stops {
            assignment
                .stop_lanes
                .entry(stop.as_str())
                .and_modify(|current| *current = (*current).min(lane))
                .or_insert(lane);
        }
    }

    trace!(
        direction:% = direction,
        lanes:? = assignment.stop_lanes;
        "Lane assignment"
    );

    assignment
}

/// Whether a stop outside `own` already occupies `lane` in a layer `own` visits.
fn has_conflict(
    own: &HashSet<&str>,
    lane: usize,
    layers: &LayerAssignment<'_>,
    layer_groups: &BTreeMap<usize, Vec<&str>>,
    assignment: &LaneAssignment<'_>,
) -> bool {
    own.iter()
        .filter_map(|stop| layers.layer(stop))
        .filter_map(|layer| layer_groups.get(&layer))
        .flatten()
        .any(|other| !own.contains(other) && assignment.stop_lane(other) == Some(lane))
}
