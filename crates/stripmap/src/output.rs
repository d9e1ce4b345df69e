//! The render payload handed to drawing backends.

use serde::Serialize;

use stripmap_core::{
    geometry::Point,
    route::{Direction, RouteData},
};

use crate::{
    layout::{RouteLayout, StopPositions},
    path::TripPath,
};

/// A text label anchored above a stop marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLabel {
    stop_id: String,
    text: String,
    x: f64,
    y: f64,
}

impl StopLabel {
    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    /// `"{name} - {id}"`.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A stop marker in one direction band.
///
/// A stop served in both directions gets one marker per band, so every stop
/// vertex of a trip path has a marker under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopMarker {
    stop_id: String,
    direction: Direction,
    x: f64,
    y: f64,
    shared: bool,
}

impl StopMarker {
    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Served by more than one trip.
    pub fn is_shared(&self) -> bool {
        self.shared
    }
}

/// Everything a renderer needs to draw a line diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramOutput {
    stop_positions: StopPositions,
    markers: Vec<StopMarker>,
    trip_paths: Vec<TripPath>,
    labels: Vec<StopLabel>,
}

impl DiagramOutput {
    /// Assembles the payload, placing each label `label_offset` above its stop.
    pub fn new(
        route: &RouteData,
        layout: &RouteLayout,
        trip_paths: Vec<TripPath>,
        label_offset: f64,
    ) -> Self {
        let stop_positions = layout.stop_positions().clone();
        let labels = stop_positions
            .iter()
            .map(|(id, position)| {
                let anchor = position.position();
                StopLabel {
                    stop_id: id.clone(),
                    text: format!("{} - {}", route.stop_name(id), id),
                    x: anchor.x(),
                    y: anchor.y() - label_offset,
                }
            })
            .collect();

        let markers = Direction::ALL
            .into_iter()
            .flat_map(|direction| layout.direction(direction).stops())
            .map(|stop| {
                let anchor = stop.position();
                StopMarker {
                    stop_id: stop.stop_id().to_string(),
                    direction: stop.direction(),
                    x: anchor.x(),
                    y: anchor.y(),
                    shared: stop_positions
                        .get(stop.stop_id())
                        .is_some_and(|position| position.is_shared()),
                }
            })
            .collect();

        Self {
            stop_positions,
            markers,
            trip_paths,
            labels,
        }
    }

    pub fn stop_positions(&self) -> &StopPositions {
        &self.stop_positions
    }

    /// Stop markers of both bands, inbound first.
    pub fn markers(&self) -> &[StopMarker] {
        &self.markers
    }

    pub fn trip_paths(&self) -> &[TripPath] {
        &self.trip_paths
    }

    pub fn labels(&self) -> &[StopLabel] {
        &self.labels
    }

    /// Keeps only the trip paths whose id satisfies `visible`.
    ///
    /// Stop positions and labels are left intact, matching a renderer that
    /// hides lines but keeps every stop on the map.
    pub fn retain_trips(&mut self, mut visible: impl FnMut(&str) -> bool) {
        self.trip_paths.retain(|path| visible(path.id()));
    }

    /// Every drawn point: markers, labels and path vertices.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let stops = self.markers.iter().map(StopMarker::position);
        let labels = self.labels.iter().map(StopLabel::position);
        let paths = self
            .trip_paths
            .iter()
            .flat_map(|path| path.combined_path().map(|p| p.to_point()));
        stops.chain(labels).chain(paths)
    }
}

#[cfg(test)]
mod tests {
    use stripmap_core::route::{Stop, Trip, TripColor};

    use super::*;
    use crate::{config::LayoutConfig, layout::layout_route, path::trip_paths};

    fn output() -> DiagramOutput {
        let route = RouteData::new(
            vec![
                Trip::new("t1", "One", TripColor::default()).with_inbound(["A", "B"]),
                Trip::new("t2", "Two", TripColor::default()).with_inbound(["A", "ghost"]),
            ],
            vec![Stop::new("A", "Alpha"), Stop::new("B", "Bravo")],
        );
        let config = LayoutConfig::default();
        let layout = layout_route(&route, &config);
        let paths = trip_paths(&route, &layout, &config);
        DiagramOutput::new(&route, &layout, paths, 25.0)
    }

    #[test]
    fn test_labels_sit_above_stops() {
        let output = output();
        let label = &output.labels()[0];
        assert_eq!(label.stop_id(), "A");
        assert_eq!(label.text(), "Alpha - A");
        assert_eq!(label.position(), Point::new(0.0, -25.0));
    }

    #[test]
    fn test_unresolved_label_falls_back_to_id() {
        let output = output();
        let ghost = output
            .labels()
            .iter()
            .find(|label| label.stop_id() == "ghost")
            .unwrap();
        assert_eq!(ghost.text(), "ghost - ghost");
    }

    #[test]
    fn test_retain_trips_keeps_stops() {
        let mut output = output();
        output.retain_trips(|id| id == "t2");
        assert_eq!(output.trip_paths().len(), 1);
        assert_eq!(output.trip_paths()[0].id(), "t2");
        assert_eq!(output.stop_positions().len(), 3);
        assert_eq!(output.markers().len(), 3);
    }

    #[test]
    fn test_every_path_stop_has_a_marker() {
        let route = RouteData::new(
            vec![
                Trip::new("shuttle", "Shuttle", TripColor::default())
                    .with_inbound(["A", "B", "C"])
                    .with_outbound(["C", "B", "A"]),
            ],
            vec![
                Stop::new("A", "Alpha"),
                Stop::new("B", "Bravo"),
                Stop::new("C", "Charlie"),
            ],
        );
        let config = LayoutConfig::default();
        let layout = layout_route(&route, &config);
        let paths = trip_paths(&route, &layout, &config);
        let output = DiagramOutput::new(&route, &layout, paths, 25.0);

        assert_eq!(output.markers().len(), 6);
        let outbound: Vec<Point> = output
            .markers()
            .iter()
            .filter(|marker| marker.direction() == Direction::Outbound)
            .map(StopMarker::position)
            .collect();
        assert_eq!(
            outbound,
            [
                Point::new(200.0, 200.0),
                Point::new(100.0, 200.0),
                Point::new(0.0, 200.0)
            ]
        );
        for vertex in output.trip_paths()[0].outbound_path() {
            assert!(outbound.contains(&vertex.to_point()));
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(output()).unwrap();
        assert!(json["stopPositions"]["A"]["tripIds"].is_array());
        assert_eq!(json["labels"][0]["stopId"], "A");
        assert_eq!(json["markers"][0]["direction"], "inbound");
        assert_eq!(json["tripPaths"].as_array().unwrap().len(), 2);
    }
}
