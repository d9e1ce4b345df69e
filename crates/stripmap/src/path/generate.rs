//! Octilinear polyline generation.

use std::collections::HashMap;

use stripmap_core::geometry::{PathPoint, Point};

/// Builds a polyline through `stops`, skipping ids with no known position.
///
/// Between two consecutive stops that differ in both x and y, intermediate
/// points are interpolated along the straight line with a step of
/// `grid_unit` along the dominant axis, so the rendered line reads as short
/// diagonal hops instead of one long arbitrary-angle segment. Every point
/// has `z = 0`.
pub fn octilinear_path<S: AsRef<str>>(
    stops: &[S],
    positions: &HashMap<&str, Point>,
    grid_unit: f64,
) -> Vec<PathPoint> {
    let resolved: Vec<Point> = stops
        .iter()
        .filter_map(|id| positions.get(id.as_ref()).copied())
        .collect();

    let mut path = Vec::with_capacity(resolved.len());
    for (i, &current) in resolved.iter().enumerate() {
        path.push(current.to_path_point());
        if let Some(&next) = resolved.get(i + 1) {
            interpolate_diagonal(current, next, grid_unit, &mut path);
        }
    }
    path
}

/// Pushes the intermediate points between `from` and `to`, exclusive of
/// both endpoints.
fn interpolate_diagonal(from: Point, to: Point, grid_unit: f64, path: &mut Vec<PathPoint>) {
    let delta = to.sub_point(from);
    if delta.x() == 0.0 || delta.y() == 0.0 || grid_unit <= 0.0 {
        return;
    }

    let steps = delta.x().abs().max(delta.y().abs()) / grid_unit;
    let step = Point::new(delta.x() / steps, delta.y() / steps);

    let mut index = 1.0;
    while index < steps {
        path.push(from.add_point(step.scale(index)).to_path_point());
        index += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions<'a>(entries: &[(&'a str, f64, f64)]) -> HashMap<&'a str, Point> {
        entries
            .iter()
            .map(|&(id, x, y)| (id, Point::new(x, y)))
            .collect()
    }

    fn coords(path: &[PathPoint]) -> Vec<[f64; 3]> {
        path.iter().map(|p| p.as_array()).collect()
    }

    #[test]
    fn test_diagonal_inserts_grid_points() {
        let positions = positions(&[("A", 0.0, 0.0), ("B", 200.0, 200.0)]);
        let path = octilinear_path(&["A", "B"], &positions, 100.0);
        assert_eq!(
            coords(&path),
            [[0.0, 0.0, 0.0], [100.0, 100.0, 0.0], [200.0, 200.0, 0.0]]
        );
    }

    #[test]
    fn test_axis_aligned_moves_are_untouched() {
        let positions = positions(&[("A", 0.0, 0.0), ("B", 300.0, 0.0), ("C", 300.0, 60.0)]);
        let path = octilinear_path(&["A", "B", "C"], &positions, 100.0);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_shallow_diagonal_steps_along_dominant_axis() {
        let positions = positions(&[("A", 0.0, 0.0), ("B", 300.0, -60.0)]);
        let path = octilinear_path(&["A", "B"], &positions, 100.0);
        assert_eq!(
            coords(&path),
            [
                [0.0, 0.0, 0.0],
                [100.0, -20.0, 0.0],
                [200.0, -40.0, 0.0],
                [300.0, -60.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_short_diagonal_adds_nothing() {
        let positions = positions(&[("A", 0.0, 0.0), ("B", 100.0, -60.0)]);
        let path = octilinear_path(&["A", "B"], &positions, 100.0);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_unknown_stops_are_skipped() {
        let positions = positions(&[("A", 0.0, 0.0), ("C", 100.0, 0.0)]);
        let path = octilinear_path(&["A", "ghost", "C"], &positions, 100.0);
        assert_eq!(coords(&path), [[0.0, 0.0, 0.0], [100.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_empty_sequence() {
        let path = octilinear_path::<&str>(&[], &HashMap::new(), 100.0);
        assert!(path.is_empty());
    }
}
