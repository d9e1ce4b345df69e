//! Post-processing of generated trip paths.

use log::debug;

use stripmap_core::geometry::{PathPoint, polyline_length};

/// Extends the shorter of the two paths so both have the same planar length.
///
/// When the lengths differ by more than `epsilon`, a shorter inbound path gets
/// a new first point continuing its first segment backward, and a shorter
/// outbound path gets a new last point continuing its last segment forward,
/// each by the length difference. Applying this to its own output is a
/// no-op.
///
/// Paths are returned unchanged when the shorter one has no end segment to
/// extend (fewer than two points, or a zero-length segment).
///
/// # Examples
///
/// ```
/// # use stripmap::path::extend_path_to_match_length;
/// # use stripmap_core::geometry::PathPoint;
/// let inbound = vec![PathPoint::new(0.0, 0.0, 0.0), PathPoint::new(100.0, 0.0, 0.0)];
/// let outbound = vec![PathPoint::new(0.0, 200.0, 0.0), PathPoint::new(300.0, 200.0, 0.0)];
///
/// let (inbound, outbound) = extend_path_to_match_length(inbound, outbound, 0.001);
/// assert_eq!(inbound[0], PathPoint::new(-200.0, 0.0, 0.0));
/// assert_eq!(outbound.len(), 2);
/// ```
pub fn extend_path_to_match_length(
    mut inbound: Vec<PathPoint>,
    mut outbound: Vec<PathPoint>,
    epsilon: f64,
) -> (Vec<PathPoint>, Vec<PathPoint>) {
    let inbound_length = polyline_length(&inbound);
    let outbound_length = polyline_length(&outbound);
    let difference = (inbound_length - outbound_length).abs();

    if difference <= epsilon {
        return (inbound, outbound);
    }

    if inbound_length < outbound_length {
        let extended = match inbound.as_slice() {
            [first, second, ..] => first.offset_along(second.vector_to(*first), difference),
            _ => None,
        };
        match extended {
            Some(point) => inbound.insert(0, point),
            None => debug!(difference; "Inbound path has no leading segment to extend"),
        }
    } else {
        let extended = match outbound.as_slice() {
            [.., before_last, last] => last.offset_along(before_last.vector_to(*last), difference),
            _ => None,
        };
        match extended {
            Some(point) => outbound.push(point),
            None => debug!(difference; "Outbound path has no trailing segment to extend"),
        }
    }

    (inbound, outbound)
}

/// Converts every diagonal move of `path` into two axis-aligned moves.
///
/// The first point is kept; before each point that differs from its
/// predecessor in both x and y, an elbow at `(current.x, previous.y)` is
/// inserted. The elbow keeps the predecessor's z.
///
/// # Examples
///
/// ```
/// # use stripmap::path::straighten_path;
/// # use stripmap_core::geometry::PathPoint;
/// let path = [PathPoint::new(0.0, 0.0, 0.0), PathPoint::new(10.0, 10.0, 0.0)];
/// assert_eq!(
///     straighten_path(&path),
///     [
///         PathPoint::new(0.0, 0.0, 0.0),
///         PathPoint::new(10.0, 0.0, 0.0),
///         PathPoint::new(10.0, 10.0, 0.0),
///     ]
/// );
/// ```
pub fn straighten_path(path: &[PathPoint]) -> Vec<PathPoint> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };

    let mut straightened = Vec::with_capacity(path.len() * 2);
    straightened.push(first);
    for pair in path.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if current.x() != previous.x() && current.y() != previous.y() {
            straightened.push(PathPoint::new(current.x(), previous.y(), previous.z()));
        }
        straightened.push(current);
    }
    straightened
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn path(points: &[[f64; 2]]) -> Vec<PathPoint> {
        points
            .iter()
            .map(|&[x, y]| PathPoint::new(x, y, 0.0))
            .collect()
    }

    #[test]
    fn test_shorter_inbound_is_prepended() {
        let inbound = path(&[[100.0, 0.0], [200.0, 0.0]]);
        let outbound = path(&[[0.0, 200.0], [300.0, 200.0]]);

        let (inbound, outbound) = extend_path_to_match_length(inbound, outbound, 0.001);

        assert_eq!(inbound.len(), 3);
        assert_eq!(inbound[0], PathPoint::new(-100.0, 0.0, 0.0));
        assert_eq!(outbound.len(), 2);
        assert_approx_eq!(f64, polyline_length(&inbound), polyline_length(&outbound));
    }

    #[test]
    fn test_shorter_outbound_is_appended() {
        let inbound = path(&[[0.0, 0.0], [100.0, 0.0], [200.0, 100.0]]);
        let outbound = path(&[[200.0, 200.0], [100.0, 200.0]]);

        let (inbound, outbound) = extend_path_to_match_length(inbound, outbound, 0.001);

        assert_eq!(inbound.len(), 3);
        assert_eq!(outbound.len(), 3);
        let last = outbound[2];
        assert_approx_eq!(f64, last.y(), 200.0);
        assert!(last.x() < 100.0);
        assert_approx_eq!(
            f64,
            polyline_length(&inbound),
            polyline_length(&outbound),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_extension_with_elevation_matches_planar_length() {
        let inbound = vec![PathPoint::new(100.0, 0.0, 0.0), PathPoint::new(200.0, 0.0, 30.0)];
        let outbound = path(&[[0.0, 200.0], [300.0, 200.0]]);

        let (inbound, outbound) = extend_path_to_match_length(inbound, outbound, 0.001);

        assert_eq!(inbound[0].x(), -100.0);
        assert_approx_eq!(f64, inbound[0].z(), -60.0, epsilon = 1e-9);
        assert_approx_eq!(f64, polyline_length(&inbound), 300.0, epsilon = 1e-9);

        let (again_in, again_out) =
            extend_path_to_match_length(inbound.clone(), outbound.clone(), 0.001);
        assert_eq!(again_in, inbound);
        assert_eq!(again_out, outbound);
    }

    #[test]
    fn test_equal_lengths_are_untouched() {
        let inbound = path(&[[0.0, 0.0], [100.0, 0.0]]);
        let outbound = path(&[[100.0, 200.0], [0.0, 200.0]]);

        let (new_inbound, new_outbound) =
            extend_path_to_match_length(inbound.clone(), outbound.clone(), 0.001);
        assert_eq!(new_inbound, inbound);
        assert_eq!(new_outbound, outbound);
    }

    #[test]
    fn test_degenerate_shorter_path_is_untouched() {
        let inbound = path(&[[0.0, 0.0]]);
        let outbound = path(&[[0.0, 200.0], [300.0, 200.0]]);
        let (new_inbound, _) = extend_path_to_match_length(inbound.clone(), outbound, 0.001);
        assert_eq!(new_inbound, inbound);

        let inbound = path(&[[0.0, 0.0], [0.0, 0.0]]);
        let outbound = path(&[[0.0, 200.0], [300.0, 200.0]]);
        let (new_inbound, _) = extend_path_to_match_length(inbound.clone(), outbound, 0.001);
        assert_eq!(new_inbound, inbound);
    }

    #[test]
    fn test_both_empty() {
        let (inbound, outbound) = extend_path_to_match_length(Vec::new(), Vec::new(), 0.001);
        assert!(inbound.is_empty());
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_straighten_diagonal() {
        let straightened = straighten_path(&path(&[[0.0, 0.0], [10.0, 10.0]]));
        assert_eq!(straightened, path(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]));
    }

    #[test]
    fn test_straighten_keeps_previous_z() {
        let input = [PathPoint::new(0.0, 0.0, 5.0), PathPoint::new(10.0, 10.0, 0.0)];
        assert_eq!(straighten_path(&input)[1], PathPoint::new(10.0, 0.0, 5.0));
    }

    #[test]
    fn test_straighten_empty_and_single() {
        assert!(straighten_path(&[]).is_empty());
        let single = path(&[[3.0, 4.0]]);
        assert_eq!(straighten_path(&single), single);
    }
}
