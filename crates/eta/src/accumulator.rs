use std::cmp::Ordering;

use itertools::Itertools;
use model::coordinate::Coordinate;

use crate::InputError;

/// Travel distance in kilometers from vertex `start` to vertex `end`.
///
/// Routes are driven in one direction only. When `end` lies before `start` the
/// distance runs from `start` to the last vertex and continues at the first
/// vertex up to `end`. No edge is added between the last and the first vertex.
pub fn segment_distance(
    points: &[Coordinate],
    start: usize,
    end: usize,
) -> Result<f64, InputError> {
    check_index(points, start)?;
    check_index(points, end)?;

    match start.cmp(&end) {
        Ordering::Equal => Ok(0.0),
        Ordering::Less => Ok(forward_distance(&points[start..=end])),
        // both halves run forward, so this never recurses a second time
        Ordering::Greater => Ok(segment_distance(points, start, points.len() - 1)?
            + segment_distance(points, 0, end)?),
    }
}

/// Distance from the first to the last vertex of a route.
pub fn route_length(points: &[Coordinate]) -> Result<f64, InputError> {
    if points.is_empty() {
        return Err(InputError::EmptyRoute);
    }
    segment_distance(points, 0, points.len() - 1)
}

fn check_index(points: &[Coordinate], index: usize) -> Result<(), InputError> {
    if points.is_empty() {
        Err(InputError::EmptyRoute)
    } else if index >= points.len() {
        Err(InputError::IndexOutOfRange {
            index,
            len: points.len(),
        })
    } else {
        Ok(())
    }
}

fn forward_distance(points: &[Coordinate]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .fold(0.0, |distance, (from, to)| distance + from.distance_to(to))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<Coordinate> {
        raw.iter().copied().map(Coordinate::from).collect()
    }

    fn campus_loop() -> Vec<Coordinate> {
        points(&[
            (42.73029, -73.67655),
            (42.73088, -73.68014),
            (42.73185, -73.68707),
            (42.73356, -73.68559),
            (42.73470, -73.68122),
            (42.73301, -73.67702),
        ])
    }

    #[test]
    fn empty_route_is_rejected() {
        assert_eq!(Err(InputError::EmptyRoute), segment_distance(&[], 0, 0));
        assert_eq!(Err(InputError::EmptyRoute), route_length(&[]));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let route = campus_loop();
        assert_eq!(
            Err(InputError::IndexOutOfRange { index: 6, len: 6 }),
            segment_distance(&route, 0, 6)
        );
        assert_eq!(
            Err(InputError::IndexOutOfRange { index: 9, len: 6 }),
            segment_distance(&route, 9, 2)
        );
    }

    #[test]
    fn same_index_is_zero() {
        let route = campus_loop();
        for i in 0..route.len() {
            assert_eq!(Ok(0.0), segment_distance(&route, i, i));
        }
    }

    #[test]
    fn two_point_route() {
        let route = points(&[(0.0, 0.0), (0.0, 1.0)]);
        assert_eq!(
            Ok(route[0].distance_to(&route[1])),
            segment_distance(&route, 0, 1)
        );
        // wrapping from the last vertex to the first covers no edge at all
        assert_eq!(Ok(0.0), segment_distance(&route, 1, 0));
    }

    #[test]
    fn wrapping_from_last_vertex_to_first_is_zero() {
        let route = points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(Ok(0.0), segment_distance(&route, 2, 0));
    }

    #[test]
    fn forward_distance_is_additive() {
        let route = campus_loop();
        for i in 0..route.len() - 1 {
            for j in i + 1..route.len() {
                let whole = segment_distance(&route, i, j).unwrap();
                let split = segment_distance(&route, i, i + 1).unwrap()
                    + segment_distance(&route, i + 1, j).unwrap();
                assert_relative_eq!(whole, split, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn backward_query_wraps_around() {
        let route = campus_loop();
        let last = route.len() - 1;
        for i in 0..route.len() - 1 {
            for j in i + 1..route.len() {
                assert_eq!(
                    segment_distance(&route, j, i).unwrap(),
                    segment_distance(&route, j, last).unwrap()
                        + segment_distance(&route, 0, i).unwrap()
                );
            }
        }
    }

    #[test]
    fn wraparound_is_not_symmetric() {
        let route = campus_loop();
        let forward = segment_distance(&route, 1, 3).unwrap();
        let backward = segment_distance(&route, 3, 1).unwrap();
        assert!(forward > 0.0);
        assert!(backward > 0.0);
        assert_ne!(forward, backward);
        // no closing edge, so going round never exceeds the open path length
        assert!(backward < route_length(&route).unwrap());
    }

    #[test]
    fn route_length_spans_all_vertices() {
        let route = campus_loop();
        assert_eq!(
            segment_distance(&route, 0, route.len() - 1),
            route_length(&route)
        );
        assert_eq!(Ok(0.0), route_length(&points(&[(3.0, 4.0)])));
    }
}
