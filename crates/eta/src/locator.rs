use model::coordinate::Coordinate;

use crate::InputError;

/// Returns the index of the route vertex closest to `target`.
///
/// Candidates are ranked in degree space rather than by great-circle distance.
/// Over the extent of a single route both orderings agree. On a tie the lowest
/// index wins.
pub fn nearest_index(
    points: &[Coordinate],
    target: Coordinate,
) -> Result<usize, InputError> {
    let (first, rest) = points.split_first().ok_or(InputError::EmptyRoute)?;

    let mut min = first.planar_distance_squared_to(&target);
    let mut min_index = 0;
    for (index, point) in rest.iter().enumerate() {
        let diff = point.planar_distance_squared_to(&target);
        if diff < min {
            min = diff;
            min_index = index + 1;
        }
    }
    Ok(min_index)
}
