/// Mean earth radius. All distances produced by this crate are in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two positions given in decimal
/// degrees, on a spherical earth.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = latitude_1.to_radians();
    let lon1_rad = longitude_1.to_radians();
    let lat2_rad = latitude_2.to_radians();
    let lon2_rad = longitude_2.to_radians();

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Squared euclidean distance in raw degree space.
///
/// Only meaningful for ranking candidates that are close to each other, where
/// it orders them the same way `haversine_distance` would.
pub fn planar_distance_squared(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    (latitude_1 - latitude_2).powi(2) + (longitude_1 - longitude_2).powi(2)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn identical_positions_are_zero_apart() {
        assert_eq!(0.0, haversine_distance(42.73166, -73.68559, 42.73166, -73.68559));
        assert_eq!(0.0, haversine_distance(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_distance(42.7302, -73.6788, 42.7356, -73.6711);
        let back = haversine_distance(42.7356, -73.6711, 42.7302, -73.6788);
        assert_eq!(there, back);
        assert!(there > 0.0);
    }

    #[test]
    fn one_degree_along_the_equator() {
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert_relative_eq!(
            expected,
            haversine_distance(0.0, 0.0, 0.0, 1.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn farther_positions_are_farther() {
        let near = haversine_distance(0.0, 0.0, 0.0, 0.5);
        let far = haversine_distance(0.0, 0.0, 0.0, 1.5);
        assert!(near < far);
    }

    #[test]
    fn planar_metric_uses_raw_degrees() {
        assert_eq!(2.0, planar_distance_squared(0.0, 0.0, 1.0, 1.0));
        assert_eq!(0.0, planar_distance_squared(3.5, -1.0, 3.5, -1.0));
    }
}
