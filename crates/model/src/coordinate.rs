use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

use crate::ExampleData;

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometers.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Squared distance in degree space, used to rank nearby candidates.
    pub fn planar_distance_squared_to(&self, other: &Coordinate) -> f64 {
        geo::planar_distance_squared(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl ExampleData for Coordinate {
    fn example_data() -> Self {
        Coordinate::new(42.73029, -73.67655)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_matches_geo_primitive() {
        let union = Coordinate::new(42.73029, -73.67655);
        let blitman = Coordinate::new(42.73185, -73.68707);
        assert_eq!(
            geo::haversine_distance(42.73029, -73.67655, 42.73185, -73.68707),
            union.distance_to(&blitman)
        );
        assert_eq!(union.distance_to(&blitman), blitman.distance_to(&union));
        assert_eq!(0.0, union.distance_to(&union));
    }

    #[test]
    fn deserializes_from_camel_case() {
        let coordinate: Coordinate =
            serde_json::from_str(r#"{"latitude": 1.5, "longitude": -2.25}"#).unwrap();
        assert_eq!(Coordinate::new(1.5, -2.25), coordinate);
    }
}
