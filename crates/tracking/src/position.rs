use std::f64::consts::PI;

use async_trait::async_trait;
use model::coordinate::Coordinate;
use rand::Rng;
use utility::geo::EARTH_RADIUS_KM;

use crate::RequestResult;

/// Where the position of the tracked vehicle comes from.
#[async_trait]
pub trait VehiclePositionSource: Send + Sync {
    async fn current_position(&self) -> RequestResult<Coordinate>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinate);

#[async_trait]
impl VehiclePositionSource for FixedPosition {
    async fn current_position(&self) -> RequestResult<Coordinate> {
        Ok(self.0)
    }
}

/// Reports a random position within `radius_km` of `center`, standing in for a
/// live feed during development.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPosition {
    center: Coordinate,
    radius_km: f64,
}

impl SimulatedPosition {
    pub fn new(center: Coordinate, radius_km: f64) -> Self {
        Self {
            center,
            radius_km: radius_km.max(0.0),
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Coordinate {
        // sqrt keeps the samples evenly spread over the disc
        let distance_km = self.radius_km * rng.gen::<f64>().sqrt();
        let bearing = rng.gen_range(0.0..(2.0 * PI));

        let angular_distance = distance_km / EARTH_RADIUS_KM;
        let dlat = angular_distance * bearing.cos();
        let dlon =
            angular_distance * bearing.sin() / self.center.latitude.to_radians().cos();

        Coordinate::new(
            self.center.latitude + dlat.to_degrees(),
            self.center.longitude + dlon.to_degrees(),
        )
    }
}

#[async_trait]
impl VehiclePositionSource for SimulatedPosition {
    async fn current_position(&self) -> RequestResult<Coordinate> {
        Ok(self.sample(&mut rand::thread_rng()))
    }
}
