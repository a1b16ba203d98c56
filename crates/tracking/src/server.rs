use std::path::Path;

use chrono::Utc;
use log::info;
use model::{vehicle::Vehicle, WithId};
use serde::Deserialize;
use utility::id::Id;

use crate::{
    client::Client,
    database::{Database, DatabaseTransaction, VehicleRepo},
    RequestError, RequestResult,
};

#[derive(Debug, Deserialize)]
struct VehicleSeed {
    #[serde(rename = "Vehicles", default)]
    vehicles: Vec<SeedVehicle>,
}

#[derive(Debug, Deserialize)]
struct SeedVehicle {
    #[serde(rename = "VehicleID")]
    id: String,
    #[serde(rename = "VehicleName")]
    name: String,
}

pub struct Server<D>
where
    D: Database + Send + Sync + Sized + 'static,
{
    database: D,
}

impl<D> Server<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn client<S: Into<String>>(&self, id: S) -> Client<D> {
        Client::new(id, self.database.clone())
    }

    /// Registers every vehicle listed in a seed file in one transaction.
    /// Returns the number of vehicles seeded.
    pub async fn seed_vehicles<P: AsRef<Path>>(&self, path: P) -> RequestResult<usize> {
        let content = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(RequestError::other)?;
        self.seed_vehicles_from_str(&content).await
    }

    pub async fn seed_vehicles_from_str(&self, content: &str) -> RequestResult<usize> {
        let seed: VehicleSeed =
            serde_json::from_str(content).map_err(RequestError::other)?;
        let now = Utc::now();

        let mut tx = self.database.transaction().await?;
        for vehicle in seed.vehicles.iter() {
            tx.put_vehicle(WithId::new(
                Id::new(vehicle.id.clone()),
                Vehicle {
                    name: vehicle.name.clone(),
                    created: Some(now),
                    updated: Some(now),
                },
            ))
            .await?;
        }
        tx.commit().await?;

        info!("seeded {} vehicles", seed.vehicles.len());
        Ok(seed.vehicles.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryDatabase;

    #[tokio::test]
    async fn seeds_vehicles_and_keeps_creation_time() {
        let server = Server::new(MemoryDatabase::default());
        let seed = r#"{
            "Vehicles": [
                { "VehicleID": "2150", "VehicleName": "Shuttle 1" },
                { "VehicleID": "2151", "VehicleName": "Shuttle 2" }
            ]
        }"#;
        assert_eq!(2, server.seed_vehicles_from_str(seed).await.unwrap());

        let client = server.client("test");
        let first = client.get_vehicles().await.unwrap();
        assert_eq!(2, first.len());
        assert_eq!("2150", first[0].id.raw());
        assert_eq!("Shuttle 1", first[0].content.name);

        let renamed = r#"{ "Vehicles": [{ "VehicleID": "2150", "VehicleName": "Night Owl" }] }"#;
        assert_eq!(1, server.seed_vehicles_from_str(renamed).await.unwrap());
        let second = client.get_vehicles().await.unwrap();
        assert_eq!(2, second.len());
        assert_eq!("Night Owl", second[0].content.name);
        assert_eq!(first[0].content.created, second[0].content.created);
    }

    #[tokio::test]
    async fn malformed_seed_is_rejected() {
        let server = Server::new(MemoryDatabase::default());
        assert!(matches!(
            server.seed_vehicles_from_str("{ not json").await,
            Err(RequestError::Other(_))
        ));
    }

    #[tokio::test]
    async fn missing_seed_file_is_rejected() {
        let server = Server::new(MemoryDatabase::default());
        assert!(server
            .seed_vehicles("/nonexistent/vehicle_seed.json")
            .await
            .is_err());
    }
}
