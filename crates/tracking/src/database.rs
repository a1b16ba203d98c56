use std::{error, fmt, fmt::Debug, result};

use async_trait::async_trait;
use model::{route::Route, stop::Stop, vehicle::Vehicle, WithId};
use serde::Serialize;
use utility::id::{HasId, Id};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    IdMissing,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::NotFound => write!(f, "not found"),
            DatabaseError::IdMissing => write!(f, "id missing"),
            DatabaseError::Other(why) => write!(f, "{}", why),
        }
    }
}

impl error::Error for DatabaseError {}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait Repo<T: Serialize + HasId>
where
    <T as HasId>::IdType: Debug + Clone + Serialize,
{
    async fn get(&mut self, id: Id<T>) -> Result<WithId<T>>;
    /// Returns all elements ordered by their id.
    async fn get_all(&mut self) -> Result<Vec<WithId<T>>>;
    async fn delete(&mut self, id: Id<T>) -> Result<()>;
}

#[async_trait]
pub trait RouteRepo: Repo<Route> {
    async fn insert_route(&mut self, route: Route) -> Result<WithId<Route>>;

    async fn set_enabled(
        &mut self,
        id: Id<Route>,
        enabled: bool,
    ) -> Result<WithId<Route>>;
}

#[async_trait]
pub trait StopRepo: Repo<Stop> {
    async fn insert_stop(&mut self, stop: Stop) -> Result<WithId<Stop>>;
}

#[async_trait]
pub trait VehicleRepo: Repo<Vehicle> {
    /// Inserts the vehicle, or renames it if its id is already known.
    async fn put_vehicle(&mut self, vehicle: WithId<Vehicle>) -> Result<WithId<Vehicle>>;
}

pub trait DatabaseOperations: RouteRepo + StopRepo + VehicleRepo {}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// Storage for routes, stops and vehicles.
/// Concurrent access happens through clones of the database object.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;
}
