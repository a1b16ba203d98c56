use std::{
    collections::BTreeMap,
    io,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use model::{route::Route, stop::Stop, vehicle::Vehicle, WithId};
use utility::id::Id;

use crate::database::{
    Database, DatabaseAutocommit, DatabaseError, DatabaseOperations,
    DatabaseTransaction, Repo, Result, RouteRepo, StopRepo, VehicleRepo,
};

#[derive(Default)]
struct Tables {
    routes: BTreeMap<i64, Route>,
    stops: BTreeMap<i64, Stop>,
    vehicles: BTreeMap<String, Vehicle>,
    next_id: i64,
}

/// In-memory stand-in for the postgres database.
#[derive(Clone, Default)]
pub(crate) struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    unavailable: bool,
}

impl MemoryDatabase {
    /// A database on which every operation fails.
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }
}

pub(crate) struct MemoryConnection {
    tables: Arc<Mutex<Tables>>,
    unavailable: bool,
}

impl MemoryConnection {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        if self.unavailable {
            return Err(DatabaseError::Other(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "database unavailable",
            ))));
        }
        Ok(self.tables.lock().unwrap())
    }
}

fn with_ids<K: Clone, V: Clone, T>(
    table: &BTreeMap<K, V>,
    wrap: impl Fn(K, V) -> T,
) -> Vec<T> {
    table
        .iter()
        .map(|(id, value)| wrap(id.clone(), value.clone()))
        .collect()
}

#[async_trait]
impl Repo<Route> for MemoryConnection {
    async fn get(&mut self, id: Id<Route>) -> Result<WithId<Route>> {
        let tables = self.tables()?;
        let route = tables.routes.get(&id.raw()).ok_or(DatabaseError::NotFound)?;
        Ok(WithId::new(id, route.clone()))
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Route>>> {
        let tables = self.tables()?;
        Ok(with_ids(&tables.routes, |id, route| {
            WithId::new(Id::new(id), route)
        }))
    }

    async fn delete(&mut self, id: Id<Route>) -> Result<()> {
        let mut tables = self.tables()?;
        tables
            .routes
            .remove(&id.raw())
            .map(|_| ())
            .ok_or(DatabaseError::NotFound)
    }
}

#[async_trait]
impl RouteRepo for MemoryConnection {
    async fn insert_route(&mut self, route: Route) -> Result<WithId<Route>> {
        let mut tables = self.tables()?;
        tables.next_id += 1;
        let id = tables.next_id;
        tables.routes.insert(id, route.clone());
        Ok(WithId::new(Id::new(id), route))
    }

    async fn set_enabled(
        &mut self,
        id: Id<Route>,
        enabled: bool,
    ) -> Result<WithId<Route>> {
        let mut tables = self.tables()?;
        let route = tables
            .routes
            .get_mut(&id.raw())
            .ok_or(DatabaseError::NotFound)?;
        route.enabled = enabled;
        Ok(WithId::new(id, route.clone()))
    }
}

#[async_trait]
impl Repo<Stop> for MemoryConnection {
    async fn get(&mut self, id: Id<Stop>) -> Result<WithId<Stop>> {
        let tables = self.tables()?;
        let stop = tables.stops.get(&id.raw()).ok_or(DatabaseError::NotFound)?;
        Ok(WithId::new(id, stop.clone()))
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Stop>>> {
        let tables = self.tables()?;
        Ok(with_ids(&tables.stops, |id, stop| WithId::new(Id::new(id), stop)))
    }

    async fn delete(&mut self, id: Id<Stop>) -> Result<()> {
        let mut tables = self.tables()?;
        tables
            .stops
            .remove(&id.raw())
            .map(|_| ())
            .ok_or(DatabaseError::NotFound)
    }
}

#[async_trait]
impl StopRepo for MemoryConnection {
    async fn insert_stop(&mut self, stop: Stop) -> Result<WithId<Stop>> {
        let mut tables = self.tables()?;
        tables.next_id += 1;
        let id = tables.next_id;
        tables.stops.insert(id, stop.clone());
        Ok(WithId::new(Id::new(id), stop))
    }
}

#[async_trait]
impl Repo<Vehicle> for MemoryConnection {
    async fn get(&mut self, id: Id<Vehicle>) -> Result<WithId<Vehicle>> {
        let tables = self.tables()?;
        let vehicle = tables
            .vehicles
            .get(&id.raw())
            .ok_or(DatabaseError::NotFound)?;
        Ok(WithId::new(id, vehicle.clone()))
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Vehicle>>> {
        let tables = self.tables()?;
        Ok(with_ids(&tables.vehicles, |id, vehicle| {
            WithId::new(Id::new(id), vehicle)
        }))
    }

    async fn delete(&mut self, id: Id<Vehicle>) -> Result<()> {
        let mut tables = self.tables()?;
        tables
            .vehicles
            .remove(&id.raw())
            .map(|_| ())
            .ok_or(DatabaseError::NotFound)
    }
}

#[async_trait]
impl VehicleRepo for MemoryConnection {
    async fn put_vehicle(&mut self, vehicle: WithId<Vehicle>) -> Result<WithId<Vehicle>> {
        let mut tables = self.tables()?;
        let stored = match tables.vehicles.get(&vehicle.id.raw()) {
            Some(existing) => Vehicle {
                name: vehicle.content.name,
                created: existing.created,
                updated: vehicle.content.updated,
            },
            None => vehicle.content,
        };
        tables.vehicles.insert(vehicle.id.raw(), stored.clone());
        Ok(WithId::new(vehicle.id, stored))
    }
}

impl DatabaseOperations for MemoryConnection {}

impl DatabaseAutocommit for MemoryConnection {}

#[async_trait]
impl DatabaseTransaction for MemoryConnection {
    async fn commit(self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Transaction = MemoryConnection;
    type Autocommit = MemoryConnection;

    async fn transaction(&self) -> Result<Self::Transaction> {
        Ok(self.auto())
    }

    fn auto(&self) -> Self::Autocommit {
        MemoryConnection {
            tables: self.tables.clone(),
            unavailable: self.unavailable,
        }
    }
}
