use std::{env, error::Error};

use async_trait::async_trait;
use log::info;
use model::{route::Route, stop::Stop, vehicle::Vehicle, WithId};
use queries::convert_error;
use sqlx::Transaction;
use tracking::database::{
    Database, DatabaseAutocommit, DatabaseOperations, DatabaseTransaction, Repo,
    Result, RouteRepo, StopRepo, VehicleRepo,
};
use utility::id::Id;

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> std::result::Result<Self, Box<dyn Error>> {
        info!(
            "connecting to {}:{}/{}",
            database_connection_info.hostname,
            database_connection_info.port,
            database_connection_info.database
        );
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { connection: pool })
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Transaction = PgDatabaseTransaction<'static>;
    type Autocommit = PgDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(&self) -> Result<Self::Transaction> {
        let tx: Transaction<'_, sqlx::Postgres> =
            self.connection.begin().await.map_err(convert_error)?;

        Ok(PgDatabaseTransaction { tx })
    }
}

pub struct PgDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

impl<'a> DatabaseOperations for PgDatabaseTransaction<'a> {}

#[async_trait]
impl<'a> DatabaseTransaction for PgDatabaseTransaction<'a> {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

#[async_trait]
impl<'a> Repo<Route> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: Id<Route>) -> Result<WithId<Route>> {
        queries::route::get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Route>>> {
        queries::route::get_all(&mut *self.tx).await
    }

    async fn delete(&mut self, id: Id<Route>) -> Result<()> {
        queries::route::delete(&mut *self.tx, id).await
    }
}

#[async_trait]
impl<'a> RouteRepo for PgDatabaseTransaction<'a> {
    async fn insert_route(&mut self, route: Route) -> Result<WithId<Route>> {
        queries::route::insert(&mut *self.tx, route).await
    }

    async fn set_enabled(
        &mut self,
        id: Id<Route>,
        enabled: bool,
    ) -> Result<WithId<Route>> {
        queries::route::set_enabled(&mut *self.tx, id, enabled).await
    }
}

#[async_trait]
impl<'a> Repo<Stop> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: Id<Stop>) -> Result<WithId<Stop>> {
        queries::stop::get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Stop>>> {
        queries::stop::get_all(&mut *self.tx).await
    }

    async fn delete(&mut self, id: Id<Stop>) -> Result<()> {
        queries::stop::delete(&mut *self.tx, id).await
    }
}

#[async_trait]
impl<'a> StopRepo for PgDatabaseTransaction<'a> {
    async fn insert_stop(&mut self, stop: Stop) -> Result<WithId<Stop>> {
        queries::stop::insert(&mut *self.tx, stop).await
    }
}

#[async_trait]
impl<'a> Repo<Vehicle> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: Id<Vehicle>) -> Result<WithId<Vehicle>> {
        queries::vehicle::get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Vehicle>>> {
        queries::vehicle::get_all(&mut *self.tx).await
    }

    async fn delete(&mut self, id: Id<Vehicle>) -> Result<()> {
        queries::vehicle::delete(&mut *self.tx, id).await
    }
}

#[async_trait]
impl<'a> VehicleRepo for PgDatabaseTransaction<'a> {
    async fn put_vehicle(&mut self, vehicle: WithId<Vehicle>) -> Result<WithId<Vehicle>> {
        queries::vehicle::put(&mut *self.tx, vehicle).await
    }
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

impl DatabaseOperations for PgDatabaseAutocommit {}

impl DatabaseAutocommit for PgDatabaseAutocommit {}

// Route reads and writes span several statements, so they run on a
// dedicated connection or inside their own transaction.
#[async_trait]
impl Repo<Route> for PgDatabaseAutocommit {
    async fn get(&mut self, id: Id<Route>) -> Result<WithId<Route>> {
        let mut conn = self.pool.acquire().await.map_err(convert_error)?;
        queries::route::get(&mut *conn, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Route>>> {
        let mut conn = self.pool.acquire().await.map_err(convert_error)?;
        queries::route::get_all(&mut *conn).await
    }

    async fn delete(&mut self, id: Id<Route>) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_err(convert_error)?;
        queries::route::delete(&mut *conn, id).await
    }
}

#[async_trait]
impl RouteRepo for PgDatabaseAutocommit {
    async fn insert_route(&mut self, route: Route) -> Result<WithId<Route>> {
        let mut tx = self.pool.begin().await.map_err(convert_error)?;
        let route = queries::route::insert(&mut *tx, route).await?;
        tx.commit().await.map_err(convert_error)?;
        Ok(route)
    }

    async fn set_enabled(
        &mut self,
        id: Id<Route>,
        enabled: bool,
    ) -> Result<WithId<Route>> {
        let mut conn = self.pool.acquire().await.map_err(convert_error)?;
        queries::route::set_enabled(&mut *conn, id, enabled).await
    }
}

#[async_trait]
impl Repo<Stop> for PgDatabaseAutocommit {
    async fn get(&mut self, id: Id<Stop>) -> Result<WithId<Stop>> {
        queries::stop::get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Stop>>> {
        queries::stop::get_all(&self.pool).await
    }

    async fn delete(&mut self, id: Id<Stop>) -> Result<()> {
        queries::stop::delete(&self.pool, id).await
    }
}

#[async_trait]
impl StopRepo for PgDatabaseAutocommit {
    async fn insert_stop(&mut self, stop: Stop) -> Result<WithId<Stop>> {
        queries::stop::insert(&self.pool, stop).await
    }
}

#[async_trait]
impl Repo<Vehicle> for PgDatabaseAutocommit {
    async fn get(&mut self, id: Id<Vehicle>) -> Result<WithId<Vehicle>> {
        queries::vehicle::get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<WithId<Vehicle>>> {
        queries::vehicle::get_all(&self.pool).await
    }

    async fn delete(&mut self, id: Id<Vehicle>) -> Result<()> {
        queries::vehicle::delete(&self.pool, id).await
    }
}

#[async_trait]
impl VehicleRepo for PgDatabaseAutocommit {
    async fn put_vehicle(&mut self, vehicle: WithId<Vehicle>) -> Result<WithId<Vehicle>> {
        queries::vehicle::put(&self.pool, vehicle).await
    }
}
