use chrono::Utc;
use eta::{build_report, InputError, Report, ReportParameters};
use log::debug;
use model::{route::Route, stop::Stop, vehicle::Vehicle, WithId};
use utility::{id::Id, let_also::LetAlso};

use crate::{
    database::{Database, Repo, RouteRepo, StopRepo, VehicleRepo},
    position::VehiclePositionSource,
    RequestError, RequestResult,
};

#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database + Send + Sync + Sized + 'static,
{
    id: String,
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub(crate) fn new<S>(id: S, database: D) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            database,
        }
    }
}

impl<D> Client<D>
where
    D: Database,
{
    pub async fn get_routes(&self) -> RequestResult<Vec<WithId<Route>>> {
        Ok(Repo::<Route>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn get_route(&self, id: Id<Route>) -> RequestResult<WithId<Route>> {
        Ok(Repo::<Route>::get(&mut self.database.auto(), id).await?)
    }

    /// Stores a new route. Routes without points are rejected, since a
    /// single one would make every report fail.
    pub async fn create_route(&self, route: Route) -> RequestResult<WithId<Route>> {
        if route.points.is_empty() {
            return Err(RequestError::Rejected(InputError::EmptyRoute));
        }
        let now = Utc::now();
        let route = Route {
            created: Some(now),
            updated: Some(now),
            ..route
        };
        debug!(
            "{}: creating route '{}' with {} points",
            self.id,
            route.name,
            route.points.len()
        );
        Ok(self.database.auto().insert_route(route).await?)
    }

    pub async fn delete_route(&self, id: Id<Route>) -> RequestResult<()> {
        Ok(Repo::<Route>::delete(&mut self.database.auto(), id).await?)
    }

    pub async fn set_route_enabled(
        &self,
        id: Id<Route>,
        enabled: bool,
    ) -> RequestResult<WithId<Route>> {
        Ok(self.database.auto().set_enabled(id, enabled).await?)
    }

    pub async fn get_stops(&self) -> RequestResult<Vec<WithId<Stop>>> {
        Ok(Repo::<Stop>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn create_stop(&self, stop: Stop) -> RequestResult<WithId<Stop>> {
        Ok(self.database.auto().insert_stop(stop).await?)
    }

    pub async fn delete_stop(&self, id: Id<Stop>) -> RequestResult<()> {
        Ok(Repo::<Stop>::delete(&mut self.database.auto(), id).await?)
    }

    pub async fn get_vehicles(&self) -> RequestResult<Vec<WithId<Vehicle>>> {
        Ok(Repo::<Vehicle>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn put_vehicle(
        &self,
        vehicle: WithId<Vehicle>,
    ) -> RequestResult<WithId<Vehicle>> {
        Ok(self.database.auto().put_vehicle(vehicle).await?)
    }

    /// Fetches routes and stops, asks `position` where the vehicle is and
    /// computes the distance report. Storage errors are passed on unchanged.
    pub async fn eta_report<P>(
        &self,
        parameters: &ReportParameters,
        position: &P,
    ) -> RequestResult<Report>
    where
        P: VehiclePositionSource + ?Sized,
    {
        let routes = self
            .get_routes()
            .await?
            .into_iter()
            .map(|route| route.content)
            .collect::<Vec<_>>();
        let stops = self
            .get_stops()
            .await?
            .into_iter()
            .map(|stop| stop.content)
            .collect::<Vec<_>>();
        let vehicle_position = position.current_position().await?;

        build_report(&routes, &stops, vehicle_position, parameters)?
            .let_owned(Ok)
    }
}
