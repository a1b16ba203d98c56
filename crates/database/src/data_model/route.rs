use chrono::{DateTime, Utc};
use model::{coordinate::Coordinate, route::Route, WithId};
use sqlx::prelude::FromRow;
use utility::id::Id;

#[derive(Debug, Clone, FromRow)]
pub struct RouteRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub color: Option<String>,
    pub width: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl RouteRow {
    /// `points` have to be sorted by their sequence number.
    pub fn to_model(self, points: Vec<RoutePointRow>) -> WithId<Route> {
        WithId::new(
            Id::new(self.id),
            Route {
                name: self.name,
                description: self.description,
                points: points.into_iter().map(|point| point.to_model()).collect(),
                enabled: self.enabled,
                color: self.color,
                width: self.width,
                start_time: self.start_time,
                end_time: self.end_time,
                created: self.created,
                updated: self.updated,
            },
        )
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RoutePointRow {
    pub route_id: i64,
    pub sequence: i32,
    pub latitude: f64,
    pub longitude: f64,
}

impl RoutePointRow {
    pub fn to_model(self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
