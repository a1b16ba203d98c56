use std::collections::HashMap;

use model::{coordinate::Coordinate, route::Route, WithId};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracking::database::{DatabaseError, Result};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::route::{RoutePointRow, RouteRow};

use super::{convert_error, BULK_INSERT_MAX};

pub async fn get(conn: &mut PgConnection, id: Id<Route>) -> Result<WithId<Route>> {
    let row: RouteRow = sqlx::query_as("SELECT * FROM routes WHERE id = $1;")
        .bind(id.raw())
        .fetch_one(&mut *conn)
        .await
        .map_err(convert_error)?;
    let points = get_points(&mut *conn, row.id).await?;
    Ok(row.to_model(points))
}

pub async fn get_all(conn: &mut PgConnection) -> Result<Vec<WithId<Route>>> {
    let rows: Vec<RouteRow> = sqlx::query_as("SELECT * FROM routes ORDER BY id ASC;")
        .fetch_all(&mut *conn)
        .await
        .map_err(convert_error)?;
    let points: Vec<RoutePointRow> = sqlx::query_as(
        "
        SELECT
            *
        FROM
            route_points
        ORDER BY
            route_id ASC,
            sequence ASC;
        ",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;

    let mut points_by_route: HashMap<i64, Vec<RoutePointRow>> = HashMap::new();
    for point in points {
        points_by_route.entry(point.route_id).or_default().push(point);
    }

    rows.into_iter()
        .map(|row| {
            let points = points_by_route.remove(&row.id).unwrap_or_default();
            row.to_model(points)
        })
        .collect::<Vec<_>>()
        .let_owned(|routes| Ok(routes))
}

async fn get_points(conn: &mut PgConnection, route_id: i64) -> Result<Vec<RoutePointRow>> {
    sqlx::query_as(
        "
        SELECT
            *
        FROM
            route_points
        WHERE
            route_id = $1
        ORDER BY
            sequence ASC;
        ",
    )
    .bind(route_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)
}

/// Inserts the route and its points. Should run inside a transaction.
pub async fn insert(conn: &mut PgConnection, route: Route) -> Result<WithId<Route>> {
    let row: RouteRow = sqlx::query_as(
        "
        INSERT INTO routes(
            name,
            description,
            enabled,
            color,
            width,
            start_time,
            end_time,
            created,
            updated
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *;
        ",
    )
    .bind(route.name)
    .bind(route.description)
    .bind(route.enabled)
    .bind(route.color)
    .bind(route.width)
    .bind(route.start_time)
    .bind(route.end_time)
    .bind(route.created)
    .bind(route.updated)
    .fetch_one(&mut *conn)
    .await
    .map_err(convert_error)?;

    insert_points(&mut *conn, row.id, &route.points).await?;

    let mut result = row.to_model(vec![]);
    result.content.points = route.points;
    Ok(result)
}

async fn insert_points(
    conn: &mut PgConnection,
    route_id: i64,
    points: &[Coordinate],
) -> Result<()> {
    for (chunk_index, chunk) in points.chunks(BULK_INSERT_MAX).enumerate() {
        let offset = chunk_index * BULK_INSERT_MAX;
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO route_points(route_id, sequence, latitude, longitude) ",
        );
        query.push_values(chunk.iter().enumerate(), |mut values, (index, point)| {
            values
                .push_bind(route_id)
                .push_bind((offset + index) as i32)
                .push_bind(point.latitude)
                .push_bind(point.longitude);
        });
        query
            .build()
            .execute(&mut *conn)
            .await
            .map_err(convert_error)?;
    }
    Ok(())
}

pub async fn set_enabled(
    conn: &mut PgConnection,
    id: Id<Route>,
    enabled: bool,
) -> Result<WithId<Route>> {
    let row: RouteRow = sqlx::query_as(
        "
        UPDATE
            routes
        SET
            enabled = $2,
            updated = NOW()
        WHERE
            id = $1
        RETURNING *;
        ",
    )
    .bind(id.raw())
    .bind(enabled)
    .fetch_one(&mut *conn)
    .await
    .map_err(convert_error)?;
    let points = get_points(&mut *conn, row.id).await?;
    Ok(row.to_model(points))
}

pub async fn delete(conn: &mut PgConnection, id: Id<Route>) -> Result<()> {
    let result = sqlx::query("DELETE FROM routes WHERE id = $1;")
        .bind(id.raw())
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}
