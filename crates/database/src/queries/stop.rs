use model::{stop::Stop, WithId};
use sqlx::{Executor, Postgres};
use tracking::database::{DatabaseError, Result};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{stop::StopRow, with_id, with_ids};

use super::convert_error;

pub async fn get<'c, E>(executor: E, id: Id<Stop>) -> Result<WithId<Stop>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as("SELECT * FROM stops WHERE id = $1;")
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
        .map(|row: StopRow| with_id(row))
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Stop>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as("SELECT * FROM stops ORDER BY id ASC;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows: Vec<StopRow>| Ok(with_ids(rows)))
}

pub async fn insert<'c, E>(executor: E, stop: Stop) -> Result<WithId<Stop>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        INSERT INTO stops(
            name,
            description,
            latitude,
            longitude
        )
        VALUES ($1, $2, $3, $4)
        RETURNING *;
        ",
    )
    .bind(stop.name)
    .bind(stop.description)
    .bind(stop.coordinate.latitude)
    .bind(stop.coordinate.longitude)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: StopRow| with_id(row))
}

pub async fn delete<'c, E>(executor: E, id: Id<Stop>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM stops WHERE id = $1;")
        .bind(id.raw())
        .execute(executor)
        .await
        .map_err(convert_error)?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}
