use model::{vehicle::Vehicle, WithId};
use sqlx::{Executor, Postgres};
use tracking::database::{DatabaseError, Result};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::{vehicle::VehicleRow, with_id, with_ids};

use super::convert_error;

pub async fn get<'c, E>(executor: E, id: Id<Vehicle>) -> Result<WithId<Vehicle>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as("SELECT * FROM vehicles WHERE id = $1;")
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
        .map(|row: VehicleRow| with_id(row))
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Vehicle>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as("SELECT * FROM vehicles ORDER BY id ASC;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows: Vec<VehicleRow>| Ok(with_ids(rows)))
}

pub async fn put<'c, E>(executor: E, vehicle: WithId<Vehicle>) -> Result<WithId<Vehicle>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        INSERT INTO vehicles(
            id,
            name,
            created,
            updated
        )
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id)
        DO UPDATE SET
            name = EXCLUDED.name,
            updated = EXCLUDED.updated
        RETURNING *;
        ",
    )
    .bind(vehicle.id.raw())
    .bind(vehicle.content.name)
    .bind(vehicle.content.created)
    .bind(vehicle.content.updated)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: VehicleRow| with_id(row))
}

pub async fn delete<'c, E>(executor: E, id: Id<Vehicle>) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM vehicles WHERE id = $1;")
        .bind(id.raw())
        .execute(executor)
        .await
        .map_err(convert_error)?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}
