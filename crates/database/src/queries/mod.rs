use tracking::database::DatabaseError;

pub mod route;
pub mod stop;
pub mod vehicle;

/// Maximum number of rows inserted by a single statement.
pub const BULK_INSERT_MAX: usize = 999;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}
