use std::{error::Error, fmt};

use eta::InputError;

pub mod client;
pub mod config;
pub mod database;
pub mod position;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    IdMissing,
    /// The stored data does not fit the report settings.
    Input(InputError),
    /// The request itself is invalid and nothing was changed.
    Rejected(InputError),
    Other(Box<dyn Error + Send + Sync>),
}

impl RequestError {
    pub fn other<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NotFound => write!(f, "the requested item does not exist"),
            RequestError::IdMissing => write!(f, "the item has no id"),
            RequestError::Input(why) => write!(f, "invalid input: {}", why),
            RequestError::Rejected(why) => write!(f, "rejected: {}", why),
            RequestError::Other(why) => write!(f, "{}", why),
        }
    }
}

impl Error for RequestError {}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            database::DatabaseError::IdMissing => Self::IdMissing,
            database::DatabaseError::Other(why) => Self::Other(why),
        }
    }
}

impl From<InputError> for RequestError {
    fn from(why: InputError) -> Self {
        Self::Input(why)
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
