use std::env::VarError;

use diesel_async::pooled_connection::deadpool;
use thiserror::Error;

use crate::submission::ValidationError;

/// Failures of the Postgres registry below the level of individual records.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("DATABASE_URL is not usable: {0}")]
    DatabaseEnvUrl(#[from] VarError),
    #[error("could not set up the connection pool: {0}")]
    PoolBuild(#[from] deadpool::BuildError),
    #[error("no registry connection available: {0}")]
    Pool(#[from] deadpool::PoolError),
    #[error("registry query failed: {0}")]
    Database(#[from] diesel::result::Error),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("invalid {}: {0}", .0.field())]
    Validation(#[from] ValidationError),
    #[error("no record named {0:?}")]
    NotFound(String),
    #[error("{0}")]
    Database(#[from] DatabaseError),
}

impl From<diesel::result::Error> for RegistryError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Database(value.into())
    }
}

impl From<deadpool::PoolError> for RegistryError {
    fn from(value: deadpool::PoolError) -> Self {
        Self::Database(value.into())
    }
}
