use sea_orm::DbErr;
use thiserror::Error;

/// Errors returned by [`CheeseStore`](super::CheeseStore) backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cheese '{0}' not found")]
    NotFound(String),

    #[error("Unknown country code '{0}'")]
    UnknownCountry(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
