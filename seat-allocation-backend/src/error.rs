use seat_allocation_config::ConfigError;
use seat_allocation_database::{DatabaseError, RegistryError, ValidationError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("{0}")]
    Registry(#[from] RegistryError),
    #[error("operator authentication required")]
    Unauthorized,
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Registry(value.into())
    }
}
