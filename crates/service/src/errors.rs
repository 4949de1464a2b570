use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Car is not available")]
    CarUnavailable { car_id: i32 },
    #[error("{0}")]
    InvalidState(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code, logged with every error response
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 2002,
            ServiceError::Conflict(_) => 2003,
            ServiceError::CarUnavailable { .. } => 2004,
            ServiceError::InvalidState(_) => 2005,
            ServiceError::Db(_) => 2100,
        }
    }
}
