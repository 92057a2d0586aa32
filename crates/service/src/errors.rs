use thiserror::Error;

use crate::contacts::validation::FieldViolation;

/// Failure of a contact operation. `Display` is the message shown to clients.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),
    #[error("{0}")]
    InvalidId(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(msg: &str) -> Self { Self::NotFound(msg.to_string()) }

    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Duplicate(_) => Self::Conflict(crate::contacts::MOBILE_EXISTS.to_string()),
            ModelError::Validation(msg) => Self::Validation(vec![FieldViolation::body(msg)]),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
