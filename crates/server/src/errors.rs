use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Envelope;
use service::contacts::validation::FieldViolation;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// HTTP-facing error. Validation failures keep the bare `{errors: [...]}`
/// body; everything else is a failed envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("{error}")]
    Envelope { status: StatusCode, error: String },
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self::Envelope { status, error: error.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Envelope { status, .. } => *status,
        }
    }
}

/// Default status mapping; handlers override where an operation differs.
impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(list) => Self::Validation(list),
            ServiceError::InvalidId(_) | ServiceError::Conflict(_) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Db(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, r.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                warn!(count = errors.len(), "request failed validation");
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "errors": errors }))).into_response()
            }
            Self::Envelope { status, error } => {
                if status.is_server_error() {
                    error!(%status, error = %error, "request failed");
                }
                (status, Json(Envelope::<()>::failed(error))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("store unavailable: {0}")]
    Store(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
