use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::repository::RepositoryError;

/// CatalogError
///
/// The modeled outcomes of every catalog operation. The first four are expected results
/// (bad input, no or insufficient credentials, missing entity) and are rendered as client
/// errors. `Internal` carries an unexpected repository failure and is the only variant
/// logged at error level.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("full authentication is required to access this resource")]
    Unauthenticated,

    #[error("access is denied")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] RepositoryError),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CatalogError::Forbidden => StatusCode::FORBIDDEN,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// ErrorBody
///
/// JSON payload returned alongside every non-2xx status produced by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            // Repository details stay in the logs.
            CatalogError::Internal(e) => {
                tracing::error!("repository failure: {:?}", e);
                "unexpected server error".to_string()
            }
            other => {
                tracing::debug!(status = status.as_u16(), "request rejected: {}", other);
                other.to_string()
            }
        };

        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
