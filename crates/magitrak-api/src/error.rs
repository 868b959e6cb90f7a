use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::guard::Denied;
use crate::validation::ValidationError;

/// Every way a request can end without success. Each variant maps to exactly
/// one status and terminates the request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("authentication required")]
    Unauthenticated,

    #[error("match belongs to another user")]
    Forbidden(#[from] Denied),

    #[error("match not found")]
    NotFound,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("internal server error")]
    Store(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<&'static str>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedInput(_)
            | Self::Validation(_)
            | Self::BadRequest(_)
            | Self::Forbidden(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Store(e) => error!("Store failure: {:#}", e),
            Self::Forbidden(denied) => debug!(status = status.as_u16(), "Request rejected: {}", denied),
            other => debug!(status = status.as_u16(), "Request rejected: {}", other),
        }

        let fields = match &self {
            Self::Validation(v) => v.fields.clone(),
            _ => Vec::new(),
        };

        (status, Json(ErrorBody { error: self.to_string(), fields })).into_response()
    }
}
