//! API error payloads
//!
//! Failures are reported in the body as `{"error": "..."}` with status 200;
//! clients distinguish success by the absence of the `error` key.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::error::SnowmanError;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub SnowmanError);

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            SnowmanError::Database(_) | SnowmanError::Io(_) => error!("Request failed: {}", self.0),
            _ => debug!("Request rejected: {}", self.0),
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(SnowmanError::InvalidRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(SnowmanError::InvalidRequest(rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
