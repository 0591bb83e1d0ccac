//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const RESOURCE_NOT_FOUND: &str = "Resource not found";
pub const DOG_NOT_FOUND: &str = "Dog not found";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("dog not found: {0}")]
    DogNotFound(i64),
    #[error("no route for {0}")]
    RouteNotFound(String),
    #[error("{method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

/// Body shared by every error response: `{"error": "<message>"}`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody { error: message.into() }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DogNotFound(_) | AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side detail never leaves this process.
    fn public_message(&self) -> String {
        match self {
            AppError::DogNotFound(_) => DOG_NOT_FOUND.to_string(),
            AppError::RouteNotFound(_) => RESOURCE_NOT_FOUND.to_string(),
            AppError::MethodNotAllowed { .. } => METHOD_NOT_ALLOWED.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Db(_) | AppError::Internal(_) => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::DogNotFound(id) => tracing::warn!(dog_id = id, "dog not found"),
            AppError::RouteNotFound(path) => tracing::warn!(path = %path, "404 not found"),
            AppError::MethodNotAllowed { method, path } => {
                tracing::warn!(method = %method, path = %path, "405 method not allowed")
            }
            AppError::BadRequest(msg) => tracing::warn!(reason = %msg, "bad request"),
            AppError::Db(e) => tracing::error!(error = %e, error_debug = ?e, "data access failure"),
            AppError::Internal(msg) => tracing::error!(error = %msg, "internal failure"),
        }
        (status, Json(ErrorBody::new(self.public_message()))).into_response()
    }
}
