//! Last-resort responses: unmatched routes and panics escaping a handler.

use crate::error::{AppError, ErrorBody, INTERNAL_SERVER_ERROR};
use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;

/// Router fallback: 404 `{"error": "Resource not found"}`.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Known path, wrong method: 405 `{"error": "Method not allowed"}`.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Panic handler for the catch-panic layer: log the payload, answer with the generic 500 body.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "unhandled failure in handler");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(INTERNAL_SERVER_ERROR)),
    )
        .into_response()
}
