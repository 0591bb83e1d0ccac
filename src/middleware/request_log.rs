//! Request-scoped logging: one span per request carrying its context, plus
//! start and completion lines with status and duration.

use axum::{
    extract::{ConnectInfo, Request},
    http::{header::USER_AGENT, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn header_value<'a>(headers: &'a HeaderMap, name: impl axum::http::header::AsHeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".into());
    let span = tracing::info_span!(
        "request",
        request_id = %header_value(request.headers(), REQUEST_ID_HEADER),
        method = %method,
        path = %path,
        user_agent = %header_value(request.headers(), USER_AGENT),
        remote_addr = %remote_addr,
    );

    async move {
        tracing::debug!("request started");
        let response = next.run(request).await;
        let status = response.status();
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), duration_ms, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), duration_ms, "request completed");
        }
        response
    }
    .instrument(span)
    .await
}
