//! Router assembly shared by the server binary and the integration tests.

use crate::middleware::{log_requests, REQUEST_ID_HEADER};
use crate::response::{method_not_allowed, panic_response, route_not_found};
use crate::routes::{catalog_routes, common_routes};
use crate::state::AppState;
use axum::http::HeaderName;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Full application router: operational routes at the root, catalog under `/api`.
pub fn build_app(state: AppState) -> Router {
    let routes = Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", catalog_routes(state));
    with_layers(routes)
}

/// JSON error fallbacks and the middleware stack, applied to already-registered routes.
///
/// Layers, outermost first:
///
/// 1. Set `x-request-id` on requests that lack one
/// 2. Copy the request id onto the response
/// 3. Request span plus start/completion logging
/// 4. Panic recovery (generic 500 body)
pub fn with_layers(routes: Router) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    routes
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}
