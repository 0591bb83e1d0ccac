//! Catalog routes, nested under `/api`.

use crate::handlers::{get_dog, list_breeds, list_dogs};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/dogs", get(list_dogs))
        .route("/dogs/:id", get(get_dog))
        .route("/breeds", get(list_breeds))
        .with_state(state)
}
