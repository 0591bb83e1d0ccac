//! Shared helpers for the HTTP integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use dogshelter::models::{AdoptionStatus, NewDog};
use dogshelter::{build_app, store, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tower::ServiceExt;

/// Single-connection in-memory database with the catalog tables created.
/// The connection never expires, so the data lives as long as the pool.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    store::ensure_tables(&pool).await.unwrap();
    pool
}

/// Breeds Labrador (1) and Poodle (2); dogs Rex (1, Labrador, AVAILABLE) and Fido (2, Poodle, ADOPTED).
pub async fn scenario_pool() -> SqlitePool {
    let pool = memory_pool().await;
    let labrador = store::insert_breed(&pool, "Labrador").await.unwrap();
    let poodle = store::insert_breed(&pool, "Poodle").await.unwrap();
    store::insert_dog(
        &pool,
        &NewDog {
            name: "Rex".into(),
            breed_id: labrador,
            age: 3,
            description: Some("Loves the water.".into()),
            gender: "Male".into(),
            status: AdoptionStatus::Available,
        },
    )
    .await
    .unwrap();
    store::insert_dog(
        &pool,
        &NewDog {
            name: "Fido".into(),
            breed_id: poodle,
            age: 6,
            description: None,
            gender: "Female".into(),
            status: AdoptionStatus::Adopted,
        },
    )
    .await
    .unwrap();
    pool
}

pub fn app(pool: SqlitePool) -> Router {
    build_app(AppState::new(pool))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
