mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{routing::get as get_route, Router};
use common::{app, body_json, get, memory_pool, scenario_pool};
use dogshelter::app::with_layers;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn unknown_route_is_resource_not_found() {
    for uri in ["/nope", "/api/cats", "/api/dogs/1/owners"] {
        let response = get(app(scenario_pool().await), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(
            body_json(response).await,
            json!({"error": "Resource not found"})
        );
    }
}

#[tokio::test]
async fn closed_store_yields_generic_500() {
    let pool = scenario_pool().await;
    pool.close().await;
    for uri in ["/api/dogs", "/api/dogs/1", "/api/breeds"] {
        let response = get(app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(
            body_json(response).await,
            json!({"error": "Internal server error"})
        );
    }
}

#[tokio::test]
async fn missing_tables_yield_generic_500() {
    let pool = memory_pool().await;
    sqlx::query("DROP TABLE dogs").execute(&pool).await.unwrap();
    let response = get(app(pool), "/api/dogs").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Internal server error"})
    );
}

#[tokio::test]
async fn panics_become_generic_500() {
    async fn boom() -> &'static str {
        panic!("handler exploded")
    }
    let router = with_layers(Router::new().route("/boom", get_route(boom)));
    let response = get(router, "/boom").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        body_json(response).await,
        json!({"error": "Internal server error"})
    );
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let pool = scenario_pool().await;
    for (method, uri) in [("POST", "/api/dogs"), ("DELETE", "/api/dogs/1"), ("PUT", "/health")] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app(pool.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(
            body_json(response).await,
            json!({"error": "Method not allowed"})
        );
    }
}

#[tokio::test]
async fn request_id_is_generated() {
    let response = get(app(scenario_pool().await), "/api/breeds").await;
    let id = response.headers().get("x-request-id").unwrap();
    assert!(!id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn request_id_is_propagated() {
    let request = Request::builder()
        .uri("/api/dogs")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app(scenario_pool().await).oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn health_and_ready() {
    let pool = scenario_pool().await;
    let response = get(app(pool.clone()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));

    let response = get(app(pool.clone()), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "ok", "database": "ok"})
    );

    pool.close().await;
    let response = get(app(pool), "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "degraded");
}
