//! Dog listing and detail handlers.

use crate::error::AppError;
use crate::extractors::DbConn;
use crate::models::{DogDetail, DogSummary};
use crate::service::CatalogService;
use crate::sql::DogFilter;
use axum::{
    extract::{rejection::PathRejection, OriginalUri, Path, Query},
    Json,
};

pub const INVALID_BREED_ID: &str = "Invalid breed_id parameter";

/// First value for `key`; later repeats are ignored.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Build the listing filter from raw query params, in request order.
/// `breed_id` empty or absent means no breed filter; `available` must be exactly `"true"`.
pub fn parse_dog_filter(params: &[(String, String)]) -> Result<DogFilter, AppError> {
    let breed_id = match first_param(params, "breed_id") {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| AppError::BadRequest(INVALID_BREED_ID.into()))?,
        ),
    };
    let available_only = first_param(params, "available") == Some("true");
    Ok(DogFilter {
        breed_id,
        available_only,
    })
}

/// Path ids are unsigned decimal integers; anything else does not name a dog route.
pub fn parse_dog_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub async fn list_dogs(
    Query(params): Query<Vec<(String, String)>>,
    mut conn: DbConn,
) -> Result<Json<Vec<DogSummary>>, AppError> {
    tracing::info!("fetching dogs");
    let filter = parse_dog_filter(&params)?;
    tracing::debug!(
        breed_id = ?filter.breed_id,
        available_only = filter.available_only,
        "filter params resolved"
    );
    let dogs = CatalogService::list_dogs(&mut conn, &filter).await?;
    tracing::info!(count = dogs.len(), "retrieved dogs");
    Ok(Json(dogs))
}

/// A segment that is not a valid id (including one that does not decode to UTF-8) names no route.
pub async fn get_dog(
    OriginalUri(uri): OriginalUri,
    id_str: Result<Path<String>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<DogDetail>, AppError> {
    let id = match &id_str {
        Ok(Path(raw)) => parse_dog_id(raw),
        Err(rejection) => {
            tracing::debug!(rejection = %rejection, "undecodable dog id");
            None
        }
    }
    .ok_or_else(|| AppError::RouteNotFound(uri.path().to_string()))?;
    tracing::info!(dog_id = id, "fetching dog");
    let dog = CatalogService::get_dog_by_id(&mut conn, id)
        .await?
        .ok_or(AppError::DogNotFound(id))?;
    tracing::info!(dog_id = id, name = %dog.name, "retrieved dog");
    tracing::debug!(dog = ?dog, "dog details");
    Ok(Json(dog))
}
