//! Breed listing handler.

use crate::error::AppError;
use crate::extractors::DbConn;
use crate::models::BreedSummary;
use crate::service::CatalogService;
use axum::Json;

pub async fn list_breeds(mut conn: DbConn) -> Result<Json<Vec<BreedSummary>>, AppError> {
    tracing::info!("fetching breeds");
    let breeds = CatalogService::list_breeds(&mut conn).await?;
    tracing::info!(count = breeds.len(), "retrieved breeds");
    tracing::debug!(
        breeds = ?breeds.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        "breed names"
    );
    Ok(Json(breeds))
}
