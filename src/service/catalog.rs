//! Catalog reads against SQLite. Every call runs on the caller's connection.

use crate::error::AppError;
use crate::models::{BreedSummary, DogDetail, DogDetailRow, DogSummary};
use crate::sql::{bind_all, select_breeds, select_dog_by_id, select_dogs, DogFilter};
use sqlx::SqliteConnection;

pub struct CatalogService;

impl CatalogService {
    /// Dogs joined to their breed name, narrowed by `filter`.
    pub async fn list_dogs(
        conn: &mut SqliteConnection,
        filter: &DogFilter,
    ) -> Result<Vec<DogSummary>, AppError> {
        let q = select_dogs(filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query_as::<_, DogSummary>(&q.sql), &q.params)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    /// One dog with its breed name, or None when no row has this id.
    pub async fn get_dog_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<DogDetail>, AppError> {
        let q = select_dog_by_id(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query_as::<_, DogDetailRow>(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        row.map(DogDetail::try_from)
            .transpose()
            .map_err(|e| AppError::Internal(format!("dog {}: {}", id, e)))
    }

    pub async fn list_breeds(conn: &mut SqliteConnection) -> Result<Vec<BreedSummary>, AppError> {
        let q = select_breeds();
        tracing::debug!(sql = %q.sql, "query");
        let rows = sqlx::query_as::<_, BreedSummary>(&q.sql)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdoptionStatus, NewDog};
    use crate::store;

    async fn seeded() -> sqlx::SqlitePool {
        let pool = store::connect("sqlite::memory:", 1).await.unwrap();
        store::ensure_tables(&pool).await.unwrap();
        let lab = store::insert_breed(&pool, "Labrador").await.unwrap();
        let poodle = store::insert_breed(&pool, "Poodle").await.unwrap();
        for (name, breed_id, status) in [
            ("Rex", lab, AdoptionStatus::Available),
            ("Fido", poodle, AdoptionStatus::Adopted),
            ("Bella", lab, AdoptionStatus::Pending),
        ] {
            let dog = NewDog {
                name: name.into(),
                breed_id,
                age: 4,
                description: None,
                gender: "Female".into(),
                status,
            };
            store::insert_dog(&pool, &dog).await.unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn filters_intersect() {
        let pool = seeded().await;
        let mut conn = pool.acquire().await.unwrap();
        let filter = DogFilter {
            breed_id: Some(1),
            available_only: true,
        };
        let dogs = CatalogService::list_dogs(&mut conn, &filter).await.unwrap();
        assert_eq!(
            dogs,
            vec![DogSummary {
                id: 1,
                name: "Rex".into(),
                breed: "Labrador".into()
            }]
        );
    }

    #[tokio::test]
    async fn missing_dog_is_none() {
        let pool = seeded().await;
        let mut conn = pool.acquire().await.unwrap();
        assert!(CatalogService::get_dog_by_id(&mut conn, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn breeds_in_id_order() {
        let pool = seeded().await;
        let mut conn = pool.acquire().await.unwrap();
        let breeds = CatalogService::list_breeds(&mut conn).await.unwrap();
        let names: Vec<_> = breeds.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Labrador", "Poodle"]);
    }
}
