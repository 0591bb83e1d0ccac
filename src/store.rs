//! SQLite connection setup, table DDL and administrative seeding.
//! Tables are created if missing at startup; there is no migration history.

use crate::error::AppError;
use crate::models::{AdoptionStatus, NewDog};
use crate::sql::{BREEDS_TABLE, DOGS_TABLE};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open a pool on `database_url`, creating the database file if it does not exist.
/// Foreign keys are enforced on every connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(database_url = %database_url, max_connections, "database pool ready");
    Ok(pool)
}

/// One round trip to the store.
pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create `breeds` and `dogs` if they do not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let breeds_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        BREEDS_TABLE
    );
    sqlx::query(&breeds_ddl).execute(pool).await?;

    let statuses: Vec<String> = AdoptionStatus::ALL
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect();
    let dogs_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            breed_id INTEGER NOT NULL REFERENCES {}(id),
            age INTEGER NOT NULL,
            description TEXT,
            gender TEXT NOT NULL,
            status TEXT NOT NULL CHECK (status IN ({}))
        )
        "#,
        DOGS_TABLE,
        BREEDS_TABLE,
        statuses.join(", ")
    );
    sqlx::query(&dogs_ddl).execute(pool).await?;
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_dogs_breed_id ON {} (breed_id)",
        DOGS_TABLE
    ))
    .execute(pool)
    .await?;
    tracing::info!("database tables verified/created");
    Ok(())
}

/// Insert a breed and return its id.
pub async fn insert_breed(pool: &SqlitePool, name: &str) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(&format!(
        "INSERT INTO {} (name) VALUES (?) RETURNING id",
        BREEDS_TABLE
    ))
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Insert a dog and return its id. Fails if `breed_id` does not reference a breed.
pub async fn insert_dog(pool: &SqlitePool, dog: &NewDog) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(&format!(
        "INSERT INTO {} (name, breed_id, age, description, gender, status) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        DOGS_TABLE
    ))
    .bind(&dog.name)
    .bind(dog.breed_id)
    .bind(dog.age)
    .bind(dog.description.as_deref())
    .bind(&dog.gender)
    .bind(dog.status.as_str())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Seed a handful of breeds and dogs into an empty catalog. No-op when breeds already exist.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<(), AppError> {
    let existing = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", BREEDS_TABLE))
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        tracing::debug!(breeds = existing, "catalog already seeded");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    let mut breed_ids = Vec::new();
    for name in ["Labrador Retriever", "Poodle", "German Shepherd", "Beagle"] {
        let id = sqlx::query_scalar::<_, i64>(&format!(
            "INSERT INTO {} (name) VALUES (?) RETURNING id",
            BREEDS_TABLE
        ))
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;
        breed_ids.push(id);
    }

    let dogs = [
        ("Buddy", 0, 3, Some("Friendly and loves to fetch."), "Male", AdoptionStatus::Available),
        ("Daisy", 1, 5, Some("Calm lap dog, good with kids."), "Female", AdoptionStatus::Available),
        ("Max", 2, 2, None, "Male", AdoptionStatus::Pending),
        ("Luna", 3, 7, Some("Senior beagle with a big nose."), "Female", AdoptionStatus::Adopted),
    ];
    for (name, breed_idx, age, description, gender, status) in dogs {
        sqlx::query(&format!(
            "INSERT INTO {} (name, breed_id, age, description, gender, status) VALUES (?, ?, ?, ?, ?, ?)",
            DOGS_TABLE
        ))
        .bind(name)
        .bind(breed_ids[breed_idx])
        .bind(age as i64)
        .bind(description)
        .bind(gender)
        .bind(status.as_str())
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    tracing::info!(breeds = breed_ids.len(), dogs = dogs.len(), "seeded demo catalog");
    Ok(())
}
