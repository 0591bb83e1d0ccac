//! Catalog records and the shapes returned to clients.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Adoption state of a dog. Stored and rendered by name, never by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdoptionStatus {
    Available,
    Pending,
    Adopted,
}

impl AdoptionStatus {
    pub const ALL: [AdoptionStatus; 3] = [
        AdoptionStatus::Available,
        AdoptionStatus::Pending,
        AdoptionStatus::Adopted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdoptionStatus::Available => "AVAILABLE",
            AdoptionStatus::Pending => "PENDING",
            AdoptionStatus::Adopted => "ADOPTED",
        }
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown adoption status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for AdoptionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdoptionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Row of `GET /api/dogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DogSummary {
    pub id: i64,
    pub name: String,
    pub breed: String,
}

/// Raw joined row for one dog; `status` is still the stored text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DogDetailRow {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub age: i64,
    pub description: Option<String>,
    pub gender: String,
    pub status: String,
}

/// Body of `GET /api/dogs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DogDetail {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub age: i64,
    pub description: Option<String>,
    pub gender: String,
    pub status: AdoptionStatus,
}

impl TryFrom<DogDetailRow> for DogDetail {
    type Error = UnknownStatus;

    fn try_from(row: DogDetailRow) -> Result<Self, Self::Error> {
        Ok(DogDetail {
            status: row.status.parse()?,
            id: row.id,
            name: row.name,
            breed: row.breed,
            age: row.age,
            description: row.description,
            gender: row.gender,
        })
    }
}

/// Row of `GET /api/breeds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BreedSummary {
    pub id: i64,
    pub name: String,
}

/// Dog record for administrative seeding.
#[derive(Debug, Clone)]
pub struct NewDog {
    pub name: String,
    pub breed_id: i64,
    pub age: i64,
    pub description: Option<String>,
    pub gender: String,
    pub status: AdoptionStatus,
}
