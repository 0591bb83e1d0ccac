//! Builds the parameterized SELECTs behind the catalog endpoints.

use crate::models::AdoptionStatus;
use crate::sql::SqlParam;

pub const DOGS_TABLE: &str = "dogs";
pub const BREEDS_TABLE: &str = "breeds";

/// Filter predicate for the dog listing. Both constraints are optional and AND-combined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DogFilter {
    pub breed_id: Option<i64>,
    pub available_only: bool,
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) {
        self.params.push(v.into());
    }
}

/// Dog joined to its breed, aliased `d` and `b`.
fn dog_breed_join() -> String {
    format!("{} d INNER JOIN {} b ON d.breed_id = b.id", DOGS_TABLE, BREEDS_TABLE)
}

/// SELECT id, name, breed for every dog matching `filter`, ORDER BY d.id.
pub fn select_dogs(filter: &DogFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    if let Some(breed_id) = filter.breed_id {
        q.push_param(breed_id);
        where_parts.push("d.breed_id = ?");
    }
    if filter.available_only {
        q.push_param(AdoptionStatus::Available.as_str());
        where_parts.push("d.status = ?");
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT d.id AS id, d.name AS name, b.name AS breed FROM {}{} ORDER BY d.id",
        dog_breed_join(),
        where_clause
    );
    q
}

/// SELECT the detail columns of one dog by primary key.
pub fn select_dog_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(id);
    q.sql = format!(
        "SELECT d.id AS id, d.name AS name, b.name AS breed, d.age AS age, \
         d.description AS description, d.gender AS gender, d.status AS status \
         FROM {} WHERE d.id = ? LIMIT 1",
        dog_breed_join()
    );
    q
}

/// SELECT every breed, ORDER BY id.
pub fn select_breeds() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT id, name FROM {} ORDER BY id", BREEDS_TABLE);
    q
}
