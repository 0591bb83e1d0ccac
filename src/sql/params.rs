//! Bind values for catalog queries and how they are attached to sqlx queries.

use sqlx::query::QueryAs;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A value bound to a `?` placeholder. Only the types the catalog filters on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::Int(n)
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

/// Bind params in order onto a `query_as`.
pub fn bind_all<'q, T>(
    mut query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Sqlite, T, SqliteArguments<'q>> {
    for p in params {
        query = match p {
            SqlParam::Int(n) => query.bind(*n),
            SqlParam::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}
