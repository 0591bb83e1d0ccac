//! Query execution for the catalog endpoints.

pub mod catalog;
pub use catalog::CatalogService;
