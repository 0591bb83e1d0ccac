//! HTTP handlers for the catalog endpoints.

pub mod breeds;
pub mod dogs;
pub use breeds::*;
pub use dogs::*;
