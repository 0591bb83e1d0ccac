//! Read-only REST catalog of shelter dogs and breeds, backed by SQLite.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use app::build_app;
pub use config::ServerConfig;
pub use error::{AppError, ConfigError, ErrorBody};
pub use models::{AdoptionStatus, BreedSummary, DogDetail, DogSummary, NewDog};
pub use service::CatalogService;
pub use state::AppState;
pub use store::{connect, ensure_tables, seed_demo_data};
pub use telemetry::{init_logging, LogConfig, LogGuard};
