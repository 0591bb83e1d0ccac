//! Middleware composed around the router.

pub mod request_log;
pub use request_log::{log_requests, REQUEST_ID_HEADER};
