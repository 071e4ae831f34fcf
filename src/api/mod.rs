//! HTTP ingestion boundary

pub mod models;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
