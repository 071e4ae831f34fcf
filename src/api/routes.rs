use axum::extract::DefaultBodyLimit;
use axum::{routing::post, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use super::handlers::*;

pub fn create_router() -> Router {
    Router::new().route("/api/estimate", post(estimate_upload)).layer(
        ServiceBuilder::new()
            .layer(DefaultBodyLimit::max(50 * 1024 * 1024)) // 50MB limit
            .layer(CorsLayer::permissive()),
    )
}
