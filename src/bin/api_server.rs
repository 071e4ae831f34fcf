use parcelkit::api::create_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = create_router();

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind port");

    tracing::info!("field ingestion API listening on http://0.0.0.0:3000");
    tracing::info!("POST /api/estimate (multipart/form-data: raster + boundary file parts)");

    axum::serve(listener, app).await.expect("Server error");
}
