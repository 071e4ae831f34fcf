use axum::extract::multipart::Multipart;
use axum::http::StatusCode;
use axum::Json;

use super::models::ErrorResponse;
use crate::estimate::{estimate_field, FieldEstimate};

/// Handles a field ingestion upload
///
/// Expects a multipart submission with two named file parts: `raster`
/// (must be a .tif/.tiff upload) and `boundary` (extension gates the
/// sub-parser inside the core). Any core failure is reported as a client
/// error with the core's message verbatim.
pub async fn estimate_upload(
    mut multipart: Multipart,
) -> Result<Json<FieldEstimate>, (StatusCode, Json<ErrorResponse>)> {
    let mut raster_name: Option<String> = None;
    let mut raster_data: Option<Vec<u8>> = None;
    let mut boundary: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "raster" => {
                raster_name = field.file_name().map(str::to_string);
                raster_data = Some(field.bytes().await.unwrap_or_default().to_vec());
            }
            "boundary" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.unwrap_or_default().to_vec();
                boundary = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let raster_data = raster_data.ok_or_else(|| bad_request("Missing raster file part"))?;
    let (boundary_name, boundary_data) =
        boundary.ok_or_else(|| bad_request("Missing boundary file part"))?;

    if !is_raster_filename(raster_name.as_deref().unwrap_or("")) {
        return Err(bad_request("The raster file must be a .tif or .tiff upload"));
    }

    match estimate_field(&raster_data, &boundary_name, &boundary_data) {
        Ok(estimate) => {
            tracing::info!(
                acres = estimate.area_acres,
                source = estimate.polygon.source.name(),
                "field estimate produced"
            );
            Ok(Json(estimate))
        }
        Err(e) => {
            tracing::warn!(error = %e, boundary = %boundary_name, "field ingestion failed");
            Err(bad_request(&e.to_string()))
        }
    }
}

fn is_raster_filename(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.ends_with(".tif") || lower.ends_with(".tiff")
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
