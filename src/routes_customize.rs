// --------------------------------------------------
// Handles theme customization and image uploads.
//
// Responsibilities:
// - Get / update customization settings (customization.json)
// - Accept multipart image uploads into the static directory
// -------------------------------------------------

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;
use crate::errors::ApiError;
use crate::uploads;

// -----------------------------
// GET /api/customize
// Returns the current theme settings
// -----------------------------
pub async fn get_customization(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let customization = state.store.load_customization()?;
    Ok(Json(customization))
}

// -----------------------------
// POST /api/customize
// Updates theme settings from a multipart form:
// optional file field "header_image", optional text field "bg_style".
// Replacing the header image removes the previous header file.
// -----------------------------
pub async fn update_customization(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut customization = state.store.load_customization()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("header_image") => {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                if filename.is_empty() {
                    continue;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(e.to_string()))?;
                let stored =
                    uploads::store_upload(&state.static_dir, Some("header"), &filename, &bytes)?;
                if let Some(old) = customization.header_image.replace(stored) {
                    uploads::remove_stored(&state.static_dir, &old);
                }
            }
            Some("bg_style") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(e.to_string()))?;
                if !value.trim().is_empty() {
                    customization.bg_style = value;
                }
            }
            _ => {}
        }
    }

    state.store.save_customization(&customization)?;
    Ok(Json(customization))
}

// -----------------------------
// POST /api/uploads
// Stores a multipart file field "file" and returns its relative path,
// ready to be set as a post's image
// -----------------------------
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation("missing filename".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        let stored = uploads::store_upload(&state.static_dir, None, &filename, &bytes)?;
        return Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({ "path": stored })),
        ));
    }

    Err(ApiError::Validation("missing file field".to_string()))
}
