use std::sync::Arc;

use axum::{
    extract::Multipart, http::StatusCode, response::IntoResponse, routing::post, Extension,
    Json, Router,
};

use crate::{models::response::UploadResponse, AppState, Error, Result};

pub fn upload_handler() -> Router {
    Router::new().route("/", post(upload_image))
}

async fn upload_image(
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| Error::BadRequest("Invalid multipart body".to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| Error::BadRequest("Invalid multipart body".to_string()))?;

        if data.is_empty() {
            continue;
        }

        let saved = app_state
            .upload_service
            .save_image(file_name.as_deref(), &content_type, &data)
            .await?;

        return Ok((
            StatusCode::OK,
            Json(UploadResponse {
                success: true,
                image_url: saved.url,
                filename: saved.filename,
            }),
        ));
    }

    Err(Error::BadRequest("No file uploaded".to_string()))
}
