use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, response::IntoResponse, routing::get, Extension, Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{posts::posts_handler, upload::upload_handler},
    AppState,
};

// Maior que o limite de 5MB por imagem, para o erro certo chegar ao serviço de upload.
const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/posts", posts_handler())
        .nest("/upload", upload_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state.clone()))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES));

    Router::new()
        .nest("/api", api_route)
        .route("/health", get(health))
        .nest_service("/uploads", ServeDir::new(&app_state.config.upload_dir))
}

pub fn configure_cors() -> CorsLayer {
    CorsLayer::permissive()
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "OK", "timestamp": Utc::now().to_rfc3339() }))
}
