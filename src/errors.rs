use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

const MAX_UPSTREAM_BODY_CHARS: usize = 200;

#[derive(Debug)]
pub enum Error {
    NotFound,
    BadRequest(String),
    ValidationFailed(Vec<String>),
    InvalidFileType,
    FileTooLarge,
    Persistence,
    Upstream { status: u16, body: String },
    DatabaseError(reqwest::Error),
    FileError(std::io::Error),
}

// Corpos de erro longos do Supabase não são repassados ao cliente.
pub fn upstream_message(body: &str) -> &str {
    if body.chars().count() > MAX_UPSTREAM_BODY_CHARS {
        "Erro no Supabase"
    } else {
        body
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
            Self::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            Self::ValidationFailed(details) => {
                let body = Json(json!({ "error": "Validação falhou", "details": details }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            Self::InvalidFileType => (
                StatusCode::BAD_REQUEST,
                "Tipo de arquivo inválido. Apenas JPEG, PNG, WEBP e GIF são permitidos.",
            ),
            Self::FileTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Arquivo muito grande. Máximo 5MB.",
            ),
            Self::Persistence => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Supabase não retornou dados",
            ),
            Self::Upstream { status, ref body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = Json(json!({ "error": upstream_message(body) }));
                return (status, body).into_response();
            }
            Self::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            Self::FileError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao salvar arquivo"),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        error!("Supabase request error: {:?}", err);
        Self::DatabaseError(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        error!("File error: {:?}", err);
        Self::FileError(err)
    }
}
