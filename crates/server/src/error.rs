use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shaahmaat_core::FormatError;
use shaahmaat_render::DocumentError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match &self {
            AppError::BadRequest(_) => {}
            AppError::Format(e) => tracing::warn!("Rejected notation: {e}"),
            AppError::Document(e) => tracing::warn!("Rejected document: {e}"),
        }

        (StatusCode::BAD_REQUEST, Json(json!({ "detail": message }))).into_response()
    }
}
