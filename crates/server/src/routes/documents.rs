use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use shaahmaat_render::{document, StyleOverrides};

use crate::config::Config;
use crate::error::AppError;
use crate::routes::boards::parser_for;

#[derive(Deserialize)]
pub struct DocumentRequest {
    pub markdown: String,
    #[serde(default)]
    pub style: StyleOverrides,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub markdown: String,
    pub boards: usize,
}

/// POST /api/documents/render
///
/// Replaces every `shaahmaat` fence in the markdown with board markup.
pub async fn render_markdown(
    Extension(config): Extension<Config>,
    Json(req): Json<DocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    let collected = document::collect_with(&req.markdown, &parser_for(&config))?;
    let style = req.style.apply(&config.style);

    Ok(Json(DocumentResponse {
        markdown: collected.render(&style),
        boards: collected.registry().len(),
    }))
}
