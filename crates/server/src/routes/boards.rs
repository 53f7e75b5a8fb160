use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use shaahmaat_core::{BoardInfo, NotationParser, ParserOptions};
use shaahmaat_render::{render, StyleOverrides};

use crate::config::Config;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct ParseRequest {
    pub notation: String,
}

#[derive(Deserialize)]
pub struct RenderRequest {
    pub notation: String,
    #[serde(default)]
    pub style: StyleOverrides,
}

#[derive(Serialize)]
pub struct RenderResponse {
    pub html: String,
}

pub(crate) fn parser_for(config: &Config) -> NotationParser {
    NotationParser::with_options(ParserOptions {
        reject_unknown_headers: config.strict_headers,
    })
}

fn parse_notation(config: &Config, notation: &str) -> Result<BoardInfo, AppError> {
    if notation.trim().is_empty() {
        return Err(AppError::BadRequest("Notation must not be empty".into()));
    }
    Ok(parser_for(config).parse(notation)?)
}

/// POST /api/boards/parse
pub async fn parse_board(
    Extension(config): Extension<Config>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<BoardInfo>, AppError> {
    let info = parse_notation(&config, &req.notation)?;
    Ok(Json(info))
}

/// POST /api/boards/render
pub async fn render_board(
    Extension(config): Extension<Config>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let info = parse_notation(&config, &req.notation)?;
    let style = req.style.apply(&config.style);

    Ok(Json(RenderResponse {
        html: render(&info, &style).to_string(),
    }))
}
