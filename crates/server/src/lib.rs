pub mod config;
pub mod error;
pub mod routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

/// Build the HTTP router with shared state attached.
pub fn app(config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Boards
        .route("/api/boards/parse", post(routes::boards::parse_board))
        .route("/api/boards/render", post(routes::boards::render_board))
        // Markdown documents
        .route("/api/documents/render", post(routes::documents::render_markdown))
        .layer(DefaultBodyLimit::max(config.max_notation_bytes))
        .layer(Extension(config))
        .layer(CompressionLayer::new())
        .layer(cors)
}
