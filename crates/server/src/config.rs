use std::env;

use shaahmaat_render::StyleConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Request body limit for notation and markdown payloads.
    pub max_notation_bytes: usize,
    /// Reject header names the parser does not know.
    pub strict_headers: bool,
    /// Style used when a request does not override it.
    pub style: StyleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_notation_bytes: 64 * 1024,
            strict_headers: false,
            style: StyleConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let style = StyleConfig {
            light_square_color: env::var("SHAAHMAAT_LIGHT_SQUARE_COLOR")
                .unwrap_or(defaults.style.light_square_color),
            dark_square_color: env::var("SHAAHMAAT_DARK_SQUARE_COLOR")
                .unwrap_or(defaults.style.dark_square_color),
            highlighted_square_color: env::var("SHAAHMAAT_HIGHLIGHTED_SQUARE_COLOR")
                .unwrap_or(defaults.style.highlighted_square_color),
            arrow_color: env::var("SHAAHMAAT_ARROW_COLOR")
                .unwrap_or(defaults.style.arrow_color),
            chess_set: env::var("SHAAHMAAT_CHESS_SET").unwrap_or(defaults.style.chess_set),
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            max_notation_bytes: env::var("MAX_NOTATION_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_notation_bytes),
            strict_headers: env::var("SHAAHMAAT_STRICT_HEADERS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.strict_headers),
            style,
        }
    }
}
