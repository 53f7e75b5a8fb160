use serde::{Deserialize, Serialize};

pub const DEFAULT_LIGHT_SQUARE_COLOR: &str = "#ffce9e";
pub const DEFAULT_DARK_SQUARE_COLOR: &str = "#d18b47";
pub const DEFAULT_HIGHLIGHTED_SQUARE_COLOR: &str = "#a8de14";
pub const DEFAULT_ARROW_COLOR: &str = "#e34612";
pub const DEFAULT_CHESS_SET: &str = "cburnett";

/// Colours and piece set used when rendering. Values are passed through to
/// the markup untouched. Missing fields deserialize to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub light_square_color: String,
    pub dark_square_color: String,
    pub highlighted_square_color: String,
    pub arrow_color: String,
    /// Selects the `<set>-chess-set` class on piece squares.
    pub chess_set: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            light_square_color: DEFAULT_LIGHT_SQUARE_COLOR.to_string(),
            dark_square_color: DEFAULT_DARK_SQUARE_COLOR.to_string(),
            highlighted_square_color: DEFAULT_HIGHLIGHTED_SQUARE_COLOR.to_string(),
            arrow_color: DEFAULT_ARROW_COLOR.to_string(),
            chess_set: DEFAULT_CHESS_SET.to_string(),
        }
    }
}

/// Per-request style tweaks layered over a base [`StyleConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverrides {
    pub light_square_color: Option<String>,
    pub dark_square_color: Option<String>,
    pub highlighted_square_color: Option<String>,
    pub arrow_color: Option<String>,
    pub chess_set: Option<String>,
}

impl StyleOverrides {
    pub fn apply(&self, base: &StyleConfig) -> StyleConfig {
        let pick =
            |over: &Option<String>, base: &String| over.clone().unwrap_or_else(|| base.clone());
        StyleConfig {
            light_square_color: pick(&self.light_square_color, &base.light_square_color),
            dark_square_color: pick(&self.dark_square_color, &base.dark_square_color),
            highlighted_square_color: pick(
                &self.highlighted_square_color,
                &base.highlighted_square_color,
            ),
            arrow_color: pick(&self.arrow_color, &base.arrow_color),
            chess_set: pick(&self.chess_set, &base.chess_set),
        }
    }
}
