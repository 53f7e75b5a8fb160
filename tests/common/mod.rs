#![allow(dead_code)]

use shaahmaat_render::Element;

pub const EMPTY_FEN: &str = "8/8/8/8/8/8/8/8 w - - 0 1";
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Build a ShaahMaat block from header lines and a body.
pub fn block(headers: &[&str], body: &str) -> String {
    format!("{}\n\n{}", headers.join("\n"), body)
}

/// The square element showing `name`.
pub fn square<'a>(board: &'a Element, name: &str) -> &'a Element {
    board
        .descendants()
        .into_iter()
        .find(|el| el.attr("data-square-coordinates") == Some(name))
        .unwrap_or_else(|| panic!("no square {name}"))
}

/// Polygons of the arrow layer, in draw order.
pub fn polygons(board: &Element) -> Vec<&Element> {
    board
        .descendants()
        .into_iter()
        .filter(|el| el.tag() == "polygon")
        .collect()
}
