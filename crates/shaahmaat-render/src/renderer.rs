use shaahmaat_core::BoardInfo;
use tracing::debug;

use crate::arrow::arrow_geometry;
use crate::layout::{BoardLayout, SquareView};
use crate::markup::{Element, ElementBuilder};
use crate::style::StyleConfig;

/// Renders boards with a fixed style.
#[derive(Debug, Clone, Default)]
pub struct BoardRenderer {
    style: StyleConfig,
}

impl BoardRenderer {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn render(&self, info: &BoardInfo) -> Element {
        render(info, &self.style)
    }

    pub fn render_html(&self, info: &BoardInfo) -> String {
        self.render(info).to_string()
    }
}

/// Build the board container: eight rows of squares, then the arrow layer.
///
/// A board without a decoded position gets the bare squares only.
pub fn render(info: &BoardInfo, style: &StyleConfig) -> Element {
    let layout = BoardLayout::compute(info, style);

    let rows = layout.rows().map(|row| {
        ElementBuilder::new("div")
            .class("shaahmaat-chessboard-row")
            .children(row.iter().map(|view| square_element(view, style)))
            .build()
    });

    let board = ElementBuilder::new("div")
        .class("shaahmaat-chessboard")
        .attr(
            "style",
            format!("width: {0}px; height: {0}px;", info.size),
        )
        .children(rows);

    if info.board.is_none() {
        return board.build();
    }

    let polygons = info.arrows.iter().map(|arrow| {
        let geometry = arrow_geometry(arrow, info.orientation, info.size);
        ElementBuilder::svg("polygon")
            .attr("points", geometry.points_attr())
            .attr("transform", geometry.transform_attr())
            .attr("fill", style.arrow_color.as_str())
            .build()
    });

    let arrows = ElementBuilder::svg("svg")
        .attr("width", format!("{}px", info.size))
        .attr("height", format!("{}px", info.size))
        .class("shaahmaat-arrows")
        .children(polygons)
        .build();

    debug!(
        size = info.size,
        arrows = info.arrows.len(),
        "Rendered ShaahMaat board"
    );
    board.child(arrows).build()
}

fn square_element(view: &SquareView<'_>, style: &StyleConfig) -> Element {
    let mut square = ElementBuilder::new("div")
        .class("shaahmaat-chessboard-square")
        .attr("data-square-coordinates", view.square.to_string())
        .attr(
            "style",
            format!("--square-background-color: {}", view.background),
        );

    if let Some(piece) = view.piece {
        square = square
            .class("shaahmaat-chess-piece")
            .class(format!("{}-chess-set", style.chess_set))
            .class(piece.kind.name())
            .class(piece.color.name());
    }
    square.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaahmaat_core::parse;

    fn squares(board: &Element) -> Vec<&Element> {
        board
            .descendants()
            .into_iter()
            .filter(|el| el.has_class("shaahmaat-chessboard-square"))
            .collect()
    }

    #[test]
    fn test_board_structure() {
        let info = parse("orientation: white\nformat: fen\nsize: 320\n\n8/8/8/8/8/8/8/8 w - - 0 1")
            .unwrap();
        let board = render(&info, &StyleConfig::default());

        assert_eq!(board.attr("style"), Some("width: 320px; height: 320px;"));
        let rows: Vec<_> = board
            .child_elements()
            .filter(|el| el.has_class("shaahmaat-chessboard-row"))
            .collect();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|row| row.child_elements().count() == 8));

        let squares = squares(&board);
        assert_eq!(squares[0].attr("data-square-coordinates"), Some("a8"));
        assert_eq!(squares[63].attr("data-square-coordinates"), Some("h1"));

        let svg = board.child_elements().last().unwrap();
        assert_eq!(svg.tag(), "svg");
        assert_eq!(svg.attr("width"), Some("320px"));
        assert_eq!(svg.child_elements().count(), 0);
    }

    #[test]
    fn test_piece_classes() {
        let style = StyleConfig {
            chess_set: "merida".into(),
            ..StyleConfig::default()
        };
        let info =
            parse("orientation: black\nformat: fen\n\n4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let board = render(&info, &style);

        let h1 = squares(&board)
            .into_iter()
            .find(|el| el.attr("data-square-coordinates") == Some("h1"))
            .unwrap();
        assert_eq!(
            h1.classes(),
            [
                "shaahmaat-chessboard-square",
                "shaahmaat-chess-piece",
                "merida-chess-set",
                "rook",
                "white"
            ]
        );

        let pieces = squares(&board)
            .into_iter()
            .filter(|el| el.has_class("shaahmaat-chess-piece"))
            .count();
        assert_eq!(pieces, 3);
    }

    #[test]
    fn test_board_without_position_has_no_arrow_layer() {
        let mut info =
            parse("orientation: white\nformat: fen\narrows: e2->e4\n\n8/8/8/8/8/8/8/8 w - - 0 1")
                .unwrap();
        info.board = None;
        let board = render(&info, &StyleConfig::default());
        assert!(board.child_elements().all(|el| el.tag() == "div"));
        assert_eq!(squares(&board).len(), 64);
    }

    #[test]
    fn test_renderer_uses_its_style() {
        let renderer = BoardRenderer::new(StyleConfig {
            arrow_color: "red".into(),
            ..StyleConfig::default()
        });
        let info =
            parse("orientation: white\nformat: fen\narrows: a1->h8\n\n8/8/8/8/8/8/8/8 w - - 0 1")
                .unwrap();
        let html = renderer.render_html(&info);
        assert!(html.contains(r#"fill="red""#));
        assert!(html.contains(r#"transform="rotate(-45, 16, 240)""#));
    }
}
