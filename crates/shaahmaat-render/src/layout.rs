//! Square layout: grid indices to displayed coordinates and back.

use shaahmaat_core::{BoardInfo, Orientation, PlacedPiece, SquareName};

use crate::style::StyleConfig;

/// Square shown at grid `(row, col)`, row 0 being the top of the canvas.
pub fn displayed_square(orientation: Orientation, row: usize, col: usize) -> SquareName {
    let (file, rank) = match orientation {
        Orientation::White => (col, 7 - row),
        Orientation::Black => (7 - col, row),
    };
    SquareName::new(file as u8, rank as u8).expect("row and col are below 8")
}

/// Inverse of [`displayed_square`]: where a square sits on the canvas.
pub fn grid_position(orientation: Orientation, square: SquareName) -> (usize, usize) {
    match orientation {
        Orientation::White => (7 - square.rank_index(), square.file_index()),
        Orientation::Black => (square.rank_index(), 7 - square.file_index()),
    }
}

/// Render descriptor for one square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareView<'a> {
    pub square: SquareName,
    pub row: usize,
    pub col: usize,
    pub highlighted: bool,
    pub background: &'a str,
    pub piece: Option<PlacedPiece>,
}

/// All 64 squares, indexed by `(row, col)`.
#[derive(Debug, Clone)]
pub struct BoardLayout<'a> {
    squares: Vec<SquareView<'a>>,
}

impl<'a> BoardLayout<'a> {
    pub fn compute(info: &BoardInfo, style: &'a StyleConfig) -> Self {
        let mut squares = Vec::with_capacity(64);
        for row in 0..8 {
            for col in 0..8 {
                let square = displayed_square(info.orientation, row, col);
                let highlighted = info.is_highlighted(square);
                let background = if highlighted {
                    style.highlighted_square_color.as_str()
                } else if (row + col) % 2 == 0 {
                    style.light_square_color.as_str()
                } else {
                    style.dark_square_color.as_str()
                };
                squares.push(SquareView {
                    square,
                    row,
                    col,
                    highlighted,
                    background,
                    piece: None,
                });
            }
        }

        let mut layout = Self { squares };
        // Pieces land on the square showing their name, which under black
        // orientation is the mirrored grid cell.
        for piece in info.pieces() {
            let (row, col) = grid_position(info.orientation, piece.square);
            layout.squares[row * 8 + col].piece = Some(*piece);
        }
        layout
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&SquareView<'a>> {
        if row < 8 && col < 8 {
            self.squares.get(row * 8 + col)
        } else {
            None
        }
    }

    pub fn square(&self, orientation: Orientation, square: SquareName) -> &SquareView<'a> {
        let (row, col) = grid_position(orientation, square);
        &self.squares[row * 8 + col]
    }

    /// Rows from the top of the canvas down.
    pub fn rows(&self) -> impl Iterator<Item = &[SquareView<'a>]> + '_ {
        self.squares.chunks(8)
    }
}
