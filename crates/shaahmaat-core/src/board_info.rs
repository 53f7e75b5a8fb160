use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
pub const RANKS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// Canvas width/height used when no `size` header is given.
pub const DEFAULT_BOARD_SIZE: u32 = 256;

/// Which side sits at the bottom of the rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    White,
    Black,
}

/// How the body below the header block is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationFormat {
    Fen,
    Pgn,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square name: {0:?}")]
pub struct ParseSquareError(pub String);

/// A square name such as `e4`: file a-h plus rank 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SquareName {
    file: u8,
    rank: u8,
}

impl SquareName {
    /// Both indices are zero based (`a` = 0, rank `1` = 0).
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        let file = FILES.iter().position(|&c| c == file)?;
        let rank = RANKS.iter().position(|&c| c == rank)?;
        Some(Self {
            file: file as u8,
            rank: rank as u8,
        })
    }

    pub fn file_index(self) -> usize {
        self.file as usize
    }

    pub fn rank_index(self) -> usize {
        self.rank as usize
    }

    pub fn file_char(self) -> char {
        FILES[self.file as usize]
    }

    pub fn rank_char(self) -> char {
        RANKS[self.rank as usize]
    }
}

impl fmt::Display for SquareName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for SquareName {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => None,
        }
        .ok_or_else(|| ParseSquareError(s.to_string()))
    }
}

impl TryFrom<String> for SquareName {
    type Error = ParseSquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SquareName> for String {
    fn from(square: SquareName) -> Self {
        square.to_string()
    }
}

/// An arrow annotation between two squares. Order in [`BoardInfo::arrows`] is draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: SquareName,
    pub to: SquareName,
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Bishop,
    King,
    Knight,
    Pawn,
    Queen,
    Rook,
}

impl PieceKind {
    /// Maps the single-letter role codes (`b k n p q r`), either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(Self::Bishop),
            'k' => Some(Self::King),
            'n' => Some(Self::Knight),
            'p' => Some(Self::Pawn),
            'q' => Some(Self::Queen),
            'r' => Some(Self::Rook),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bishop => "bishop",
            Self::King => "king",
            Self::Knight => "knight",
            Self::Pawn => "pawn",
            Self::Queen => "queen",
            Self::Rook => "rook",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// A piece standing on a square of the decoded position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub square: SquareName,
    pub kind: PieceKind,
    pub color: PieceColor,
}

/// Row-major 8x8 grid: row 0 is rank 8, column 0 is file a.
pub type Grid = [[Option<PlacedPiece>; 8]; 8];

/// `None` means no position was decoded; only the bare squares get rendered.
pub type Chessboard = Option<Grid>;

/// Everything needed to render one notation block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardInfo {
    pub board: Chessboard,
    pub orientation: Orientation,
    pub size: u32,
    pub highlighted_squares: Vec<SquareName>,
    pub arrows: Vec<Arrow>,
    pub format: NotationFormat,
    pub game_notation: String,
}

impl BoardInfo {
    pub fn is_highlighted(&self, square: SquareName) -> bool {
        self.highlighted_squares.contains(&square)
    }

    /// Pieces in grid order (rank 8 to rank 1, file a to h).
    pub fn pieces(&self) -> impl Iterator<Item = &PlacedPiece> + '_ {
        self.board
            .iter()
            .flat_map(|grid| grid.iter())
            .flat_map(|row| row.iter())
            .flatten()
    }
}
