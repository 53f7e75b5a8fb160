//! ShaahMaat notation: parsing a header-annotated FEN/PGN block into a
//! [`BoardInfo`] ready for rendering.
//!
//! The chess rules themselves live behind the [`ChessRules`] trait; the
//! default implementation uses shakmaty for positions and pgn-reader for
//! movetext.

pub mod board_info;
pub mod error;
pub mod notation;
pub mod registry;
pub mod rules;

pub use board_info::{
    Arrow, BoardInfo, Chessboard, Grid, NotationFormat, Orientation, PieceColor, PieceKind,
    PlacedPiece, SquareName, DEFAULT_BOARD_SIZE, FILES, RANKS,
};
pub use error::{FormatError, PositionDecodeError};
pub use notation::{parse, parse_with, NotationParser, ParserOptions};
pub use registry::{BoardKey, BoardRegistry};
pub use rules::{ChessRules, ShakmatyRules};
