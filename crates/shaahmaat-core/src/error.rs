//! Notation error types

use thiserror::Error;

/// Failure to turn a ShaahMaat block into a [`crate::BoardInfo`].
#[derive(Error, Debug)]
pub enum FormatError {
    /// Malformed `name: value` line.
    #[error("{0}")]
    HeaderSyntax(String),

    /// Bad value, repeated header, or malformed square/arrow token.
    #[error("{0}")]
    HeaderSemantic(String),

    #[error("{0}")]
    MissingHeader(String),

    #[error(transparent)]
    PositionDecode(#[from] PositionDecodeError),
}

impl FormatError {
    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        Self::HeaderSyntax(msg.into())
    }

    pub(crate) fn semantic(msg: impl Into<String>) -> Self {
        Self::HeaderSemantic(msg.into())
    }

    pub(crate) fn missing(msg: impl Into<String>) -> Self {
        Self::MissingHeader(msg.into())
    }
}

/// Raised by a [`crate::ChessRules`] implementation when the body is not a
/// usable position or game.
#[derive(Error, Debug)]
pub enum PositionDecodeError {
    #[error("Invalid FEN: {0}")]
    Fen(String),

    #[error("Invalid PGN: {0}")]
    Pgn(String),

    #[error("Illegal move {san}: {reason}")]
    IllegalMove { san: String, reason: String },

    #[error("PGN read error: {0}")]
    Io(#[from] std::io::Error),
}
