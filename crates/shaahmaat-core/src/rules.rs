//! Position decoding behind a small trait, so the parser never depends on a
//! particular rules engine.

use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use shakmaty::{
    fen::Fen, Board, CastlingMode, Chess, Color, File, Piece, Position, Rank, Role, Square,
};
use tracing::debug;

use crate::board_info::{Grid, PieceColor, PieceKind, PlacedPiece, SquareName};
use crate::error::PositionDecodeError;

/// A chess rules engine that can load FEN or PGN text and report the board.
pub trait ChessRules {
    fn load_fen(&mut self, fen: &str) -> Result<(), PositionDecodeError>;

    fn load_pgn(&mut self, pgn: &str) -> Result<(), PositionDecodeError>;

    /// Grid of the last successful load.
    fn current_grid(&self) -> Grid;
}

/// shakmaty/pgn-reader backed rules. Starts from the standard position.
#[derive(Debug, Clone)]
pub struct ShakmatyRules {
    board: Board,
}

impl ShakmatyRules {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ShakmatyRules {
    fn default() -> Self {
        Self {
            board: Chess::default().board().clone(),
        }
    }
}

impl ChessRules for ShakmatyRules {
    /// Diagram positions do not need to be legal (no kings, too many pawns),
    /// only syntactically valid FEN.
    fn load_fen(&mut self, fen: &str) -> Result<(), PositionDecodeError> {
        let fen: Fen = fen
            .trim()
            .parse()
            .map_err(|e: shakmaty::fen::ParseFenError| PositionDecodeError::Fen(e.to_string()))?;
        self.board = fen.into_setup().board;
        Ok(())
    }

    fn load_pgn(&mut self, pgn: &str) -> Result<(), PositionDecodeError> {
        check_movetext(pgn)?;
        let mut reader = Reader::new(pgn.as_bytes());
        let position = match reader.read_game(&mut GameReplay)? {
            Some(result) => result?,
            // No movetext at all: the game has not started yet.
            None => Chess::default(),
        };
        debug!(fullmoves = %position.fullmoves(), "Replayed PGN");
        self.board = position.board().clone();
        Ok(())
    }

    fn current_grid(&self) -> Grid {
        grid_from_board(&self.board)
    }
}

fn grid_from_board(board: &Board) -> Grid {
    let mut grid: Grid = [[None; 8]; 8];
    for (row, cells) in grid.iter_mut().enumerate() {
        let rank = 7 - row;
        for (col, cell) in cells.iter_mut().enumerate() {
            let square = Square::from_coords(File::new(col as u32), Rank::new(rank as u32));
            *cell = SquareName::new(col as u8, rank as u8)
                .zip(board.piece_at(square))
                .map(|(name, piece)| placed_piece(name, piece));
        }
    }
    grid
}

fn placed_piece(square: SquareName, piece: Piece) -> PlacedPiece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    let color = match piece.color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    };
    PlacedPiece {
        square,
        kind,
        color,
    }
}

/// Replays the main line of a single game, stopping at the first illegal move.
struct GameReplay;

type ReplayResult = Result<Chess, PositionDecodeError>;

impl Visitor for GameReplay {
    /// Starting position from a `FEN` tag, if any.
    type Tags = Option<Chess>;
    type Movetext = Chess;
    type Output = ReplayResult;

    fn begin_tags(&mut self) -> ControlFlow<ReplayResult, Option<Chess>> {
        ControlFlow::Continue(None)
    }

    fn tag(
        &mut self,
        tags: &mut Option<Chess>,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<ReplayResult> {
        if name == b"FEN" {
            let text = value.decode_utf8_lossy();
            let start = text
                .parse::<Fen>()
                .map_err(|e| PositionDecodeError::Pgn(format!("bad FEN tag: {e}")))
                .and_then(|fen| {
                    fen.into_position::<Chess>(CastlingMode::Standard)
                        .map_err(|e| PositionDecodeError::Pgn(format!("bad FEN tag: {e}")))
                });
            match start {
                Ok(pos) => *tags = Some(pos),
                Err(e) => return ControlFlow::Break(Err(e)),
            }
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Option<Chess>) -> ControlFlow<ReplayResult, Chess> {
        ControlFlow::Continue(tags.unwrap_or_default())
    }

    fn begin_variation(&mut self, _: &mut Chess) -> ControlFlow<ReplayResult, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, pos: &mut Chess, san_plus: SanPlus) -> ControlFlow<ReplayResult> {
        let san = san_plus.to_string();

        let mv = match san_plus.san.to_move(pos) {
            Ok(mv) => mv,
            Err(e) => return illegal_move(san, e),
        };

        match pos.clone().play(mv) {
            Ok(next) => {
                *pos = next;
                ControlFlow::Continue(())
            }
            Err(e) => illegal_move(san, e),
        }
    }

    fn end_game(&mut self, pos: Chess) -> ReplayResult {
        Ok(pos)
    }
}

fn illegal_move(san: String, reason: impl ToString) -> ControlFlow<ReplayResult> {
    ControlFlow::Break(Err(PositionDecodeError::IllegalMove {
        san,
        reason: reason.to_string(),
    }))
}

/// The PGN reader silently skips tokens it cannot read as SAN, so every
/// movetext token is checked up front.
fn check_movetext(pgn: &str) -> Result<(), PositionDecodeError> {
    for token in movetext_tokens(pgn) {
        if !is_movetext_token(token) {
            return Err(PositionDecodeError::Pgn(format!("unexpected token {token}")));
        }
    }
    Ok(())
}

/// Whitespace separated tokens outside tags, comments and escape lines.
/// Parentheses split tokens, so moves inside variations are included.
fn movetext_tokens(pgn: &str) -> Vec<&str> {
    let bytes = pgn.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => i = skip_past(bytes, i, b'}'),
            b';' => i = skip_past(bytes, i, b'\n'),
            b'%' if i == 0 || bytes[i - 1] == b'\n' => i = skip_past(bytes, i, b'\n'),
            b'[' => i = skip_tag(bytes, i),
            b'(' | b')' => i += 1,
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < bytes.len() && !is_delimiter(bytes[i]) {
                    i += 1;
                }
                tokens.push(&pgn[start..i]);
            }
        }
    }
    tokens
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b'(' | b')' | b'[' | b']' | b';')
}

fn skip_past(bytes: &[u8], from: usize, end: u8) -> usize {
    bytes[from + 1..]
        .iter()
        .position(|&b| b == end)
        .map_or(bytes.len(), |offset| from + offset + 2)
}

fn skip_tag(bytes: &[u8], from: usize) -> usize {
    let mut quoted = false;
    let mut i = from + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if quoted => i += 1,
            b'"' => quoted = !quoted,
            b']' if !quoted => return i + 1,
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Results, NAGs, move numbers (`12.`, `12...`, `1.e4`) and SAN with an
/// optional `!`/`?` annotation.
fn is_movetext_token(token: &str) -> bool {
    if matches!(token, "*" | "1-0" | "0-1" | "1/2-1/2") || token.starts_with('$') {
        return true;
    }

    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let after_number = &token[digits..];
    let san = if digits > 0 && (after_number.is_empty() || after_number.starts_with('.')) {
        after_number.trim_start_matches('.')
    } else {
        token
    };
    let san = san.trim_end_matches(['!', '?']);
    if san.is_empty() {
        return true;
    }

    if san.starts_with("0-0") {
        SanPlus::from_ascii(san.replace('0', "O").as_bytes()).is_ok()
    } else {
        SanPlus::from_ascii(san.as_bytes()).is_ok()
    }
}
