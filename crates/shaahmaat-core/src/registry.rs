//! Boards parsed in one pass and rendered in a later one, looked up by key.

use std::fmt;
use std::str::FromStr;

use crate::board_info::BoardInfo;

const KEY_PREFIX: &str = "shaahmaat-chessboard-";

/// Opaque handle to a board stored in a [`BoardRegistry`].
///
/// Displays as `shaahmaat-chessboard-<n>`, which is also the form it parses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey(usize);

impl BoardKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KEY_PREFIX}{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a board key: {0:?}")]
pub struct ParseBoardKeyError(pub String);

impl FromStr for BoardKey {
    type Err = ParseBoardKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(KEY_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(BoardKey)
            .ok_or_else(|| ParseBoardKeyError(s.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoardRegistry {
    boards: Vec<BoardInfo>,
}

impl BoardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, board: BoardInfo) -> BoardKey {
        self.boards.push(board);
        BoardKey(self.boards.len() - 1)
    }

    pub fn get(&self, key: BoardKey) -> Option<&BoardInfo> {
        self.boards.get(key.0)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Boards in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BoardKey, &BoardInfo)> + '_ {
        self.boards.iter().enumerate().map(|(i, b)| (BoardKey(i), b))
    }
}
