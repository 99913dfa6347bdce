//! Opaque position handle.
//!
//! A [`Position`] is the full game state the rules engine needs: the current
//! board plus every board reached since the game started. The board stack is
//! what makes one-ply undo and threefold-repetition detection possible
//! without a separate move list. Positions are replaced wholesale on every
//! committed move; nothing outside this crate can reach the boards inside.

use cozy_chess::Board;

use crate::RulesError;

/// Full game state, opaque to everything outside the rules crate.
#[derive(Debug, Clone)]
pub struct Position {
    /// Boards reached since game start, oldest first. Never empty;
    /// the last entry is the current board.
    boards: Vec<Board>,
}

impl Position {
    pub(crate) fn startpos() -> Self {
        Self {
            boards: vec![Board::default()],
        }
    }

    pub(crate) fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let board =
            Board::from_fen(fen, false).map_err(|e| RulesError::InvalidFen(e.to_string()))?;
        Ok(Self {
            boards: vec![board],
        })
    }

    /// The current board (last entry of the stack).
    pub(crate) fn board(&self) -> &Board {
        self.boards.last().expect("position stack is never empty")
    }

    /// A new position with `board` appended as the current board.
    pub(crate) fn push(&self, board: Board) -> Position {
        let mut boards = self.boards.clone();
        boards.push(board);
        Position { boards }
    }

    /// A new position with the current board removed, or `None` when
    /// there is no earlier board to return to.
    pub(crate) fn pop(&self) -> Option<Position> {
        if self.boards.len() < 2 {
            return None;
        }
        let mut boards = self.boards.clone();
        boards.pop();
        Some(Position { boards })
    }

    /// How many times the current board has occurred in this game,
    /// including the current occurrence. Positions are compared by
    /// Zobrist hash.
    pub(crate) fn occurrences_of_current(&self) -> usize {
        let current = self.board().hash();
        self.boards.iter().filter(|b| b.hash() == current).count()
    }
}
