pub mod position;
pub mod standard;
pub mod types;

pub use position::Position;
pub use standard::StandardRules;
pub use types::*;

use thiserror::Error;

// =============================================================================
// Rules trait — the narrow contract the session state machine consumes
// =============================================================================

/// Errors the rules engine can report.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Position notation could not be parsed
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    /// The requested move is not legal in the given position
    #[error("illegal move {from} to {to}")]
    IllegalMove { from: String, to: String },
    /// There is no earlier ply to return to
    #[error("no earlier position to undo to")]
    UndoUnavailable,
}

/// One legal destination from a queried square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTarget {
    pub to: u8,
    /// True when committing this move needs a promotion piece choice
    pub requires_promotion: bool,
}

/// Result of applying a move: the successor position plus what the
/// engine observed while making it.
#[derive(Debug, Clone)]
pub struct AppliedMove {
    pub position: Position,
    /// Kind of the piece taken by this move, if any (reported even for
    /// en-passant captures, where the destination square is empty)
    pub captured: Option<PieceKind>,
    /// SAN text for the move log
    pub san: String,
}

/// Contract between the session state machine and the rules engine.
///
/// The session never inspects notation or move encodings itself; it only
/// sees squares, structured results, and opaque [`Position`] values that it
/// replaces wholesale after every committed move or undo.
pub trait Rules {
    /// A fresh position at the standard starting arrangement.
    fn starting_position(&self) -> Position;

    /// Import a position from FEN notation.
    fn position_from_fen(&self, fen: &str) -> Result<Position, RulesError>;

    /// Export the position as FEN notation.
    fn fen(&self, position: &Position) -> String;

    /// Legal destinations from `from`. Empty when the square is empty,
    /// holds a piece of the side not to move, or the piece has no moves.
    /// Castling is surfaced as a two-file king move (g- or c-file).
    fn legal_moves_from(&self, position: &Position, from: u8) -> Vec<MoveTarget>;

    /// Apply the move `from` → `to`, choosing `promotion` when the move
    /// promotes. Returns the successor position; the input position is
    /// not touched.
    fn apply_move(
        &self,
        position: &Position,
        from: u8,
        to: u8,
        promotion: Option<PieceKind>,
    ) -> Result<AppliedMove, RulesError>;

    /// Revert the position by one ply.
    fn undo_ply(&self, position: &Position) -> Result<Position, RulesError>;

    /// Is the side to move in check?
    fn is_check(&self, position: &Position) -> bool;

    /// Is the side to move checkmated?
    fn is_checkmate(&self, position: &Position) -> bool;

    /// Is the game drawn (stalemate, fifty-move rule, threefold
    /// repetition, or insufficient material)?
    fn is_draw(&self, position: &Position) -> bool;

    fn side_to_move(&self, position: &Position) -> Color;

    fn piece_at(&self, position: &Position, square: u8) -> Option<Piece>;
}
