//! Game session state machine.
//!
//! Converts raw board-click events into validated game-state transitions and
//! publishes an immutable [`Snapshot`] for the view layer after every
//! transition. Move legality, game termination, and notation all live behind
//! the [`Rules`] trait; this crate only sequences them.
//!
//! The session accepts exactly one event at a time (square click, promotion
//! choice, new game, undo) and transitions synchronously. Illegal destination
//! clicks recover by deselecting. A rules-engine rejection of a move the
//! session pre-validated is logged and swallowed; the previous state stays
//! valid.

use std::collections::HashSet;

use chess_rules::{Color, Piece, PieceKind, Position, Rules};
use tracing::{debug, warn};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Board is shown but clicks are ignored until "new game"
    #[default]
    NotStarted,
    InProgress,
    /// Checkmate or draw reached; clicks are ignored
    Over,
}

/// One committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: u8,
    pub to: u8,
    /// Side that made the move
    pub by: Color,
    /// Kind of the piece this move captured, if any
    pub captured: Option<PieceKind>,
    /// Promotion piece chosen, for promoting moves
    pub promotion: Option<PieceKind>,
    /// SAN text for the move log
    pub san: String,
}

/// Pieces each color has lost, re-derived from the move history on every
/// snapshot publish. Never patched incrementally, so it cannot drift from
/// the history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedTally {
    /// Pieces White has lost (captured by Black)
    pub white: Vec<PieceKind>,
    /// Pieces Black has lost (captured by White)
    pub black: Vec<PieceKind>,
}

impl CapturedTally {
    /// Rebuild the tally by replaying a move history from empty.
    pub fn from_history(history: &[MoveRecord]) -> Self {
        let mut tally = CapturedTally::default();
        for record in history {
            if let Some(kind) = record.captured {
                match record.by {
                    Color::White => tally.black.push(kind),
                    Color::Black => tally.white.push(kind),
                }
            }
        }
        tally
    }

    pub fn is_empty(&self) -> bool {
        self.white.is_empty() && self.black.is_empty()
    }
}

/// Immutable bundle of all view-relevant state at one instant.
///
/// Republished wholesale after every transition; a snapshot already handed
/// to a view is never mutated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Position notation, for display and diagnostics
    pub fen: String,
    /// Renderable surface of the position: occupant of each square,
    /// indexed a1 = 0 .. h8 = 63. Views never parse notation.
    pub grid: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub phase: SessionPhase,
    pub in_check: bool,
    /// True when the game ended by checkmate (phase `Over` without this
    /// flag means a draw)
    pub checkmate: bool,
    /// Square whose piece is selected for moving
    pub selected: Option<u8>,
    /// Legal destinations for the selected piece
    pub valid_moves: HashSet<u8>,
    /// (origin, destination) of a move waiting for its promotion choice
    pub pending_promotion: Option<(u8, u8)>,
    /// (origin, destination) of the most recent committed move
    pub last_move: Option<(u8, u8)>,
    pub history: Vec<MoveRecord>,
    pub captured: CapturedTally,
}

impl Snapshot {
    /// Whether the info panel should enable its undo control.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty() && self.phase != SessionPhase::NotStarted
    }
}

/// The session state machine. Owns the authoritative session state; views
/// only ever read the current [`Snapshot`].
pub struct Session<R: Rules> {
    rules: R,
    position: Position,
    phase: SessionPhase,
    selected: Option<u8>,
    valid_moves: HashSet<u8>,
    pending_promotion: Option<(u8, u8)>,
    history: Vec<MoveRecord>,
    snapshot: Snapshot,
}

impl<R: Rules> Session<R> {
    /// A session showing the starting arrangement, waiting for "new game".
    pub fn new(rules: R) -> Self {
        let position = rules.starting_position();
        let mut session = Self {
            snapshot: empty_snapshot(),
            rules,
            position,
            phase: SessionPhase::NotStarted,
            selected: None,
            valid_moves: HashSet::new(),
            pending_promotion: None,
            history: Vec::new(),
        };
        session.publish();
        session
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Discard all session state and begin a fresh game from the standard
    /// starting arrangement.
    pub fn start_new_game(&mut self) {
        self.start_from_position(self.rules.starting_position());
    }

    /// Begin a fresh game from an arbitrary position.
    pub fn start_from_position(&mut self, position: Position) {
        self.position = position;
        self.phase = SessionPhase::InProgress;
        self.selected = None;
        self.valid_moves.clear();
        self.pending_promotion = None;
        self.history.clear();
        self.publish();
    }

    /// Resolve one board click. Ignored outside `InProgress` and while a
    /// promotion choice is pending.
    pub fn handle_square_click(&mut self, square: u8) {
        if self.phase != SessionPhase::InProgress
            || self.pending_promotion.is_some()
            || square >= 64
        {
            return;
        }

        match self.selected {
            None => {
                let Some(piece) = self.rules.piece_at(&self.position, square) else {
                    return;
                };
                if piece.color != self.rules.side_to_move(&self.position) {
                    return;
                }
                self.selected = Some(square);
                self.valid_moves = self
                    .rules
                    .legal_moves_from(&self.position, square)
                    .into_iter()
                    .map(|t| t.to)
                    .collect();
                self.publish();
            }
            Some(from) => {
                let target = self
                    .rules
                    .legal_moves_from(&self.position, from)
                    .into_iter()
                    .find(|t| t.to == square);

                // A move attempt always ends the selection, legal or not
                self.selected = None;
                self.valid_moves.clear();

                match target {
                    Some(t) if t.requires_promotion => {
                        self.pending_promotion = Some((from, square));
                    }
                    Some(_) => self.commit_move(from, square, None),
                    None => {
                        debug!(from, to = square, "no legal move, deselecting");
                    }
                }
                self.publish();
            }
        }
    }

    /// Commit the pending promotion with the chosen piece kind. No-op when
    /// no promotion is pending.
    pub fn resolve_promotion(&mut self, kind: PieceKind) {
        let Some((from, to)) = self.pending_promotion.take() else {
            return;
        };
        self.commit_move(from, to, Some(kind));
        self.publish();
    }

    /// Revert the last committed move. No-op when there is nothing to undo.
    pub fn undo(&mut self) {
        if self.history.is_empty() || self.phase == SessionPhase::NotStarted {
            return;
        }
        match self.rules.undo_ply(&self.position) {
            Ok(position) => {
                self.position = position;
                self.history.pop();
                // The popped move is the only way the game could have
                // ended, so after undo it is not over
                self.phase = SessionPhase::InProgress;
                self.selected = None;
                self.valid_moves.clear();
                self.pending_promotion = None;
                self.publish();
            }
            Err(err) => {
                warn!(%err, "rules engine could not undo");
            }
        }
    }

    /// Apply a pre-validated move. An engine rejection is logged and leaves
    /// the session unchanged; the caller has already cleared the selection.
    fn commit_move(&mut self, from: u8, to: u8, promotion: Option<PieceKind>) {
        let by = self.rules.side_to_move(&self.position);
        match self.rules.apply_move(&self.position, from, to, promotion) {
            Ok(applied) => {
                self.position = applied.position;
                self.history.push(MoveRecord {
                    from,
                    to,
                    by,
                    captured: applied.captured,
                    promotion,
                    san: applied.san,
                });
                if self.rules.is_checkmate(&self.position) || self.rules.is_draw(&self.position)
                {
                    self.phase = SessionPhase::Over;
                }
            }
            Err(err) => {
                warn!(%err, "rules engine rejected a pre-validated move");
            }
        }
    }

    /// Rebuild and republish the snapshot from the current state.
    fn publish(&mut self) {
        let mut grid = [None; 64];
        for (square, slot) in grid.iter_mut().enumerate() {
            *slot = self.rules.piece_at(&self.position, square as u8);
        }
        self.snapshot = Snapshot {
            fen: self.rules.fen(&self.position),
            grid,
            side_to_move: self.rules.side_to_move(&self.position),
            phase: self.phase,
            in_check: self.rules.is_check(&self.position),
            checkmate: self.rules.is_checkmate(&self.position),
            selected: self.selected,
            valid_moves: self.valid_moves.clone(),
            pending_promotion: self.pending_promotion,
            last_move: self.history.last().map(|r| (r.from, r.to)),
            history: self.history.clone(),
            captured: CapturedTally::from_history(&self.history),
        };
    }
}

/// Placeholder snapshot used only during construction, before the first
/// publish overwrites it.
fn empty_snapshot() -> Snapshot {
    Snapshot {
        fen: String::new(),
        grid: [None; 64],
        side_to_move: Color::White,
        phase: SessionPhase::NotStarted,
        in_check: false,
        checkmate: false,
        selected: None,
        valid_moves: HashSet::new(),
        pending_promotion: None,
        last_move: None,
        history: Vec::new(),
        captured: CapturedTally::default(),
    }
}
