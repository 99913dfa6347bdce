//! Standard-rules engine backed by the `cozy-chess` move generator.
//!
//! Two encoding gaps between the library and the UI contract are bridged
//! here:
//! - `cozy-chess` encodes castling as "king captures own rook"; the UI
//!   contract wants a two-file king move (g- or c-file destination), so
//!   castle moves are translated in both directions;
//! - en-passant captures land on an empty square, but the contract still
//!   reports the captured pawn.

use cozy_chess::{Board, GameStatus, Move, Square};

use crate::position::Position;
use crate::types::{sq_to_coord, Color, Piece, PieceKind};
use crate::{AppliedMove, MoveTarget, Rules, RulesError};

/// Production [`Rules`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl StandardRules {
    pub fn new() -> Self {
        StandardRules
    }
}

impl Rules for StandardRules {
    fn starting_position(&self) -> Position {
        Position::startpos()
    }

    fn position_from_fen(&self, fen: &str) -> Result<Position, RulesError> {
        Position::from_fen(fen)
    }

    fn fen(&self, position: &Position) -> String {
        position.board().to_string()
    }

    fn legal_moves_from(&self, position: &Position, from: u8) -> Vec<MoveTarget> {
        let Some(from) = to_cozy_square(from) else {
            return Vec::new();
        };
        let board = position.board();
        let mut targets: Vec<MoveTarget> = Vec::new();
        // Movegen only emits moves for the side to move, so squares of the
        // other color naturally yield nothing.
        board.generate_moves_for(from.bitboard(), |moves| {
            for mv in moves {
                let to = surfaced_destination(board, mv);
                // The four promotion variants collapse into one target
                if !targets.iter().any(|t| t.to == to) {
                    targets.push(MoveTarget {
                        to,
                        requires_promotion: mv.promotion.is_some(),
                    });
                }
            }
            false
        });
        targets
    }

    fn apply_move(
        &self,
        position: &Position,
        from: u8,
        to: u8,
        promotion: Option<PieceKind>,
    ) -> Result<AppliedMove, RulesError> {
        let board = position.board();
        let mv = find_move(board, from, to, promotion).ok_or_else(|| RulesError::IllegalMove {
            from: sq_to_coord(from),
            to: sq_to_coord(to),
        })?;

        let captured = captured_kind(board, mv);
        let san = san_for(board, mv);

        let mut next = board.clone();
        next.try_play(mv).map_err(|_| RulesError::IllegalMove {
            from: sq_to_coord(from),
            to: sq_to_coord(to),
        })?;

        Ok(AppliedMove {
            position: position.push(next),
            captured,
            san,
        })
    }

    fn undo_ply(&self, position: &Position) -> Result<Position, RulesError> {
        position.pop().ok_or(RulesError::UndoUnavailable)
    }

    fn is_check(&self, position: &Position) -> bool {
        !position.board().checkers().is_empty()
    }

    fn is_checkmate(&self, position: &Position) -> bool {
        position.board().status() == GameStatus::Won
    }

    fn is_draw(&self, position: &Position) -> bool {
        let board = position.board();
        // status() covers stalemate and the fifty-move rule
        board.status() == GameStatus::Drawn
            || position.occurrences_of_current() >= 3
            || insufficient_material(board)
    }

    fn side_to_move(&self, position: &Position) -> Color {
        from_cozy_color(position.board().side_to_move())
    }

    fn piece_at(&self, position: &Position, square: u8) -> Option<Piece> {
        let sq = to_cozy_square(square)?;
        let board = position.board();
        let kind = from_cozy_piece(board.piece_on(sq)?);
        let color = from_cozy_color(board.color_on(sq)?);
        Some(Piece { color, kind })
    }
}

/// Find the generated move matching a surfaced (from, to, promotion) request.
///
/// Promotion moves come in four variants per destination; the requested kind
/// picks one, defaulting to queen when the caller passes none.
fn find_move(board: &Board, from: u8, to: u8, promotion: Option<PieceKind>) -> Option<Move> {
    let from = to_cozy_square(from)?;
    if to >= 64 {
        return None;
    }
    let mut found = None;
    board.generate_moves_for(from.bitboard(), |moves| {
        for mv in moves {
            if surfaced_destination(board, mv) != to {
                continue;
            }
            if let Some(promo) = mv.promotion {
                let wanted = promotion.unwrap_or(PieceKind::Queen);
                if from_cozy_piece(promo) != wanted {
                    continue;
                }
            }
            found = Some(mv);
            return true;
        }
        false
    });
    found
}

/// Destination square as the UI sees it: castling becomes a king move to
/// the g- or c-file of the back rank, everything else is the move's own
/// target square.
fn surfaced_destination(board: &Board, mv: Move) -> u8 {
    if is_castling(board, mv) {
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
            cozy_chess::File::G
        } else {
            cozy_chess::File::C
        };
        Square::new(file, mv.from.rank()) as u8
    } else {
        mv.to as u8
    }
}

/// A king landing on a friendly piece can only be the king-onto-rook
/// castle encoding.
fn is_castling(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.from) == Some(cozy_chess::Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move())
}

/// What this move captures, if anything. Evaluated before the move is
/// played.
fn captured_kind(board: &Board, mv: Move) -> Option<PieceKind> {
    let side = board.side_to_move();
    if board.color_on(mv.to) == Some(!side) {
        return board.piece_on(mv.to).map(from_cozy_piece);
    }
    if is_en_passant(board, mv) {
        return Some(PieceKind::Pawn);
    }
    None
}

/// A pawn changing file onto an empty square is an en-passant capture.
fn is_en_passant(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.from) == Some(cozy_chess::Piece::Pawn)
        && mv.from.file() != mv.to.file()
        && board.piece_on(mv.to).is_none()
}

/// SAN text for a move about to be played: piece letter, capture marker,
/// destination, promotion suffix, `O-O`/`O-O-O` for castling.
fn san_for(board: &Board, mv: Move) -> String {
    let Some(piece) = board.piece_on(mv.from) else {
        return format!("{}{}", sq_to_coord(mv.from as u8), sq_to_coord(mv.to as u8));
    };

    if is_castling(board, mv) {
        return if (mv.to.file() as usize) > (mv.from.file() as usize) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let mut san = String::new();
    match piece {
        cozy_chess::Piece::King => san.push('K'),
        cozy_chess::Piece::Queen => san.push('Q'),
        cozy_chess::Piece::Rook => san.push('R'),
        cozy_chess::Piece::Bishop => san.push('B'),
        cozy_chess::Piece::Knight => san.push('N'),
        cozy_chess::Piece::Pawn => {}
    }

    let is_capture =
        board.color_on(mv.to) == Some(!board.side_to_move()) || is_en_passant(board, mv);
    if is_capture {
        if piece == cozy_chess::Piece::Pawn {
            san.push((b'a' + mv.from.file() as u8) as char);
        }
        san.push('x');
    }

    san.push_str(&sq_to_coord(mv.to as u8));

    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(match promo {
            cozy_chess::Piece::Queen => 'Q',
            cozy_chess::Piece::Rook => 'R',
            cozy_chess::Piece::Bishop => 'B',
            cozy_chess::Piece::Knight => 'N',
            _ => '?',
        });
    }

    san
}

/// No mating material left for either side: bare kings, a lone minor
/// piece, or same-shade bishops only.
fn insufficient_material(board: &Board) -> bool {
    use cozy_chess::Piece as P;
    let heavy = board.pieces(P::Pawn) | board.pieces(P::Rook) | board.pieces(P::Queen);
    if !heavy.is_empty() {
        return false;
    }
    let knights = board.pieces(P::Knight);
    let bishops = board.pieces(P::Bishop);
    if knights.len() + bishops.len() <= 1 {
        return true;
    }
    if !knights.is_empty() {
        return false;
    }
    // Bishops only: drawn when they all stand on one shade
    let mut shades = [false; 2];
    for sq in bishops {
        shades[(sq.file() as usize + sq.rank() as usize) % 2] = true;
    }
    !(shades[0] && shades[1])
}

fn to_cozy_square(sq: u8) -> Option<Square> {
    if sq < 64 {
        Some(Square::index(sq as usize))
    } else {
        None
    }
}

fn from_cozy_color(color: cozy_chess::Color) -> Color {
    match color {
        cozy_chess::Color::White => Color::White,
        cozy_chess::Color::Black => Color::Black,
    }
}

fn from_cozy_piece(piece: cozy_chess::Piece) -> PieceKind {
    match piece {
        cozy_chess::Piece::Pawn => PieceKind::Pawn,
        cozy_chess::Piece::Knight => PieceKind::Knight,
        cozy_chess::Piece::Bishop => PieceKind::Bishop,
        cozy_chess::Piece::Rook => PieceKind::Rook,
        cozy_chess::Piece::Queen => PieceKind::Queen,
        cozy_chess::Piece::King => PieceKind::King,
    }
}

#[cfg(test)]
#[path = "standard_tests.rs"]
mod standard_tests;
