//! Info panel: status line, move log, capture tray, promotion chooser
//!
//! Pure derivation from the session snapshot. Emits the "new game",
//! "undo", "flip board", and "promotion picked" intents.

use crate::app::Message;
use crate::styles::piece_char;
use chess_rules::PieceKind;
use chess_session::{SessionPhase, Snapshot};
use iced::widget::{button, column, horizontal_rule, row, scrollable, text, vertical_space};
use iced::{Element, Length};

/// Render the info panel
pub fn view(snapshot: &Snapshot) -> Element<'_, Message> {
    let new_game_btn = button(text("New Game"))
        .on_press(Message::NewGame)
        .style(button::primary)
        .width(Length::Fill);

    let undo_btn = button(text("Undo Move"))
        .on_press_maybe(snapshot.can_undo().then_some(Message::UndoMove))
        .style(button::secondary)
        .width(Length::Fill);

    let flip_btn = button(text("Flip Board"))
        .on_press(Message::FlipBoard)
        .style(button::secondary)
        .width(Length::Fill);

    let status = text(status_line(snapshot)).size(16);

    let mut panel = column![
        new_game_btn,
        undo_btn,
        flip_btn,
        vertical_space().height(15),
        horizontal_rule(1),
        vertical_space().height(10),
        status,
    ]
    .spacing(5);

    if snapshot.pending_promotion.is_some() {
        panel = panel
            .push(vertical_space().height(10))
            .push(promotion_chooser(snapshot));
    }

    panel
        .push(vertical_space().height(10))
        .push(horizontal_rule(1))
        .push(capture_tray(snapshot))
        .push(horizontal_rule(1))
        .push(vertical_space().height(10))
        .push(text("Moves").size(16))
        .push(scrollable(move_log(snapshot)).height(Length::Fill))
        .into()
}

/// Human-readable status line from phase, turn, and check state.
fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.phase {
        SessionPhase::NotStarted => "Click \"New Game\" to start playing".to_string(),
        SessionPhase::Over if snapshot.checkmate => {
            // The side still to move is the one that got mated
            format!("Checkmate! {} wins!", snapshot.side_to_move.other())
        }
        SessionPhase::Over => "Game ended in a draw".to_string(),
        SessionPhase::InProgress if snapshot.in_check => {
            format!("{} is in check", snapshot.side_to_move)
        }
        SessionPhase::InProgress => format!("{} to move", snapshot.side_to_move),
    }
}

/// Numbered full-move rows, white and black side by side.
fn move_log(snapshot: &Snapshot) -> Element<'_, Message> {
    let mut rows = column![].spacing(2);

    for (i, chunk) in snapshot.history.chunks(2).enumerate() {
        let white_move = chunk[0].san.as_str();
        let black_move = chunk.get(1).map(|m| m.san.as_str()).unwrap_or("");
        rows = rows.push(text(format!("{}. {} {}", i + 1, white_move, black_move)).size(13));
    }

    rows.into()
}

/// One row per player listing the opponent pieces they captured.
fn capture_tray(snapshot: &Snapshot) -> Element<'_, Message> {
    use chess_rules::Color;

    // White's captures are the pieces Black lost, and vice versa
    let white_row: String = snapshot
        .captured
        .black
        .iter()
        .map(|&kind| piece_char(Color::Black, kind))
        .collect();
    let black_row: String = snapshot
        .captured
        .white
        .iter()
        .map(|&kind| piece_char(Color::White, kind))
        .collect();

    column![
        row![text("White").size(13).width(50), text(white_row).size(18)].spacing(5),
        row![text("Black").size(13).width(50), text(black_row).size(18)].spacing(5),
    ]
    .spacing(2)
    .padding(5)
    .into()
}

/// Queen / rook / knight / bishop buttons in the moving side's color.
fn promotion_chooser(snapshot: &Snapshot) -> Element<'_, Message> {
    let side = snapshot.side_to_move;
    let mut choices = row![].spacing(5);

    for kind in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
    ] {
        choices = choices.push(
            button(text(piece_char(side, kind).to_string()).size(28).center())
                .on_press(Message::PromotionPicked(kind))
                .style(button::secondary),
        );
    }

    column![text("Promote to:").size(14), choices].spacing(5).into()
}
