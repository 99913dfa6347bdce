//! Chess board widget rendering
//!
//! Pure derivation from the session snapshot: parity shading, occupant
//! glyphs, and the highlight flags (selected, reachable-quiet,
//! reachable-capture, last-move origin/destination). Emits exactly one
//! event: a clicked square.

use crate::styles::{self, SQUARE_SIZE};
use chess_session::Snapshot;
use iced::widget::{button, column, container, row, text};
use iced::{Color, Element, Length};

/// Message type for board interactions
#[derive(Debug, Clone)]
pub enum BoardMessage {
    SquareClicked(u8),
}

/// Renders the chess board from a session snapshot
pub struct BoardView<'a> {
    snapshot: &'a Snapshot,
    flipped: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(snapshot: &'a Snapshot, flipped: bool) -> Self {
        Self { snapshot, flipped }
    }

    /// Create the board view element
    pub fn view(&self) -> Element<'a, BoardMessage> {
        let mut board_column = column![].spacing(0);

        for rank in 0..8 {
            let display_rank = if self.flipped { rank } else { 7 - rank };
            let mut rank_row = row![].spacing(0);

            for file in 0..8 {
                let display_file = if self.flipped { 7 - file } else { file };
                let sq = (display_rank * 8 + display_file) as u8;

                rank_row = rank_row.push(self.render_square(sq, display_rank, display_file));
            }

            board_column = board_column.push(rank_row);
        }

        container(board_column)
            .style(|_theme| container::Style {
                border: iced::Border {
                    color: Color::from_rgb(0.3, 0.3, 0.3),
                    width: 2.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    /// Render a single square
    fn render_square(&self, sq: u8, rank: usize, file: usize) -> Element<'a, BoardMessage> {
        // a1 is dark
        let is_light = (rank + file) % 2 == 1;
        let mut bg_color = if is_light {
            styles::LIGHT_SQUARE
        } else {
            styles::DARK_SQUARE
        };

        if let Some((from, to)) = self.snapshot.last_move {
            if sq == from {
                bg_color = blend_colors(bg_color, styles::LAST_MOVE_FROM);
            } else if sq == to {
                bg_color = blend_colors(bg_color, styles::LAST_MOVE_TO);
            }
        }

        if self.snapshot.selected == Some(sq) {
            bg_color = styles::SELECTED_SQUARE;
        }

        let occupant = self.snapshot.grid[sq as usize];
        let is_reachable = self.snapshot.valid_moves.contains(&sq);

        // A reachable occupied square is a capture target
        if is_reachable && occupant.is_some() {
            bg_color = blend_colors(bg_color, styles::CAPTURE_TARGET);
        }

        let content: Element<'a, BoardMessage> = if let Some(piece) = occupant {
            text(styles::piece_char(piece.color, piece.kind).to_string())
                .size(SQUARE_SIZE * 0.75)
                .center()
                .into()
        } else if is_reachable {
            // Dot marker for reachable empty squares
            text("●")
                .size(SQUARE_SIZE * 0.3)
                .color(styles::MOVE_DOT)
                .center()
                .into()
        } else {
            text("").into()
        };

        button(
            container(content)
                .width(SQUARE_SIZE)
                .height(SQUARE_SIZE)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(SQUARE_SIZE)
        .height(SQUARE_SIZE)
        .style(move |_theme, status| {
            let hover_overlay = match status {
                button::Status::Hovered => 0.1,
                button::Status::Pressed => 0.2,
                _ => 0.0,
            };
            button::Style {
                background: Some(iced::Background::Color(if hover_overlay > 0.0 {
                    blend_colors(bg_color, Color::from_rgba(1.0, 1.0, 1.0, hover_overlay))
                } else {
                    bg_color
                })),
                border: iced::Border::default(),
                text_color: Color::BLACK,
                ..Default::default()
            }
        })
        .on_press(BoardMessage::SquareClicked(sq))
        .into()
    }
}

/// Blend two colors together
fn blend_colors(base: Color, overlay: Color) -> Color {
    let alpha = overlay.a;
    Color::from_rgb(
        base.r * (1.0 - alpha) + overlay.r * alpha,
        base.g * (1.0 - alpha) + overlay.g * alpha,
        base.b * (1.0 - alpha) + overlay.b * alpha,
    )
}
