//! Main application state and logic

use crate::board::{BoardMessage, BoardView};
use crate::panel;
use crate::settings::Settings;
use crate::styles::PANEL_WIDTH;

use chess_rules::{PieceKind, StandardRules};
use chess_session::Session;
use iced::widget::{container, row};
use iced::{Element, Length, Task, Theme};

/// Main application state
pub struct ChessApp {
    /// Session state machine, the single owner of game state
    session: Session<StandardRules>,
    /// Board flipped?
    board_flipped: bool,
    /// Dark theme?
    dark_theme: bool,
}

/// Application messages, one per user intent
#[derive(Debug, Clone)]
pub enum Message {
    // Board interaction
    Board(BoardMessage),

    // Panel intents
    NewGame,
    UndoMove,
    FlipBoard,
    PromotionPicked(PieceKind),
}

impl ChessApp {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        (
            Self {
                session: Session::new(StandardRules),
                board_flipped: settings.flip_board,
                dark_theme: settings.dark_theme,
            },
            Task::none(),
        )
    }

    pub fn theme(&self) -> Theme {
        if self.dark_theme {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Board(BoardMessage::SquareClicked(sq)) => {
                self.session.handle_square_click(sq);
            }
            Message::NewGame => self.session.start_new_game(),
            Message::UndoMove => self.session.undo(),
            Message::FlipBoard => self.board_flipped = !self.board_flipped,
            Message::PromotionPicked(kind) => self.session.resolve_promotion(kind),
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let snapshot = self.session.snapshot();

        let board = BoardView::new(snapshot, self.board_flipped)
            .view()
            .map(Message::Board);

        row![
            board,
            container(panel::view(snapshot))
                .width(PANEL_WIDTH)
                .height(Length::Fill)
                .padding(15),
        ]
        .spacing(20)
        .padding(20)
        .into()
    }
}
