//! Hotseat chess GUI
//!
//! Two players share one board: click a piece, click a destination,
//! pick a promotion piece when asked. The side panel shows game status,
//! the move log, and captured pieces.

mod app;
mod board;
mod panel;
mod settings;
mod styles;

use app::ChessApp;
use iced::application;
use settings::Settings;

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    let settings = Settings::load();
    let window_size = (settings.window_width, settings.window_height);

    application("Hotseat Chess", ChessApp::update, ChessApp::view)
        .theme(ChessApp::theme)
        .window_size(window_size)
        .run_with(move || ChessApp::new(settings.clone()))
}
