//! Terminal rendering.

mod board_scene;
mod game_common;

use crate::session::Session;
use ratatui::Frame;

/// Draw one frame for the session.
pub fn draw_ui(frame: &mut Frame, session: &Session) {
    let area = frame.size();
    board_scene::render_board_scene(frame, area, session);
}
