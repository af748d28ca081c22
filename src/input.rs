//! Key handling for the board screen.
//!
//! Translates crossterm key events into session inputs, with a small priority
//! chain: quit keys first, then the finished-game screen, then coordinate
//! entry, then normal play.

use crate::session::{GoInput, Session};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the loop normally.
    Continue,
    /// Start a new game with the same settings.
    Restart,
    /// Leave the program.
    Quit,
}

/// Map a key to a session input.
///
/// While a coordinate is being typed every printable key is text, so
/// `p` means the letter P rather than "pass".
pub fn map_key(key: KeyEvent, entry_open: bool) -> GoInput {
    if entry_open {
        return match key.code {
            KeyCode::Char(c) => GoInput::Char(c),
            KeyCode::Backspace => GoInput::Backspace,
            KeyCode::Enter => GoInput::Place,
            KeyCode::Esc => GoInput::Cancel,
            _ => GoInput::Other,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => GoInput::Up,
        KeyCode::Down | KeyCode::Char('j') => GoInput::Down,
        KeyCode::Left | KeyCode::Char('h') => GoInput::Left,
        KeyCode::Right | KeyCode::Char('l') => GoInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => GoInput::Place,
        KeyCode::Char('p') | KeyCode::Char('P') => GoInput::Pass,
        KeyCode::Char('r') | KeyCode::Char('R') => GoInput::Resign,
        KeyCode::Char(':') | KeyCode::Char('g') | KeyCode::Char('G') => GoInput::StartEntry,
        KeyCode::Esc => GoInput::Cancel,
        _ => GoInput::Other,
    }
}

/// Handle one key press against the session.
pub fn handle_key(key: KeyEvent, session: &mut Session) -> InputResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    if session.is_finished() {
        return match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => InputResult::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputResult::Quit,
            _ => InputResult::Continue,
        };
    }

    let entry_open = session.entry.is_some();
    if !entry_open && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return InputResult::Quit;
    }

    session.process_input(map_key(key, entry_open));
    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Stone;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_are_text_while_typing() {
        assert_eq!(map_key(key(KeyCode::Char('p')), false), GoInput::Pass);
        assert_eq!(map_key(key(KeyCode::Char('p')), true), GoInput::Char('p'));
        assert_eq!(map_key(key(KeyCode::Enter), true), GoInput::Place);
    }

    #[test]
    fn test_quit_keys() {
        let mut session = Session::with_size(9).unwrap();
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut session),
            InputResult::Quit
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &mut session), InputResult::Quit);
    }

    #[test]
    fn test_q_is_text_in_entry_mode() {
        let mut session = Session::with_size(19).unwrap();
        handle_key(key(KeyCode::Char(':')), &mut session);
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut session),
            InputResult::Continue
        );
        assert_eq!(session.entry.as_deref(), Some("Q"));
    }

    #[test]
    fn test_enter_places_stone() {
        let mut session = Session::with_size(9).unwrap();
        handle_key(key(KeyCode::Enter), &mut session);
        assert_eq!(session.game.board().get(4, 4), Some(Stone::Black));
    }

    #[test]
    fn test_finished_game_offers_restart() {
        let mut session = Session::with_size(9).unwrap();
        handle_key(key(KeyCode::Char('p')), &mut session);
        handle_key(key(KeyCode::Char('p')), &mut session);
        assert!(session.is_finished());
        assert_eq!(
            handle_key(key(KeyCode::Char('n')), &mut session),
            InputResult::Restart
        );
        assert_eq!(
            handle_key(key(KeyCode::Left), &mut session),
            InputResult::Continue
        );
    }
}
