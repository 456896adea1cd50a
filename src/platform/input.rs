//! Key mapping from terminal events to session keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Key;

/// Map a key press to a session key
pub fn map_key(key: KeyEvent) -> Option<Key> {
    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_menu_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Key::Up));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Key::Down));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Key::Left));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Key::Right));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(Key::Escape));
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('r'))), Some(Key::Restart));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('R'))), Some(Key::Restart));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Esc)));
    }
}
