use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Space: click the widget (toggles pause when click-to-toggle is enabled)
    Click,
    /// 'p': pause or resume regardless of click-to-toggle
    TogglePause,
    /// 'r': set the same text again, restarting the scroll
    Restart,
    SpeedUp,
    SpeedDown,
    /// 'o': switch between horizontal and vertical
    ToggleOrientation,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        (KeyCode::Char(' '), _) => Action::Click,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePause,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Restart,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::ToggleOrientation,

        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) | (KeyCode::Right, _) => Action::SpeedUp,
        (KeyCode::Char('-'), _) | (KeyCode::Left, _) => Action::SpeedDown,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char(' '))), Action::Click);
        assert_eq!(handle_key_event(key(KeyCode::Char('p'))), Action::TogglePause);
        assert_eq!(handle_key_event(key(KeyCode::Right)), Action::SpeedUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('-'))), Action::SpeedDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), Action::None);
    }
}
