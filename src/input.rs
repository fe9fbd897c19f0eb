use crossterm::event::KeyCode;

/// Outcome of the application-level keyboard contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Request process termination.
    Quit,
    /// Request the settings panel be shown.
    OpenSettings,
    /// Key not handled by this core.
    Unhandled,
}

/// Application-level key handling: escape quits, f1 opens settings,
/// everything else is not handled.
pub fn handle_key(key_name: &str) -> KeyAction {
    match key_name {
        "escape" => KeyAction::Quit,
        "f1" => KeyAction::OpenSettings,
        _ => KeyAction::Unhandled,
    }
}

/// Map a crossterm key code to a lowercase key name. Keys with no
/// name in this contract yield None and are ignored upstream.
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Esc => Some("escape".to_string()),
        KeyCode::F(n) => Some(format!("f{n}")),
        KeyCode::Enter => Some("enter".to_string()),
        KeyCode::Backspace => Some("backspace".to_string()),
        KeyCode::Up => Some("up".to_string()),
        KeyCode::Down => Some("down".to_string()),
        KeyCode::Left => Some("left".to_string()),
        KeyCode::Right => Some("right".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}
