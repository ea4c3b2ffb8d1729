use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::browser::Input;

/// Map a key press to a browser input. Unbound keys yield `None`.
pub fn decode_key(key: KeyEvent) -> Option<Input> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let input = match key.code {
        KeyCode::Char('c') if ctrl => Input::Quit,
        KeyCode::Char('n') if ctrl => Input::MoveDown,
        KeyCode::Char('p') if ctrl => Input::MoveUp,
        KeyCode::Char('q') => Input::Quit,
        KeyCode::Char('g') => Input::GoToTop,
        KeyCode::Char('G') => Input::GoToLast,
        KeyCode::Char('j') | KeyCode::Down => Input::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Input::MoveUp,
        KeyCode::Char('J') | KeyCode::PageDown => Input::PageDown,
        KeyCode::Char('K') | KeyCode::PageUp => Input::PageUp,
        KeyCode::Char('h') | KeyCode::Backspace | KeyCode::Left | KeyCode::Esc => Input::Ascend,
        KeyCode::Char('l') | KeyCode::Right => Input::Activate { confirm: false },
        KeyCode::Enter => Input::Activate { confirm: true },
        KeyCode::Char('.') => Input::ToggleHidden,
        _ => return None,
    };
    Some(input)
}

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if let Some(input) = decode_key(key) {
        app.handle_input(input);
    }
}
