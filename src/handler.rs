use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::controller::Command;

/// What a key or mouse event asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    First,
    Last,
    ClearSelection,
    /// Activate the row under the cursor.
    Activate,
    /// Expand or collapse the folder under the cursor.
    ToggleExpand,
    Click { column: u16, row: u16 },
    /// A command that does not depend on the cursor row.
    Command(Command),
}

/// Map a key event to an action.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Char('g') | KeyCode::Home => Action::First,
        KeyCode::Char('G') | KeyCode::End => Action::Last,
        KeyCode::Esc => Action::ClearSelection,
        KeyCode::Enter => Action::Activate,
        KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Char('h') => Action::ToggleExpand,
        KeyCode::Right | KeyCode::Left => Action::ToggleExpand,
        KeyCode::Char('o') => Action::Command(Command::OpenSelected),
        KeyCode::Char('r') => Action::Command(Command::OpenSelectedLocation),
        KeyCode::Char('m') => Action::Command(Command::MoveSelected),
        KeyCode::Char('d') | KeyCode::Delete => Action::Command(Command::DeleteSelected),
        KeyCode::Char('c') => Action::Command(Command::ChooseRoot),
        _ => return None,
    };
    Some(action)
}

/// Map a mouse event to an action. Only left clicks and the wheel matter.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::ScrollDown => Some(Action::Down),
        MouseEventKind::ScrollUp => Some(Action::Up),
        _ => None,
    }
}
