use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Back,
    Submit,
    MoveUp,
    MoveDown,
    ScrollUp,
    ScrollDown,
    CycleCategory,
    ToggleHistory,
    DeleteEntry,
    ClearHistory,
    ToggleTheme,
    CopySource,
    Suggestion(usize),
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Back,

        // Navigation (Vim/Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::ScrollUp,
        (KeyCode::PageDown, _) => Action::ScrollDown,

        // Actions
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Tab, _) => Action::CycleCategory,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::ToggleHistory,
        (KeyCode::Delete, _) => Action::DeleteEntry,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::ClearHistory,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Action::ToggleTheme,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopySource,
        (KeyCode::F(n @ 1..=4), _) => Action::Suggestion(usize::from(n - 1)),

        // Query input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
