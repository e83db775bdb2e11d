//! Terminal implementation of the controller's [`Prompt`]: each question is a
//! modal dialog with its own draw/read loop, drawn over the last full frame.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::components::dialog::{DialogKind, DialogWidget, InputState};
use crate::config::expand_tilde;
use crate::controller::Prompt;
use crate::error::Result;
use crate::event::{Event, EventHandler};
use crate::theme::ThemeColors;
use crate::tui::Tui;

/// Result of feeding one key to the text input.
#[derive(Debug, PartialEq, Eq)]
enum InputOutcome {
    Continue,
    Submit,
    Cancel,
}

pub struct TuiPrompt<'a> {
    tui: &'a mut Tui,
    events: &'a mut EventHandler,
    theme: &'a ThemeColors,
}

impl<'a> TuiPrompt<'a> {
    pub fn new(tui: &'a mut Tui, events: &'a mut EventHandler, theme: &'a ThemeColors) -> Self {
        Self { tui, events, theme }
    }

    /// Draw `kind` and feed keys to `on_key` until it returns a value.
    fn run_modal<T>(
        &mut self,
        kind: &DialogKind,
        input: &mut InputState,
        mut on_key: impl FnMut(KeyEvent, &mut InputState) -> Option<T>,
    ) -> Result<T> {
        loop {
            let theme = self.theme;
            let state: &InputState = input;
            self.tui.draw_modal(|frame| {
                frame.render_widget(DialogWidget::new(kind, state, theme), frame.area());
            })?;

            if let Event::Key(key) = self.events.next()? {
                if let Some(out) = on_key(key, input) {
                    return Ok(out);
                }
            }
        }
    }
}

impl Prompt for TuiPrompt<'_> {
    fn confirm_delete(&mut self, name: &str) -> bool {
        let kind = DialogKind::ConfirmDelete {
            name: name.to_string(),
        };
        match self.run_modal(&kind, &mut InputState::default(), |key, _| confirm_answer(key)) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "confirmation dialog failed");
                false
            }
        }
    }

    fn choose_directory(&mut self, title: &str, start: &Path) -> Option<PathBuf> {
        let kind = DialogKind::ChooseDirectory {
            title: title.to_string(),
        };
        let mut input = InputState::with_text(start.to_string_lossy().to_string());
        let answer = self.run_modal(&kind, &mut input, |key, input| {
            match edit_input(input, key) {
                InputOutcome::Continue => None,
                InputOutcome::Submit => Some(Some(input.input.clone())),
                InputOutcome::Cancel => Some(None),
            }
        });
        match answer {
            Ok(raw) => raw.and_then(|raw| resolve_input(&raw)),
            Err(e) => {
                tracing::warn!(error = %e, "directory chooser failed");
                None
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        let kind = DialogKind::Error {
            message: message.to_string(),
        };
        let dismissed = self.run_modal(&kind, &mut InputState::default(), |key, _| {
            matches!(
                key.code,
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')
            )
            .then_some(())
        });
        if let Err(e) = dismissed {
            tracing::warn!(error = %e, "error dialog failed");
        }
    }
}

fn confirm_answer(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(false),
        _ => None,
    }
}

fn edit_input(input: &mut InputState, key: KeyEvent) -> InputOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => return InputOutcome::Submit,
        KeyCode::Esc => return InputOutcome::Cancel,
        KeyCode::Char('c') if ctrl => return InputOutcome::Cancel,
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.delete_char(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.cursor_home(),
        KeyCode::End => input.cursor_end(),
        _ => {}
    }
    InputOutcome::Continue
}

/// Turn chooser text into a path: `~` expanded, relative paths joined to the
/// working directory. Blank input counts as cancel.
fn resolve_input(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = expand_tilde(trimmed);
    if path.is_absolute() {
        return Some(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => Some(cwd.join(path)),
        Err(_) => Some(path),
    }
}
