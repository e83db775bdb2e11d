use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::controller::{Command, Controller, Prompt};
use crate::fs::tree::FlatItem;
use crate::handler::Action;

/// Main application state: the controller plus what the tree view needs to
/// draw it (visible rows, cursor, scroll position and where it was drawn).
pub struct App {
    pub controller: Controller,
    pub rows: Vec<FlatItem>,
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Inner area of the tree panel from the last draw, for mouse hit tests.
    pub tree_area: Rect,
    pub use_icons: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller, use_icons: bool) -> Self {
        let mut app = Self {
            controller,
            rows: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            tree_area: Rect::default(),
            use_icons,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Re-flatten the snapshot and put the cursor back on the selection.
    pub fn refresh(&mut self) {
        self.rows = self
            .controller
            .tree()
            .map(|root| root.flatten())
            .unwrap_or_default();

        if let Some(selected) = self.controller.selection() {
            if let Some(idx) = self.rows.iter().position(|r| r.path == selected) {
                self.cursor = idx;
            }
        }
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    /// Path of the row under the cursor.
    pub fn cursor_path(&self) -> Option<PathBuf> {
        self.rows.get(self.cursor).map(|r| r.path.clone())
    }

    /// Apply an action. Commands run through the controller, which reports
    /// failures on `prompt`.
    pub fn apply(&mut self, action: Action, prompt: &mut dyn Prompt) {
        match action {
            Action::Quit => self.quit(),
            Action::Up => self.select_previous(),
            Action::Down => self.select_next(),
            Action::First => self.select_first(),
            Action::Last => self.select_last(),
            Action::ClearSelection => self.controller.clear_selection(),
            Action::Activate => {
                if let Some(path) = self.cursor_path() {
                    self.controller.select(&path);
                    self.controller.dispatch(Command::Activate(path), prompt);
                }
            }
            Action::ToggleExpand => {
                if let Some(path) = self.cursor_path() {
                    self.controller.dispatch(Command::ToggleExpand(path), prompt);
                }
            }
            Action::Click { column, row } => self.click(column, row, prompt),
            Action::Command(command) => self.controller.dispatch(command, prompt),
        }
        self.refresh();
    }

    /// A click selects its row; a click on the selected row activates it.
    fn click(&mut self, column: u16, row: u16, prompt: &mut dyn Prompt) {
        let area = self.tree_area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return;
        }
        let idx = self.scroll_offset + (row - area.y) as usize;
        let Some(path) = self.rows.get(idx).map(|r| r.path.clone()) else {
            return;
        };

        self.cursor = idx;
        if self.controller.selection() == Some(path.as_path()) {
            self.controller.dispatch(Command::Activate(path), prompt);
        } else {
            self.controller.select(&path);
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Move the cursor to `idx` and select that row.
    fn move_to(&mut self, idx: usize) {
        if let Some(path) = self.rows.get(idx).map(|r| r.path.clone()) {
            self.cursor = idx;
            self.controller.select(&path);
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        let len = self.rows.len();
        if len > 0 && self.cursor < len - 1 {
            self.move_to(self.cursor + 1);
        } else {
            self.move_to(self.cursor);
        }
    }

    /// Move selection up by one item.
    pub fn select_previous(&mut self) {
        self.move_to(self.cursor.saturating_sub(1));
    }

    /// Jump to the first item.
    pub fn select_first(&mut self) {
        self.move_to(0);
    }

    /// Jump to the last item.
    pub fn select_last(&mut self) {
        self.move_to(self.rows.len().saturating_sub(1));
    }

    /// Keep the cursor row inside a window of `visible_height` rows.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor - visible_height + 1;
        }
        let max_offset = self.rows.len().saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
