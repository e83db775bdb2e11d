use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Widget, Wrap},
};

use crate::theme::ThemeColors;

/// The kind of modal dialog being displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    ConfirmDelete { name: String },
    ChooseDirectory { title: String },
    Error { message: String },
}

/// Text input state for the directory chooser. `cursor_position` is a byte
/// offset that always sits on a char boundary.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub input: String,
    pub cursor_position: usize,
}

impl InputState {
    /// Start with `text` and the cursor at its end.
    pub fn with_text(text: String) -> Self {
        Self {
            cursor_position: text.len(),
            input: text,
        }
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(next) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input.len();
    }

    /// Remove everything (Ctrl+U).
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }
}

/// Dialog widget that renders a centered modal overlay.
pub struct DialogWidget<'a> {
    kind: &'a DialogKind,
    input: &'a InputState,
    theme: &'a ThemeColors,
}

impl<'a> DialogWidget<'a> {
    pub fn new(kind: &'a DialogKind, input: &'a InputState, theme: &'a ThemeColors) -> Self {
        Self { kind, input, theme }
    }

    /// Calculate a centered rectangle within the given area.
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let w = width.min(area.width);
        let h = height.min(area.height);
        let x = area.x + area.width.saturating_sub(w) / 2;
        let y = area.y + area.height.saturating_sub(h) / 2;
        Rect::new(x, y, w, h)
    }
}

impl<'a> Widget for DialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.kind {
            DialogKind::ConfirmDelete { name } => render_confirm_dialog(name, self.theme, area, buf),
            DialogKind::ChooseDirectory { title } => {
                render_input_dialog(title, self.input, self.theme, area, buf)
            }
            DialogKind::Error { message } => render_error_dialog(message, self.theme, area, buf),
        }
    }
}

/// Draw the bordered frame of a dialog and return its inner area.
fn dialog_frame(title: &str, border: Style, rect: Rect, buf: &mut Buffer) -> Rect {
    Clear.render(rect, buf);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border)
        .padding(Padding::horizontal(1));
    let inner = block.inner(rect);
    block.render(rect, buf);
    inner
}

fn render_hint(hint: &str, theme: &ThemeColors, inner: Rect, buf: &mut Buffer) {
    let hint_style = Style::default().fg(theme.dim_fg).add_modifier(Modifier::DIM);
    let hint_line = Line::from(Span::styled(hint, hint_style));
    buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
}

fn render_input_dialog(
    title: &str,
    state: &InputState,
    theme: &ThemeColors,
    area: Rect,
    buf: &mut Buffer,
) {
    let dialog_width = 60.min(area.width.saturating_sub(4));
    let rect = DialogWidget::centered_rect(dialog_width, 5, area);
    let border = Style::default().fg(theme.dialog_border_fg);
    let inner = dialog_frame(title, border, rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let input = &state.input;
    let cursor_pos = state.cursor_position;
    let (before, cursor_char, after) = match input[cursor_pos..].chars().next() {
        Some(ch) => {
            let end = cursor_pos + ch.len_utf8();
            (&input[..cursor_pos], &input[cursor_pos..end], &input[end..])
        }
        None => (input.as_str(), " ", ""),
    };

    // Keep the cursor visible: drop characters from the left when too long.
    let max_before = (inner.width as usize).saturating_sub(2);
    let before_chars = before.chars().count();
    let before_display: String = if before_chars > max_before {
        before.chars().skip(before_chars - max_before).collect()
    } else {
        before.to_string()
    };

    let input_style = Style::default().fg(theme.tree_fg);
    let cursor_style = Style::default()
        .bg(theme.tree_fg)
        .fg(theme.status_bg)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(before_display, input_style),
        Span::styled(cursor_char, cursor_style),
        Span::styled(after, input_style),
    ]);
    buf.set_line(inner.x, inner.y + inner.height / 2, &line, inner.width);

    if inner.height > 1 {
        render_hint("[Enter] Confirm  [Esc] Cancel", theme, inner, buf);
    }
}

fn render_confirm_dialog(name: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (name.chars().count().min(120) as u16 + 10)
        .max(40)
        .min(area.width.saturating_sub(4));
    let rect = DialogWidget::centered_rect(dialog_width, 7, area);
    let border = Style::default().fg(theme.error_fg);
    let inner = dialog_frame("Delete", border, rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let header = Line::from(Span::styled(
        "Delete this file?",
        Style::default()
            .fg(theme.warning_fg)
            .add_modifier(Modifier::BOLD),
    ));
    buf.set_line(inner.x, inner.y, &header, inner.width);

    if inner.height > 2 {
        let line = Line::from(Span::styled(
            format!("  • {}", name),
            Style::default().fg(theme.tree_fg),
        ));
        buf.set_line(inner.x, inner.y + 2, &line, inner.width);
    }

    if inner.height > 3 {
        render_hint("[y] Yes  [n/Esc] Cancel", theme, inner, buf);
    }
}

fn render_error_dialog(message: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let dialog_width = (message.chars().count().min(64) as u16 + 6)
        .clamp(30, 70)
        .min(area.width.saturating_sub(4));
    // Inner width excludes borders and horizontal padding.
    let text_width = dialog_width.saturating_sub(4).max(1) as usize;
    let text_lines = message
        .chars()
        .count()
        .div_ceil(text_width)
        .min(area.height as usize)
        .max(1) as u16;
    let rect = DialogWidget::centered_rect(dialog_width, text_lines.saturating_add(4), area);
    let border = Style::default().fg(theme.error_fg);
    let inner = dialog_frame("Error", border, rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let text_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    Paragraph::new(message)
        .style(Style::default().fg(theme.error_fg))
        .wrap(Wrap { trim: true })
        .render(text_area, buf);

    if inner.height > 1 {
        render_hint("[Enter/Esc] Dismiss", theme, inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    fn render(kind: &DialogKind, input: &InputState) -> String {
        let theme = dark_theme();
        let widget = DialogWidget::new(kind, input, &theme);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buffer_to_string(&buf, area)
    }

    #[test]
    fn test_chooser_dialog_renders() {
        let kind = DialogKind::ChooseDirectory {
            title: "Move to".to_string(),
        };
        let input = InputState::with_text("/tmp/photos".to_string());
        let content = render(&kind, &input);
        assert!(content.contains("Move to"));
        assert!(content.contains("/tmp/photos"));
        assert!(content.contains("[Enter] Confirm"));
    }

    #[test]
    fn test_confirm_dialog_renders() {
        let kind = DialogKind::ConfirmDelete {
            name: "holiday.jpg".to_string(),
        };
        let content = render(&kind, &InputState::default());
        assert!(content.contains("Delete"));
        assert!(content.contains("holiday.jpg"));
        assert!(content.contains("[y] Yes"));
    }

    #[test]
    fn test_error_dialog_renders() {
        let kind = DialogKind::Error {
            message: "Permission denied".to_string(),
        };
        let content = render(&kind, &InputState::default());
        assert!(content.contains("Error"));
        assert!(content.contains("Permission denied"));
    }

    #[test]
    fn test_long_error_wraps_inside_dialog() {
        let message = "I/O error: ".to_string() + &"x".repeat(120);
        let kind = DialogKind::Error { message };
        let content = render(&kind, &InputState::default());
        let x_count = content.chars().filter(|c| *c == 'x').count();
        assert_eq!(x_count, 120);
    }

    #[test]
    fn test_huge_error_message_fits_screen() {
        // Longer than u16::MAX characters.
        let message = "e".repeat(70_000);
        let kind = DialogKind::Error { message };
        let content = render(&kind, &InputState::default());
        assert!(content.contains("Error"));
        assert!(content.contains("eeee"));
    }

    #[test]
    fn test_huge_file_name_in_confirm() {
        let kind = DialogKind::ConfirmDelete {
            name: "n".repeat(70_000),
        };
        let content = render(&kind, &InputState::default());
        assert!(content.contains("Delete this file?"));
        assert!(content.contains("[y] Yes"));
    }

    #[test]
    fn test_input_with_multibyte_cursor() {
        let kind = DialogKind::ChooseDirectory {
            title: "Choose folder".to_string(),
        };
        let mut input = InputState::with_text("/tmp/café".to_string());
        input.move_cursor_left();
        let content = render(&kind, &input);
        assert!(content.contains("caf"));
    }

    #[test]
    fn input_insert_and_delete() {
        let mut input = InputState::default();
        input.insert_char('a');
        input.insert_char('é');
        input.insert_char('c');
        assert_eq!(input.input, "aéc");
        assert_eq!(input.cursor_position, 4);
        input.delete_char();
        input.delete_char();
        assert_eq!(input.input, "a");
        assert_eq!(input.cursor_position, 1);
    }

    #[test]
    fn input_delete_at_start_is_noop() {
        let mut input = InputState::with_text("abc".to_string());
        input.cursor_home();
        input.delete_char();
        assert_eq!(input.input, "abc");
        assert_eq!(input.cursor_position, 0);
    }

    #[test]
    fn input_cursor_movement_and_boundaries() {
        let mut input = InputState::with_text("ab".to_string());
        input.move_cursor_right();
        assert_eq!(input.cursor_position, 2);
        input.move_cursor_left();
        input.move_cursor_left();
        input.move_cursor_left();
        assert_eq!(input.cursor_position, 0);
        input.insert_char('x');
        assert_eq!(input.input, "xab");
        input.cursor_end();
        assert_eq!(input.cursor_position, 3);
    }

    #[test]
    fn input_clear() {
        let mut input = InputState::with_text("/some/path".to_string());
        input.clear();
        assert!(input.input.is_empty());
        assert_eq!(input.cursor_position, 0);
    }

    fn buffer_to_string(buf: &Buffer, area: Rect) -> String {
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }
}
