use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " ⏎:open  o:open  r:reveal  m:move  d:del  c:folder  q:quit ";

/// Status bar widget: the focused path on the left, its category in the
/// middle and key hints on the right.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    file_info: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, file_info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            file_info,
            theme,
        }
    }
}

/// Keep the last `max` characters, marking the cut with `...`.
fn truncate_left(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().skip(len - max).collect();
    }
    let tail: String = s.chars().skip(len - (max - 3)).collect();
    format!("...{}", tail)
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let bar_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        buf.set_style(area, bar_style);

        let hints_len = KEY_HINTS.chars().count();
        let show_hints = width > hints_len + 10;
        let remaining = if show_hints { width - hints_len } else { width };

        let info_len = self.file_info.chars().count();
        let path_budget = remaining.saturating_sub(info_len + 1);
        let path_display = truncate_left(self.path_str, path_budget);
        let gap = remaining
            .saturating_sub(path_display.chars().count())
            .saturating_sub(info_len);

        let mut spans = vec![
            Span::styled(path_display, bar_style),
            Span::styled(" ".repeat(gap), bar_style),
            Span::styled(self.file_info, bar_style.fg(self.theme.info_fg)),
        ];
        if show_hints {
            spans.push(Span::styled(
                KEY_HINTS,
                bar_style.fg(self.theme.dim_fg).add_modifier(Modifier::DIM),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    fn render(path: &str, info: &str, width: u16) -> String {
        let theme = dark_theme();
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(path, info, &theme).render(area, &mut buf);
        (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_path_info_and_hints() {
        let line = render("/home/me/music/song.mp3", "Media", 120);
        assert!(line.starts_with("/home/me/music/song.mp3"));
        assert!(line.contains("Media"));
        assert!(line.contains("m:move"));
    }

    #[test]
    fn long_path_truncated_from_left() {
        let path = format!("/very{}/end.txt", "/deep".repeat(30));
        let line = render(&path, "Documents", 100);
        assert!(line.starts_with("..."));
        assert!(line.contains("end.txt"));
        assert!(line.contains("Documents"));
    }

    #[test]
    fn narrow_bar_drops_hints() {
        let line = render("/tmp", "Folder", 30);
        assert!(line.starts_with("/tmp"));
        assert!(!line.contains("q:quit"));
    }

    #[test]
    fn truncate_left_handles_multibyte() {
        assert_eq!(truncate_left("ab", 5), "ab");
        assert_eq!(truncate_left("/tmp/ééééé", 6), "...ééé");
        assert_eq!(truncate_left("abcdef", 2), "ef");
    }
}
