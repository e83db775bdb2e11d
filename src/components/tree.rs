use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::tree::{FlatItem, NodeKind};
use crate::theme::ThemeColors;

/// Tree widget that renders the flattened rows with box-drawing characters.
pub struct TreeWidget<'a> {
    items: &'a [FlatItem],
    cursor: usize,
    selection: Option<&'a Path>,
    scroll_offset: usize,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(items: &'a [FlatItem], theme: &'a ThemeColors, use_icons: bool) -> Self {
        Self {
            items,
            cursor: 0,
            selection: None,
            scroll_offset: 0,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn cursor(mut self, cursor: usize, scroll_offset: usize) -> Self {
        self.cursor = cursor;
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn selection(mut self, selection: Option<&'a Path>) -> Self {
        self.selection = selection;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    /// Build the prefix string for tree indentation using box-drawing characters.
    ///
    /// Walks back through the rows to find each ancestor and whether it was
    /// the last of its siblings.
    fn build_prefix(item: &FlatItem, items: &[FlatItem], item_index: usize) -> String {
        if item.depth == 0 {
            return String::new();
        }

        let mut parts: Vec<&str> = Vec::new();

        for d in 1..item.depth {
            let mut ancestor_is_last = false;
            for j in (0..item_index).rev() {
                if items[j].depth == d {
                    ancestor_is_last = items[j].is_last_sibling;
                    break;
                }
                if items[j].depth < d {
                    break;
                }
            }
            if ancestor_is_last {
                parts.push("   ");
            } else {
                parts.push("│  ");
            }
        }

        if item.is_last_sibling {
            parts.push("└──");
        } else {
            parts.push("├──");
        }

        parts.join("")
    }

    /// Expand/collapse marker shown before folder glyphs.
    fn fold_marker(item: &FlatItem) -> &'static str {
        match item.kind {
            NodeKind::Folder if item.is_expanded => "▾ ",
            NodeKind::Folder => "▸ ",
            NodeKind::File => "",
        }
    }

    fn row_style(&self, item: &FlatItem, is_selected: bool, is_cursor: bool) -> Style {
        if is_selected {
            return Style::default()
                .bg(self.theme.tree_selected_bg)
                .fg(self.theme.tree_selected_fg)
                .add_modifier(Modifier::BOLD);
        }
        let base = match item.kind {
            NodeKind::Folder => Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD),
            NodeKind::File => Style::default().fg(self.theme.category_fg(item.category)),
        };
        if is_cursor {
            base.add_modifier(Modifier::UNDERLINED)
        } else {
            base
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let items = self.items;
        let visible_height = inner_area.height as usize;

        if items.is_empty() || visible_height == 0 {
            return;
        }

        let visible_items = items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);

        for (i, (idx, item)) in visible_items.enumerate() {
            let y = inner_area.y + i as u16;

            let prefix = Self::build_prefix(item, items, idx);
            let is_selected = self.selection == Some(item.path.as_path());
            let is_cursor = idx == self.cursor;
            let style = self.row_style(item, is_selected, is_cursor);

            let line_content = format!(
                "{}{}{}",
                prefix,
                Self::fold_marker(item),
                item.label(self.use_icons)
            );
            let line = Line::from(Span::styled(line_content, style));
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::theme::dark_theme;
    use std::path::PathBuf;

    fn item(name: &str, kind: NodeKind, depth: usize, last: bool) -> FlatItem {
        FlatItem {
            name: name.to_string(),
            path: PathBuf::from("/r").join(name),
            kind,
            category: Category::for_file_name(name),
            depth,
            is_expanded: kind == NodeKind::Folder,
            is_last_sibling: last,
        }
    }

    fn sample() -> Vec<FlatItem> {
        vec![
            item("r", NodeKind::Folder, 0, true),
            item("notes.txt", NodeKind::File, 1, false),
            item("sub", NodeKind::Folder, 1, true),
            item("a.zip", NodeKind::File, 2, true),
        ]
    }

    fn render_lines(widget: TreeWidget, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn prefixes_follow_sibling_structure() {
        let items = sample();
        assert_eq!(TreeWidget::build_prefix(&items[0], &items, 0), "");
        assert_eq!(TreeWidget::build_prefix(&items[1], &items, 1), "├──");
        assert_eq!(TreeWidget::build_prefix(&items[2], &items, 2), "└──");
        assert_eq!(TreeWidget::build_prefix(&items[3], &items, 3), "   └──");
    }

    #[test]
    fn renders_ascii_labels() {
        let items = sample();
        let theme = dark_theme();
        let lines = render_lines(TreeWidget::new(&items, &theme, false), 40, 4);
        assert_eq!(lines[0], "▾ [D] r");
        assert_eq!(lines[1], "├──[T] notes.txt");
        assert_eq!(lines[2], "└──▾ [D] sub");
        assert_eq!(lines[3], "   └──[A] a.zip");
    }

    #[test]
    fn scroll_offset_skips_rows() {
        let items = sample();
        let theme = dark_theme();
        let widget = TreeWidget::new(&items, &theme, false).cursor(3, 2);
        let lines = render_lines(widget, 40, 2);
        assert_eq!(lines[0], "└──▾ [D] sub");
        assert_eq!(lines[1], "   └──[A] a.zip");
    }

    #[test]
    fn selected_row_uses_selection_colors() {
        let items = sample();
        let theme = dark_theme();
        let selected = items[1].path.clone();
        let widget = TreeWidget::new(&items, &theme, false).selection(Some(selected.as_path()));
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert_eq!(buf.cell((4, 1)).unwrap().bg, theme.tree_selected_bg);
        assert_ne!(buf.cell((4, 2)).unwrap().bg, theme.tree_selected_bg);
    }

    #[test]
    fn file_rows_use_category_color() {
        let items = sample();
        let theme = dark_theme();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        TreeWidget::new(&items, &theme, false)
            .cursor(0, 0)
            .render(area, &mut buf);
        assert_eq!(
            buf.cell((4, 1)).unwrap().fg,
            theme.category_fg(Category::Documents)
        );
        assert_eq!(
            buf.cell((7, 3)).unwrap().fg,
            theme.category_fg(Category::Archives)
        );
    }

    #[test]
    fn empty_items_render_nothing() {
        let theme = dark_theme();
        let lines = render_lines(TreeWidget::new(&[], &theme, true), 10, 2);
        assert!(lines.iter().all(|l| l.is_empty()));
    }
}
