use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;
use crate::controller::State;
use crate::fs::tree::NodeKind;
use crate::theme::ThemeColors;

/// Render the application UI.
pub fn render(app: &mut App, theme: &ThemeColors, frame: &mut Frame) {
    let [tree_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

    let title = match app.controller.state() {
        State::RootLoaded(root) => format!(" {} ", root.path.display()),
        State::NoRootChosen => " Indexicate ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));

    let inner = block.inner(tree_area);
    app.tree_area = inner;
    app.update_scroll(inner.height as usize);

    if app.controller.tree().is_none() {
        frame.render_widget(block, tree_area);
        render_placeholder(theme, inner, frame);
    } else {
        let tree_widget = TreeWidget::new(&app.rows, theme, app.use_icons)
            .cursor(app.cursor, app.scroll_offset)
            .selection(app.controller.selection())
            .block(block);
        frame.render_widget(tree_widget, tree_area);
    }

    let (path_str, info) = status_text(app);
    frame.render_widget(StatusBarWidget::new(&path_str, &info, theme), status_area);
}

fn render_placeholder(theme: &ThemeColors, area: Rect, frame: &mut Frame) {
    let line = Line::from(vec![
        Span::styled("No folder chosen. Press ", Style::default().fg(theme.dim_fg)),
        Span::styled("c", Style::default().fg(theme.info_fg)),
        Span::styled(" to choose one.", Style::default().fg(theme.dim_fg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Path and kind of the selection, or of the cursor row when nothing is selected.
fn status_text(app: &App) -> (String, String) {
    let focused = match app.controller.selected_node() {
        Some(node) => Some((&node.path, node.kind, node.category)),
        None => app.rows.get(app.cursor).map(|r| (&r.path, r.kind, r.category)),
    };
    let Some((path, kind, category)) = focused else {
        return (String::new(), String::new());
    };
    let info = match kind {
        NodeKind::Folder => "Folder",
        NodeKind::File => category.label(),
    };
    (path.display().to_string(), format!("{} ", info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::error::Result;
    use crate::fs::opener::Launch;
    use crate::theme::dark_theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs::File;
    use std::path::Path;
    use tempfile::TempDir;

    struct NoLaunch;

    impl Launch for NoLaunch {
        fn open(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let theme = dark_theme();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, &theme, frame)).unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn placeholder_without_root() {
        let mut app = App::new(Controller::new(Box::new(NoLaunch)), false);
        let lines = draw(&mut app, 60, 6);
        assert!(lines[1].contains("No folder chosen"));
        assert!(lines[0].contains("Indexicate"));
    }

    #[test]
    fn tree_and_status_bar_with_root() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("clip.mkv")).unwrap();
        let mut controller = Controller::new(Box::new(NoLaunch));
        controller.choose_root(dir.path()).unwrap();
        assert!(controller.select(&dir.path().join("clip.mkv")));
        let mut app = App::new(controller, false);

        let lines = draw(&mut app, 120, 6);
        assert!(lines[2].contains("[M] clip.mkv"));
        assert!(lines[5].contains("clip.mkv"));
        assert!(lines[5].contains("Media"));
        assert_eq!(app.tree_area, Rect::new(1, 1, 118, 3));
    }
}
