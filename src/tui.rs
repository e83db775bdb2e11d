use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, Frame, Terminal};

use crate::error::Result;

/// Terminal wrapper that manages raw mode and alternate screen.
///
/// This is the application's single window. It also remembers the last full
/// frame so modal dialogs can be drawn on top of it.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    mouse_enabled: bool,
    backdrop: Buffer,
}

impl Tui {
    /// Initialize the terminal: enter alternate screen and enable raw mode.
    /// Optionally enables mouse capture.
    pub fn new(enable_mouse: bool) -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        if enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            mouse_enabled: enable_mouse,
            backdrop: Buffer::default(),
        })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        if self.mouse_enabled {
            execute!(self.terminal.backend_mut(), DisableMouseCapture)?;
        }
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw a full frame and keep it as the backdrop for modal dialogs.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        let completed = self.terminal.draw(render)?;
        self.backdrop = completed.buffer.clone();
        Ok(())
    }

    /// Draw over the last full frame without replacing it.
    pub fn draw_modal(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        let backdrop = &self.backdrop;
        self.terminal.draw(|frame| {
            copy_backdrop(backdrop, frame.buffer_mut());
            render(frame);
        })?;
        Ok(())
    }
}

/// Copy cells from `src` where both buffers overlap.
fn copy_backdrop(src: &Buffer, dst: &mut Buffer) {
    let overlap = src.area.intersection(dst.area);
    for y in overlap.top()..overlap.bottom() {
        for x in overlap.left()..overlap.right() {
            if let (Some(from), Some(to)) = (src.cell((x, y)), dst.cell_mut((x, y))) {
                *to = from.clone();
            }
        }
    }
}

/// Install a panic hook that restores the terminal before printing panic info.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture);
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
