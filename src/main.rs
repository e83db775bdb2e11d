mod app;
mod category;
mod components;
mod config;
mod controller;
mod error;
mod event;
mod fs;
mod handler;
mod prompt;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::AppConfig;
use crate::controller::Controller;
use crate::event::{Event, EventHandler};
use crate::fs::opener::Opener;
use crate::prompt::TuiPrompt;
use crate::tui::{install_panic_hook, Tui};

/// Browse a folder as a tree with files grouped by kind.
#[derive(Parser, Debug)]
#[command(name = "indexicate", version, about)]
struct Cli {
    /// Folder to open (defaults to the configured path, or none)
    path: Option<PathBuf>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable mouse support
    #[arg(long)]
    no_mouse: bool,
}

/// Send `tracing` output to the log file. The terminal belongs to the UI, so
/// nothing is logged when no file can be opened.
fn init_logging(config: &AppConfig) {
    let Some(path) = config.log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level())
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let overrides = AppConfig {
        general: config::GeneralConfig {
            default_path: None,
            mouse: cli.no_mouse.then_some(false),
        },
        ..Default::default()
    };
    let config = AppConfig::load(cli.config.as_deref(), Some(&overrides));
    init_logging(&config);

    let theme = theme::resolve_theme(&config.theme);
    tracing::info!(
        scheme = config.theme_scheme(),
        mouse = config.mouse_enabled(),
        "starting"
    );

    let mut controller = Controller::new(Box::new(Opener::detect()));
    if let Some(path) = &cli.path {
        // An explicit path that cannot be opened is fatal.
        controller.choose_root(path)?;
    } else if let Some(path) = config.default_path() {
        if let Err(e) = controller.choose_root(&path) {
            tracing::warn!(path = %path.display(), error = %e, "default path unavailable");
        }
    }

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(controller, config.use_icons());
    let mut events = EventHandler::new(Duration::from_millis(250));

    let result = run(&mut tui, &mut events, &mut app, &theme);

    tui.restore()?;
    tracing::info!("exiting");
    result
}

fn run(
    tui: &mut Tui,
    events: &mut EventHandler,
    app: &mut App,
    theme: &theme::ThemeColors,
) -> error::Result<()> {
    loop {
        tui.draw(|frame| ui::render(app, theme, frame))?;

        let action = match events.next()? {
            Event::Key(key) => handler::handle_key_event(key),
            Event::Mouse(mouse) => handler::handle_mouse_event(mouse),
            Event::Tick | Event::Resize(_, _) => None,
        };

        if let Some(action) = action {
            let mut prompt = TuiPrompt::new(tui, events, theme);
            app.apply(action, &mut prompt);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
