//! Open a path with the platform's default application.

use std::cell::RefCell;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::error::{AppError, Result};

/// Something that can hand a path to a default-application launcher.
pub trait Launch {
    /// Issue the launch and return without waiting for the application.
    fn open(&self, path: &Path) -> Result<()>;
}

/// Launcher program family, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `xdg-open` (Linux and the BSDs).
    Xdg,
    /// `open` (macOS).
    MacOs,
    /// `cmd /C start` (Windows).
    Windows,
}

impl Platform {
    /// Pick the launcher for the platform we were compiled for.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Xdg
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = match self {
            Platform::Xdg => Command::new("xdg-open"),
            Platform::MacOs => Command::new("open"),
            Platform::Windows => {
                let mut cmd = Command::new("cmd");
                // `start` takes the window title as its first quoted argument.
                cmd.args(["/C", "start", ""]);
                cmd
            }
        };
        cmd.arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

/// Default-application launcher. Spawned launchers are kept until they exit
/// so they can be reaped.
#[derive(Debug)]
pub struct Opener {
    platform: Platform,
    children: RefCell<Vec<Child>>,
}

impl Opener {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn detect() -> Self {
        Self::new(Platform::detect())
    }

    /// Reap launchers that have exited. Returns how many are still running.
    pub fn reap(&self) -> usize {
        let mut children = self.children.borrow_mut();
        children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
        children.len()
    }

    fn launch(&self, mut cmd: Command, path: &Path) -> Result<()> {
        self.reap();
        let child = cmd.spawn().map_err(|source| AppError::LaunchFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            platform = ?self.platform,
            pid = child.id(),
            "launched default application"
        );
        self.children.borrow_mut().push(child);
        Ok(())
    }
}

impl Launch for Opener {
    fn open(&self, path: &Path) -> Result<()> {
        self.launch(self.platform.command(path), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::thread;
    use std::time::{Duration, Instant};

    fn args(cmd: &Command) -> Vec<&OsStr> {
        cmd.get_args().collect()
    }

    #[test]
    fn xdg_command_passes_path() {
        let cmd = Platform::Xdg.command(Path::new("/tmp/a b.png"));
        assert_eq!(cmd.get_program(), "xdg-open");
        assert_eq!(args(&cmd), vec![OsStr::new("/tmp/a b.png")]);
    }

    #[test]
    fn macos_command_passes_path() {
        let cmd = Platform::MacOs.command(Path::new("/Users/me/notes.txt"));
        assert_eq!(cmd.get_program(), "open");
        assert_eq!(args(&cmd), vec![OsStr::new("/Users/me/notes.txt")]);
    }

    #[test]
    fn windows_command_uses_start_with_empty_title() {
        let cmd = Platform::Windows.command(Path::new(r"C:\music\song.mp3"));
        assert_eq!(cmd.get_program(), "cmd");
        assert_eq!(
            args(&cmd),
            vec![
                OsStr::new("/C"),
                OsStr::new("start"),
                OsStr::new(""),
                OsStr::new(r"C:\music\song.mp3"),
            ]
        );
    }

    #[test]
    fn detect_matches_target() {
        let platform = Platform::detect();
        if cfg!(target_os = "macos") {
            assert_eq!(platform, Platform::MacOs);
        } else if cfg!(target_os = "windows") {
            assert_eq!(platform, Platform::Windows);
        } else {
            assert_eq!(platform, Platform::Xdg);
        }
        assert_eq!(Opener::detect().platform, platform);
    }

    #[cfg(unix)]
    #[test]
    fn exited_launchers_are_reaped() {
        let opener = Opener::new(Platform::Xdg);
        opener
            .launch(Command::new("true"), Path::new("/tmp"))
            .unwrap();
        let pid = opener.children.borrow()[0].id();

        let deadline = Instant::now() + Duration::from_secs(5);
        while opener.reap() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(opener.reap(), 0);
        if cfg!(target_os = "linux") {
            // A zombie would still have a /proc entry.
            assert!(!Path::new(&format!("/proc/{pid}")).exists());
        }
    }

    #[cfg(unix)]
    #[test]
    fn next_launch_reaps_previous_ones() {
        let opener = Opener::new(Platform::Xdg);
        opener.launch(Command::new("true"), Path::new("/a")).unwrap();
        thread::sleep(Duration::from_millis(200));
        let mut sleep = Command::new("sleep");
        sleep.arg("5");
        opener.launch(sleep, Path::new("/b")).unwrap();

        assert_eq!(opener.children.borrow().len(), 1);
        for child in opener.children.borrow_mut().iter_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    #[test]
    fn spawn_failure_is_launch_failed() {
        let opener = Opener::new(Platform::Xdg);
        let err = opener
            .launch(
                Command::new("/nonexistent/indexicate-launcher"),
                Path::new("/tmp/x.pdf"),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::LaunchFailed { ref path, .. } if path == Path::new("/tmp/x.pdf")));
        assert_eq!(opener.reap(), 0);
    }
}
