use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// The chosen root does not exist.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O errors from filesystem operations, carrying the OS message.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The default-application launcher could not be started.
    #[error("Could not open {}: {source}", path.display())]
    LaunchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn not_found_displays_path() {
        let err = AppError::NotFound(PathBuf::from("/nonexistent"));
        assert_eq!(err.to_string(), "Not found: /nonexistent");
    }

    #[test]
    fn launch_failed_mentions_path_and_cause() {
        let err = AppError::LaunchFailed {
            path: PathBuf::from("/tmp/song.mp3"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "xdg-open missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/song.mp3"));
        assert!(msg.contains("xdg-open missing"));
    }
}
