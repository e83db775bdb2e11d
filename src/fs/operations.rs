use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// `rename(2)` error for a move across filesystems.
#[cfg(unix)]
const CROSS_DEVICE: i32 = 18; // EXDEV
#[cfg(windows)]
const CROSS_DEVICE: i32 = 17; // ERROR_NOT_SAME_DEVICE

/// Delete exactly one file. Directories are refused by the OS.
pub fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path)?;
    Ok(())
}

/// Move the entry at `src` into `dest_dir`, keeping its name.
///
/// Refuses to overwrite an existing entry of the same name. Uses `fs::rename`
/// and falls back to copy+delete only when the rename crosses devices.
/// Returns the final path.
pub fn move_into(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no filename"))?;

    if !fs::metadata(dest_dir)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", dest_dir.display()),
        )
        .into());
    }

    let dest = dest_dir.join(name);
    if fs::symlink_metadata(&dest).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display()),
        )
        .into());
    }

    match fs::rename(src, &dest) {
        Ok(()) => Ok(dest),
        Err(e) if is_cross_device(&e) => {
            copy_then_remove(src, &dest)?;
            Ok(dest)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(any(unix, windows))]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(CROSS_DEVICE)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}

/// Cross-device move: copy `src` to `dest`, then remove `src`.
///
/// A failed copy removes whatever part of `dest` was written, so `src` stays
/// the only copy.
fn copy_then_remove(src: &Path, dest: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(src)?.file_type();
    if file_type.is_dir() {
        fs::create_dir(dest)?;
        if let Err(e) = copy_dir_contents(src, dest, 0) {
            let _ = fs::remove_dir_all(dest);
            return Err(e);
        }
        fs::remove_dir_all(src)
    } else {
        if let Err(e) = copy_entry(src, dest, file_type) {
            let _ = fs::remove_file(dest);
            return Err(e);
        }
        fs::remove_file(src)
    }
}

/// Nesting limit for the recursive copy.
const MAX_COPY_DEPTH: usize = 64;

/// Copy a directory tree. Symlinks are recreated as links, never followed.
fn copy_dir_recursive(src: &Path, dest: &Path, depth: usize) -> io::Result<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("maximum copy depth ({MAX_COPY_DEPTH}) exceeded"),
        ));
    }

    fs::create_dir(dest)?;
    copy_dir_contents(src, dest, depth)
}

fn copy_dir_contents(src: &Path, dest: &Path, depth: usize) -> io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dest_path, depth + 1)?;
        } else {
            copy_entry(&src_path, &dest_path, file_type)?;
        }
    }
    Ok(())
}

/// Copy one non-directory entry, recreating symlinks as symlinks.
fn copy_entry(src: &Path, dest: &Path, file_type: fs::FileType) -> io::Result<()> {
    if file_type.is_symlink() {
        copy_symlink(src, dest)
    } else {
        fs::copy(src, dest).map(|_| ())
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dest)
}

#[cfg(windows)]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    if fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(target, dest)
    } else {
        std::os::windows::fs::symlink_file(target, dest)
    }
}

#[cfg(not(any(unix, windows)))]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest).map(|_| ())
}
