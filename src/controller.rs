//! Interaction controller: owns the tree snapshot and selection, and runs
//! user commands against the tree builder and the OS facade.
//!
//! Nothing here knows about the terminal. User-facing collaborators (the
//! delete confirmation, the directory chooser and the error display) are
//! reached through the [`Prompt`] trait, which the view layer implements.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::opener::Launch;
use crate::fs::operations;
use crate::fs::tree::{self, Node};

/// User-facing collaborators a command may need.
pub trait Prompt {
    /// Ask whether `name` should be deleted.
    fn confirm_delete(&mut self, name: &str) -> bool;
    /// Ask for a directory, starting from `start`. `None` means cancelled.
    fn choose_directory(&mut self, title: &str, start: &Path) -> Option<PathBuf>;
    /// Surface an error message to the user.
    fn show_error(&mut self, message: &str);
}

/// A user command, as produced by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ChooseRoot,
    ToggleExpand(PathBuf),
    Activate(PathBuf),
    OpenSelected,
    OpenSelectedLocation,
    DeleteSelected,
    MoveSelected,
}

/// Controller state.
#[derive(Debug)]
pub enum State {
    NoRootChosen,
    RootLoaded(Node),
}

pub struct Controller {
    state: State,
    selection: Option<PathBuf>,
    launcher: Box<dyn Launch>,
}

impl Controller {
    pub fn new(launcher: Box<dyn Launch>) -> Self {
        Self {
            state: State::NoRootChosen,
            selection: None,
            launcher,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// The current tree snapshot, if a root has been chosen.
    pub fn tree(&self) -> Option<&Node> {
        match &self.state {
            State::RootLoaded(root) => Some(root),
            State::NoRootChosen => None,
        }
    }

    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        let path = self.selection.as_deref()?;
        self.tree()?.find(path)
    }

    /// Select the node at `path`. Paths outside the snapshot are refused.
    pub fn select(&mut self, path: &Path) -> bool {
        if self.tree().is_some_and(|t| t.contains(path)) {
            self.selection = Some(path.to_path_buf());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Run a command. Errors stop here: they are logged and handed to the
    /// prompt's error display.
    pub fn dispatch(&mut self, command: Command, prompt: &mut dyn Prompt) {
        tracing::debug!(?command, "dispatch");
        if let Err(e) = self.run(command, prompt) {
            tracing::warn!(error = %e, "command failed");
            prompt.show_error(&e.to_string());
        }
    }

    fn run(&mut self, command: Command, prompt: &mut dyn Prompt) -> Result<()> {
        match command {
            Command::ChooseRoot => {
                let start = self.chooser_start();
                if let Some(path) = prompt.choose_directory("Choose folder", &start) {
                    self.choose_root(&path)?;
                }
                Ok(())
            }
            Command::ToggleExpand(path) => {
                self.toggle_expand(&path);
                Ok(())
            }
            Command::Activate(path) => self.activate(&path),
            Command::OpenSelected => self.open_selected(),
            Command::OpenSelectedLocation => self.open_selected_location(),
            Command::DeleteSelected => self.delete_selected(prompt),
            Command::MoveSelected => {
                let Some(selected) = self.selection.clone() else {
                    return Ok(());
                };
                let start = selected.parent().unwrap_or(&selected).to_path_buf();
                if let Some(dest) = prompt.choose_directory("Move to", &start) {
                    self.move_selected(&dest)?;
                }
                Ok(())
            }
        }
    }

    /// Build a fresh snapshot at `path`. On failure the state is unchanged.
    ///
    /// Only directories can be roots; a file is refused with `InvalidInput`.
    pub fn choose_root(&mut self, path: &Path) -> Result<()> {
        let mut root = tree::build(path)?;
        if !root.is_folder() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.path.display()),
            )
            .into());
        }
        root.expanded = true;
        tracing::info!(root = %root.path.display(), entries = root.children.len(), "root loaded");
        self.state = State::RootLoaded(root);
        self.selection = None;
        Ok(())
    }

    /// Flip a folder's expanded flag. Files and unknown paths are ignored.
    pub fn toggle_expand(&mut self, path: &Path) -> bool {
        match &mut self.state {
            State::RootLoaded(root) => root.toggle_expand(path),
            State::NoRootChosen => false,
        }
    }

    /// Folders toggle; files open with the default application.
    pub fn activate(&mut self, path: &Path) -> Result<()> {
        let is_folder = match self.tree().and_then(|t| t.find(path)) {
            Some(node) => node.is_folder(),
            None => return Ok(()),
        };
        if is_folder {
            self.toggle_expand(path);
            Ok(())
        } else {
            self.launcher.open(path)
        }
    }

    pub fn open_selected(&self) -> Result<()> {
        match self.selection.as_deref() {
            Some(path) => self.launcher.open(path),
            None => Ok(()),
        }
    }

    /// Open the directory containing the selection.
    pub fn open_selected_location(&self) -> Result<()> {
        match self.selection.as_deref() {
            Some(path) => self.launcher.open(path.parent().unwrap_or(path)),
            None => Ok(()),
        }
    }

    /// Delete the selected file after confirmation, then rebuild its parent.
    pub fn delete_selected(&mut self, prompt: &mut dyn Prompt) -> Result<()> {
        let Some(selected) = self.selection.clone() else {
            return Ok(());
        };
        let name = selected
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| selected.to_string_lossy().to_string());
        if !prompt.confirm_delete(&name) {
            return Ok(());
        }

        operations::delete_file(&selected)?;
        tracing::info!(path = %selected.display(), "deleted");
        self.selection = None;
        self.refresh_parent_of(&selected)
    }

    /// Move the selection into `dest_dir` and rebuild the source parent.
    ///
    /// The destination subtree is left as is until it is next rebuilt.
    pub fn move_selected(&mut self, dest_dir: &Path) -> Result<()> {
        let Some(selected) = self.selection.clone() else {
            return Ok(());
        };
        let moved_to = operations::move_into(&selected, dest_dir)?;
        tracing::info!(from = %selected.display(), to = %moved_to.display(), "moved");
        self.selection = None;
        self.refresh_parent_of(&selected)
    }

    /// Rebuild the directory containing `path` and splice it into the snapshot.
    ///
    /// When `path` was the root itself, its parent becomes the new root.
    fn refresh_parent_of(&mut self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        let in_tree = match &self.state {
            State::RootLoaded(root) => root.contains(parent),
            State::NoRootChosen => return Ok(()),
        };

        if in_tree {
            let fresh = tree::rebuild_subtree(parent)?;
            if let State::RootLoaded(root) = &mut self.state {
                root.replace_subtree(fresh);
            }
            self.revalidate_selection();
            Ok(())
        } else {
            self.choose_root(parent)
        }
    }

    fn revalidate_selection(&mut self) {
        if let Some(path) = self.selection.take() {
            self.select(&path);
        }
    }

    fn chooser_start(&self) -> PathBuf {
        self.tree()
            .map(|t| t.path.clone())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
