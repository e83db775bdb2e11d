use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::category::{Category, FOLDER_GLYPH, FOLDER_TAG};
use crate::error::{AppError, Result};

/// Kind of filesystem entry a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// A node in the filesystem tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Only meaningful for files; folders carry `Other`.
    pub category: Category,
    /// Sorted by case-insensitive name. Always empty for files.
    pub children: Vec<Node>,
    /// View state for folders; not filesystem state.
    pub expanded: bool,
}

impl Node {
    fn new(path: &Path, kind: NodeKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let category = match kind {
            NodeKind::File => Category::for_file_name(&name),
            NodeKind::Folder => Category::Other,
        };
        Self {
            name,
            path: path.to_path_buf(),
            kind,
            category,
            children: Vec::new(),
            expanded: false,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn find(&self, target: &Path) -> Option<&Node> {
        if self.path == target {
            return Some(self);
        }
        if !target.starts_with(&self.path) {
            return None;
        }
        self.children.iter().find_map(|child| child.find(target))
    }

    /// Find a mutable reference to a node by path.
    pub fn find_mut(&mut self, target: &Path) -> Option<&mut Node> {
        if self.path == target {
            return Some(self);
        }
        if !target.starts_with(&self.path) {
            return None;
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(target))
    }

    pub fn contains(&self, target: &Path) -> bool {
        self.find(target).is_some()
    }

    /// Flip `expanded` on the folder at `target`. Returns false for files or
    /// paths outside the tree.
    pub fn toggle_expand(&mut self, target: &Path) -> bool {
        match self.find_mut(target) {
            Some(node) if node.is_folder() => {
                node.expanded = !node.expanded;
                true
            }
            _ => false,
        }
    }

    /// Splice a freshly built subtree in at its own path.
    ///
    /// Expanded flags from the old subtree are carried over for paths that
    /// still exist. Returns false if the path is not part of this tree.
    pub fn replace_subtree(&mut self, mut fresh: Node) -> bool {
        let Some(slot) = self.find_mut(&fresh.path) else {
            return false;
        };
        let mut expanded = HashSet::new();
        slot.collect_expanded(&mut expanded);
        fresh.restore_expanded(&expanded);
        *slot = fresh;
        true
    }

    /// Collect the paths of all expanded folders in this subtree.
    pub fn collect_expanded(&self, out: &mut HashSet<PathBuf>) {
        if self.expanded {
            out.insert(self.path.clone());
        }
        for child in &self.children {
            child.collect_expanded(out);
        }
    }

    /// Re-expand every folder whose path appears in `expanded`.
    pub fn restore_expanded(&mut self, expanded: &HashSet<PathBuf>) {
        if self.is_folder() && expanded.contains(&self.path) {
            self.expanded = true;
        }
        for child in &mut self.children {
            child.restore_expanded(expanded);
        }
    }

    /// Rows currently visible: the root plus the children of every expanded folder.
    pub fn flatten(&self) -> Vec<FlatItem> {
        let mut items = Vec::new();
        Self::flatten_node(self, 0, true, &mut items);
        items
    }

    fn flatten_node(node: &Node, depth: usize, is_last: bool, items: &mut Vec<FlatItem>) {
        items.push(FlatItem {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            category: node.category,
            depth,
            is_expanded: node.expanded,
            is_last_sibling: is_last,
        });

        if node.expanded {
            let count = node.children.len();
            for (i, child) in node.children.iter().enumerate() {
                Self::flatten_node(child, depth + 1, i + 1 == count, items);
            }
        }
    }
}

/// A flattened representation of a tree node for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatItem {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub category: Category,
    pub depth: usize,
    pub is_expanded: bool,
    pub is_last_sibling: bool,
}

impl FlatItem {
    pub fn label(&self, use_icons: bool) -> String {
        format!("{} {}", glyph(self.kind, self.category, use_icons), self.name)
    }
}

/// Icon glyph (or ASCII tag when icons are off) for an entry.
pub fn glyph(kind: NodeKind, category: Category, use_icons: bool) -> &'static str {
    match (kind, use_icons) {
        (NodeKind::Folder, true) => FOLDER_GLYPH,
        (NodeKind::Folder, false) => FOLDER_TAG,
        (NodeKind::File, true) => category.glyph(),
        (NodeKind::File, false) => category.tag(),
    }
}

/// Build the tree rooted at `root`.
///
/// Fails with `NotFound` if `root` does not exist. Child directories that
/// cannot be listed are left out of the result.
pub fn build(root: &Path) -> Result<Node> {
    let root = absolutize(root)?;
    let metadata = match fs::metadata(&root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(root));
        }
        Err(e) => return Err(e.into()),
    };
    let mut stack = Vec::new();
    Ok(build_node(&root, metadata.is_dir(), &mut stack)?)
}

/// Rebuild the subtree at `path`, typically the parent of a mutated entry.
pub fn rebuild_subtree(path: &Path) -> Result<Node> {
    build(path)
}

fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// `stack` holds the canonical paths of the directories being walked, so a
/// symlink pointing back up the tree is not followed twice.
fn build_node(path: &Path, is_dir: bool, stack: &mut Vec<PathBuf>) -> io::Result<Node> {
    if !is_dir {
        return Ok(Node::new(path, NodeKind::File));
    }

    let mut node = Node::new(path, NodeKind::Folder);
    let real = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if stack.contains(&real) {
        tracing::debug!(path = %path.display(), "directory cycle, not descending");
        return Ok(node);
    }

    let entries = fs::read_dir(path)?;
    stack.push(real);

    let mut children = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let child_path = entry.path();
        // Follows symlinks; a dangling link is listed as a file.
        let child_is_dir = fs::metadata(&child_path)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        match build_node(&child_path, child_is_dir, stack) {
            Ok(child) => children.push(child),
            Err(e) => {
                tracing::debug!(path = %child_path.display(), error = %e, "skipping unreadable directory");
            }
        }
    }

    stack.pop();
    sort_children(&mut children);
    node.children = children;
    Ok(node)
}

/// Case-insensitive name order, exact name as tie-breaker.
fn sort_children(children: &mut [Node]) {
    children.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}
