//! File categories: a static extension table used to decorate tree rows.

use std::path::Path;

/// Cosmetic grouping of a file by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Media,
    Images,
    Documents,
    Archives,
    Other,
}

/// Extension sets, scanned in this order; first match wins.
const GROUPS: &[(Category, &[&str])] = &[
    (Category::Media, &["mp3", "wav", "mp4", "avi", "mkv", "flac"]),
    (Category::Images, &["jpg", "jpeg", "png", "gif", "bmp"]),
    (
        Category::Documents,
        &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "md"],
    ),
    (Category::Archives, &["zip", "rar", "tar", "gz", "7z"]),
];

/// Glyph shown in front of folders.
pub const FOLDER_GLYPH: &str = "📁";
/// ASCII tag shown in front of folders when icons are disabled.
pub const FOLDER_TAG: &str = "[D]";

/// Map an extension (without the leading dot) to its category.
///
/// Matching is case-insensitive. An empty or unknown extension yields `Other`.
pub fn classify(extension: &str) -> Category {
    if extension.is_empty() {
        return Category::Other;
    }
    let ext = extension.to_lowercase();
    GROUPS
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Extract the final suffix of a file name, or `""` if there is none.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(name: &str) -> &str {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

impl Category {
    /// Categorize a file by its name.
    pub fn for_file_name(name: &str) -> Self {
        classify(extension_of(name))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Media => "Media",
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Archives => "Archives",
            Category::Other => "Other",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Category::Media => "🎬",
            Category::Images => "🖼",
            Category::Documents => "📄",
            Category::Archives => "🗃",
            Category::Other => "📦",
        }
    }

    /// Fallback tag for terminals without emoji support.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Media => "[M]",
            Category::Images => "[I]",
            Category::Documents => "[T]",
            Category::Archives => "[A]",
            Category::Other => "[?]",
        }
    }
}
