//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light). Each file category gets its own
//! foreground so groups are recognizable at a glance.

use ratatui::style::Color;

use crate::category::Category;
use crate::config::ThemeConfig;

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tree panel
    pub tree_fg: Color,
    pub tree_selected_bg: Color,
    pub tree_selected_fg: Color,
    pub tree_dir_fg: Color,

    // Per-category file colors
    pub media_fg: Color,
    pub images_fg: Color,
    pub documents_fg: Color,
    pub archives_fg: Color,
    pub other_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & dialogs
    pub border_fg: Color,
    pub dialog_border_fg: Color,

    // Semantic colors
    pub error_fg: Color,
    pub warning_fg: Color,
    pub info_fg: Color,
    pub dim_fg: Color,
}

impl ThemeColors {
    /// Foreground for a file of the given category.
    pub fn category_fg(&self, category: Category) -> Color {
        match category {
            Category::Media => self.media_fg,
            Category::Images => self.images_fg,
            Category::Documents => self.documents_fg,
            Category::Archives => self.archives_fg,
            Category::Other => self.other_fg,
        }
    }
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        tree_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        tree_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        tree_dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)

        media_fg: Color::Rgb(245, 194, 231),     // #f5c2e7 (pink)
        images_fg: Color::Rgb(166, 227, 161),    // #a6e3a1 (green)
        documents_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        archives_fg: Color::Rgb(250, 179, 135),  // #fab387 (peach)
        other_fg: Color::Rgb(205, 214, 244),     // #cdd6f4 (text)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)
        dialog_border_fg: Color::Rgb(137, 180, 250),

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        warning_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        info_fg: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),            // #4c4f69 (text)
        tree_selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        tree_selected_fg: Color::Rgb(76, 79, 105),
        tree_dir_fg: Color::Rgb(30, 102, 245), // #1e66f5 (blue)

        media_fg: Color::Rgb(234, 118, 203),    // #ea76cb (pink)
        images_fg: Color::Rgb(64, 160, 43),     // #40a02b (green)
        documents_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
        archives_fg: Color::Rgb(254, 100, 11),  // #fe640b (peach)
        other_fg: Color::Rgb(76, 79, 105),

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        dialog_border_fg: Color::Rgb(30, 102, 245),

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        warning_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
        info_fg: Color::Rgb(30, 102, 245),
        dim_fg: Color::Rgb(156, 160, 176), // #9ca0b0 (overlay0)
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config. Unknown schemes are dark.
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref() {
        Some("light") => light_theme(),
        _ => dark_theme(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dark_theme() {
        let config = ThemeConfig {
            scheme: Some("dark".to_string()),
        };
        assert_eq!(resolve_theme(&config).tree_dir_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_resolve_light_theme() {
        let config = ThemeConfig {
            scheme: Some("light".to_string()),
        };
        assert_eq!(resolve_theme(&config).tree_dir_fg, Color::Rgb(30, 102, 245));
    }

    #[test]
    fn test_resolve_default_is_dark() {
        let theme = resolve_theme(&ThemeConfig::default());
        assert_eq!(theme.tree_dir_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_dark() {
        let config = ThemeConfig {
            scheme: Some("neon".to_string()),
        };
        assert_eq!(resolve_theme(&config).tree_dir_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_named_categories_have_distinct_colors() {
        for theme in [dark_theme(), light_theme()] {
            let named = [
                Category::Media,
                Category::Images,
                Category::Documents,
                Category::Archives,
            ];
            for (i, a) in named.iter().enumerate() {
                for b in &named[i + 1..] {
                    assert_ne!(theme.category_fg(*a), theme.category_fg(*b));
                }
            }
            assert_eq!(theme.category_fg(Category::Other), theme.tree_fg);
        }
    }

    #[test]
    fn test_dark_and_light_different() {
        let dark = dark_theme();
        let light = light_theme();
        assert_ne!(dark.tree_fg, light.tree_fg);
        assert_ne!(dark.tree_selected_bg, light.tree_selected_bg);
        assert_ne!(dark.tree_dir_fg, light.tree_dir_fg);
        assert_ne!(dark.error_fg, light.error_fg);
    }
}
