//! Picker palettes and their resolution from config.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

/// Colors used when drawing the picker.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub dir_fg: Color,
    pub file_fg: Color,
    pub symlink_fg: Color,
    /// Files the selection policy rejects.
    pub disabled_fg: Color,
    pub cursor_fg: Color,
    pub selected_bg: Color,
    pub permission_fg: Color,
    pub size_fg: Color,

    pub status_bg: Color,
    pub status_fg: Color,
    pub border_fg: Color,

    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub dim_fg: Color,
}

/// Catppuccin Mocha.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        dir_fg: Color::Rgb(137, 180, 250),        // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),       // #cdd6f4 (text)
        symlink_fg: Color::Rgb(148, 226, 213),    // #94e2d5 (teal)
        disabled_fg: Color::Rgb(108, 112, 134),   // #6c7086 (overlay0)
        cursor_fg: Color::Rgb(203, 166, 247),     // #cba6f7 (mauve)
        selected_bg: Color::Rgb(69, 71, 90),      // #45475a (surface1)
        permission_fg: Color::Rgb(127, 132, 156), // #7f849c (overlay1)
        size_fg: Color::Rgb(186, 194, 222),       // #bac2de (subtext1)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),
        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        warning_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        dim_fg: Color::Rgb(108, 112, 134),
    }
}

/// Catppuccin Latte.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        dir_fg: Color::Rgb(30, 102, 245),         // #1e66f5 (blue)
        file_fg: Color::Rgb(76, 79, 105),         // #4c4f69 (text)
        symlink_fg: Color::Rgb(23, 146, 153),     // #179299 (teal)
        disabled_fg: Color::Rgb(156, 160, 176),   // #9ca0b0 (overlay0)
        cursor_fg: Color::Rgb(136, 57, 239),      // #8839ef (mauve)
        selected_bg: Color::Rgb(204, 208, 218),   // #ccd0da (surface1)
        permission_fg: Color::Rgb(140, 143, 161), // #8c8fa1 (overlay1)
        size_fg: Color::Rgb(92, 95, 119),         // #5c5f77 (subtext1)

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),
        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)

        error_fg: Color::Rgb(210, 15, 57),
        warning_fg: Color::Rgb(223, 142, 29),
        success_fg: Color::Rgb(64, 160, 43),
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

/// Parse `"#aabbcc"` (hash optional) into an RGB color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Resolve the palette named by `config.scheme`.
///
/// `"custom"` starts from the dark palette and applies the `[theme.custom]`
/// overrides. Unknown names fall back to dark.
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("dark") {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let overrides = [
        (&custom.dir_fg, &mut theme.dir_fg),
        (&custom.file_fg, &mut theme.file_fg),
        (&custom.symlink_fg, &mut theme.symlink_fg),
        (&custom.disabled_fg, &mut theme.disabled_fg),
        (&custom.cursor_fg, &mut theme.cursor_fg),
        (&custom.border_fg, &mut theme.border_fg),
    ];
    for (hex, slot) in overrides {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}
