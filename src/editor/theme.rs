use ratatui::style::Color;

use crate::config::ColorMode;

/// Color palette registered with an editor session under a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub gutter: Color,
    pub gutter_active: Color,
    pub cursor_line: Color,
    /// Import paths that resolve to a loaded file.
    pub import_link: Color,
    /// Import paths with no matching file.
    pub import_unresolved: Color,
    pub border: Color,
    pub border_focused: Color,
    pub tab_active: Color,
    pub tab_inactive: Color,
    pub selection: Color,
}

impl Theme {
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Self::light(),
            ColorMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::Rgb(0xff, 0xff, 0xff),
            foreground: Color::Rgb(0x1a, 0x20, 0x2c),
            gutter: Color::Rgb(0xa0, 0xae, 0xc0),
            gutter_active: Color::Rgb(0x2d, 0x37, 0x48),
            cursor_line: Color::Rgb(0xed, 0xf2, 0xf7),
            import_link: Color::Rgb(0x2b, 0x6c, 0xb0),
            import_unresolved: Color::Rgb(0x71, 0x80, 0x96),
            border: Color::Rgb(0xe2, 0xe8, 0xf0),
            border_focused: Color::Rgb(0x31, 0x82, 0xce),
            tab_active: Color::Rgb(0x1a, 0x20, 0x2c),
            tab_inactive: Color::Rgb(0x71, 0x80, 0x96),
            selection: Color::Rgb(0xbe, 0xe3, 0xf8),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Rgb(0x1a, 0x20, 0x2c),
            foreground: Color::Rgb(0xe2, 0xe8, 0xf0),
            gutter: Color::Rgb(0x4a, 0x55, 0x68),
            gutter_active: Color::Rgb(0xcb, 0xd5, 0xe0),
            cursor_line: Color::Rgb(0x2d, 0x37, 0x48),
            import_link: Color::Rgb(0x63, 0xb3, 0xed),
            import_unresolved: Color::Rgb(0x71, 0x80, 0x96),
            border: Color::Rgb(0x4a, 0x55, 0x68),
            border_focused: Color::Rgb(0x90, 0xcd, 0xf4),
            tab_active: Color::Rgb(0xf7, 0xfa, 0xfc),
            tab_inactive: Color::Rgb(0x71, 0x80, 0x96),
            selection: Color::Rgb(0x2c, 0x52, 0x82),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_are_named_and_distinct() {
        assert_eq!(Theme::light().name, "light");
        assert_eq!(Theme::dark().name, "dark");
        assert_ne!(Theme::light().background, Theme::dark().background);
        assert_eq!(Theme::for_mode(ColorMode::Light), Theme::light());
    }
}
