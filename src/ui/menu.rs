use std::time::{Duration, Instant};

use ratatui::prelude::*;

use crate::editor::Theme;

const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Shows available key bindings at the bottom of the screen.
pub struct MenuBar {
    highlighted_key: Option<(String, Instant)>,
    links_active: bool,
    theme: Theme,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            highlighted_key: None,
            links_active: false,
            theme: Theme::dark(),
        }
    }

    /// Highlight a key for a brief flash.
    pub fn highlight_key(&mut self, key: &str) {
        self.highlighted_key = Some((key.to_string(), Instant::now()));
    }

    /// Show the follow-link indicator while the modifier is held.
    pub fn set_links_active(&mut self, active: bool) {
        self.links_active = active;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

/// Key binding entries displayed in the menu bar.
const MENU_ITEMS: &[(&str, &str)] = &[
    ("j/k", "Move"),
    ("Enter", "Open"),
    ("Tab", "Focus"),
    ("[/]", "Tabs"),
    ("x", "Close"),
    ("t", "Theme"),
    ("?", "Help"),
    ("q", "Quit"),
];

const LINKS_HINT: &str = "Ctrl+click: follow import";
const LINKS_ACTIVE: &str = "● follow import";

impl Widget for &MenuBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let highlight_key = self.highlighted_key.as_ref().and_then(|(k, t)| {
            if t.elapsed() < HIGHLIGHT_DURATION {
                Some(k.as_str())
            } else {
                None
            }
        });

        let mut spans: Vec<Span<'_>> = Vec::new();

        for (i, (key, desc)) in MENU_ITEMS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let key_style = if highlight_key == Some(*key) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(":"));
            spans.push(Span::styled(
                *desc,
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        spans.push(Span::raw("  "));
        if self.links_active {
            spans.push(Span::styled(
                LINKS_ACTIVE,
                Style::default()
                    .fg(self.theme.import_link)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                LINKS_HINT,
                Style::default().fg(self.theme.gutter),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_row(menu: &MenuBar, width: u16) -> (Buffer, String) {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        Widget::render(menu, area, &mut buf);
        let content: String = (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        (buf, content)
    }

    #[test]
    fn test_menu_bar_renders() {
        let menu = MenuBar::new();
        let (_, content) = render_row(&menu, 140);
        assert!(content.contains("j/k:Move"));
        assert!(content.contains("q:Quit"));
        assert!(content.contains("[/]:Tabs"));
        assert!(content.contains(LINKS_HINT));
    }

    #[test]
    fn test_menu_bar_links_indicator() {
        let mut menu = MenuBar::new();
        menu.set_links_active(true);
        let (_, content) = render_row(&menu, 140);
        assert!(content.contains("follow import"));
        assert!(!content.contains("Ctrl+click"));
    }

    #[test]
    fn test_menu_bar_zero_area() {
        let menu = MenuBar::new();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        Widget::render(&menu, area, &mut buf);
    }

    #[test]
    fn test_menu_bar_highlight_renders_differently() {
        let (buf_normal, _) = render_row(&MenuBar::new(), 80);

        let mut menu_highlighted = MenuBar::new();
        menu_highlighted.highlight_key("j/k");
        let (buf_highlighted, _) = render_row(&menu_highlighted, 80);

        let cell_normal = buf_normal.cell((0, 0)).unwrap();
        let cell_highlighted = buf_highlighted.cell((0, 0)).unwrap();
        assert_eq!(cell_normal.symbol(), "j");
        assert_eq!(cell_highlighted.symbol(), "j");
        assert_eq!(cell_highlighted.fg, Color::Yellow);
        assert_ne!(cell_normal.fg, Color::Yellow);
    }

    #[test]
    fn test_menu_bar_highlight_expires() {
        let mut menu = MenuBar::new();
        menu.highlighted_key = Some(("j/k".to_string(), Instant::now() - Duration::from_secs(1)));

        let (buf, _) = render_row(&menu, 80);
        let cell = buf.cell((0, 0)).unwrap();
        assert_ne!(cell.fg, Color::Yellow);
    }
}
