use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::editor::Theme;

/// Scrollable key-binding reference shown on top of the viewer.
pub struct HelpOverlay {
    content: String,
    scroll: u16,
    dismissed: bool,
}

impl HelpOverlay {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            scroll: 0,
            dismissed: false,
        }
    }

    /// Handle a key press. Returns true if the overlay consumed the key.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                self.dismissed = true;
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.content.lines().count().saturating_sub(1) as u16;
                self.scroll = (self.scroll + 1).min(max);
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Render the overlay into `area` (already centered by the caller).
    pub fn render_content(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .style(Style::default().bg(theme.background).fg(theme.foreground))
            .title(" Help ");
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        Paragraph::new(self.content.as_str())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll(), 0))
            .render(layout[0], buf);

        let footer = Line::from(vec![
            Span::styled("Press ", Style::default().fg(theme.gutter)),
            Span::styled("Esc", Style::default().fg(theme.import_link).bold()),
            Span::styled(" to close, ", Style::default().fg(theme.gutter)),
            Span::styled("j/k", Style::default().fg(theme.import_link).bold()),
            Span::styled(" to scroll", Style::default().fg(theme.gutter)),
        ]);
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .render(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_overlay_dismiss_keys() {
        for key in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?'), KeyCode::Enter] {
            let mut overlay = HelpOverlay::new("text");
            assert!(!overlay.is_dismissed());
            assert!(overlay.handle_key(key));
            assert!(overlay.is_dismissed());
        }
    }

    #[test]
    fn test_help_overlay_scroll_is_bounded() {
        let mut overlay = HelpOverlay::new("a\nb\nc");
        overlay.handle_key(KeyCode::Char('k'));
        assert_eq!(overlay.scroll(), 0);

        for _ in 0..10 {
            overlay.handle_key(KeyCode::Char('j'));
        }
        assert_eq!(overlay.scroll(), 2);
        assert!(!overlay.is_dismissed());
    }

    #[test]
    fn test_help_overlay_other_keys_ignored() {
        let mut overlay = HelpOverlay::new("text");
        assert!(!overlay.handle_key(KeyCode::Char('x')));
        assert!(!overlay.is_dismissed());
    }

    #[test]
    fn test_help_overlay_render() {
        let overlay = HelpOverlay::new("Navigation:\n  j  Move down");
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        overlay.render_content(area, &mut buf, &theme);

        let content: String = (0..8u16)
            .flat_map(|y| (0..40u16).map(move |x| (x, y)))
            .map(|pos| buf.cell(pos).unwrap().symbol().to_string())
            .collect();
        assert!(content.contains("Navigation:"));
        assert!(content.contains("Esc"));
    }
}
