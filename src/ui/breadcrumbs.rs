use ratatui::prelude::*;

use crate::editor::Theme;

const SEPARATOR: &str = " › ";

/// Path of the active file, one segment per crumb.
pub struct Breadcrumbs<'a> {
    path: &'a str,
    theme: &'a Theme,
}

impl<'a> Breadcrumbs<'a> {
    pub fn new(path: &'a str, theme: &'a Theme) -> Self {
        Self { path, theme }
    }
}

impl Widget for Breadcrumbs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        let last = segments.len().saturating_sub(1);
        let mut spans = vec![Span::raw(" ")];
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(self.theme.gutter)));
            }
            let style = if i == last {
                Style::default()
                    .fg(self.theme.foreground)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.tab_inactive)
            };
            spans.push(Span::styled(*segment, style));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
