use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::editor::{ImportLink, TextModel, Theme};

/// Read-only code display with a line-number gutter and import links.
pub struct CodeView<'a> {
    model: Option<&'a TextModel>,
    theme: &'a Theme,
    focused: bool,
    links_active: bool,
}

impl<'a> CodeView<'a> {
    /// `model` is `None` until the editor session is mounted; a loading
    /// placeholder is shown instead.
    pub fn new(model: Option<&'a TextModel>, theme: &'a Theme) -> Self {
        Self {
            model,
            theme,
            focused: false,
            links_active: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Emphasise resolved links while the follow-link modifier is held.
    pub fn links_active(mut self, active: bool) -> Self {
        self.links_active = active;
        self
    }
}

fn frame_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Number of text rows visible in a code view drawn in `area`.
pub fn viewport_height(area: Rect) -> usize {
    frame_block().inner(area).height as usize
}

fn gutter_width(model: &TextModel) -> u16 {
    model.line_count().to_string().len() as u16 + 1
}

/// Map a screen position to (line, character column) in the model.
pub fn hit_test(area: Rect, model: &TextModel, column: u16, row: u16) -> Option<(usize, usize)> {
    let inner = frame_block().inner(area);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }
    let text_x = inner.x + gutter_width(model);
    if column < text_x {
        return None;
    }
    let line = model.scroll_top() + (row - inner.y) as usize;
    let text = model.lines().get(line)?;
    Some((line, char_at_column(text, (column - text_x) as usize)))
}

/// Index of the character drawn at display column `target`. Columns past the
/// end of the text map past the last character.
fn char_at_column(text: &str, target: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in text.chars().enumerate() {
        width += ch.width().unwrap_or(0);
        if width > target {
            return idx;
        }
    }
    text.chars().count() + (target - width)
}

fn byte_offset(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

impl CodeView<'_> {
    fn link_style(&self, link: &ImportLink) -> Style {
        match link.target {
            Some(_) => {
                let style = Style::default()
                    .fg(self.theme.import_link)
                    .add_modifier(Modifier::UNDERLINED);
                if self.links_active {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                }
            }
            None => Style::default().fg(self.theme.import_unresolved),
        }
    }

    /// Split one line into spans, styling the import paths on it.
    fn styled_line<'l>(&self, text: &'l str, links: &[&ImportLink]) -> Vec<Span<'l>> {
        let mut spans = Vec::new();
        let mut pos = 0;
        for link in links {
            let start = byte_offset(text, link.start_col).max(pos);
            let end = byte_offset(text, link.end_col).max(start);
            if start > pos {
                spans.push(Span::raw(&text[pos..start]));
            }
            spans.push(Span::styled(&text[start..end], self.link_style(link)));
            pos = end;
        }
        if pos < text.len() {
            spans.push(Span::raw(&text[pos..]));
        }
        spans
    }
}

impl Widget for CodeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let mut block = frame_block().border_style(Style::default().fg(border));
        if let Some(model) = self.model {
            block = block.title(format!(" {} ", model.language()));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let Some(model) = self.model else {
            Paragraph::new(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(self.theme.gutter),
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        };

        let gutter = gutter_width(model);
        let digits = gutter as usize - 1;
        let text_x = inner.x + gutter;
        let text_width = inner.width.saturating_sub(gutter);

        for (row, (idx, text)) in model
            .lines()
            .iter()
            .enumerate()
            .skip(model.scroll_top())
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let is_cursor = idx == model.cursor();

            let gutter_style = if is_cursor {
                Style::default().fg(self.theme.gutter_active)
            } else {
                Style::default().fg(self.theme.gutter)
            };
            buf.set_stringn(
                inner.x,
                y,
                format!("{:>width$} ", idx + 1, width = digits),
                gutter as usize,
                gutter_style,
            );

            if text_width == 0 {
                continue;
            }
            let mut links: Vec<&ImportLink> = model.imports_on_line(idx).collect();
            links.sort_by_key(|link| link.start_col);
            let mut line = Line::from(self.styled_line(text, &links));
            if is_cursor && self.focused {
                line = line.style(Style::default().bg(self.theme.cursor_line));
                buf.set_style(
                    Rect::new(text_x, y, text_width, 1),
                    Style::default().bg(self.theme.cursor_line),
                );
            }
            buf.set_line(text_x, y, &line, text_width);
        }
    }
}
