use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

use crate::editor::Theme;
use crate::source::SourceSet;

/// File list with its own keyboard cursor, independent of the active file.
pub struct Sidebar {
    items: Vec<String>,
    cursor: usize,
}

impl Sidebar {
    pub fn new(files: &SourceSet) -> Self {
        Self {
            items: files.iter().map(|f| f.file_path.clone()).collect(),
            cursor: 0,
        }
    }

    pub fn select_next(&mut self) {
        if self.num_items() == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % self.num_items();
    }

    pub fn select_previous(&mut self) {
        if self.num_items() == 0 {
            return;
        }
        if self.cursor == 0 {
            self.cursor = self.num_items() - 1;
        } else {
            self.cursor -= 1;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, idx: usize) {
        if self.num_items() > 0 {
            self.cursor = idx.min(self.num_items() - 1);
        }
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    fn block(&self, theme: &Theme, focused: bool) -> Block<'static> {
        let border = if focused {
            theme.border_focused
        } else {
            theme.border
        };
        Block::default()
            .borders(Borders::ALL)
            .title(" Files ")
            .border_style(Style::default().fg(border))
    }

    /// First visible row, chosen so the cursor stays on screen.
    fn offset(&self, height: usize) -> usize {
        if height == 0 {
            return 0;
        }
        self.cursor.saturating_sub(height - 1)
    }

    /// Map a click to the index of the file under it.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let idx = self.offset(inner.height as usize) + (row - inner.y) as usize;
        (idx < self.num_items()).then_some(idx)
    }

    pub fn render_content(
        &self,
        area: Rect,
        buf: &mut Buffer,
        active: usize,
        theme: &Theme,
        focused: bool,
    ) {
        let block = self.block(theme, focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let height = inner.height as usize;
        let offset = self.offset(height);
        for (row, (idx, path)) in self
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .enumerate()
        {
            let mut name_style = Style::default().fg(theme.foreground);
            if idx == active {
                name_style = name_style.fg(theme.tab_active).add_modifier(Modifier::BOLD);
            }
            let (dir, name) = match path.rsplit_once('/') {
                Some((dir, name)) => (format!("{}/", dir), name),
                None => (String::new(), path.as_str()),
            };
            let marker = if focused && idx == self.cursor { "▸ " } else { "  " };

            let mut line = Line::from(vec![
                Span::raw(marker),
                Span::styled(dir, Style::default().fg(theme.gutter)),
                Span::styled(name, name_style),
            ]);
            if focused && idx == self.cursor {
                line = line.style(Style::default().bg(theme.selection));
            }
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}
