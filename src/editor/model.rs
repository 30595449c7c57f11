use crate::source::SourceSet;
use crate::source::imports::{resolve_import_path, scan_imports};

const TAB_EXPANSION: &str = "    ";

/// A decorated import path inside a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLink {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub path: String,
    /// Index of the file the import resolves to, if it is loaded.
    pub target: Option<usize>,
}

impl ImportLink {
    pub fn contains(&self, line: usize, col: usize) -> bool {
        self.line == line && col >= self.start_col && col < self.end_col
    }
}

/// Language identifier derived from a file extension.
pub fn language_for_path(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("sol") => "sol",
        Some("vy") => "vyper",
        Some("yul") => "yul",
        Some("json") => "json",
        _ => "plaintext",
    }
}

/// Read-only text model for one file, keyed by its path.
///
/// Holds the view state (scroll and cursor) so it survives switching away
/// from the file and back.
#[derive(Debug, Clone)]
pub struct TextModel {
    path: String,
    language: &'static str,
    lines: Vec<String>,
    imports: Vec<ImportLink>,
    decorated: bool,
    scroll_top: usize,
    cursor: usize,
}

impl TextModel {
    pub fn new(path: &str, text: &str) -> Self {
        let mut lines: Vec<String> = text
            .lines()
            .map(|l| l.replace('\t', TAB_EXPANSION))
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            path: path.to_string(),
            language: language_for_path(path),
            lines,
            imports: Vec::new(),
            decorated: false,
            scroll_top: 0,
            cursor: 0,
        }
    }

    /// Mark every import path in the text as a link, resolving each against
    /// this model's path.
    pub fn decorate(&mut self, files: &SourceSet) {
        let text = self.lines.join("\n");
        let path = self.path();
        let imports: Vec<ImportLink> = scan_imports(&text)
            .into_iter()
            .map(|m| {
                let resolved = resolve_import_path(path, &m.path);
                ImportLink {
                    line: m.line,
                    start_col: m.start_col,
                    end_col: m.end_col,
                    target: files.index_of(&resolved),
                    path: m.path,
                }
            })
            .collect();
        self.imports = imports;
        self.decorated = true;
        tracing::debug!(path = %self.path(), imports = self.imports().len(), "decorated model");
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn is_decorated(&self) -> bool {
        self.decorated
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn imports(&self) -> &[ImportLink] {
        &self.imports
    }

    pub fn imports_on_line(&self, line: usize) -> impl Iterator<Item = &ImportLink> {
        self.imports().iter().filter(move |link| link.line == line)
    }

    pub fn import_at(&self, line: usize, col: usize) -> Option<&ImportLink> {
        self.imports().iter().find(|link| link.contains(line, col))
    }

    /// First import on the cursor line that points at a loaded file.
    pub fn import_at_cursor(&self) -> Option<&ImportLink> {
        self.imports_on_line(self.cursor)
            .find(|link| link.target.is_some())
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn max_scroll(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height.max(1))
    }

    /// Move the cursor to `line` (zero-based), scrolling just enough to keep
    /// it visible.
    pub fn set_cursor(&mut self, line: usize, height: usize) {
        self.cursor = line.min(self.lines.len() - 1);
        let height = height.max(1);
        if self.cursor < self.scroll_top {
            self.scroll_top = self.cursor;
        } else if self.cursor >= self.scroll_top + height {
            self.scroll_top = self.cursor + 1 - height;
        }
    }

    pub fn move_cursor(&mut self, delta: isize, height: usize) {
        let line = self.cursor.saturating_add_signed(delta);
        self.set_cursor(line, height);
    }

    pub fn scroll_by(&mut self, delta: isize, height: usize) {
        self.scroll_top = self
            .scroll_top
            .saturating_add_signed(delta)
            .min(self.max_scroll(height));
    }

    /// Put `line_number` (one-based) in the middle of the viewport and move
    /// the cursor onto it.
    pub fn reveal_line_centered(&mut self, line_number: usize, height: usize) {
        let line = line_number.saturating_sub(1).min(self.lines.len() - 1);
        let height = height.max(1);
        self.cursor = line;
        self.scroll_top = line.saturating_sub(height / 2).min(self.max_scroll(height));
    }
}
