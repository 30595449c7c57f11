pub mod layout;
pub mod tabs;

pub use layout::{LayoutController, PaneAreas};
pub use tabs::TabManager;

use crate::config::{ColorMode, Config};
use crate::editor::{EditorSession, Theme};
use crate::source::{SourceFile, SourceSet};

/// Which pane receives keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Editor,
}

/// The multi-file source viewer.
///
/// Every way of changing the displayed file (sidebar, tab bar, import link,
/// keyboard) goes through the transition methods here, so the state machine
/// does not care where an event came from.
pub struct SourceViewer {
    files: SourceSet,
    tabs: TabManager,
    editor: EditorSession,
    layout: LayoutController,
    focus: Focus,
    color_mode: ColorMode,
}

impl SourceViewer {
    pub fn new(files: SourceSet, config: &Config, force_mobile: bool) -> Self {
        let tabs = TabManager::new(&files);
        let mut editor = EditorSession::new();
        editor.bind(&files, tabs.active());
        Self {
            files,
            tabs,
            editor,
            layout: LayoutController::new(config, force_mobile),
            focus: Focus::Editor,
            color_mode: config.color_mode,
        }
    }

    /// Set up the editor session. Until this runs the code view shows a
    /// loading placeholder.
    pub fn mount(&mut self) {
        self.editor.mount(&self.files, self.color_mode);
    }

    pub fn files(&self) -> &SourceSet {
        &self.files
    }

    pub fn is_single_file(&self) -> bool {
        self.files.is_single()
    }

    pub fn tabs(&self) -> &[String] {
        self.tabs.tabs()
    }

    pub fn active_index(&self) -> usize {
        self.tabs.active()
    }

    pub fn active_file(&self) -> &SourceFile {
        self.files.get(self.tabs.active()).unwrap_or(self.files.first())
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorSession {
        &mut self.editor
    }

    pub fn layout(&self) -> &LayoutController {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutController {
        &mut self.layout
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.is_single_file() {
            return;
        }
        self.focus = focus;
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Active palette, falling back to the configured mode before mount.
    pub fn theme(&self) -> Theme {
        self.editor
            .theme()
            .copied()
            .unwrap_or_else(|| Theme::for_mode(self.color_mode))
    }

    fn sync_editor(&mut self) {
        self.editor.bind(&self.files, self.tabs.active());
    }

    /// Show file `idx`, opening a tab for it if needed, and optionally centre
    /// `line` (one-based) once the file is on screen.
    pub fn select_file(&mut self, idx: usize, line: Option<usize>) {
        if !self.tabs.open(&self.files, idx) {
            tracing::warn!(idx, "ignoring selection of unknown file index");
            return;
        }
        self.sync_editor();
        if let Some(line) = line {
            self.editor.reveal_line(line);
        }
        self.focus = Focus::Editor;
        tracing::debug!(path = %self.active_file().file_path, ?line, "selected file");
    }

    pub fn select_tab(&mut self, path: &str) {
        if self.tabs.select_tab(&self.files, path) {
            self.sync_editor();
        } else {
            tracing::debug!(path, "no file for tab");
        }
    }

    pub fn close_tab(&mut self, path: &str) {
        if self.tabs.close_tab(&self.files, path) {
            self.sync_editor();
        }
    }

    pub fn close_active_tab(&mut self) {
        let path = self.active_file().file_path.clone();
        self.close_tab(&path);
    }

    pub fn next_tab(&mut self) {
        if self.tabs.cycle(&self.files, true) {
            self.sync_editor();
        }
    }

    pub fn previous_tab(&mut self) {
        if self.tabs.cycle(&self.files, false) {
            self.sync_editor();
        }
    }

    /// Handle a click on (line, col) of the code view. Navigates if the
    /// position is on a resolved import link and the interaction mode is on.
    /// Returns true if the click was consumed.
    pub fn follow_import_at(&mut self, line: usize, col: usize) -> bool {
        if !self.layout.interaction_enabled() {
            return false;
        }
        let Some((target, import)) = self
            .editor
            .bound_model()
            .and_then(|model| model.import_at(line, col))
            .map(|link| (link.target, link.path.clone()))
        else {
            return false;
        };
        match target {
            Some(target) => {
                self.select_file(target, None);
                true
            }
            None => {
                tracing::debug!(%import, "import does not match a loaded file");
                false
            }
        }
    }

    /// Follow the first resolved import on the cursor line.
    pub fn follow_import_at_cursor(&mut self) -> bool {
        let target = self
            .editor
            .bound_model()
            .and_then(|model| model.import_at_cursor())
            .and_then(|link| link.target);
        match target {
            Some(target) => {
                self.select_file(target, None);
                true
            }
            None => false,
        }
    }

    pub fn toggle_color_mode(&mut self) {
        self.color_mode = self.color_mode.toggled();
        if let Err(e) = self.editor.set_color_mode(self.color_mode) {
            tracing::warn!("failed to switch theme: {}", e);
        }
    }
}

impl Drop for SourceViewer {
    fn drop(&mut self) {
        self.editor.teardown();
    }
}
