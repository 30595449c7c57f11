pub mod help;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use ratatui::prelude::*;
use std::time::Duration;

use crate::config::{ColorMode, Config};
use crate::editor::TextModel;
use crate::keys::{self, KeyAction};
use crate::source::SourceSet;
use crate::ui::overlay::centered_rect;
use crate::ui::{code_view, tab_bar};
use crate::ui::{Breadcrumbs, CodeView, HelpOverlay, MenuBar, Sidebar, TabBar, TabHit};
use crate::viewer::{Focus, PaneAreas, SourceViewer};

/// Application state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Default,
    Help,
}

/// Where the viewer starts.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Path of the file to open first.
    pub file: Option<String>,
    /// One-based line to centre in the first file.
    pub line: Option<usize>,
    /// Use the narrow layout regardless of terminal width.
    pub mobile: bool,
}

pub struct App {
    // State
    state: AppState,
    running: bool,
    config: Config,
    viewer: SourceViewer,

    // UI components
    sidebar: Sidebar,
    menu: MenuBar,
    help_overlay: Option<HelpOverlay>,

    // Regions from the last frame, used to route mouse clicks
    panes: PaneAreas,
}

impl App {
    pub fn new(files: SourceSet, config: Config, options: LaunchOptions) -> Self {
        let sidebar = Sidebar::new(&files);
        let mut viewer = SourceViewer::new(files, &config, options.mobile);

        let start = options.file.as_deref().and_then(|path| {
            let idx = viewer.files().index_of(path);
            if idx.is_none() {
                tracing::warn!(path, "initial file not found, showing the first file");
            }
            idx
        });
        if start.is_some() || options.line.is_some() {
            viewer.select_file(start.unwrap_or(0), options.line);
        }

        let mut app = Self {
            state: AppState::Default,
            running: true,
            config,
            viewer,
            sidebar,
            menu: MenuBar::new(),
            help_overlay: None,
            panes: PaneAreas::default(),
        };
        app.sidebar.set_cursor(app.viewer.active_index());
        app
    }

    /// Run the main TUI event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        self.viewer.mount();

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            self.after_render();

            if event::poll(Duration::from_millis(250))? {
                self.handle_event(event::read()?)?;
            }
        }
        Ok(())
    }

    /// Runs once the frame has been flushed: applies any pending reveal now
    /// that the bound model is on screen.
    fn after_render(&mut self) {
        let height = code_view::viewport_height(self.panes.code);
        self.viewer.editor_mut().after_render(height);
    }

    fn handle_event(&mut self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Ok(())
            }
            // Resizes are measured on the next draw
            _ => Ok(()),
        }
    }

    /// Handle a raw key event by routing to the current state.
    fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        if keys::is_link_modifier(key.code) {
            self.viewer
                .layout_mut()
                .set_meta_pressed(key.kind != KeyEventKind::Release);
            return Ok(());
        }
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        match self.state {
            AppState::Help => self.handle_help_key(key.code),
            AppState::Default => {
                if let Some(action) = keys::map_key(key) {
                    self.handle_key_action(action);
                }
                Ok(())
            }
        }
    }

    /// Handle a mapped key action in Default state.
    fn handle_key_action(&mut self, action: KeyAction) {
        self.menu.highlight_key(action.key_label());

        match action {
            KeyAction::Up => self.move_selection(-1),
            KeyAction::Down => self.move_selection(1),
            KeyAction::PageUp => {
                let page = self.viewer.editor().viewport_height() as isize;
                self.with_model(|model, height| model.move_cursor(-page, height));
            }
            KeyAction::PageDown => {
                let page = self.viewer.editor().viewport_height() as isize;
                self.with_model(|model, height| model.move_cursor(page, height));
            }
            KeyAction::Top => self.with_model(|model, height| model.set_cursor(0, height)),
            KeyAction::Bottom => {
                self.with_model(|model, height| model.set_cursor(usize::MAX, height))
            }
            KeyAction::Enter => match self.viewer.focus() {
                Focus::Sidebar => {
                    let idx = self.sidebar.cursor();
                    self.viewer.select_file(idx, None);
                }
                Focus::Editor => {
                    self.viewer.follow_import_at_cursor();
                }
            },
            KeyAction::NextTab => self.viewer.next_tab(),
            KeyAction::PreviousTab => self.viewer.previous_tab(),
            KeyAction::CloseTab => self.viewer.close_active_tab(),
            KeyAction::SwitchFocus => {
                let next = match self.viewer.focus() {
                    Focus::Sidebar => Focus::Editor,
                    Focus::Editor => Focus::Sidebar,
                };
                self.viewer.set_focus(next);
                if self.viewer.focus() == Focus::Sidebar {
                    // Start from the file being shown
                    self.sidebar.set_cursor(self.viewer.active_index());
                }
            }
            KeyAction::ToggleTheme => self.viewer.toggle_color_mode(),
            KeyAction::Help => {
                self.state = AppState::Help;
                self.help_overlay = Some(HelpOverlay::new(help::help_text()));
            }
            KeyAction::Quit => {
                self.running = false;
            }
            KeyAction::Cancel => {
                self.viewer.set_focus(Focus::Editor);
                self.viewer.layout_mut().set_meta_pressed(false);
            }
        }
    }

    /// Handle key events while the help overlay is active.
    fn handle_help_key(&mut self, key: KeyCode) -> anyhow::Result<()> {
        if let Some(ref mut overlay) = self.help_overlay {
            overlay.handle_key(key);

            if overlay.is_dismissed() {
                self.help_overlay = None;
                self.state = AppState::Default;
            }
        }
        Ok(())
    }

    fn move_selection(&mut self, delta: isize) {
        match self.viewer.focus() {
            Focus::Sidebar if delta < 0 => self.sidebar.select_previous(),
            Focus::Sidebar => self.sidebar.select_next(),
            Focus::Editor => self.with_model(|model, height| model.move_cursor(delta, height)),
        }
    }

    fn with_model(&mut self, f: impl FnOnce(&mut TextModel, usize)) {
        let height = self.viewer.editor().viewport_height();
        if let Some(model) = self.viewer.editor_mut().bound_model_mut() {
            f(model, height);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.viewer.layout_mut().observe_modifiers(mouse.modifiers);
        if self.state != AppState::Default {
            return;
        }

        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            MouseEventKind::ScrollDown => self.handle_scroll(pos, 1),
            MouseEventKind::ScrollUp => self.handle_scroll(pos, -1),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, pos: Position, direction: isize) {
        if self.panes.code.contains(pos) {
            let step = self.config.scroll_step as isize * direction;
            self.with_model(|model, height| model.scroll_by(step, height));
        } else if self.panes.sidebar.is_some_and(|area| area.contains(pos)) {
            if direction > 0 {
                self.sidebar.select_next();
            } else {
                self.sidebar.select_previous();
            }
        }
    }

    /// Route a left click to the tab bar, the sidebar or the code view.
    fn handle_click(&mut self, column: u16, row: u16) {
        if let Some(area) = self.panes.tab_bar
            && let Some(hit) = tab_bar::hit_test(area, self.viewer.tabs(), column, row)
        {
            match hit {
                TabHit::Title(i) => {
                    let path = self.viewer.tabs()[i].clone();
                    self.viewer.select_tab(&path);
                }
                TabHit::Close(i) => {
                    let path = self.viewer.tabs()[i].clone();
                    self.viewer.close_tab(&path);
                }
            }
            return;
        }

        if let Some(area) = self.panes.sidebar
            && let Some(idx) = self.sidebar.hit_test(area, column, row)
        {
            self.sidebar.set_cursor(idx);
            self.viewer.select_file(idx, None);
            return;
        }

        let Some((line, col)) = self
            .viewer
            .editor()
            .bound_model()
            .and_then(|model| code_view::hit_test(self.panes.code, model, column, row))
        else {
            return;
        };
        if self.viewer.follow_import_at(line, col) {
            return;
        }
        self.with_model(|model, height| model.set_cursor(line, height));
        self.viewer.set_focus(Focus::Editor);
    }

    /// Draw all UI components.
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.viewer.layout_mut().measure(area.width, area.height);
        self.panes = self.viewer.layout().panes(area, self.viewer.files().len());

        let theme = self.viewer.theme();
        let links_active = self.viewer.layout().interaction_enabled();
        if self.viewer.focus() != Focus::Sidebar {
            self.sidebar.set_cursor(self.viewer.active_index());
        }
        self.menu.set_theme(theme);
        self.menu.set_links_active(links_active);

        let buf = frame.buffer_mut();
        buf.set_style(
            area,
            Style::default().bg(theme.background).fg(theme.foreground),
        );

        if let Some(sidebar_area) = self.panes.sidebar {
            self.sidebar.render_content(
                sidebar_area,
                buf,
                self.viewer.active_index(),
                &theme,
                self.viewer.focus() == Focus::Sidebar,
            );
        }

        let active_path = self.viewer.active_file().file_path.as_str();
        if let Some(tab_area) = self.panes.tab_bar {
            TabBar::new(self.viewer.tabs(), active_path, &theme).render(tab_area, buf);
        }
        if let Some(crumb_area) = self.panes.breadcrumbs {
            Breadcrumbs::new(active_path, &theme).render(crumb_area, buf);
        }

        let editor = self.viewer.editor();
        let model = if editor.is_mounted() {
            editor.bound_model()
        } else {
            None
        };
        CodeView::new(model, &theme)
            .focused(self.viewer.focus() == Focus::Editor)
            .links_active(links_active)
            .render(self.panes.code, buf);

        Widget::render(&self.menu, self.panes.menu, buf);

        if self.state == AppState::Help
            && let Some(ref overlay) = self.help_overlay
        {
            let popup_area = centered_rect(60, 70, area);
            overlay.render_content(popup_area, buf, &theme);
        }
    }
}

/// Set up terminal, run the viewer, and restore terminal on exit.
///
/// Returns the color mode the viewer ended in.
pub fn run(files: SourceSet, config: Config, options: LaunchOptions) -> anyhow::Result<ColorMode> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

    let mouse = config.mouse;
    if mouse {
        crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
    }
    // Needed to see the modifier key being pressed and released on its own
    let enhanced = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        crossterm::execute!(
            stdout,
            crossterm::event::PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    tracing::debug!(mouse, enhanced, "terminal ready");

    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(files, config, options);
    let result = app.run(&mut terminal);
    let color_mode = app.viewer.color_mode();
    drop(app);

    if enhanced {
        crossterm::execute!(
            terminal.backend_mut(),
            crossterm::event::PopKeyboardEnhancementFlags
        )?;
    }
    if mouse {
        crossterm::execute!(terminal.backend_mut(), crossterm::event::DisableMouseCapture)?;
    }
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen
    )?;

    result.map(|()| color_mode)
}
