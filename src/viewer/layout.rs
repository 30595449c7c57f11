use crossterm::event::KeyModifiers;
use ratatui::prelude::*;

use crate::config::Config;

/// Screen regions for one frame. Panes that are not shown are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneAreas {
    pub sidebar: Option<Rect>,
    pub tab_bar: Option<Rect>,
    pub breadcrumbs: Option<Rect>,
    pub code: Rect,
    pub menu: Rect,
}

/// Tracks the measured container, the device class, and whether the
/// import-link modifier is held.
#[derive(Debug, Clone)]
pub struct LayoutController {
    container_width: u16,
    container_height: u16,
    sidebar_width: u16,
    mobile_breakpoint: u16,
    single_file_height: u16,
    force_mobile: bool,
    meta_pressed: bool,
}

impl LayoutController {
    pub fn new(config: &Config, force_mobile: bool) -> Self {
        Self {
            container_width: 0,
            container_height: 0,
            sidebar_width: config.sidebar_width,
            mobile_breakpoint: config.mobile_breakpoint,
            single_file_height: config.single_file_height,
            force_mobile,
            meta_pressed: false,
        }
    }

    /// Record the container size. Called on every frame so resizes are
    /// picked up without a separate event.
    pub fn measure(&mut self, width: u16, height: u16) {
        if (width, height) != (self.container_width, self.container_height) {
            tracing::debug!(width, height, "container resized");
        }
        self.container_width = width;
        self.container_height = height;
    }

    pub fn container_width(&self) -> u16 {
        self.container_width
    }

    pub fn is_mobile(&self) -> bool {
        self.force_mobile || self.container_width() < self.mobile_breakpoint
    }

    /// Columns available to the code view.
    pub fn editor_width(&self) -> u16 {
        if self.is_mobile() {
            self.container_width()
        } else {
            self.container_width().saturating_sub(self.sidebar_width)
        }
    }

    pub fn set_meta_pressed(&mut self, pressed: bool) {
        self.meta_pressed = pressed;
    }

    /// Update the modifier flag from the modifiers carried by a mouse event.
    pub fn observe_modifiers(&mut self, modifiers: KeyModifiers) {
        self.meta_pressed =
            modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META);
    }

    pub fn is_meta_pressed(&self) -> bool {
        self.meta_pressed
    }

    /// Whether clicking an import link navigates to the imported file.
    pub fn interaction_enabled(&self) -> bool {
        self.is_meta_pressed() || self.is_mobile()
    }

    pub fn panes(&self, area: Rect, file_count: usize) -> PaneAreas {
        if file_count <= 1 {
            return self.single_file_panes(area);
        }
        if self.is_mobile() {
            let sidebar_rows = (file_count as u16)
                .saturating_add(2)
                .min(area.height / 3)
                .max(3);
            let rows = Layout::vertical([
                Constraint::Length(sidebar_rows), // file list
                Constraint::Length(1),            // tab bar
                Constraint::Length(1),            // breadcrumbs
                Constraint::Min(1),               // code
                Constraint::Length(1),            // menu bar
            ])
            .split(area);
            return PaneAreas {
                sidebar: Some(rows[0]),
                tab_bar: Some(rows[1]),
                breadcrumbs: Some(rows[2]),
                code: rows[3],
                menu: rows[4],
            };
        }

        let editor_width = self.editor_width().min(area.width);
        let columns = Layout::horizontal([
            Constraint::Length(area.width - editor_width),
            Constraint::Length(editor_width),
        ])
        .split(area);
        let right = Layout::vertical([
            Constraint::Length(1), // tab bar
            Constraint::Length(1), // breadcrumbs
            Constraint::Min(1),    // code
            Constraint::Length(1), // menu bar
        ])
        .split(columns[1]);

        PaneAreas {
            sidebar: Some(columns[0]),
            tab_bar: Some(right[0]),
            breadcrumbs: Some(right[1]),
            code: right[2],
            menu: right[3],
        }
    }

    fn single_file_panes(&self, area: Rect) -> PaneAreas {
        let code_rows = self.single_file_height.min(area.height.saturating_sub(1));
        let rows = Layout::vertical([
            Constraint::Length(code_rows),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
        PaneAreas {
            sidebar: None,
            tab_bar: None,
            breadcrumbs: None,
            code: rows[0],
            menu: rows[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(force_mobile: bool) -> LayoutController {
        LayoutController::new(&Config::default(), force_mobile)
    }

    #[test]
    fn test_editor_width_desktop_and_mobile() {
        let mut layout = controller(false);
        layout.measure(160, 40);
        assert!(!layout.is_mobile());
        assert_eq!(layout.editor_width(), 160 - 32);

        layout.measure(80, 40);
        assert!(layout.is_mobile());
        assert_eq!(layout.editor_width(), 80);
    }

    #[test]
    fn test_forced_mobile() {
        let mut layout = controller(true);
        layout.measure(200, 50);
        assert!(layout.is_mobile());
        assert!(layout.interaction_enabled());
    }

    #[test]
    fn test_interaction_requires_modifier_on_desktop() {
        let mut layout = controller(false);
        layout.measure(160, 40);
        assert!(!layout.interaction_enabled());

        layout.set_meta_pressed(true);
        assert!(layout.interaction_enabled());

        layout.set_meta_pressed(false);
        assert!(!layout.interaction_enabled());
    }

    #[test]
    fn test_observe_modifiers() {
        let mut layout = controller(false);
        layout.observe_modifiers(KeyModifiers::CONTROL);
        assert!(layout.is_meta_pressed());
        layout.observe_modifiers(KeyModifiers::SHIFT);
        assert!(!layout.is_meta_pressed());
        layout.observe_modifiers(KeyModifiers::SUPER);
        assert!(layout.is_meta_pressed());
    }

    #[test]
    fn test_desktop_panes_match_editor_width() {
        let mut layout = controller(false);
        let area = Rect::new(0, 0, 160, 40);
        layout.measure(area.width, area.height);
        let panes = layout.panes(area, 3);

        assert_eq!(panes.sidebar.unwrap().width, 32);
        assert_eq!(panes.code.width, layout.editor_width());
        assert_eq!(panes.tab_bar.unwrap().y, 0);
        assert_eq!(panes.menu.y, 39);
    }

    #[test]
    fn test_desktop_panes_when_sidebar_is_wider_than_container() {
        let config = Config {
            sidebar_width: 110,
            ..Config::default()
        };
        let mut layout = LayoutController::new(&config, false);
        let area = Rect::new(0, 0, 105, 40);
        layout.measure(area.width, area.height);
        let panes = layout.panes(area, 3);

        assert_eq!(layout.container_width(), 105);
        assert_eq!(layout.editor_width(), 0);
        assert_eq!(panes.code.width, 0);
        assert_eq!(panes.sidebar.unwrap().width, 105);
    }

    #[test]
    fn test_desktop_panes_near_breakpoint() {
        let config = Config {
            sidebar_width: 40,
            ..Config::default()
        };
        let mut layout = LayoutController::new(&config, false);
        let area = Rect::new(0, 0, 100, 20);
        layout.measure(area.width, area.height);
        let panes = layout.panes(area, 2);

        assert_eq!(panes.code.width, layout.editor_width());
        assert_eq!(panes.code.width, 60);
        assert_eq!(panes.code.x, 40);
    }

    #[test]
    fn test_mobile_panes_stack_sidebar() {
        let mut layout = controller(false);
        let area = Rect::new(0, 0, 60, 30);
        layout.measure(area.width, area.height);
        let panes = layout.panes(area, 3);

        let sidebar = panes.sidebar.unwrap();
        assert_eq!(sidebar.width, 60);
        assert_eq!(sidebar.height, 5);
        assert_eq!(panes.code.width, 60);
        assert!(panes.code.y > sidebar.y);
    }

    #[test]
    fn test_single_file_panes() {
        let mut layout = controller(false);
        let area = Rect::new(0, 0, 160, 50);
        layout.measure(area.width, area.height);
        let panes = layout.panes(area, 1);

        assert!(panes.sidebar.is_none());
        assert!(panes.tab_bar.is_none());
        assert!(panes.breadcrumbs.is_none());
        assert_eq!(panes.code.height, 30);
        assert_eq!(panes.code.width, 160);
        assert_eq!(panes.menu.y, 49);
    }
}
