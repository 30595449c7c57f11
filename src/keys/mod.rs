use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Logical key actions in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Enter,
    NextTab,
    PreviousTab,
    CloseTab,
    SwitchFocus,
    ToggleTheme,
    Help,
    Quit,
    Cancel,
}

impl KeyAction {
    /// Human-readable help text for this key action.
    pub fn help_text(&self) -> &'static str {
        match self {
            KeyAction::Up => "Move up",
            KeyAction::Down => "Move down",
            KeyAction::PageUp => "Page up",
            KeyAction::PageDown => "Page down",
            KeyAction::Top => "First line",
            KeyAction::Bottom => "Last line",
            KeyAction::Enter => "Open file / follow import",
            KeyAction::NextTab => "Next tab",
            KeyAction::PreviousTab => "Previous tab",
            KeyAction::CloseTab => "Close tab",
            KeyAction::SwitchFocus => "Switch focus",
            KeyAction::ToggleTheme => "Toggle light/dark",
            KeyAction::Help => "Toggle help",
            KeyAction::Quit => "Quit",
            KeyAction::Cancel => "Cancel",
        }
    }

    /// Short key label, matching the labels in the menu bar.
    pub fn key_label(&self) -> &'static str {
        match self {
            KeyAction::Up | KeyAction::Down => "j/k",
            KeyAction::PageUp => "PgUp",
            KeyAction::PageDown => "PgDn",
            KeyAction::Top => "g",
            KeyAction::Bottom => "G",
            KeyAction::Enter => "Enter",
            KeyAction::NextTab | KeyAction::PreviousTab => "[/]",
            KeyAction::CloseTab => "x",
            KeyAction::SwitchFocus => "Tab",
            KeyAction::ToggleTheme => "t",
            KeyAction::Help => "?",
            KeyAction::Quit => "q",
            KeyAction::Cancel => "Esc",
        }
    }
}

/// Whether `code` is the modifier that turns import paths into links.
pub fn is_link_modifier(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Modifier(
            ModifierKeyCode::LeftControl
                | ModifierKeyCode::RightControl
                | ModifierKeyCode::LeftSuper
                | ModifierKeyCode::RightSuper
                | ModifierKeyCode::LeftMeta
                | ModifierKeyCode::RightMeta
        )
    )
}

/// Map a key event to a logical action.
pub fn map_key(event: KeyEvent) -> Option<KeyAction> {
    match event.code {
        // Ctrl+C as quit
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }

        // Vim-style navigation
        KeyCode::Char('k') | KeyCode::Up => Some(KeyAction::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(KeyAction::Down),
        KeyCode::PageUp => Some(KeyAction::PageUp),
        KeyCode::PageDown => Some(KeyAction::PageDown),
        KeyCode::Char('g') | KeyCode::Home => Some(KeyAction::Top),
        KeyCode::Char('G') | KeyCode::End => Some(KeyAction::Bottom),

        // Tabs
        KeyCode::Char(']') | KeyCode::Char('L') => Some(KeyAction::NextTab),
        KeyCode::Char('[') | KeyCode::Char('H') => Some(KeyAction::PreviousTab),
        KeyCode::Char('x') => Some(KeyAction::CloseTab),

        // Actions
        KeyCode::Enter => Some(KeyAction::Enter),
        KeyCode::Tab => Some(KeyAction::SwitchFocus),
        KeyCode::Char('t') => Some(KeyAction::ToggleTheme),
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char('?') => Some(KeyAction::Help),
        KeyCode::Esc => Some(KeyAction::Cancel),

        _ => None,
    }
}
