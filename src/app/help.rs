use crate::keys::KeyAction;

/// Key bindings listed in the help overlay, grouped by section.
const SECTIONS: &[(&str, &[(&str, KeyAction)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", KeyAction::Down),
            ("k/↑", KeyAction::Up),
            ("PgDn", KeyAction::PageDown),
            ("PgUp", KeyAction::PageUp),
            ("g", KeyAction::Top),
            ("G", KeyAction::Bottom),
            ("Tab", KeyAction::SwitchFocus),
        ],
    ),
    (
        "Files",
        &[
            ("Enter", KeyAction::Enter),
            ("]/L", KeyAction::NextTab),
            ("[/H", KeyAction::PreviousTab),
            ("x", KeyAction::CloseTab),
        ],
    ),
    (
        "General",
        &[
            ("t", KeyAction::ToggleTheme),
            ("?", KeyAction::Help),
            ("q", KeyAction::Quit),
        ],
    ),
];

/// Return the text displayed in the help overlay.
pub fn help_text() -> String {
    let mut text = String::from("srcview — verified contract sources\n");
    for (title, bindings) in SECTIONS {
        text.push_str(&format!("\n{}:\n", title));
        for (keys, action) in *bindings {
            text.push_str(&format!("  {:<8} {}\n", keys, action.help_text()));
        }
    }
    text.push_str(
        "\nImports:\n  Ctrl+click (or Cmd+click) an import path to open the file.\n  \
         On narrow terminals a plain click is enough.\n",
    );
    text.push_str(&format!("\nVersion: {}", env!("CARGO_PKG_VERSION")));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_text_contains_version() {
        let text = help_text();
        assert!(text.contains("Version:"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_help_text_contains_key_bindings() {
        let text = help_text();
        assert!(text.contains("j/↓"));
        assert!(text.contains("Close tab"));
        assert!(text.contains("Toggle light/dark"));
        assert!(text.contains("Ctrl+click"));
        assert!(text.contains("Quit"));
    }
}
