use ratatui::prelude::*;
use unicode_width::UnicodeWidthStr;

use crate::editor::Theme;

const CLOSE_MARKER: &str = "×";
const CLOSE_WIDTH: u16 = 2;
const TITLE_PADDING: u16 = 2;
const DIVIDER: &str = "│";

/// What a click on the tab bar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabHit {
    Title(usize),
    Close(usize),
}

/// Horizontal extent of one tab: `[start, title_end)` is the title,
/// `[title_end, end)` the close marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSlot {
    pub index: usize,
    pub start: u16,
    pub title_end: u16,
    pub end: u16,
}

/// File name shown on a tab.
pub fn tab_title(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn compute_slots(area: Rect, tabs: &[String]) -> Vec<TabSlot> {
    let right = area.right();
    let mut x = area.x;
    let mut slots = Vec::with_capacity(tabs.len());

    for (index, path) in tabs.iter().enumerate() {
        if x >= right {
            break;
        }
        let start = x;
        let title_width = (tab_title(path).width() as u16).saturating_add(TITLE_PADDING);
        let title_end = start.saturating_add(title_width).min(right);
        let end = title_end.saturating_add(CLOSE_WIDTH).min(right);
        slots.push(TabSlot {
            index,
            start,
            title_end,
            end,
        });
        x = end.saturating_add(1);
    }
    slots
}

pub fn hit_test(area: Rect, tabs: &[String], column: u16, row: u16) -> Option<TabHit> {
    if row != area.y || column < area.x || column >= area.right() {
        return None;
    }
    compute_slots(area, tabs)
        .into_iter()
        .find(|slot| column >= slot.start && column < slot.end)
        .map(|slot| {
            if column < slot.title_end {
                TabHit::Title(slot.index)
            } else {
                TabHit::Close(slot.index)
            }
        })
}

/// One-row bar of open tabs with the active tab highlighted.
pub struct TabBar<'a> {
    tabs: &'a [String],
    active: &'a str,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [String], active: &'a str, theme: &'a Theme) -> Self {
        Self {
            tabs,
            active,
            theme,
        }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let inactive = Style::default().fg(self.theme.tab_inactive);
        let active = Style::default()
            .fg(self.theme.tab_active)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        for slot in compute_slots(area, self.tabs) {
            let path = &self.tabs[slot.index];
            let style = if path == self.active { active } else { inactive };
            let title = format!(" {} ", tab_title(path));
            buf.set_stringn(
                slot.start,
                area.y,
                &title,
                (slot.title_end - slot.start) as usize,
                style,
            );
            if slot.end > slot.title_end {
                buf.set_stringn(
                    slot.title_end,
                    area.y,
                    CLOSE_MARKER,
                    (slot.end - slot.title_end) as usize,
                    inactive,
                );
            }
            if slot.end < area.right() {
                buf.set_string(slot.end, area.y, DIVIDER, Style::default().fg(self.theme.border));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> Vec<String> {
        vec!["contracts/A.sol".to_string(), "lib/Bee.sol".to_string()]
    }

    #[test]
    fn test_tab_title_is_file_name() {
        assert_eq!(tab_title("contracts/a/Foo.sol"), "Foo.sol");
        assert_eq!(tab_title("Foo.sol"), "Foo.sol");
    }

    #[test]
    fn test_compute_slots() {
        let slots = compute_slots(Rect::new(0, 0, 80, 1), &tabs());
        // " A.sol " = 7, "× " = 2, divider = 1
        assert_eq!(
            slots,
            vec![
                TabSlot { index: 0, start: 0, title_end: 7, end: 9 },
                TabSlot { index: 1, start: 10, title_end: 19, end: 21 },
            ]
        );
    }

    #[test]
    fn test_compute_slots_measures_display_width() {
        // Each CJK character takes two columns
        let tabs = vec!["合约.sol".to_string(), "B.sol".to_string()];
        let slots = compute_slots(Rect::new(0, 0, 80, 1), &tabs);
        assert_eq!(slots[0].title_end, 10);
        assert_eq!(slots[1].start, 13);
        assert_eq!(hit_test(Rect::new(0, 0, 80, 1), &tabs, 10, 0), Some(TabHit::Close(0)));
        assert_eq!(hit_test(Rect::new(0, 0, 80, 1), &tabs, 14, 0), Some(TabHit::Title(1)));
    }

    #[test]
    fn test_compute_slots_truncates_at_edge() {
        let slots = compute_slots(Rect::new(0, 0, 12, 1), &tabs());
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].title_end, 12);
        assert_eq!(slots[1].end, 12);
    }

    #[test]
    fn test_hit_test() {
        let area = Rect::new(5, 2, 80, 1);
        let tabs = tabs();
        assert_eq!(hit_test(area, &tabs, 6, 2), Some(TabHit::Title(0)));
        assert_eq!(hit_test(area, &tabs, 12, 2), Some(TabHit::Close(0)));
        assert_eq!(hit_test(area, &tabs, 16, 2), Some(TabHit::Title(1)));
        assert_eq!(hit_test(area, &tabs, 14, 2), None); // divider
        assert_eq!(hit_test(area, &tabs, 6, 3), None); // wrong row
        assert_eq!(hit_test(area, &tabs, 70, 2), None);
    }

    #[test]
    fn test_tab_bar_render() {
        let theme = Theme::dark();
        let tabs = tabs();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        TabBar::new(&tabs, "lib/Bee.sol", &theme).render(area, &mut buf);

        let content: String = (0..40)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(content.contains("A.sol"));
        assert!(content.contains("Bee.sol"));
        assert!(content.contains(CLOSE_MARKER));

        let active_cell = buf.cell((11, 0)).unwrap();
        assert!(active_cell.modifier.contains(Modifier::BOLD));
        let inactive_cell = buf.cell((1, 0)).unwrap();
        assert!(!inactive_cell.modifier.contains(Modifier::BOLD));
    }
}
