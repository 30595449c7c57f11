use crate::source::SourceSet;

/// Open tabs (file paths, in opening order) and the active file index.
///
/// The tab list is never empty and never holds the same path twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabManager {
    tabs: Vec<String>,
    active: usize,
}

impl TabManager {
    pub fn new(files: &SourceSet) -> Self {
        Self {
            tabs: vec![files.first().file_path.clone()],
            active: 0,
        }
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    /// Index of the active file in the source set.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_path<'a>(&self, files: &'a SourceSet) -> &'a str {
        files
            .get(self.active)
            .map(|f| f.file_path.as_str())
            .unwrap_or_default()
    }

    pub fn is_open(&self, path: &str) -> bool {
        self.tabs.iter().any(|t| t == path)
    }

    /// Make file `idx` active, appending a tab for it if it has none.
    /// Returns false if `idx` is out of range.
    pub fn open(&mut self, files: &SourceSet, idx: usize) -> bool {
        let Some(file) = files.get(idx) else {
            return false;
        };
        self.active = idx;
        if !self.is_open(&file.file_path) {
            self.tabs.push(file.file_path.clone());
        }
        true
    }

    /// Make the file at `path` active. Unknown paths are ignored.
    pub fn select_tab(&mut self, files: &SourceSet, path: &str) -> bool {
        match files.index_of(path) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    /// Close the tab for `path` unless it is the last one.
    ///
    /// Closing the active tab activates its left neighbour, or the new first
    /// tab when the first one was closed.
    pub fn close_tab(&mut self, files: &SourceSet, path: &str) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        let Some(pos) = self.tabs.iter().position(|t| t == path) else {
            return false;
        };
        let was_active = self.active_path(files) == path;
        self.tabs.remove(pos);

        if was_active {
            let replacement = &self.tabs[pos.saturating_sub(1)];
            self.active = files
                .index_of(replacement)
                .or_else(|| files.index_of(&self.tabs[0]))
                .unwrap_or(0);
        }
        true
    }

    /// Activate the next (or previous) tab, wrapping around.
    pub fn cycle(&mut self, files: &SourceSet, forward: bool) -> bool {
        let current = self.active_path(files);
        let Some(pos) = self.tabs.iter().position(|t| t == current) else {
            return false;
        };
        let len = self.tabs.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        let path = self.tabs[next].clone();
        self.select_tab(files, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceFile;

    fn files(paths: &[&str]) -> SourceSet {
        SourceSet::new(paths.iter().map(|p| SourceFile::new(*p, "")).collect()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let files = files(&["A.sol", "B.sol", "C.sol"]);
        let tabs = TabManager::new(&files);
        assert_eq!(tabs.tabs(), ["A.sol"]);
        assert_eq!(tabs.active(), 0);
        assert_eq!(tabs.active_path(&files), "A.sol");
    }

    #[test]
    fn test_open_appends_once() {
        let files = files(&["A.sol", "B.sol", "C.sol"]);
        let mut tabs = TabManager::new(&files);

        assert!(tabs.open(&files, 2));
        assert_eq!(tabs.tabs(), ["A.sol", "C.sol"]);
        assert_eq!(tabs.active(), 2);

        assert!(tabs.open(&files, 2));
        assert_eq!(tabs.tabs(), ["A.sol", "C.sol"]);

        // Re-opening an existing tab does not reorder
        assert!(tabs.open(&files, 0));
        assert_eq!(tabs.tabs(), ["A.sol", "C.sol"]);
        assert_eq!(tabs.active(), 0);
    }

    #[test]
    fn test_open_out_of_range_is_ignored() {
        let files = files(&["A.sol"]);
        let mut tabs = TabManager::new(&files);
        assert!(!tabs.open(&files, 5));
        assert_eq!(tabs.active(), 0);
        assert_eq!(tabs.tabs(), ["A.sol"]);
    }

    #[test]
    fn test_select_tab() {
        let files = files(&["A.sol", "B.sol"]);
        let mut tabs = TabManager::new(&files);
        tabs.open(&files, 1);

        assert!(tabs.select_tab(&files, "A.sol"));
        assert_eq!(tabs.active(), 0);

        assert!(!tabs.select_tab(&files, "Nope.sol"));
        assert_eq!(tabs.active(), 0);
    }

    #[test]
    fn test_close_last_tab_is_noop() {
        let files = files(&["A.sol", "B.sol"]);
        let mut tabs = TabManager::new(&files);
        let before = tabs.clone();

        assert!(!tabs.close_tab(&files, "A.sol"));
        assert_eq!(tabs, before);
    }

    #[test]
    fn test_close_active_tab_activates_left_neighbour() {
        let files = files(&["A.sol", "B.sol", "C.sol", "D.sol"]);
        let mut tabs = TabManager::new(&files);
        tabs.open(&files, 1);
        tabs.open(&files, 2);
        tabs.open(&files, 3);
        tabs.select_tab(&files, "C.sol");

        assert!(tabs.close_tab(&files, "C.sol"));
        assert_eq!(tabs.tabs(), ["A.sol", "B.sol", "D.sol"]);
        assert_eq!(tabs.active_path(&files), "B.sol");
    }

    #[test]
    fn test_close_first_active_tab_activates_new_first() {
        let files = files(&["A.sol", "B.sol", "C.sol"]);
        let mut tabs = TabManager::new(&files);
        tabs.open(&files, 1);
        tabs.open(&files, 2);
        tabs.select_tab(&files, "A.sol");

        assert!(tabs.close_tab(&files, "A.sol"));
        assert_eq!(tabs.tabs(), ["B.sol", "C.sol"]);
        assert_eq!(tabs.active_path(&files), "B.sol");
    }

    #[test]
    fn test_close_inactive_tab_keeps_active() {
        let files = files(&["A.sol", "B.sol", "C.sol"]);
        let mut tabs = TabManager::new(&files);
        tabs.open(&files, 1);
        tabs.open(&files, 2);

        assert!(tabs.close_tab(&files, "B.sol"));
        assert_eq!(tabs.tabs(), ["A.sol", "C.sol"]);
        assert_eq!(tabs.active_path(&files), "C.sol");

        assert!(!tabs.close_tab(&files, "B.sol"));
    }

    #[test]
    fn test_cycle_wraps() {
        let files = files(&["A.sol", "B.sol", "C.sol"]);
        let mut tabs = TabManager::new(&files);
        tabs.open(&files, 2);
        tabs.open(&files, 1);
        // tabs: A, C, B; active B
        tabs.cycle(&files, true);
        assert_eq!(tabs.active_path(&files), "A.sol");
        tabs.cycle(&files, false);
        assert_eq!(tabs.active_path(&files), "B.sol");
        tabs.cycle(&files, false);
        assert_eq!(tabs.active_path(&files), "C.sol");
    }
}
