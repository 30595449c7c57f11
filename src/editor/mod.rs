pub mod model;
pub mod theme;

pub use model::{ImportLink, TextModel};
pub use theme::Theme;

use std::collections::HashMap;
use thiserror::Error;

use crate::config::ColorMode;
use crate::source::SourceSet;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}

/// A line waiting to be revealed once the model it belongs to is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingReveal {
    path: String,
    line: usize,
}

/// Per-viewer editor session.
///
/// Owns the model cache (one model per file path, created once), the
/// registered themes, and which model is bound to the visible code view.
pub struct EditorSession {
    models: HashMap<String, TextModel>,
    themes: HashMap<&'static str, Theme>,
    active_theme: Option<&'static str>,
    bound: Option<String>,
    pending_reveal: Option<PendingReveal>,
    viewport_height: usize,
    mounted: bool,
    torn_down: bool,
    models_created: usize,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            themes: HashMap::new(),
            active_theme: None,
            bound: None,
            pending_reveal: None,
            viewport_height: 1,
            mounted: false,
            torn_down: false,
            models_created: 0,
        }
    }

    /// One-time setup: register both palettes, activate the one for `mode`
    /// and decorate a model for every file.
    pub fn mount(&mut self, files: &SourceSet, mode: ColorMode) {
        if self.mounted || !self.is_alive() {
            return;
        }
        self.define_theme(Theme::light());
        self.define_theme(Theme::dark());
        if let Err(e) = self.set_theme(mode.theme_name()) {
            tracing::warn!("failed to activate theme: {}", e);
        }

        for model in self.models.values_mut().filter(|m| !m.is_decorated()) {
            model.decorate(files);
        }
        for file in files.iter() {
            if !self.models.contains_key(&file.file_path) {
                let mut model = self.create_model(&file.file_path, &file.source_code);
                model.decorate(files);
                self.models.insert(file.file_path.clone(), model);
            }
        }

        self.mounted = true;
        tracing::info!(models = self.model_count(), theme = %mode, "editor mounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_alive(&self) -> bool {
        !self.torn_down
    }

    pub fn define_theme(&mut self, theme: Theme) {
        self.themes.insert(theme.name, theme);
    }

    pub fn set_theme(&mut self, name: &str) -> Result<(), EditorError> {
        let (&key, _) = self
            .themes
            .get_key_value(name)
            .ok_or_else(|| EditorError::UnknownTheme(name.to_string()))?;
        self.active_theme = Some(key);
        Ok(())
    }

    /// Re-apply the theme for `mode`. Models are left untouched.
    pub fn set_color_mode(&mut self, mode: ColorMode) -> Result<(), EditorError> {
        if !self.mounted || !self.is_alive() {
            return Ok(());
        }
        self.set_theme(mode.theme_name())
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.active_theme.and_then(|name| self.themes.get(name))
    }

    fn create_model(&mut self, path: &str, text: &str) -> TextModel {
        self.models_created += 1;
        tracing::debug!(path, "creating model");
        TextModel::new(path, text)
    }

    /// Show file `idx` in the code view, creating its model on first use.
    pub fn bind(&mut self, files: &SourceSet, idx: usize) {
        if !self.is_alive() {
            return;
        }
        let Some(file) = files.get(idx) else {
            return;
        };
        if !self.models.contains_key(&file.file_path) {
            let mut model = self.create_model(&file.file_path, &file.source_code);
            if self.mounted {
                model.decorate(files);
            }
            self.models.insert(file.file_path.clone(), model);
        }
        if self.bound_path() != Some(file.file_path.as_str()) {
            self.bound = Some(file.file_path.clone());
        }
    }

    pub fn bound_path(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    pub fn model(&self, path: &str) -> Option<&TextModel> {
        self.models.get(path)
    }

    pub fn bound_model(&self) -> Option<&TextModel> {
        self.bound_path().and_then(|path| self.model(path))
    }

    pub fn bound_model_mut(&mut self) -> Option<&mut TextModel> {
        let path = self.bound.as_deref()?;
        self.models.get_mut(path)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn models_created(&self) -> usize {
        self.models_created
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Ask for `line_number` (one-based) of the bound model to be centred
    /// after the next render.
    pub fn reveal_line(&mut self, line_number: usize) {
        if let Some(path) = self.bound.clone() {
            self.pending_reveal = Some(PendingReveal {
                path,
                line: line_number,
            });
        }
    }

    pub fn has_pending_reveal(&self) -> bool {
        self.pending_reveal.is_some()
    }

    /// Post-render hook. Records the viewport height and applies a pending
    /// reveal if its model is still the bound one.
    pub fn after_render(&mut self, viewport_height: usize) {
        if !self.is_alive() {
            self.pending_reveal = None;
            return;
        }
        self.viewport_height = viewport_height.max(1);
        let Some(pending) = self.pending_reveal.take() else {
            return;
        };
        if self.bound.as_deref() != Some(pending.path.as_str()) {
            tracing::debug!(path = %pending.path, "dropping reveal for unbound model");
            return;
        }
        let height = self.viewport_height;
        if let Some(model) = self.models.get_mut(&pending.path) {
            model.reveal_line_centered(pending.line, height);
        }
    }

    /// Release models and themes. Every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.has_pending_reveal() {
            tracing::debug!("dropping pending reveal on teardown");
        }
        tracing::debug!(
            models = self.model_count(),
            created = self.models_created(),
            "tearing down editor session"
        );
        self.models.clear();
        self.themes.clear();
        self.active_theme = None;
        self.bound = None;
        self.pending_reveal = None;
        self.torn_down = true;
    }
}
