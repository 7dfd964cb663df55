//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
pub mod input;
mod model;
mod update;

pub use input::route_shortcut;
pub use model::{CHROME_ROWS, Focus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::layout::LayoutState;
use crate::storage::{Storage, load_initial_document};

/// Owns the storage backend and runs the event loop.
pub struct App {
    storage: Box<dyn Storage>,
    export_dir: PathBuf,
    layout: LayoutState,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create an application persisting to `storage`.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            export_dir: PathBuf::from("."),
            layout: LayoutState::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Directory `document.md` and `document.html` are written to.
    #[must_use]
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Initial split width (percent, clamped) and preview visibility.
    #[must_use]
    pub fn with_layout(mut self, editor_width: u16, preview_visible: bool) -> Self {
        self.layout = LayoutState::new(editor_width, preview_visible);
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// The storage backend, e.g. for inspecting what was persisted.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Build the starting model from storage.
    ///
    /// A read failure falls back to the welcome document and shows a warning.
    pub fn initial_model(&self, terminal_size: (u16, u16)) -> Model {
        let initial = load_initial_document(self.storage.as_ref());
        tracing::debug!(source = ?initial.source, chars = initial.text.len(), "loaded document");
        let mut model = Model::new(&initial.text, terminal_size).with_layout(self.layout);
        model.storage_location = self.storage.describe();
        model.export_dir.clone_from(&self.export_dir);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        if let Some(err) = initial.warning {
            model.show_toast(ToastLevel::Warning, format!("Could not load document: {err}"));
        }
        model
    }
}

#[cfg(test)]
mod tests;
