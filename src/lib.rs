// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorGeometry)
    clippy::module_name_repetitions
)]

//! # Markpad
//!
//! A terminal markdown editor with a live rendered preview.
//!
//! Markpad shows the markdown source and its rendering side by side:
//! - Formatting commands (bold, headings, lists, links, ...) from chords or
//!   the toolbar
//! - Snapshot undo/redo
//! - Syntax-highlighted, line-numbered code blocks in the preview
//! - Automatic persistence of the document between sessions
//! - Export to `document.md` or a standalone `document.html`
//!
//! ## Architecture
//!
//! Markpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop, state and input routing
//! - [`editor`]: Text buffer, formatting commands and history
//! - [`document`]: Markdown to HTML and to preview lines
//! - [`highlight`]: Syntax highlighting
//! - [`layout`]: Split pane sizing and dragging
//! - [`storage`]: Persistence of the working document
//! - [`export`]: File exports
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod export;
pub mod highlight;
pub mod layout;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::editor::{FormatCommand, TextBuffer};
    pub use crate::storage::{FileStorage, MemoryStorage, Storage};
}
