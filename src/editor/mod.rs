//! Markdown editing core.
//!
//! Provides a rope-backed text buffer with caret and selection, a linear
//! undo/redo history, the template-based formatting commands, and the
//! heuristic that decides which toolbar toggles are active.

mod buffer;
mod classify;
mod commands;
mod history;

pub use buffer::{Cursor, Motion, Selection, TextBuffer};
pub use classify::{FormatState, classify_selection, classify_text};
pub use commands::{FormatCommand, PLACEHOLDER, apply_command};
pub use history::History;
