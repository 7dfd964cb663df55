//! Markdown rendering.
//!
//! This module handles:
//! - Converting the document to HTML with comrak (preview export, `--print-html`)
//! - Line-numbered formatting of fenced code blocks
//! - Laying the document out as styled terminal lines for the preview pane
//! - Word and character statistics

mod code_block;
mod html;
mod preview;
mod stats;
mod types;

pub use code_block::{DEFAULT_LANGUAGE_LABEL, code_block_html, escape_angle_brackets, language_label};
pub use html::render_html;
pub use preview::preview_lines;
pub use stats::DocumentStats;
pub use types::{InlineColor, InlineSpan, InlineStyle, LineType, RenderedLine};
