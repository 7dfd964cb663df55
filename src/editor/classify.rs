//! Active-format detection for the toolbar.
//!
//! This is a heuristic over the selected text, not a markdown parser: it only
//! looks at the characters at the very edges of the selection. Partially
//! selected or nested formatting is misclassified, and `*emphasis*` is not
//! recognized as italic (only `_emphasis_` is).

use super::buffer::Selection;

/// Which toolbar toggles should render as active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub heading: bool,
    pub list: bool,
}

impl FormatState {
    pub const fn any(&self) -> bool {
        self.bold || self.italic || self.heading || self.list
    }
}

/// Classify the text covered by `selection` within `text`.
///
/// Offsets are char indices; out-of-range selections are clamped.
pub fn classify_selection(text: &str, selection: Selection) -> FormatState {
    if selection.is_empty() {
        return FormatState::default();
    }
    let selected: String = text
        .chars()
        .skip(selection.start)
        .take(selection.len())
        .collect();
    classify_text(&selected)
}

/// Classify an already-extracted selection.
pub fn classify_text(selected: &str) -> FormatState {
    let len = selected.chars().count();
    FormatState {
        bold: len >= 4 && selected.starts_with("**") && selected.ends_with("**"),
        italic: len >= 2 && selected.starts_with('_') && selected.ends_with('_'),
        heading: selected.starts_with('#'),
        list: is_list_marker(selected),
    }
}

fn is_list_marker(selected: &str) -> bool {
    if selected.starts_with("- ") || selected.starts_with("* ") {
        return true;
    }
    let digits = selected.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && selected[digits..].starts_with(". ")
}
