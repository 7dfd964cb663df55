//! Word, character, and line counts for the status bar.

/// Counts over the raw document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Whitespace-separated tokens.
    pub words: usize,
    /// Unicode scalar values, whitespace included.
    pub chars: usize,
    pub lines: usize,
}

impl DocumentStats {
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
            lines: text.split('\n').count(),
        }
    }
}
