use std::path::PathBuf;
use std::time::{Duration, Instant};

use ropey::Rope;

use crate::document::{DocumentStats, RenderedLine, preview_lines};
use crate::editor::{FormatState, History, TextBuffer, classify_selection};
use crate::layout::LayoutState;

const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Rows taken by the toolbar, the pane titles and the status bar.
pub const CHROME_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Editor,
    Preview,
}

/// Preview lines laid out for one document revision and width.
#[derive(Debug, Clone)]
struct PreviewCache {
    revision: u64,
    width: u16,
    lines: Vec<RenderedLine>,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document text with caret and selection
    pub buffer: TextBuffer,
    /// Snapshot after every document change
    pub history: History<Rope>,
    /// Toolbar toggles derived from the selection
    pub format_state: FormatState,
    /// Word/char/line counts of the current document
    pub stats: DocumentStats,
    /// Editor/preview split
    pub layout: LayoutState,
    pub focus: Focus,
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    /// First editor line shown
    pub editor_scroll: usize,
    /// First preview line shown
    pub preview_scroll: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
    pub help_scroll: usize,
    /// Whether the clear confirmation is showing
    pub confirm_clear: bool,
    /// Bumped on every document change
    pub revision: u64,
    /// Revision last handed to storage
    pub persisted_revision: u64,
    /// Set after a successful export; the status bar shows "Saved" until then
    pub saved_until: Option<Instant>,
    /// Where the document is persisted, for the help overlay
    pub storage_location: String,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
    preview_cache: Option<PreviewCache>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("buffer", &self.buffer)
            .field("history_index", &self.history.index())
            .field("layout", &self.layout)
            .field("focus", &self.focus)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model holding `text`, caret at the start.
    pub fn new(text: &str, terminal_size: (u16, u16)) -> Self {
        let buffer = TextBuffer::from_text(text);
        let history = History::new(buffer.snapshot());
        Self {
            stats: DocumentStats::from_text(text),
            buffer,
            history,
            format_state: FormatState::default(),
            layout: LayoutState::default(),
            focus: Focus::Editor,
            width: terminal_size.0,
            height: terminal_size.1,
            editor_scroll: 0,
            preview_scroll: 0,
            help_visible: false,
            help_scroll: 0,
            confirm_clear: false,
            revision: 0,
            persisted_revision: 0,
            saved_until: None,
            storage_location: String::new(),
            export_dir: PathBuf::from("."),
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            toast: None,
            preview_cache: None,
        }
    }

    #[must_use]
    pub const fn with_layout(mut self, layout: LayoutState) -> Self {
        self.layout = layout;
        self
    }

    /// Rows available to pane contents.
    pub const fn pane_rows(&self) -> usize {
        self.height.saturating_sub(CHROME_ROWS) as usize
    }

    /// Whether the document changed since it was last written to storage.
    pub const fn needs_persist(&self) -> bool {
        self.revision != self.persisted_revision
    }

    /// Record the current buffer as a new history entry.
    pub(super) fn commit_edit(&mut self) {
        self.history.record(self.buffer.snapshot());
        self.document_changed();
    }

    /// Load a history entry into the buffer without recording it.
    pub(super) fn restore_snapshot(&mut self, rope: Rope) {
        self.buffer.restore(rope);
        self.document_changed();
    }

    fn document_changed(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.stats = DocumentStats::from_text(&self.buffer.text());
    }

    /// Recompute the toolbar toggles from the current selection.
    pub(super) fn refresh_format_state(&mut self) {
        let selection = self.buffer.selection();
        self.format_state = if selection.is_empty() {
            FormatState::default()
        } else {
            classify_selection(&self.buffer.text(), selection)
        };
    }

    /// Scroll the editor so the caret row is on screen.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let rows = self.pane_rows().max(1);
        let line = self.buffer.cursor().line;
        if line < self.editor_scroll {
            self.editor_scroll = line;
        } else if line >= self.editor_scroll + rows {
            self.editor_scroll = line + 1 - rows;
        }
    }

    pub(super) fn max_editor_scroll(&self) -> usize {
        self.buffer.line_count().saturating_sub(self.pane_rows())
    }

    /// Preview lines for the current document at `width`, cached per revision.
    pub fn preview_lines(&mut self, width: u16) -> &[RenderedLine] {
        let stale = self
            .preview_cache
            .as_ref()
            .is_none_or(|cache| cache.revision != self.revision || cache.width != width);
        if stale {
            let _span = tracing::debug_span!("preview_lines", revision = self.revision, width)
                .entered();
            let lines = preview_lines(&self.buffer.text(), width);
            self.preview_cache = Some(PreviewCache {
                revision: self.revision,
                width,
                lines,
            });
        }
        self.preview_cache
            .as_ref()
            .map_or(&[][..], |cache| cache.lines.as_slice())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        let expired = self
            .toast
            .as_ref()
            .is_some_and(|toast| now >= toast.expires_at);
        if expired {
            self.toast = None;
        }
        expired
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Whether the "Saved" indicator should show at `now`.
    pub fn saved_indicator_active(&self, now: Instant) -> bool {
        self.saved_until.is_some_and(|until| now < until)
    }

    /// Drop the "Saved" indicator once its time is up.
    pub(super) fn expire_saved_indicator(&mut self, now: Instant) -> bool {
        if self.saved_until.is_some() && !self.saved_indicator_active(now) {
            self.saved_until = None;
            return true;
        }
        false
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("", (80, 24))
    }
}
