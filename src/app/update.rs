use crate::app::Model;
use crate::app::model::Focus;
use crate::editor::{FormatCommand, Motion, TextBuffer, apply_command};

const INDENT: &str = "  ";

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the caret, replacing any selection
    InsertChar(char),
    /// Insert pasted text as a single edit
    InsertText(String),
    /// Split the line at the caret (Enter)
    NewLine,
    /// Insert two spaces (Tab)
    Indent,
    /// Delete selection or character before the caret (Backspace)
    DeleteBack,
    /// Delete selection or character at the caret (Delete)
    DeleteForward,
    /// Apply a formatting template at the selection
    Format(FormatCommand),
    Undo,
    Redo,
    /// Ask before emptying the document
    RequestClear,
    /// Empty the document (undoable)
    ConfirmClear,
    CancelClear,

    // Caret
    /// Move the caret, dropping the selection
    Move(Motion),
    /// Move the caret, extending the selection
    Select(Motion),
    SelectAll,
    /// Place the caret at (line, col), e.g. from a mouse click
    MoveTo(usize, usize),
    /// Move the caret up one screen
    EditorPageUp,
    /// Move the caret down one screen
    EditorPageDown,

    // Scrolling
    EditorScrollUp(usize),
    EditorScrollDown(usize),
    PreviewScrollUp(usize),
    PreviewScrollDown(usize),
    PreviewPageUp,
    PreviewPageDown,
    PreviewTop,
    PreviewBottom,

    // Layout
    /// Pointer pressed on the splitter
    BeginDrag,
    /// Pointer moved to this column while dragging
    DragTo(u16),
    /// Pointer released
    EndDrag,
    TogglePreview,
    FocusEditor,
    FocusPreview,

    // Export
    /// Write `document.md` to the export directory
    ExportMarkdown,
    /// Write `document.html` to the export directory
    ExportHtml,

    // Overlays
    ToggleHelp,
    HideHelp,
    HelpScrollUp,
    HelpScrollDown,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::InsertChar(ch) => edit(&mut model, |buf| {
            buf.insert_char(ch);
            true
        }),
        Message::InsertText(text) => {
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            edit(&mut model, |buf| buf.insert_str(&text));
        }
        Message::NewLine => edit(&mut model, |buf| {
            buf.split_line();
            true
        }),
        Message::Indent => edit(&mut model, |buf| buf.insert_str(INDENT)),
        Message::DeleteBack => edit(&mut model, TextBuffer::delete_back),
        Message::DeleteForward => edit(&mut model, TextBuffer::delete_forward),
        Message::Format(command) => {
            model.focus = Focus::Editor;
            edit(&mut model, |buf| {
                apply_command(buf, command);
                true
            });
        }
        Message::Undo => {
            if let Some(snapshot) = model.history.undo().cloned() {
                model.restore_snapshot(snapshot);
                model.ensure_cursor_visible();
            }
        }
        Message::Redo => {
            if let Some(snapshot) = model.history.redo().cloned() {
                model.restore_snapshot(snapshot);
                model.ensure_cursor_visible();
            }
        }
        Message::RequestClear => {
            model.help_visible = false;
            model.confirm_clear = true;
        }
        Message::ConfirmClear => {
            model.confirm_clear = false;
            model.buffer.select_all();
            model.buffer.replace_selection("");
            model.commit_edit();
            model.editor_scroll = 0;
            model.preview_scroll = 0;
        }
        Message::CancelClear => model.confirm_clear = false,

        Message::Move(motion) => {
            model.buffer.move_by(motion, false);
            model.ensure_cursor_visible();
        }
        Message::Select(motion) => {
            model.buffer.move_by(motion, true);
            model.ensure_cursor_visible();
        }
        Message::SelectAll => model.buffer.select_all(),
        Message::MoveTo(line, col) => {
            model.focus = Focus::Editor;
            model.buffer.move_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::EditorPageUp => {
            for _ in 0..model.pane_rows().max(1) {
                model.buffer.move_by(Motion::Up, false);
            }
            model.ensure_cursor_visible();
        }
        Message::EditorPageDown => {
            for _ in 0..model.pane_rows().max(1) {
                model.buffer.move_by(Motion::Down, false);
            }
            model.ensure_cursor_visible();
        }

        Message::EditorScrollUp(n) => {
            model.editor_scroll = model.editor_scroll.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            model.editor_scroll = (model.editor_scroll + n).min(model.max_editor_scroll());
        }
        Message::PreviewScrollUp(n) => {
            model.preview_scroll = model.preview_scroll.saturating_sub(n);
        }
        // Clamped against the laid-out preview when rendering.
        Message::PreviewScrollDown(n) => {
            model.preview_scroll = model.preview_scroll.saturating_add(n);
        }
        Message::PreviewPageUp => {
            model.preview_scroll = model.preview_scroll.saturating_sub(model.pane_rows());
        }
        Message::PreviewPageDown => {
            model.preview_scroll = model.preview_scroll.saturating_add(model.pane_rows());
        }
        Message::PreviewTop => model.preview_scroll = 0,
        Message::PreviewBottom => model.preview_scroll = usize::MAX,

        Message::BeginDrag => {
            if model.layout.preview_visible() {
                model.layout.begin_drag();
            }
        }
        Message::DragTo(x) => {
            model.layout.drag_to(x, 0, model.width);
        }
        Message::EndDrag => model.layout.end_drag(),
        Message::TogglePreview => {
            model.layout.toggle_preview();
            if !model.layout.preview_visible() {
                model.focus = Focus::Editor;
            }
        }
        Message::FocusEditor => model.focus = Focus::Editor,
        Message::FocusPreview => {
            if model.layout.preview_visible() {
                model.focus = Focus::Preview;
            }
        }

        // Side effects only
        Message::ExportMarkdown | Message::ExportHtml | Message::Redraw => {}

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll = 0;
        }
        Message::HideHelp => model.help_visible = false,
        Message::HelpScrollUp => model.help_scroll = model.help_scroll.saturating_sub(1),
        Message::HelpScrollDown => model.help_scroll = model.help_scroll.saturating_add(1),

        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.editor_scroll = model.editor_scroll.min(model.max_editor_scroll());
            model.ensure_cursor_visible();
        }
        Message::Quit => model.should_quit = true,
    }

    model.refresh_format_state();
    model
}

/// Run `f` on the buffer and, when it reports a change, record history.
fn edit(model: &mut Model, f: impl FnOnce(&mut TextBuffer) -> bool) {
    if f(&mut model.buffer) {
        model.commit_edit();
    }
    model.ensure_cursor_visible();
}
