use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tempfile::tempdir;

use crate::editor::{FormatCommand, Motion};
use crate::export::EXPORT_FILE_NAME;
use crate::storage::{MemoryStorage, STORAGE_KEY, Storage, WELCOME_DOCUMENT};

use super::event_loop::ResizeDebouncer;
use super::model::Focus;
use super::{App, Message, Model, ToastLevel, route_shortcut, update};

fn create_test_model(text: &str) -> Model {
    Model::new(text, (80, 24))
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn ctrl(ch: char) -> KeyEvent {
    key(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn apply(model: Model, msgs: impl IntoIterator<Item = Message>) -> Model {
    msgs.into_iter().fold(model, update)
}

fn memory_app(storage: MemoryStorage) -> App {
    App::new(Box::new(storage))
}

fn stored(app: &App) -> Option<String> {
    app.storage().read(STORAGE_KEY).unwrap()
}

#[test]
fn test_typing_records_one_entry_per_edit() {
    let model = apply(
        create_test_model(""),
        "abc".chars().map(Message::InsertChar),
    );
    assert_eq!(model.buffer.text(), "abc");
    assert_eq!(model.history.len(), 4);
    assert_eq!(model.history.index(), 3);
}

#[test]
fn test_undo_n_times_returns_start() {
    let start = "# Start\n";
    let mut model = create_test_model(start);
    model.buffer.move_by(Motion::BufferEnd, false);
    let model = apply(
        model,
        [
            Message::InsertChar('x'),
            Message::NewLine,
            Message::Format(FormatCommand::Bold),
            Message::DeleteBack,
        ],
    );
    assert_ne!(model.buffer.text(), start);
    let model = apply(model, std::iter::repeat_n(Message::Undo, 4));
    assert_eq!(model.buffer.text(), start);
    assert!(!model.history.can_undo());
}

#[test]
fn test_undo_then_redo_restores_edit() {
    let model = apply(create_test_model(""), [Message::InsertChar('a')]);
    let after_edit = model.buffer.text();
    let model = apply(model, [Message::Undo, Message::Redo]);
    assert_eq!(model.buffer.text(), after_edit);
}

#[test]
fn test_undo_redo_at_ends_are_noops() {
    let model = create_test_model("same");
    let revision = model.revision;
    let model = apply(model, [Message::Undo, Message::Redo]);
    assert_eq!(model.buffer.text(), "same");
    assert_eq!(model.revision, revision);
}

#[test]
fn test_edit_after_undo_discards_redo() {
    let model = apply(
        create_test_model(""),
        [
            Message::InsertChar('a'),
            Message::InsertChar('b'),
            Message::Undo,
            Message::InsertChar('c'),
        ],
    );
    assert_eq!(model.buffer.text(), "ac");
    assert!(!model.history.can_redo());
    let model = update(model, Message::Redo);
    assert_eq!(model.buffer.text(), "ac");
}

#[test]
fn test_bold_wraps_selection_and_lights_toggle() {
    let mut model = create_test_model("hello");
    model.buffer.select_all();
    let model = update(model, Message::Format(FormatCommand::Bold));
    assert_eq!(model.buffer.text(), "**hello**");
    assert!(!model.buffer.has_selection());

    let model = update(model, Message::SelectAll);
    assert!(model.format_state.bold);
    assert!(!model.format_state.italic);
}

#[test]
fn test_bold_without_selection_inserts_default() {
    let model = update(create_test_model(""), Message::Format(FormatCommand::Bold));
    assert_eq!(model.buffer.text(), "**text**");
    assert_eq!(model.buffer.caret(), 8);
}

#[test]
fn test_format_from_preview_focus_returns_to_editor() {
    let mut model = create_test_model("");
    model.focus = Focus::Preview;
    let model = update(model, Message::Format(FormatCommand::Italic));
    assert_eq!(model.focus, Focus::Editor);
    assert_eq!(model.buffer.text(), "_text_");
}

#[test]
fn test_asterisk_emphasis_is_not_italic() {
    let mut model = create_test_model("*word*");
    model.buffer.select_all();
    let model = update(model, Message::Redraw);
    assert!(!model.format_state.italic);
}

#[test]
fn test_clear_requires_confirmation_and_is_undoable() {
    let model = update(create_test_model("keep me"), Message::RequestClear);
    assert!(model.confirm_clear);
    assert_eq!(model.buffer.text(), "keep me");

    let model = update(model, Message::ConfirmClear);
    assert!(!model.confirm_clear);
    assert_eq!(model.buffer.text(), "");
    assert_eq!(model.history.len(), 2);

    let model = update(model, Message::Undo);
    assert_eq!(model.buffer.text(), "keep me");
}

#[test]
fn test_cancel_clear_keeps_document() {
    let model = apply(
        create_test_model("keep me"),
        [Message::RequestClear, Message::CancelClear],
    );
    assert!(!model.confirm_clear);
    assert_eq!(model.buffer.text(), "keep me");
    assert_eq!(model.history.len(), 1);
}

#[test]
fn test_paste_is_a_single_edit() {
    let model = update(
        create_test_model(""),
        Message::InsertText("line one\r\nline two".to_string()),
    );
    assert_eq!(model.buffer.text(), "line one\nline two");
    assert_eq!(model.history.len(), 2);
}

#[test]
fn test_caret_moves_do_not_touch_history() {
    let model = apply(
        create_test_model("abc"),
        [
            Message::Move(Motion::Right),
            Message::Select(Motion::LineEnd),
            Message::MoveTo(0, 1),
        ],
    );
    assert_eq!(model.history.len(), 1);
    assert_eq!(model.revision, 0);
    assert_eq!(model.buffer.caret(), 1);
}

#[test]
fn test_revision_tracks_document_changes() {
    let model = apply(
        create_test_model(""),
        [Message::InsertChar('a'), Message::Undo, Message::Redo],
    );
    assert_eq!(model.revision, 3);
    assert!(model.needs_persist());
}

#[test]
fn test_stats_follow_edits() {
    let model = apply(
        create_test_model("one two"),
        [Message::Move(Motion::BufferEnd), Message::InsertChar(' ')],
    );
    assert_eq!(model.stats.words, 2);
    assert_eq!(model.stats.chars, 8);
}

#[test]
fn test_typing_keeps_caret_row_visible() {
    let model = apply(create_test_model(""), std::iter::repeat_n(Message::NewLine, 40));
    let rows = model.pane_rows();
    let line = model.buffer.cursor().line;
    assert!(line >= model.editor_scroll && line < model.editor_scroll + rows);
}

#[test]
fn test_drag_updates_width_within_limits() {
    let model = apply(
        create_test_model(""),
        [Message::BeginDrag, Message::DragTo(30)],
    );
    assert!(model.layout.is_dragging());
    assert_eq!(model.layout.editor_width(), 38);

    let model = apply(model, [Message::DragTo(2)]);
    assert_eq!(model.layout.editor_width(), 20);
    let model = apply(model, [Message::DragTo(79), Message::EndDrag]);
    assert_eq!(model.layout.editor_width(), 80);
    assert!(!model.layout.is_dragging());

    let model = update(model, Message::DragTo(40));
    assert_eq!(model.layout.editor_width(), 80);
}

#[test]
fn test_hiding_preview_returns_focus_to_editor() {
    let model = apply(
        create_test_model(""),
        [Message::FocusPreview, Message::TogglePreview],
    );
    assert!(!model.layout.preview_visible());
    assert_eq!(model.focus, Focus::Editor);

    let model = update(model, Message::FocusPreview);
    assert_eq!(model.focus, Focus::Editor);
}

#[test]
fn test_preview_lines_are_cached_per_revision() {
    let mut model = create_test_model("# One");
    let first = model.preview_lines(40).to_vec();
    assert_eq!(model.preview_lines(40), first.as_slice());

    let mut model = apply(
        model,
        [Message::Move(Motion::BufferEnd), Message::InsertChar('!')],
    );
    let second = model.preview_lines(40);
    assert!(second.iter().any(|line| line.content().contains("One!")));
}

#[test]
fn test_toast_expires_after_timeout() {
    let mut model = create_test_model("");
    model.show_toast(ToastLevel::Info, "hello");
    assert_eq!(model.active_toast(), Some(("hello", ToastLevel::Info)));
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_route_shortcut_covers_formatting_chords() {
    let cases = [
        (ctrl('b'), Message::Format(FormatCommand::Bold)),
        (ctrl('i'), Message::Format(FormatCommand::Italic)),
        (ctrl('1'), Message::Format(FormatCommand::Heading1)),
        (ctrl('2'), Message::Format(FormatCommand::Heading2)),
        (ctrl('3'), Message::Format(FormatCommand::Heading3)),
        (ctrl('u'), Message::Format(FormatCommand::UnorderedList)),
        (ctrl('o'), Message::Format(FormatCommand::OrderedList)),
        (ctrl('k'), Message::Format(FormatCommand::Link)),
        (ctrl('e'), Message::Format(FormatCommand::Code)),
        (ctrl('>'), Message::Format(FormatCommand::Quote)),
        (ctrl('-'), Message::Format(FormatCommand::HorizontalRule)),
        (ctrl('z'), Message::Undo),
        (ctrl('y'), Message::Redo),
        (ctrl('s'), Message::ExportMarkdown),
        (ctrl('p'), Message::TogglePreview),
        (ctrl('q'), Message::Quit),
    ];
    for (event, expected) in cases {
        assert_eq!(route_shortcut(&event), Some(expected), "{event:?}");
    }
}

#[test]
fn test_route_shortcut_shifted_chords() {
    let shift_ctrl = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
    assert_eq!(
        route_shortcut(&key(KeyCode::Char('K'), shift_ctrl)),
        Some(Message::Format(FormatCommand::Image))
    );
    assert_eq!(
        route_shortcut(&key(KeyCode::Char('Z'), shift_ctrl)),
        Some(Message::Redo)
    );
    assert_eq!(
        route_shortcut(&key(KeyCode::Char('S'), shift_ctrl)),
        Some(Message::ExportHtml)
    );
    assert_eq!(
        route_shortcut(&key(KeyCode::Char('C'), shift_ctrl)),
        Some(Message::RequestClear)
    );
    assert_eq!(
        route_shortcut(&key(KeyCode::Char('.'), shift_ctrl)),
        Some(Message::Format(FormatCommand::Quote))
    );
}

#[test]
fn test_route_shortcut_accepts_super_as_command() {
    let event = key(KeyCode::Char('b'), KeyModifiers::SUPER);
    assert_eq!(
        route_shortcut(&event),
        Some(Message::Format(FormatCommand::Bold))
    );
}

#[test]
fn test_route_shortcut_ignores_plain_and_unbound_keys() {
    assert_eq!(route_shortcut(&key(KeyCode::Char('b'), KeyModifiers::NONE)), None);
    assert_eq!(route_shortcut(&key(KeyCode::Char('B'), KeyModifiers::SHIFT)), None);
    assert_eq!(route_shortcut(&ctrl('j')), None);
    assert_eq!(route_shortcut(&key(KeyCode::Enter, KeyModifiers::CONTROL)), None);
}

#[test]
fn test_editor_keys_insert_and_consume_shortcuts() {
    let model = create_test_model("");
    assert_eq!(
        App::handle_key(key(KeyCode::Char('b'), KeyModifiers::NONE), &model),
        Some(Message::InsertChar('b'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('B'), KeyModifiers::SHIFT), &model),
        Some(Message::InsertChar('B'))
    );
    assert_eq!(
        App::handle_key(ctrl('b'), &model),
        Some(Message::Format(FormatCommand::Bold))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Tab, KeyModifiers::NONE), &model),
        Some(Message::Indent)
    );
}

#[test]
fn test_editor_motion_keys() {
    let model = create_test_model("");
    assert_eq!(
        App::handle_key(key(KeyCode::Left, KeyModifiers::CONTROL), &model),
        Some(Message::Move(Motion::WordLeft))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Right, KeyModifiers::SHIFT), &model),
        Some(Message::Select(Motion::Right))
    );
    assert_eq!(
        App::handle_key(
            key(KeyCode::End, KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            &model
        ),
        Some(Message::Select(Motion::BufferEnd))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Home, KeyModifiers::NONE), &model),
        Some(Message::Move(Motion::LineStart))
    );
}

#[test]
fn test_shortcuts_are_inactive_in_preview() {
    let mut model = create_test_model("");
    model.focus = Focus::Preview;
    assert_eq!(App::handle_key(ctrl('b'), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), &model),
        None
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Down, KeyModifiers::NONE), &model),
        Some(Message::PreviewScrollDown(1))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::FocusEditor)
    );
}

#[test]
fn test_escape_moves_focus_to_preview() {
    let model = create_test_model("");
    assert_eq!(
        App::handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::FocusPreview)
    );
}

#[test]
fn test_confirmation_keys() {
    let model = update(create_test_model("x"), Message::RequestClear);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('y'), KeyModifiers::NONE), &model),
        Some(Message::ConfirmClear)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &model),
        Some(Message::ConfirmClear)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('n'), KeyModifiers::NONE), &model),
        Some(Message::CancelClear)
    );
    assert_eq!(App::handle_key(ctrl('b'), &model), Some(Message::CancelClear));
}

#[test]
fn test_help_toggles_with_f1_and_ctrl_h() {
    let model = create_test_model("");
    assert_eq!(
        App::handle_key(key(KeyCode::F(1), KeyModifiers::NONE), &model),
        Some(Message::ToggleHelp)
    );
    assert_eq!(App::handle_key(ctrl('h'), &model), Some(Message::ToggleHelp));

    let model = update(model, Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::HideHelp)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), &model),
        None
    );
}

#[test]
fn test_paste_event_becomes_insert_text() {
    let model = create_test_model("");
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = App::handle_event(
        &Event::Paste("pasted".to_string()),
        &model,
        0,
        &mut debouncer,
    );
    assert_eq!(msg, Some(Message::InsertText("pasted".to_string())));
}

#[test]
fn test_resize_event_is_debounced() {
    let model = create_test_model("");
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = App::handle_event(&Event::Resize(100, 30), &model, 0, &mut debouncer);
    assert_eq!(msg, None);
    assert!(debouncer.is_pending());
}

#[test]
fn test_resize_debouncer_waits_for_quiet_period() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(120, 40, 0);

    assert!(debouncer.take_ready(50).is_none());
    assert_eq!(debouncer.take_ready(100), Some((120, 40)));
}

#[test]
fn test_mouse_toolbar_click_dispatches_command() {
    let model = create_test_model("");
    let msg = App::handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 0), &model);
    assert_eq!(msg, Some(Message::Format(FormatCommand::Bold)));
}

#[test]
fn test_mouse_splitter_drag_sequence() {
    // 80 columns at 50%: editor 0..39, splitter at 39.
    let model = create_test_model("");
    let down = App::handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 39, 5), &model);
    assert_eq!(down, Some(Message::BeginDrag));

    let model = update(model, Message::BeginDrag);
    let drag = App::handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 5), &model);
    assert_eq!(drag, Some(Message::DragTo(20)));
    let up = App::handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 20, 5), &model);
    assert_eq!(up, Some(Message::EndDrag));
}

#[test]
fn test_mouse_click_in_editor_moves_caret() {
    let model = create_test_model("hello\nworld");
    // Body starts at row 2; the gutter is two columns wide.
    let msg = App::handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 4, 3), &model);
    assert_eq!(msg, Some(Message::MoveTo(1, 2)));

    let model = update(model, msg.unwrap());
    assert_eq!(model.buffer.cursor().line, 1);
    assert_eq!(model.buffer.cursor().col, 2);
}

#[test]
fn test_mouse_click_in_preview_focuses_it() {
    let model = create_test_model("");
    let msg = App::handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 5), &model);
    assert_eq!(msg, Some(Message::FocusPreview));
}

#[test]
fn test_mouse_wheel_scrolls_pane_under_pointer() {
    let model = create_test_model("");
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5), &model),
        Some(Message::EditorScrollDown(3))
    );
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::ScrollUp, 60, 5), &model),
        Some(Message::PreviewScrollUp(3))
    );
}

#[test]
fn test_mouse_ignored_under_overlay() {
    let model = update(create_test_model(""), Message::ToggleHelp);
    let msg = App::handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 0), &model);
    assert_eq!(msg, None);
}

#[test]
fn test_initial_model_prefers_stored_text() {
    let app = memory_app(MemoryStorage::new().with_value(STORAGE_KEY, "# Mine"));
    let model = app.initial_model((80, 24));
    assert_eq!(model.buffer.text(), "# Mine");
    assert_eq!(model.history.len(), 1);
    assert!(!model.needs_persist());
    assert_eq!(model.storage_location, "memory");
}

#[test]
fn test_initial_model_falls_back_to_welcome() {
    let app = memory_app(MemoryStorage::new());
    let model = app.initial_model((80, 24));
    assert_eq!(model.buffer.text(), WELCOME_DOCUMENT);
}

#[test]
fn test_initial_model_applies_layout() {
    let app = memory_app(MemoryStorage::new()).with_layout(95, false);
    let model = app.initial_model((80, 24));
    assert_eq!(model.layout.editor_width(), 80);
    assert!(!model.layout.preview_visible());
}

#[test]
fn test_every_document_change_is_persisted() {
    let mut app = memory_app(MemoryStorage::new());
    let mut model = create_test_model("");

    app.dispatch(&mut model, Message::InsertChar('a'));
    assert_eq!(stored(&app).as_deref(), Some("a"));

    app.dispatch(&mut model, Message::Format(FormatCommand::Bold));
    assert_eq!(stored(&app).as_deref(), Some("a**text**"));

    app.dispatch(&mut model, Message::Undo);
    assert_eq!(stored(&app).as_deref(), Some("a"));

    app.dispatch(&mut model, Message::Redo);
    assert_eq!(stored(&app).as_deref(), Some("a**text**"));

    app.dispatch(&mut model, Message::RequestClear);
    app.dispatch(&mut model, Message::ConfirmClear);
    assert_eq!(stored(&app).as_deref(), Some(""));
    assert!(!model.needs_persist());
}

#[test]
fn test_caret_motion_does_not_write() {
    let mut app = memory_app(MemoryStorage::new());
    let mut model = create_test_model("abc");
    app.dispatch(&mut model, Message::Move(Motion::Right));
    assert_eq!(stored(&app), None);
}

#[test]
fn test_storage_failure_shows_warning_and_editing_continues() {
    let mut app = memory_app(MemoryStorage::new().failing_writes());
    let mut model = create_test_model("");
    app.dispatch(&mut model, Message::InsertChar('a'));
    let (_, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);

    app.dispatch(&mut model, Message::InsertChar('b'));
    assert_eq!(model.buffer.text(), "ab");
}

#[test]
fn test_export_writes_file_and_shows_saved() {
    let dir = tempdir().unwrap();
    let mut app = memory_app(MemoryStorage::new()).with_export_dir(dir.path().to_path_buf());
    let mut model = create_test_model("# Notes\n");
    app.dispatch(&mut model, Message::ExportMarkdown);

    let written = std::fs::read_to_string(dir.path().join(EXPORT_FILE_NAME)).unwrap();
    assert_eq!(written, "# Notes\n");
    assert!(model.saved_indicator_active(Instant::now()));
    assert!(!model.saved_indicator_active(Instant::now() + Duration::from_secs(3)));
    assert!(model.expire_saved_indicator(Instant::now() + Duration::from_secs(3)));
}

#[test]
fn test_export_failure_shows_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let mut app = memory_app(MemoryStorage::new()).with_export_dir(blocker);
    let mut model = create_test_model("text");
    app.dispatch(&mut model, Message::ExportMarkdown);

    let (_, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(model.saved_until.is_none());
}
