//! Mapping terminal events to messages.
//!
//! Formatting chords are recognized with either Ctrl or Super (Cmd) as the
//! command modifier, and only while the editor has focus. A matched chord is
//! consumed and never reaches text insertion.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::model::Focus;
use crate::app::{App, Message, Model};
use crate::editor::{FormatCommand, Motion};

use super::event_loop::ResizeDebouncer;

/// Lines moved per scroll-wheel notch.
const WHEEL_LINES: usize = 3;

/// Chords listed in the help overlay.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Mod+B", "Bold"),
    ("Mod+I", "Italic"),
    ("Mod+1/2/3", "Heading 1/2/3"),
    ("Mod+U", "Bulleted list"),
    ("Mod+O", "Numbered list"),
    ("Mod+K", "Link"),
    ("Mod+Shift+K", "Image"),
    ("Mod+E", "Inline code"),
    ("Mod+>", "Block quote"),
    ("Mod+-", "Horizontal rule"),
    ("Mod+S", "Export document.md"),
    ("Mod+Shift+S", "Export document.html"),
    ("Mod+Shift+C", "Clear document"),
    ("Mod+Z", "Undo"),
    ("Mod+Y / Mod+Shift+Z", "Redo"),
    ("Mod+A", "Select all"),
    ("Mod+P", "Toggle preview"),
    ("Mod+H / F1", "Toggle help"),
    ("Mod+Q", "Quit"),
];

/// Map a command chord to its message.
///
/// Returns `None` for anything without Ctrl or Super held, and for chords
/// that are not bound.
pub fn route_shortcut(key: &KeyEvent) -> Option<Message> {
    let mods = key.modifiers;
    if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) {
        return None;
    }
    let KeyCode::Char(ch) = key.code else {
        return None;
    };
    let shift = mods.contains(KeyModifiers::SHIFT) || ch.is_ascii_uppercase();
    let msg = match (ch.to_ascii_lowercase(), shift) {
        ('b', false) => Message::Format(FormatCommand::Bold),
        ('i', false) => Message::Format(FormatCommand::Italic),
        ('1', _) => Message::Format(FormatCommand::Heading1),
        ('2', _) => Message::Format(FormatCommand::Heading2),
        ('3', _) => Message::Format(FormatCommand::Heading3),
        ('u', false) => Message::Format(FormatCommand::UnorderedList),
        ('o', false) => Message::Format(FormatCommand::OrderedList),
        ('k', false) => Message::Format(FormatCommand::Link),
        ('k', true) => Message::Format(FormatCommand::Image),
        ('e', false) => Message::Format(FormatCommand::Code),
        ('>', _) | ('.', true) => Message::Format(FormatCommand::Quote),
        ('-', _) => Message::Format(FormatCommand::HorizontalRule),
        ('s', false) => Message::ExportMarkdown,
        ('s', true) => Message::ExportHtml,
        ('c', true) => Message::RequestClear,
        ('z', false) => Message::Undo,
        ('y', _) | ('z', true) => Message::Redo,
        ('a', false) => Message::SelectAll,
        ('p', false) => Message::TogglePreview,
        ('h', false) => Message::ToggleHelp,
        ('q', _) => Message::Quit,
        _ => return None,
    };
    Some(msg)
}

fn is_command(mods: KeyModifiers) -> bool {
    mods.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => {
                if model.focus == Focus::Editor && !model.help_visible && !model.confirm_clear {
                    Some(Message::InsertText(text.clone()))
                } else {
                    None
                }
            }
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.confirm_clear {
            return Some(match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Message::ConfirmClear,
                _ => Message::CancelClear,
            });
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => Some(Message::HideHelp),
                KeyCode::Char('h') if is_command(key.modifiers) => Some(Message::HideHelp),
                KeyCode::Up | KeyCode::Char('k') => Some(Message::HelpScrollUp),
                KeyCode::Down | KeyCode::Char('j') => Some(Message::HelpScrollDown),
                _ => None,
            };
        }

        if key.code == KeyCode::F(1) {
            return Some(Message::ToggleHelp);
        }

        match model.focus {
            Focus::Editor => Self::handle_editor_key(key),
            Focus::Preview => Self::handle_preview_key(key),
        }
    }

    fn handle_editor_key(key: KeyEvent) -> Option<Message> {
        if let Some(msg) = route_shortcut(&key) {
            return Some(msg);
        }
        let mods = key.modifiers;
        let ctrl = mods.contains(KeyModifiers::CONTROL);
        let shift = mods.contains(KeyModifiers::SHIFT);
        let motion = |motion: Motion| {
            if shift {
                Message::Select(motion)
            } else {
                Message::Move(motion)
            }
        };

        match key.code {
            KeyCode::Char('c') if ctrl => Some(Message::Quit),
            KeyCode::Char(ch) if !is_command(mods) && !mods.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(ch))
            }
            KeyCode::Enter => Some(Message::NewLine),
            KeyCode::Tab => Some(Message::Indent),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Esc => Some(Message::FocusPreview),
            KeyCode::Left if ctrl => Some(motion(Motion::WordLeft)),
            KeyCode::Right if ctrl => Some(motion(Motion::WordRight)),
            KeyCode::Home if ctrl => Some(motion(Motion::BufferStart)),
            KeyCode::End if ctrl => Some(motion(Motion::BufferEnd)),
            KeyCode::Left => Some(motion(Motion::Left)),
            KeyCode::Right => Some(motion(Motion::Right)),
            KeyCode::Up => Some(motion(Motion::Up)),
            KeyCode::Down => Some(motion(Motion::Down)),
            KeyCode::Home => Some(motion(Motion::LineStart)),
            KeyCode::End => Some(motion(Motion::LineEnd)),
            KeyCode::PageUp => Some(Message::EditorPageUp),
            KeyCode::PageDown => Some(Message::EditorPageDown),
            _ => None,
        }
    }

    fn handle_preview_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Enter => Some(Message::FocusEditor),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::PreviewScrollUp(1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::PreviewScrollDown(1)),
            KeyCode::PageUp => Some(Message::PreviewPageUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::PreviewPageDown),
            KeyCode::Home => Some(Message::PreviewTop),
            KeyCode::End => Some(Message::PreviewBottom),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.confirm_clear {
            return None;
        }

        let area = Rect::new(0, 0, model.width, model.height);
        let areas = crate::ui::screen_areas(area, &model.layout);

        if model.layout.is_dragging() {
            return match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    Some(Message::DragTo(mouse.column))
                }
                MouseEventKind::Up(_) => Some(Message::EndDrag),
                _ => None,
            };
        }

        let in_editor = point_in_rect(mouse.column, mouse.row, areas.panes.editor);
        let in_preview = areas
            .panes
            .preview
            .is_some_and(|rect| point_in_rect(mouse.column, mouse.row, rect));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) =
                    crate::ui::toolbar_action_at(areas.toolbar, mouse.column, mouse.row)
                {
                    return Some(action.message());
                }
                if areas
                    .panes
                    .splitter
                    .is_some_and(|rect| point_in_rect(mouse.column, mouse.row, rect))
                {
                    return Some(Message::BeginDrag);
                }
                if in_editor {
                    return Some(editor_click(model, areas.panes.editor, mouse.column, mouse.row));
                }
                if in_preview {
                    return Some(Message::FocusPreview);
                }
                None
            }
            MouseEventKind::ScrollDown if in_editor => {
                Some(Message::EditorScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if in_editor => Some(Message::EditorScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown if in_preview => {
                Some(Message::PreviewScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if in_preview => Some(Message::PreviewScrollUp(WHEEL_LINES)),
            _ => None,
        }
    }
}

/// Caret position for a click inside the editor pane.
fn editor_click(model: &Model, editor_pane: Rect, column: u16, row: u16) -> Message {
    let geometry = crate::ui::editor_geometry(model, editor_pane);
    let text = geometry.text;
    if row < text.y {
        return Message::FocusEditor;
    }
    let line = model.editor_scroll + usize::from(row - text.y);
    let col = geometry.hscroll + usize::from(column.saturating_sub(text.x));
    Message::MoveTo(line, col)
}

const fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
