use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Message, Model};
use crate::editor::{FormatCommand, FormatState};

use super::style::Theme;

/// A clickable toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Format(FormatCommand),
    Undo,
    Redo,
    Export,
    TogglePreview,
    Clear,
    Help,
}

impl ToolbarAction {
    /// Buttons in display order.
    pub fn all() -> Vec<Self> {
        FormatCommand::ALL
            .iter()
            .copied()
            .map(Self::Format)
            .chain([
                Self::Undo,
                Self::Redo,
                Self::Export,
                Self::TogglePreview,
                Self::Clear,
                Self::Help,
            ])
            .collect()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Format(command) => command.label(),
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Export => "Save",
            Self::TogglePreview => "Preview",
            Self::Clear => "Clear",
            Self::Help => "?",
        }
    }

    pub fn message(self) -> Message {
        match self {
            Self::Format(command) => Message::Format(command),
            Self::Undo => Message::Undo,
            Self::Redo => Message::Redo,
            Self::Export => Message::ExportMarkdown,
            Self::TogglePreview => Message::TogglePreview,
            Self::Clear => Message::RequestClear,
            Self::Help => Message::ToggleHelp,
        }
    }

    /// Whether the button shows as pressed for the current selection.
    pub const fn is_active(self, state: FormatState, preview_visible: bool) -> bool {
        match self {
            Self::Format(FormatCommand::Bold) => state.bold,
            Self::Format(FormatCommand::Italic) => state.italic,
            Self::Format(
                FormatCommand::Heading1 | FormatCommand::Heading2 | FormatCommand::Heading3,
            ) => state.heading,
            Self::Format(FormatCommand::UnorderedList | FormatCommand::OrderedList) => state.list,
            Self::TogglePreview => preview_visible,
            _ => false,
        }
    }

    /// Whether a separator precedes this button.
    const fn starts_group(self) -> bool {
        matches!(self, Self::Undo | Self::Export)
    }
}

/// Button rectangles along the toolbar row. Buttons that do not fit are
/// left out.
pub fn toolbar_buttons(area: Rect) -> Vec<(Rect, ToolbarAction)> {
    let mut buttons = Vec::new();
    let right = area.x.saturating_add(area.width);
    let mut x = area.x;
    for action in ToolbarAction::all() {
        if action.starts_group() {
            x = x.saturating_add(2);
        }
        let label_width = u16::try_from(action.label().width()).unwrap_or(u16::MAX);
        let width = label_width.saturating_add(2);
        if x.saturating_add(width) > right {
            break;
        }
        buttons.push((Rect::new(x, area.y, width, 1), action));
        x = x.saturating_add(width + 1);
    }
    buttons
}

/// Toolbar action under the given cell, if any.
pub fn toolbar_action_at(area: Rect, column: u16, row: u16) -> Option<ToolbarAction> {
    if row != area.y {
        return None;
    }
    toolbar_buttons(area)
        .into_iter()
        .find(|(rect, _)| column >= rect.x && column < rect.x + rect.width)
        .map(|(_, action)| action)
}

pub fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(Paragraph::new("").style(theme.toolbar), area);
    for (rect, action) in toolbar_buttons(area) {
        let style = if action.is_active(model.format_state, model.layout.preview_visible()) {
            theme.button_active
        } else {
            theme.button
        };
        let button = Paragraph::new(format!(" {} ", action.label())).style(style);
        frame.render_widget(button, rect);
    }
}
