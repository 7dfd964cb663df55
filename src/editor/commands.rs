//! Template-based formatting commands.
//!
//! Every command is a template with a `{}` placeholder. Applying one splices
//! the expanded template over the current selection; the placeholder receives
//! the selected text, or the command's default literal when nothing is
//! selected. Toolbar buttons and keyboard chords share this single path.

use super::buffer::{Selection, TextBuffer};

/// Placeholder token substituted by [`FormatCommand::expand`].
pub const PLACEHOLDER: &str = "{}";

/// Formatting commands available from the toolbar and keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    Bold,
    Italic,
    Heading1,
    Heading2,
    Heading3,
    UnorderedList,
    OrderedList,
    Quote,
    Code,
    Link,
    Image,
    HorizontalRule,
}

impl FormatCommand {
    /// All commands in toolbar order.
    pub const ALL: [Self; 12] = [
        Self::Bold,
        Self::Italic,
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::UnorderedList,
        Self::OrderedList,
        Self::Quote,
        Self::Code,
        Self::Link,
        Self::Image,
        Self::HorizontalRule,
    ];

    pub const fn template(self) -> &'static str {
        match self {
            Self::Bold => "**{}**",
            Self::Italic => "_{}_",
            Self::Heading1 => "# {}",
            Self::Heading2 => "## {}",
            Self::Heading3 => "### {}",
            Self::UnorderedList => "- {}",
            Self::OrderedList => "1. {}",
            Self::Quote => "> {}",
            Self::Code => "`{}`",
            Self::Link => "[{}](url)",
            Self::Image => "![{}](image-url)",
            Self::HorizontalRule => "\n---\n{}",
        }
    }

    /// Text used in place of the placeholder when nothing is selected.
    pub const fn default_text(self) -> &'static str {
        match self {
            Self::Bold | Self::Italic => "text",
            Self::Heading1 | Self::Heading2 | Self::Heading3 => "Heading",
            Self::UnorderedList | Self::OrderedList => "List item",
            Self::Quote => "Quote",
            Self::Code => "code",
            Self::Link => "link text",
            Self::Image => "alt text",
            Self::HorizontalRule => "",
        }
    }

    /// Short toolbar label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::Heading3 => "H3",
            Self::UnorderedList => "•",
            Self::OrderedList => "1.",
            Self::Quote => "❝",
            Self::Code => "<>",
            Self::Link => "Link",
            Self::Image => "Img",
            Self::HorizontalRule => "―",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
            Self::Heading3 => "Heading 3",
            Self::UnorderedList => "Bulleted list",
            Self::OrderedList => "Numbered list",
            Self::Quote => "Block quote",
            Self::Code => "Inline code",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::HorizontalRule => "Horizontal rule",
        }
    }

    /// Expand the template around `selected`, falling back to the default text.
    pub fn expand(self, selected: &str) -> String {
        let body = if selected.is_empty() {
            self.default_text()
        } else {
            selected
        };
        self.template().replacen(PLACEHOLDER, body, 1)
    }
}

/// Apply `command` at the buffer's selection.
///
/// The expanded template replaces the selection and the caret lands just
/// after the inserted text. Returns the range of the inserted text; the
/// caller is responsible for recording the new document in history.
pub fn apply_command(buffer: &mut TextBuffer, command: FormatCommand) -> Selection {
    let selected = buffer.selected_text();
    let replacement = command.expand(&selected);
    buffer.replace_selection(&replacement)
}
