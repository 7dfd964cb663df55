//! Theming and color definitions.
//!
//! Preview lines use semantic ANSI colors that adapt to the terminal's
//! palette; the editor chrome (toolbar, splitter, gutter, status bar) comes
//! from a [`Theme`] picked by background brightness.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineColor, InlineStyle, LineType};

/// Get the style for a preview line type.
pub fn style_for_line_type(line_type: LineType) -> Style {
    let light_bg = crate::highlight::is_light_background();
    let pick = |light: u8, dark: Color| {
        if light_bg {
            Color::Indexed(light)
        } else {
            dark
        }
    };
    match line_type {
        LineType::Heading(1) => Style::default()
            .fg(pick(24, Color::Cyan))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(pick(22, Color::Green))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(3) => Style::default()
            .fg(pick(58, Color::Yellow))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(4) => Style::default()
            .fg(pick(24, Color::Blue))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(5) => Style::default()
            .fg(pick(54, Color::Magenta))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(pick(24, Color::Cyan))
            .add_modifier(Modifier::BOLD),

        LineType::CodeHeader => Style::default()
            .fg(pick(238, Color::Indexed(252)))
            .bg(pick(253, Color::Indexed(238)))
            .add_modifier(Modifier::BOLD),
        LineType::CodeBlock => Style::default().fg(pick(238, Color::Indexed(245))),

        LineType::BlockQuote => Style::default()
            .fg(pick(24, Color::Blue))
            .add_modifier(Modifier::ITALIC),

        LineType::HorizontalRule | LineType::Html => Style::default()
            .fg(pick(241, Color::Indexed(240)))
            .add_modifier(Modifier::DIM),

        LineType::ListItem | LineType::Table | LineType::Paragraph | LineType::Empty => {
            Style::default()
        }
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;

    if let Some(fg) = inline.fg {
        style = style
            .fg(fg_color_for_terminal(fg))
            .remove_modifier(Modifier::DIM);
    }
    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.muted && inline.fg.is_none() {
        style = style.fg(Color::Indexed(244));
    }
    if inline.link {
        style = style.add_modifier(Modifier::UNDERLINED);
        if inline.fg.is_none() {
            let light_bg = crate::highlight::is_light_background();
            style = style.fg(if light_bg {
                Color::Blue
            } else {
                Color::LightBlue
            });
        }
    }
    if inline.code && inline.fg.is_none() {
        let light_bg = crate::highlight::is_light_background();
        style = style
            .fg(if light_bg {
                Color::Indexed(88)
            } else {
                Color::Red
            })
            .add_modifier(Modifier::BOLD);
    }

    style
}

fn fg_color_for_terminal(fg: InlineColor) -> Color {
    if supports_truecolor() {
        Color::Rgb(fg.r, fg.g, fg.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(fg.r, fg.g, fg.b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("MARKPAD_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}

/// Colors for the editor chrome.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Toolbar background row
    pub toolbar: Style,
    /// Toolbar button
    pub button: Style,
    /// Toolbar toggle that matches the selection's formatting
    pub button_active: Style,
    /// Splitter column at rest
    pub splitter: Style,
    /// Splitter column while dragging
    pub splitter_dragging: Style,
    /// Line-number gutter in the editor
    pub gutter: Style,
    /// Selected text in the editor
    pub selection: Style,
    /// Pane title when the pane has focus
    pub focused_title: Style,
    /// Pane title when unfocused
    pub title: Style,
    /// Status bar
    pub status: Style,
    /// Transient "Saved" badge
    pub saved: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Theme for the detected terminal background.
    pub fn current() -> Self {
        if crate::highlight::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Create a theme optimized for dark terminals.
    pub fn dark() -> Self {
        Self {
            toolbar: Style::default().bg(Color::Indexed(236)),
            button: Style::default().fg(Color::Indexed(252)).bg(Color::Indexed(236)),
            button_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            splitter: Style::default().fg(Color::Indexed(240)),
            splitter_dragging: Style::default().fg(Color::Yellow),
            gutter: Style::default().fg(Color::Indexed(240)),
            selection: Style::default().bg(Color::Indexed(24)).fg(Color::White),
            focused_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            title: Style::default().fg(Color::Indexed(245)),
            status: Style::default().bg(Color::DarkGray).fg(Color::White),
            saved: Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Create a theme optimized for light terminals.
    pub fn light() -> Self {
        Self {
            toolbar: Style::default().bg(Color::Indexed(253)),
            button: Style::default().fg(Color::Indexed(235)).bg(Color::Indexed(253)),
            button_active: Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            splitter: Style::default().fg(Color::Indexed(245)),
            splitter_dragging: Style::default().fg(Color::Indexed(136)),
            gutter: Style::default().fg(Color::Indexed(245)),
            selection: Style::default().bg(Color::Indexed(153)).fg(Color::Black),
            focused_title: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            title: Style::default().fg(Color::Indexed(241)),
            status: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            saved: Style::default()
                .bg(Color::Indexed(28))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_are_bold() {
        for level in 1..=6 {
            let style = style_for_line_type(LineType::Heading(level));
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        let style = style_for_line_type(LineType::Heading(1));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_code_header_has_background() {
        assert!(style_for_line_type(LineType::CodeHeader).bg.is_some());
    }

    #[test]
    fn test_active_button_differs_from_idle() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_ne!(theme.button, theme.button_active);
        }
    }

    #[test]
    fn test_inline_color_removes_dim_modifier() {
        let base = Style::default().add_modifier(Modifier::DIM);
        let inline = InlineStyle {
            fg: Some(InlineColor { r: 255, g: 0, b: 0 }),
            ..InlineStyle::default()
        };
        let styled = style_for_inline(base, inline);
        assert!(!styled.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_muted_span_gets_gray() {
        let styled = style_for_inline(Style::default(), InlineStyle::muted());
        assert_eq!(styled.fg, Some(Color::Indexed(244)));
    }

    #[test]
    fn test_truecolor_detection_without_colorterm() {
        assert!(!supports_truecolor_from_env(None, Some("xterm-256color")));
    }

    #[test]
    fn test_truecolor_detection_with_colorterm() {
        assert!(supports_truecolor_from_env(
            Some("truecolor"),
            Some("xterm-256color")
        ));
    }

    #[test]
    fn test_fallback_indexed_color_when_not_truecolor() {
        assert_eq!(rgb_to_xterm_256(255, 0, 0), 196);
    }
}
