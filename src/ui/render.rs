use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Focus, Model};
use crate::document::RenderedLine;
use crate::layout::{LayoutState, PaneRects};

use super::style::{Theme, style_for_inline, style_for_line_type};
use super::{PREVIEW_LEFT_PADDING, overlays, status, toolbar};

/// Where each part of the screen goes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub toolbar: Rect,
    pub panes: PaneRects,
    /// Row above the status bar, drawn over the panes while a toast shows
    pub toast: Rect,
    pub status: Rect,
}

pub fn screen_areas(area: Rect, layout: &LayoutState) -> ScreenAreas {
    let toolbar = Rect { height: 1.min(area.height), ..area };
    let pane_area = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(2),
        ..area
    };
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    let toast = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    ScreenAreas {
        toolbar,
        panes: layout.split(pane_area),
        toast,
        status,
    }
}

/// Pane content below its title row.
pub const fn pane_body(pane: Rect) -> Rect {
    Rect {
        x: pane.x,
        y: pane.y + 1,
        width: pane.width,
        height: pane.height.saturating_sub(1),
    }
}

/// Placement of the editor text for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorGeometry {
    /// Cells holding text, right of the gutter
    pub text: Rect,
    /// Gutter width including its trailing space
    pub gutter_width: u16,
    /// Columns scrolled off to the left so the caret stays visible
    pub hscroll: usize,
}

pub fn editor_geometry(model: &Model, editor_pane: Rect) -> EditorGeometry {
    let body = pane_body(editor_pane);
    let gutter_width = (line_number_width(model.buffer.line_count()) + 1).min(body.width);
    let text = Rect {
        x: body.x + gutter_width,
        width: body.width - gutter_width,
        ..body
    };
    let col = model.buffer.cursor().col;
    let text_width = usize::from(text.width.max(1));
    let hscroll = if col >= text_width {
        col + 1 - text_width
    } else {
        0
    };
    EditorGeometry {
        text,
        gutter_width,
        hscroll,
    }
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::current();
    let areas = screen_areas(area, &model.layout);

    toolbar::render_toolbar(model, frame, areas.toolbar, &theme);
    render_editor(model, frame, areas.panes.editor, &theme);
    if let Some(splitter) = areas.panes.splitter {
        render_splitter(model, frame, splitter, &theme);
    }
    if let Some(preview) = areas.panes.preview {
        render_preview(model, frame, preview, &theme);
    }
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, areas.toast);
    }
    status::render_status_bar(model, frame, areas.status, &theme);

    if model.confirm_clear {
        overlays::render_clear_confirmation(frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn pane_block(title: &str, focused: bool, theme: &Theme) -> Block<'static> {
    let style = if focused {
        theme.focused_title
    } else {
        theme.title
    };
    Block::default()
        .borders(Borders::TOP)
        .border_style(style)
        .title(Span::styled(format!(" {title} "), style))
}

fn render_editor(model: &Model, frame: &mut Frame, pane: Rect, theme: &Theme) {
    let focused = model.focus == Focus::Editor;
    frame.render_widget(Clear, pane);
    frame.render_widget(pane_block("Editor", focused, theme), pane);

    let geometry = editor_geometry(model, pane);
    let body = pane_body(pane);
    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let start = model.editor_scroll;
    let end = (start + body.height as usize).min(total_lines);
    let cursor = buf.cursor();
    let caret = buf.caret();
    let selection = buf.selection();
    let text_width = usize::from(geometry.text.width);
    let number_width = usize::from(geometry.gutter_width.saturating_sub(1));
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_start = buf.rope().line_to_char(line_idx);
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_len = line_text.chars().count();

        let mut spans = vec![Span::styled(
            format!("{:>number_width$} ", line_idx + 1),
            theme.gutter,
        )];
        let mut run = String::new();
        let mut run_style = Style::default();
        for (col, ch) in line_text
            .chars()
            .enumerate()
            .skip(geometry.hscroll)
            .take(text_width)
        {
            let offset = line_start + col;
            let style = if focused && offset == caret {
                cursor_style
            } else if selection.contains(offset) {
                theme.selection
            } else {
                Style::default()
            };
            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            run.push(if ch == '\t' { ' ' } else { ch });
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style));
        }

        // Caret past the last char, or a selected line break.
        let eol = line_start + line_len;
        if focused && cursor.line == line_idx && cursor.col >= line_len {
            spans.push(Span::styled(" ", cursor_style));
        } else if selection.contains(eol) && line_idx + 1 < total_lines {
            spans.push(Span::styled(" ", theme.selection));
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), body);
}

fn render_splitter(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let style = if model.layout.is_dragging() {
        theme.splitter_dragging
    } else {
        theme.splitter
    };
    let lines: Vec<Line> = (0..area.height).map(|_| Line::raw("│")).collect();
    frame.render_widget(Paragraph::new(lines).style(style), area);
}

fn render_preview(model: &mut Model, frame: &mut Frame, pane: Rect, theme: &Theme) {
    let focused = model.focus == Focus::Preview;
    let block = pane_block("Preview", focused, theme).padding(Padding::left(PREVIEW_LEFT_PADDING));
    let inner = block.inner(pane);
    let rows = inner.height as usize;

    let total = model.preview_lines(inner.width).len();
    model.preview_scroll = model.preview_scroll.min(total.saturating_sub(rows));
    let scroll = model.preview_scroll;

    let content: Vec<Line> = model
        .preview_lines(inner.width)
        .iter()
        .skip(scroll)
        .take(rows)
        .map(styled_line)
        .collect();

    frame.render_widget(Clear, pane);
    frame.render_widget(Paragraph::new(content).block(block), pane);
}

fn styled_line(line: &RenderedLine) -> Line<'static> {
    let line_style = style_for_line_type(line.line_type());
    if line.spans().is_empty() {
        return Line::styled(line.content(), line_style);
    }
    Line::from(
        line.spans()
            .iter()
            .map(|span| {
                Span::styled(
                    span.text().to_string(),
                    style_for_inline(line_style, span.style()),
                )
            })
            .collect::<Vec<_>>(),
    )
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
