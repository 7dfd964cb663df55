use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, Model, ToastLevel};

use super::style::Theme;

pub fn status_text(model: &Model) -> String {
    let stats = model.stats;
    let cursor = model.buffer.cursor();
    let focus = match model.focus {
        Focus::Editor => "EDIT",
        Focus::Preview => "PREVIEW",
    };
    format!(
        " {focus}  {} words  {} chars  Ln {}, Col {}  History {}/{}",
        stats.words,
        stats.chars,
        cursor.line + 1,
        cursor.col + 1,
        model.history.index() + 1,
        model.history.len(),
    )
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut spans = vec![Span::styled(status_text(model), theme.status)];
    if model.saved_indicator_active(Instant::now()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(" Saved ", theme.saved));
    }
    spans.push(Span::styled("  F1:help", theme.status));
    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.status), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
