//! Terminal projection of the rendered document for the preview pane.
//!
//! Walks the same comrak AST that feeds [`render_html`](super::render_html)
//! and lays it out as styled, width-wrapped lines. Fenced code keeps the
//! language header and line-number gutter of the HTML output.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::code_block::{code_lines, language_label};
use super::html::configure_options;
use super::types::{InlineSpan, InlineStyle, LineType, RenderedLine};
use crate::highlight::highlight_code;

const QUOTE_BAR: &str = "│ ";
const GUTTER_SEPARATOR: &str = " │ ";

/// Lay out `source` for a preview pane `width` columns wide.
pub fn preview_lines(source: &str, width: u16) -> Vec<RenderedLine> {
    let arena = Arena::new();
    let mut options = Options::default();
    configure_options(&mut options);
    let root = parse_document(&arena, source, &options);
    container_lines(root, usize::from(width.max(1)), true)
}

/// Lay out the block children of `node`, optionally blank-separated.
fn container_lines<'a>(node: &'a AstNode<'a>, width: usize, separate: bool) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    for child in node.children() {
        let block = block_lines(child, width);
        if block.is_empty() {
            continue;
        }
        if separate && !lines.is_empty() {
            lines.push(RenderedLine::empty());
        }
        lines.extend(block);
    }
    lines
}

fn block_lines<'a>(node: &'a AstNode<'a>, width: usize) -> Vec<RenderedLine> {
    match &node.data.borrow().value {
        NodeValue::Paragraph => inline_block(node, width, LineType::Paragraph),
        NodeValue::Heading(heading) => inline_block(node, width, LineType::Heading(heading.level)),
        NodeValue::CodeBlock(block) => {
            if block.fenced {
                fenced_code_lines(&block.info, &block.literal, width)
            } else {
                code_lines(&block.literal)
                    .into_iter()
                    .map(|line| {
                        let style = InlineStyle {
                            code: true,
                            ..InlineStyle::default()
                        };
                        let spans = truncate_spans(
                            &[InlineSpan::new(format!("    {line}"), style)],
                            width,
                        );
                        RenderedLine::with_spans(LineType::CodeBlock, spans)
                    })
                    .collect()
            }
        }
        NodeValue::HtmlBlock(html) => html
            .literal
            .lines()
            .map(|line| {
                let raw = [InlineSpan::new(line.to_string(), InlineStyle::muted())];
                RenderedLine::with_spans(LineType::Html, truncate_spans(&raw, width))
            })
            .collect(),
        NodeValue::ThematicBreak => vec![RenderedLine::new(
            "─".repeat(width),
            LineType::HorizontalRule,
        )],
        NodeValue::BlockQuote => {
            let bar = [InlineSpan::new(QUOTE_BAR.to_string(), InlineStyle::muted())];
            container_lines(node, width.saturating_sub(2).max(1), true)
                .into_iter()
                .map(|line| retype(line, LineType::BlockQuote).prefixed(&bar))
                .collect()
        }
        NodeValue::List(list) => list_lines(
            node,
            list.list_type,
            list.start,
            list.delimiter,
            list.tight,
            width,
        ),
        NodeValue::Table(_) => render_table(node, width)
            .into_iter()
            .map(|row| RenderedLine::new(row, LineType::Table))
            .collect(),
        _ => container_lines(node, width, true),
    }
}

fn list_lines<'a>(
    node: &'a AstNode<'a>,
    list_type: ListType,
    start: usize,
    delimiter: ListDelimType,
    tight: bool,
    width: usize,
) -> Vec<RenderedLine> {
    let item_count = node.children().count();
    let number_width = (start + item_count.saturating_sub(1)).to_string().len();
    let delimiter = match delimiter {
        ListDelimType::Paren => ')',
        ListDelimType::Period => '.',
    };

    let mut lines = Vec::new();
    for (index, item) in node.children().enumerate() {
        let task = match &item.data.borrow().value {
            NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
            _ => None,
        };
        let marker = match (task, list_type) {
            (Some(true), _) => "☑ ".to_string(),
            (Some(false), _) => "☐ ".to_string(),
            (None, ListType::Bullet) => "• ".to_string(),
            (None, ListType::Ordered) => {
                format!("{:>number_width$}{delimiter} ", start + index)
            }
        };
        let marker_width = marker.width();
        let indent = [InlineSpan::new(" ".repeat(marker_width), InlineStyle::default())];
        let first = [InlineSpan::new(marker, InlineStyle::muted())];

        if !tight && !lines.is_empty() {
            lines.push(RenderedLine::empty());
        }
        let body = container_lines(item, width.saturating_sub(marker_width).max(1), !tight);
        if body.is_empty() {
            lines.push(RenderedLine::with_spans(LineType::ListItem, first.to_vec()));
            continue;
        }
        for (row, line) in body.into_iter().enumerate() {
            let prefix: &[InlineSpan] = if row == 0 { &first } else { &indent };
            lines.push(retype(line, LineType::ListItem).prefixed(prefix));
        }
    }
    lines
}

/// Paragraph-like prose becomes `line_type`; structural lines keep theirs.
fn retype(line: RenderedLine, line_type: LineType) -> RenderedLine {
    match line.line_type() {
        LineType::Paragraph => RenderedLine::with_spans(line_type, line.spans().to_vec()),
        _ => line,
    }
}

/// Inline content split at every line break (hard breaks are on), each
/// segment wrapped to `width`.
fn inline_block<'a>(node: &'a AstNode<'a>, width: usize, line_type: LineType) -> Vec<RenderedLine> {
    let mut segments = vec![Vec::new()];
    collect_inline_spans(node, InlineStyle::default(), &mut segments);
    segments
        .iter()
        .flat_map(|segment| wrap_spans(segment, width))
        .map(|spans| RenderedLine::with_spans(line_type, spans))
        .collect()
}

fn collect_inline_spans<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    segments: &mut Vec<Vec<InlineSpan>>,
) {
    let push = |segments: &mut Vec<Vec<InlineSpan>>, text: String, style: InlineStyle| {
        if let Some(current) = segments.last_mut() {
            current.push(InlineSpan::new(text, style));
        }
    };
    match &node.data.borrow().value {
        NodeValue::Text(text) => push(segments, text.clone(), style),
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                emphasis: false,
                strong: false,
                strikethrough: false,
                ..style
            };
            push(segments, code.literal.clone(), code_style);
        }
        NodeValue::HtmlInline(raw) => push(
            segments,
            raw.clone(),
            InlineStyle {
                muted: true,
                ..style
            },
        ),
        NodeValue::ShortCode(short) => push(segments, short.emoji.clone(), style),
        NodeValue::SoftBreak | NodeValue::LineBreak => segments.push(Vec::new()),
        NodeValue::Emph => {
            let next = InlineStyle {
                emphasis: true,
                ..style
            };
            for child in node.children() {
                collect_inline_spans(child, next, segments);
            }
        }
        NodeValue::Strong => {
            let next = InlineStyle {
                strong: true,
                ..style
            };
            for child in node.children() {
                collect_inline_spans(child, next, segments);
            }
        }
        NodeValue::Strikethrough => {
            let next = InlineStyle {
                strikethrough: true,
                ..style
            };
            for child in node.children() {
                collect_inline_spans(child, next, segments);
            }
        }
        NodeValue::Link(_) => {
            let next = InlineStyle { link: true, ..style };
            for child in node.children() {
                collect_inline_spans(child, next, segments);
            }
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { image.url.clone() } else { alt };
            push(segments, format!("[image: {label}]"), InlineStyle { link: true, ..style });
        }
        _ => {
            for child in node.children() {
                collect_inline_spans(child, style, segments);
            }
        }
    }
}

fn fenced_code_lines(info: &str, literal: &str, width: usize) -> Vec<RenderedLine> {
    let label = language_label(info);
    let language = info.split_whitespace().next();
    let rows = code_lines(literal);
    let number_width = rows.len().to_string().len();

    let mut lines = vec![RenderedLine::new(format!(" {label} "), LineType::CodeHeader)];
    let highlighted = highlight_code(language, &rows.join("\n"));
    for (idx, row) in rows.iter().enumerate() {
        let gutter = format!("{:>number_width$}{GUTTER_SEPARATOR}", idx + 1);
        let code_width = width.saturating_sub(gutter.width());
        let code = highlighted.get(idx).cloned().unwrap_or_else(|| {
            vec![InlineSpan::new(
                (*row).to_string(),
                InlineStyle {
                    code: true,
                    ..InlineStyle::default()
                },
            )]
        });
        let mut spans = vec![InlineSpan::new(gutter, InlineStyle::muted())];
        spans.extend(truncate_spans(&code, code_width));
        lines.push(RenderedLine::with_spans(LineType::CodeBlock, spans));
    }
    lines
}

fn render_table<'a>(table_node: &'a AstNode<'a>, width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }
    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(cell.width());
        }
    }

    // Row width is 1 + sum(col_width + 3).
    let max_table_width = width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + (3 * num_cols) > max_table_width {
        let Some((widest, _)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if col_widths[widest] <= 1 {
            break;
        }
        col_widths[widest] -= 1;
    }

    let mut lines = vec![render_table_border(&col_widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(render_table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    lines
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        match row_node.data.borrow().value {
            NodeValue::TableRow(header) => has_header |= header,
            _ => continue,
        }
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }
    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if idx + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(content.width());
        out.push(' ');
        match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => {
                out.push_str(&" ".repeat(padding));
                out.push_str(&content);
            }
            TableAlignment::Center => {
                let left = padding / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(&content);
                out.push_str(&" ".repeat(padding - left));
            }
            TableAlignment::Left | TableAlignment::None => {
                out.push_str(&content);
                out.push_str(&" ".repeat(padding));
            }
        }
        out.push_str(" │");
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn truncate_spans(spans: &[InlineSpan], max_width: usize) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut remaining = max_width;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let taken = truncate_text(span.text(), remaining);
        let cut = taken.len() < span.text().len();
        remaining -= taken.width();
        out.push(InlineSpan::new(taken, span.style()));
        if cut {
            break;
        }
    }
    out
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Greedy word wrap by display width. Leading whitespace is dropped at
/// wrapped line starts; an over-long word gets a line to itself.
fn wrap_spans(spans: &[InlineSpan], width: usize) -> Vec<Vec<InlineSpan>> {
    let mut lines = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_width = 0usize;

    for token in spans.iter().flat_map(split_inline_tokens) {
        let token_width = token.text().width();
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_width + token_width > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if token_is_ws && current.is_empty() {
            continue;
        }
        current_width += token_width;
        current.push(token);
    }

    lines.push(current);
    lines
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }
    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(lines: &[RenderedLine]) -> Vec<String> {
        lines.iter().map(RenderedLine::content).collect()
    }

    #[test]
    fn test_empty_document_has_no_lines() {
        assert!(preview_lines("", 40).is_empty());
    }

    #[test]
    fn test_heading_and_paragraph_are_separated() {
        let lines = preview_lines("# Title\n\nBody text", 40);
        assert_eq!(contents(&lines), vec!["Title", "", "Body text"]);
        assert_eq!(lines[0].line_type(), LineType::Heading(1));
        assert_eq!(lines[2].line_type(), LineType::Paragraph);
    }

    #[test]
    fn test_single_newline_breaks_line() {
        let lines = preview_lines("one\ntwo", 40);
        assert_eq!(contents(&lines), vec!["one", "two"]);
    }

    #[test]
    fn test_paragraph_wraps_to_width() {
        let lines = preview_lines("alpha beta gamma delta", 11);
        assert_eq!(contents(&lines), vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_inline_styles_create_spans() {
        let lines = preview_lines("a **b** _c_ `d` ~~e~~", 40);
        let spans = lines[0].spans();
        assert!(spans.iter().any(|s| s.text() == "b" && s.style().strong));
        assert!(spans.iter().any(|s| s.text() == "c" && s.style().emphasis));
        assert!(spans.iter().any(|s| s.text() == "d" && s.style().code));
        assert!(spans.iter().any(|s| s.text() == "e" && s.style().strikethrough));
    }

    #[test]
    fn test_bullet_and_ordered_lists() {
        let lines = preview_lines("- one\n- two\n\n1. first\n2. second\n", 40);
        let text = contents(&lines);
        assert!(text.contains(&"• one".to_string()));
        assert!(text.contains(&"1. first".to_string()));
        assert!(text.contains(&"2. second".to_string()));
        assert_eq!(lines[0].line_type(), LineType::ListItem);
    }

    #[test]
    fn test_nested_list_is_indented() {
        let lines = preview_lines("- outer\n  - inner\n", 40);
        assert_eq!(contents(&lines), vec!["• outer", "  • inner"]);
    }

    #[test]
    fn test_task_items_use_checkboxes() {
        let lines = preview_lines("- [ ] todo\n- [x] done\n", 40);
        assert_eq!(contents(&lines), vec!["☐ todo", "☑ done"]);
    }

    #[test]
    fn test_block_quote_has_bar() {
        let lines = preview_lines("> quoted", 40);
        assert_eq!(contents(&lines), vec!["│ quoted"]);
        assert_eq!(lines[0].line_type(), LineType::BlockQuote);
    }

    #[test]
    fn test_thematic_break_spans_width() {
        let lines = preview_lines("---", 5);
        assert_eq!(contents(&lines), vec!["─────"]);
        assert_eq!(lines[0].line_type(), LineType::HorizontalRule);
    }

    #[test]
    fn test_fenced_code_has_header_and_gutter() {
        let lines = preview_lines("```rust\nfn main() {}\nlet x = 1;\n```\n", 40);
        assert_eq!(lines[0].line_type(), LineType::CodeHeader);
        assert_eq!(lines[0].content(), " rust ");
        assert_eq!(lines[1].content(), "1 │ fn main() {}");
        assert_eq!(lines[2].content(), "2 │ let x = 1;");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_fenced_code_without_language_uses_default_label() {
        let lines = preview_lines("```\nplain\n```\n", 40);
        assert_eq!(lines[0].content(), " code ");
    }

    #[test]
    fn test_code_lines_truncate_to_width() {
        let lines = preview_lines("```\n0123456789\n```\n", 8);
        assert_eq!(lines[1].content(), "1 │ 0123");
    }

    #[test]
    fn test_table_renders_box() {
        let lines = preview_lines("| a | b |\n|---|---|\n| 1 | 2 |\n", 40);
        let text = contents(&lines);
        assert_eq!(text[0], "┌───┬───┐");
        assert_eq!(text[1], "│ a │ b │");
        assert_eq!(text[2], "├───┼───┤");
        assert_eq!(text[3], "│ 1 │ 2 │");
        assert_eq!(text[4], "└───┴───┘");
    }

    #[test]
    fn test_table_respects_width() {
        let md = "| column one | column two |\n|---|---|\n| long cell text | more text |\n";
        for line in preview_lines(md, 20) {
            assert!(line.content().width() <= 20, "too wide: {}", line.content());
        }
    }

    #[test]
    fn test_html_block_is_muted_raw() {
        let lines = preview_lines("<div>raw</div>\n", 40);
        assert_eq!(lines[0].content(), "<div>raw</div>");
        assert_eq!(lines[0].line_type(), LineType::Html);
        assert!(lines[0].spans()[0].style().muted);
    }

    #[test]
    fn test_image_shows_alt_text() {
        let lines = preview_lines("![logo](logo.png)", 40);
        assert_eq!(lines[0].content(), "[image: logo]");
    }
}
