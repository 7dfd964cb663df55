//! Line-numbered HTML for fenced code blocks.

/// Header label used when a fence declares no language.
pub const DEFAULT_LANGUAGE_LABEL: &str = "code";

/// Language label for a fence info string: its first word, or `code`.
pub fn language_label(info: &str) -> &str {
    info.split_whitespace()
        .next()
        .unwrap_or(DEFAULT_LANGUAGE_LABEL)
}

/// Escape `<` and `>` only. Ampersands and quotes pass through untouched.
pub fn escape_angle_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Split code into display lines. A single trailing newline does not yield
/// an empty final row; an empty block still yields one row.
pub fn code_lines(code: &str) -> Vec<&str> {
    let code = code.strip_suffix('\n').unwrap_or(code);
    code.strip_suffix('\r')
        .unwrap_or(code)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Render a code block as a labeled two-column table: line-number gutter and
/// code.
pub fn code_block_html(info: &str, code: &str) -> String {
    let language = escape_angle_brackets(language_label(info));
    let mut html = String::new();
    html.push_str("<div class=\"code-block\">");
    html.push_str("<div class=\"code-header\"><span class=\"code-language\">");
    html.push_str(&language);
    html.push_str("</span></div>");
    html.push_str("<table class=\"code-table\"><tbody>");
    for (idx, line) in code_lines(code).into_iter().enumerate() {
        html.push_str(&format!(
            "<tr><td class=\"line-number\">{}</td><td class=\"line-content\"><code>{}</code></td></tr>",
            idx + 1,
            escape_angle_brackets(line)
        ));
    }
    html.push_str("</tbody></table></div>\n");
    html
}
