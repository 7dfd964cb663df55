//! Markdown to HTML through comrak.
//!
//! The output is not sanitized: raw HTML in the document is passed through,
//! since the author and the viewer are the same person.

use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use comrak::{Arena, Options, format_html, parse_document};

use super::code_block::code_block_html;

/// Render `source` to an HTML fragment.
pub fn render_html(source: &str) -> String {
    let arena = Arena::new();
    let mut options = Options::default();
    configure_options(&mut options);
    let root = parse_document(&arena, source, &options);
    replace_fenced_code_blocks(root);

    let mut out = Vec::new();
    if let Err(err) = format_html(root, &options, &mut out) {
        tracing::warn!(%err, "HTML formatting failed");
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// GitHub-flavored, line-break sensitive parsing with raw HTML allowed.
pub(crate) fn configure_options(options: &mut Options) {
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.shortcodes = true;
    options.render.hardbreaks = true;
    options.render.unsafe_ = true;
}

/// Swap every fenced code block for a pre-rendered HTML block.
fn replace_fenced_code_blocks<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let html = match &node.data.borrow().value {
            NodeValue::CodeBlock(block) if block.fenced => {
                code_block_html(&block.info, &block.literal)
            }
            _ => continue,
        };
        node.data.borrow_mut().value = NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal: html,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_then_paragraph() {
        let html = render_html("# Title\n\nSome *text*");
        let h1 = html.find("<h1>").expect("heading rendered");
        let p = html.find("<p>").expect("paragraph rendered");
        assert!(h1 < p);
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_single_newline_becomes_break() {
        let html = render_html("one\ntwo");
        assert!(html.contains("<br />"), "got {html}");
    }

    #[test]
    fn test_gfm_extensions_enabled() {
        let html = render_html("~~gone~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_autolink() {
        let html = render_html("see https://example.com now");
        assert!(html.contains("<a href=\"https://example.com\">"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render_html("<div class=\"note\">hi</div>\n");
        assert!(html.contains("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn test_fenced_code_uses_line_numbered_table() {
        let html = render_html("```rust\nfn main() {}\n```\n");
        assert!(html.contains("class=\"code-table\""));
        assert!(html.contains("<span class=\"code-language\">rust</span>"));
        assert!(!html.contains("<pre>"));
    }

    #[test]
    fn test_indented_code_keeps_default_rendering() {
        let html = render_html("para\n\n    indented code\n");
        assert!(html.contains("<pre><code>indented code"));
        assert!(!html.contains("code-table"));
    }

    #[test]
    fn test_empty_document_renders_empty() {
        assert!(render_html("").trim().is_empty());
    }
}
