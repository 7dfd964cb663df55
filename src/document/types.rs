//! Preview line types.

/// A single line of the terminal preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// The type of line (for styling)
    line_type: LineType,
    /// Inline-styled spans, in display order
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    /// Create an unstyled line of the given type.
    pub fn new(content: impl Into<String>, line_type: LineType) -> Self {
        Self::with_spans(
            line_type,
            vec![InlineSpan::new(content.into(), InlineStyle::default())],
        )
    }

    /// Create a line from pre-styled spans.
    pub const fn with_spans(line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self { line_type, spans }
    }

    pub fn empty() -> Self {
        Self::with_spans(LineType::Empty, Vec::new())
    }

    /// Plain text of the line.
    pub fn content(&self) -> String {
        self.spans.iter().map(InlineSpan::text).collect()
    }

    /// Get the line type.
    pub const fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    /// Prepend `prefix` spans, e.g. a quote bar or list indent.
    #[must_use]
    pub fn prefixed(mut self, prefix: &[InlineSpan]) -> Self {
        let mut spans = prefix.to_vec();
        spans.append(&mut self.spans);
        self.spans = spans;
        self
    }
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
    /// De-emphasized decoration (gutters, markers, raw HTML)
    pub muted: bool,
    pub fg: Option<InlineColor>,
}

impl InlineStyle {
    pub fn muted() -> Self {
        Self {
            muted: true,
            ..Self::default()
        }
    }
}

/// RGB color for inline styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Type of a preview line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Normal paragraph text
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
    /// Language label above a code block
    CodeHeader,
    /// Code block line (gutter + code)
    CodeBlock,
    /// Block quote line
    BlockQuote,
    /// List item line
    ListItem,
    /// Table row or border
    Table,
    /// Horizontal rule
    HorizontalRule,
    /// Raw HTML block line
    Html,
    /// Empty line
    Empty,
}
