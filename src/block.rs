/// Inline text spans with formatting.
///
/// Spans never nest: a run of text is plain, bold, code or link-styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Code(String),
    Link { text: String, url: String },
}

impl Span {
    /// The visible text of the span, with all markup removed.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Code(text) => text,
            Span::Link { text, .. } => text,
        }
    }
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    /// Leading whitespace width in the source line. Recorded only; lists are
    /// rendered flat.
    pub indent: usize,
}

/// A run of consecutive list items (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements classified from Markdown source lines.
///
/// Blocks hold raw text; inline markup is resolved into [`Span`]s when the
/// block is written to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Rule,
    Table {
        columns: usize,
        rows: Vec<Vec<String>>,
    },
    List(List),
    CodeBlock {
        content: String,
    },
    Quote {
        text: String,
    },
    Paragraph {
        text: String,
    },
    Blank,
}
