use super::rope::Span;

/// What a [`ConstructMatch`] found, with its semantic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructKind {
    /// `#`..`######` heading.
    Heading { level: u8 },
    /// `-`, `*` or `+` list item.
    UnorderedListItem { depth: usize },
    /// `12.` list item; `number` is the literal digits.
    OrderedListItem { depth: usize, number: String },
    /// `- [ ]` / `- [x]` item. `token` is the span of the bracketed box.
    CheckboxItem {
        depth: usize,
        checked: bool,
        token: Span,
    },
    /// `>` quote, `depth` counts nested `>` prefixes.
    Blockquote { depth: u8 },
    /// A line inside a fenced code block; `boundary` marks the fence lines.
    FencedCodeLine { boundary: bool },
    BoldSpan,
    ItalicSpan,
    StrikethroughSpan,
    InlineCodeSpan,
    InlineMath { expression: String },
    /// Display math: `$$...$$` on one line, or a multi-line `$$` region.
    BlockMath { expression: String },
}

impl ConstructKind {
    /// Block constructs are anchored at the start of a line.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            ConstructKind::Heading { .. }
                | ConstructKind::UnorderedListItem { .. }
                | ConstructKind::OrderedListItem { .. }
                | ConstructKind::CheckboxItem { .. }
                | ConstructKind::Blockquote { .. }
                | ConstructKind::FencedCodeLine { .. }
        )
    }
}

/// A transient parse result, created per build pass.
///
/// For inline constructs `[from, content_from)` and `[content_to, to)` are the
/// opening and closing delimiters. For block constructs `from` is the start of
/// the leading marker (after indentation), `[from, content_from)` covers the
/// marker tokens and `content_to` is the end of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructMatch {
    pub kind: ConstructKind,
    pub from: usize,
    pub to: usize,
    pub content_from: usize,
    pub content_to: usize,
}

impl ConstructMatch {
    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    pub fn content(&self) -> Span {
        Span::new(self.content_from, self.content_to)
    }

    /// Opening delimiter or leading marker tokens.
    pub fn leading_marker(&self) -> Span {
        Span::new(self.from, self.content_from)
    }

    /// Closing delimiter; empty for block constructs.
    pub fn trailing_marker(&self) -> Span {
        Span::new(self.content_to, self.to)
    }
}
