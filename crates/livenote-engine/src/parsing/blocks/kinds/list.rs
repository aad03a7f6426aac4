use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::rope::Span;

static UNORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)([-*+])( +)").expect("valid list regex"));
static CHECKBOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)([-*+])( +)(\[[ xX]\])( +)").expect("valid checkbox regex")
});
static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)(\d+)\.( +)").expect("valid ordered list regex"));

/// A list marker found at the start of a line. All offsets are line-local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    /// Nesting depth derived from the indentation.
    pub depth: usize,
    /// The marker and the spaces after it (`- `, `12. `).
    pub marker: Span,
    pub content_start: usize,
}

/// A checkbox item: an unordered marker followed by `[ ]`, `[x]` or `[X]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxMarker {
    pub depth: usize,
    /// The bullet and its spaces, `- `.
    pub bullet: Span,
    /// The bracketed token, `[x]`.
    pub token: Span,
    pub checked: bool,
    pub content_start: usize,
}

pub struct ListItem;

impl ListItem {
    /// Spaces a tab counts for when measuring indentation.
    pub const TAB_WIDTH: usize = 2;
    /// Indentation width per nesting level.
    pub const INDENT_PER_LEVEL: usize = 2;

    /// floor(indent width / 2), tabs counted as two spaces.
    pub fn depth(indent: &str) -> usize {
        let width: usize = indent
            .chars()
            .map(|c| if c == '\t' { Self::TAB_WIDTH } else { 1 })
            .sum();
        width / Self::INDENT_PER_LEVEL
    }

    pub fn unordered(line: &str) -> Option<ListMarker> {
        let caps = UNORDERED.captures(line)?;
        let indent = caps.get(1)?;
        let end = caps.get(0)?.end();
        Some(ListMarker {
            depth: Self::depth(indent.as_str()),
            marker: Span::new(indent.end(), end),
            content_start: end,
        })
    }

    pub fn ordered(line: &str) -> Option<(ListMarker, String)> {
        let caps = ORDERED.captures(line)?;
        let indent = caps.get(1)?;
        let end = caps.get(0)?.end();
        let marker = ListMarker {
            depth: Self::depth(indent.as_str()),
            marker: Span::new(indent.end(), end),
            content_start: end,
        };
        Some((marker, caps.get(2)?.as_str().to_string()))
    }

    /// Checkbox refinement of the unordered pattern.
    pub fn checkbox(line: &str) -> Option<CheckboxMarker> {
        let caps = CHECKBOX.captures(line)?;
        let indent = caps.get(1)?;
        let spaces = caps.get(3)?;
        let token = caps.get(4)?;
        Some(CheckboxMarker {
            depth: Self::depth(indent.as_str()),
            bullet: Span::new(indent.end(), spaces.end()),
            token: Span::new(token.start(), token.end()),
            checked: Checkbox::is_checked(token.as_str()),
            content_start: caps.get(0)?.end(),
        })
    }

    pub fn class(depth: usize) -> String {
        format!("cm-list-level-{}", depth % 3)
    }
}

/// The literal checkbox token. The text is the only source of truth.
pub struct Checkbox;

impl Checkbox {
    pub const UNCHECKED: &'static str = "[ ]";
    pub const CHECKED: &'static str = "[x]";

    /// True for `[ ]`, `[x]` and `[X]`.
    pub fn is_token(s: &str) -> bool {
        matches!(s, "[ ]" | "[x]" | "[X]")
    }

    pub fn is_checked(token: &str) -> bool {
        matches!(token, "[x]" | "[X]")
    }

    /// Content class of a checkbox item in the given state.
    pub fn class(checked: bool) -> &'static str {
        if checked {
            "cm-task-done"
        } else {
            "cm-task-open"
        }
    }

    /// The token a toggle writes in place of `token`.
    pub fn toggled(token: &str) -> &'static str {
        if Self::is_checked(token) {
            Self::UNCHECKED
        } else {
            Self::CHECKED
        }
    }
}
