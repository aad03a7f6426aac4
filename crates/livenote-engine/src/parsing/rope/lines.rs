use xi_rope::{LinesMetric, Rope};

use super::span::Span;

/// A reference to a single line of a document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of this line, excluding the trailing `\n`.
    pub span: Span,
    /// The line text without its newline.
    pub text: String,
}

impl LineRef {
    /// Converts a line-local byte index into a document offset.
    pub fn abs(&self, local: usize) -> usize {
        self.span.start + local
    }
}

/// Returns the line containing `offset` (clamped to the rope length).
pub fn line_at(rope: &Rope, offset: usize) -> LineRef {
    let offset = offset.min(rope.len());
    line_by_index(rope, rope.line_of_offset(offset))
}

fn line_by_index(rope: &Rope, idx: usize) -> LineRef {
    let newlines = rope.measure::<LinesMetric>();
    let start = rope.offset_of_line(idx);
    let end = if idx < newlines {
        rope.offset_of_line(idx + 1) - 1
    } else {
        rope.len()
    };
    LineRef {
        number: idx + 1,
        span: Span { start, end },
        text: rope.slice_to_cow(start..end).into_owned(),
    }
}

/// Iterator over the lines intersecting a range, see [`lines_in`].
pub struct LinesIn<'a> {
    rope: &'a Rope,
    next: Option<usize>,
    end: usize,
    len: usize,
    newlines: usize,
}

impl Iterator for LinesIn<'_> {
    type Item = LineRef;

    fn next(&mut self) -> Option<LineRef> {
        let idx = self.next?;
        let line = line_by_index(self.rope, idx);
        let trailing = line.span.start == self.len && self.end == self.len;
        if line.span.start >= self.end && !trailing {
            self.next = None;
            return None;
        }
        self.next = (idx < self.newlines).then_some(idx + 1);
        Some(line)
    }
}

/// Returns the lines intersecting the half-open `range`, in document order.
///
/// A line starting exactly at `range.end` is outside, except the empty last
/// line of a document when the range reaches the document end. Every line is
/// yielded whole; callers clip to the range if they need to.
pub fn lines_in(rope: &Rope, range: Span) -> LinesIn<'_> {
    let len = rope.len();
    let first = rope.line_of_offset(range.start.min(len));
    LinesIn {
        rope,
        next: Some(first),
        end: range.end.min(len),
        len,
        newlines: rope.measure::<LinesMetric>(),
    }
}
