use crate::parsing::{ConstructKind, ConstructMatch};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, MathSpan},
};

/// Finds every math span in one line, leftmost first.
///
/// # Arguments
/// - `base`: document offset where `s` begins
/// - `s`: the line text (no newline)
///
/// `$$` opens display math, `$` inline math. `\$` is a literal dollar and a
/// dollar preceded by a backslash never opens. The closer search skips the byte
/// after every backslash. An opener without a closer on the line, or whose
/// trimmed content is empty, is abandoned and scanning resumes one
/// delimiter-length after it.
pub fn scan_math(base: usize, s: &str) -> Vec<ConstructMatch> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];

    while !cur.eof() {
        if cur.peek() == Some(MathSpan::ESCAPE) && cur.starts_with(b"\\$") {
            cur.bump_n(2);
            continue;
        }
        if cur.peek() != Some(MathSpan::DOLLAR) || cur.prev() == Some(MathSpan::ESCAPE) {
            cur.bump();
            continue;
        }
        if let Some(m) = try_parse_math(&mut cur) {
            out.push(m);
        }
    }

    out
}

/// Attempts a math span at the current `$`.
///
/// On failure the cursor is left one delimiter-length past the opener.
fn try_parse_math(cur: &mut Cursor<'_>) -> Option<ConstructMatch> {
    let display = cur.starts_with(MathSpan::DISPLAY);
    let delim = if display {
        MathSpan::DISPLAY
    } else {
        MathSpan::INLINE
    };

    let start = cur.pos();
    cur.bump_n(delim.len());
    let resume = cur.clone();
    let inner_start = cur.i;

    loop {
        if cur.eof() {
            *cur = resume;
            return None;
        }
        if cur.peek() == Some(MathSpan::ESCAPE) {
            cur.bump_n(2);
            continue;
        }
        if cur.starts_with(delim) {
            break;
        }
        cur.bump();
    }

    let inner_end = cur.i;
    let expression = cur.text(inner_start, inner_end).trim();
    if expression.is_empty() {
        *cur = resume;
        return None;
    }
    let expression = expression.to_string();
    cur.bump_n(delim.len());

    let kind = if display {
        ConstructKind::BlockMath { expression }
    } else {
        ConstructKind::InlineMath { expression }
    };
    Some(ConstructMatch {
        kind,
        from: start,
        to: cur.pos(),
        content_from: cur.base + inner_start,
        content_to: cur.base + inner_end,
    })
}

/// Finds inline code spans in one line.
///
/// Unclosed backticks are plain text; an empty pair (two adjacent ticks) is
/// skipped whole.
pub fn scan_code_spans(base: usize, s: &str) -> Vec<ConstructMatch> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];

    while !cur.eof() {
        if cur.peek() != Some(CodeSpan::TICK) {
            cur.bump();
            continue;
        }
        match try_parse_code_span(&mut cur) {
            Some(m) => out.push(m),
            None => {
                cur.bump();
            }
        }
    }

    out
}

/// Attempts a code span at the current backtick.
///
/// Returns `None` with the cursor restored when the span isn't closed. An empty
/// span consumes its first tick so the caller's bump skips the second.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<ConstructMatch> {
    let saved = cur.clone();
    let start = cur.pos();
    cur.bump(); // `
    let inner_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(CodeSpan::TICK) {
        cur.bump();
    }
    let inner_end = cur.pos();

    if cur.peek() != Some(CodeSpan::TICK) {
        *cur = saved;
        return None;
    }
    if inner_end == inner_start {
        // ``: leave the cursor on the second tick
        return None;
    }
    cur.bump(); // closing `

    Some(ConstructMatch {
        kind: ConstructKind::InlineCodeSpan,
        from: start,
        to: cur.pos(),
        content_from: inner_start,
        content_to: inner_end,
    })
}
