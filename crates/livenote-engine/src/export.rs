//! Static HTML export of a whole note.
//!
//! Markdown goes through `pulldown-cmark`. Math is found first with the same
//! rules the live preview uses, swapped for private-use placeholders that the
//! markdown parser passes through untouched, and expanded back into rendered
//! math afterwards. Bare `http(s)://` and `www.` URLs in prose become links.

use std::sync::LazyLock;

use pulldown_cmark::{
    CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use regex::Regex;

use crate::editing::Document;
use crate::math::{MathMode, render_math};
use crate::parsing::{
    ConstructKind,
    blocks::{FenceTracker, kinds::MathBlock},
    inline::scan_math,
    rope::{LineRef, Span},
};

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").expect("valid url regex")
});

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// A math span lifted out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MathPiece {
    span: Span,
    expression: String,
    display: bool,
}

/// Renders a note to an HTML fragment.
pub fn render_html(markdown: &str) -> String {
    let doc = Document::new(markdown);
    let source = doc.text();
    let pieces = find_math(&doc);
    let masked = mask(&source, &pieces);

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION;
    let parser = TextMergeStream::new(Parser::new_ext(&masked, options));

    let mut events: Vec<Event> = vec![];
    let mut in_code_block = false;
    // inside link text or image alt text
    let mut link_depth = 0usize;
    for event in parser {
        match event {
            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                link_depth += 1;
                events.push(Event::Start(tag));
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                link_depth = link_depth.saturating_sub(1);
                events.push(Event::End(end));
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                events.push(Event::Start(Tag::CodeBlock(kind)));
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                events.push(Event::End(TagEnd::CodeBlock));
            }
            Event::Text(text) if in_code_block => {
                events.push(Event::Text(restore(&text, &source, &pieces).into()));
            }
            Event::Text(text) => expand(&text, &pieces, link_depth == 0, &mut events),
            Event::Code(code) => {
                events.push(Event::Code(restore(&code, &source, &pieces).into()));
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, unwrap_display_paragraphs(events).into_iter());
    out
}

/// Math spans of the whole document, in order, skipping fenced code.
fn find_math(doc: &Document) -> Vec<MathPiece> {
    let lines: Vec<LineRef> = doc.lines_in(Span::new(0, doc.len())).collect();
    let mut fences = FenceTracker::default();
    let mut pieces = vec![];
    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if fences.observe(&line.text).is_some() {
            i += 1;
            continue;
        }
        if let Some(region) = MathBlock::find_region(&lines, i) {
            pieces.push(MathPiece {
                span: region.span,
                expression: region.expression,
                display: true,
            });
            i = region.last + 1;
            continue;
        }
        for m in scan_math(line.span.start, &line.text) {
            let (expression, display) = match m.kind {
                ConstructKind::InlineMath { expression } => (expression, false),
                ConstructKind::BlockMath { expression } => (expression, true),
                _ => continue,
            };
            pieces.push(MathPiece {
                span: Span::new(m.from, m.to),
                expression,
                display,
            });
        }
        i += 1;
    }
    pieces
}

fn mask(source: &str, pieces: &[MathPiece]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut at = 0;
    for (n, piece) in pieces.iter().enumerate() {
        out.push_str(&source[at..piece.span.start]);
        out.push(OPEN);
        out.push_str(&n.to_string());
        out.push(CLOSE);
        at = piece.span.end;
    }
    out.push_str(&source[at..]);
    out
}

/// Splits `text` into `(before, placeholder index)` parts plus a tail.
fn placeholders(text: &str) -> (Vec<(&str, Option<usize>)>, &str) {
    let mut parts = vec![];
    let mut rest = text;
    while let Some(open) = rest.find(OPEN) {
        let after = &rest[open + OPEN.len_utf8()..];
        let Some(close) = after.find(CLOSE) else {
            break;
        };
        parts.push((&rest[..open], after[..close].parse().ok()));
        rest = &after[close + CLOSE.len_utf8()..];
    }
    (parts, rest)
}

fn expand<'a>(text: &str, pieces: &[MathPiece], linkify: bool, events: &mut Vec<Event<'a>>) {
    let (parts, tail) = placeholders(text);
    for (before, index) in parts {
        push_text(before, linkify, events);
        if let Some(piece) = index.and_then(|n| pieces.get(n)) {
            events.push(Event::InlineHtml(render_piece(piece).into()));
        }
    }
    push_text(tail, linkify, events);
}

/// Pushes prose, turning bare URLs into links when `linkify` is set.
fn push_text<'a>(text: &str, linkify: bool, events: &mut Vec<Event<'a>>) {
    let mut at = 0;
    if linkify {
        for m in BARE_URL.find_iter(text) {
            let url = trim_url(m.as_str());
            let host = match url.split_once("://") {
                Some((_, host)) => host,
                None => url.get("www.".len()..).unwrap_or_default(),
            };
            if host.is_empty() {
                continue;
            }
            if m.start() > at {
                events.push(Event::Text(CowStr::from(text[at..m.start()].to_string())));
            }
            let dest = if url.to_ascii_lowercase().starts_with("www.") {
                format!("http://{url}")
            } else {
                url.to_string()
            };
            events.push(Event::Start(Tag::Link {
                link_type: LinkType::Autolink,
                dest_url: dest.into(),
                title: CowStr::Borrowed(""),
                id: CowStr::Borrowed(""),
            }));
            events.push(Event::Text(CowStr::from(url.to_string())));
            events.push(Event::End(TagEnd::Link));
            at = m.start() + url.len();
        }
    }
    if at < text.len() {
        events.push(Event::Text(CowStr::from(text[at..].to_string())));
    }
}

/// Drops trailing sentence punctuation and an unbalanced closing paren.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ':', ';', '!', '?', '\'', '"']);
        let unbalanced =
            trimmed.ends_with(')') && trimmed.matches(')').count() > trimmed.matches('(').count();
        let next = if unbalanced {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };
        if next.len() == url.len() {
            return url;
        }
        url = next;
    }
}

fn restore(text: &str, source: &str, pieces: &[MathPiece]) -> String {
    let (parts, tail) = placeholders(text);
    let mut out = String::with_capacity(text.len());
    for (before, index) in parts {
        out.push_str(before);
        if let Some(piece) = index.and_then(|n| pieces.get(n)) {
            out.push_str(&source[piece.span.start..piece.span.end]);
        }
    }
    out.push_str(tail);
    out
}

fn render_piece(piece: &MathPiece) -> String {
    let mode = MathMode::new(piece.display);
    mode.wrap("math", render_math(&piece.expression, mode).html())
}

/// A paragraph holding nothing but display math becomes the math block alone.
fn unwrap_display_paragraphs(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter().peekable();
    while let Some(event) = iter.next() {
        if matches!(event, Event::Start(Tag::Paragraph)) {
            let mut inner = vec![];
            let mut closed = false;
            for e in iter.by_ref() {
                if matches!(e, Event::End(TagEnd::Paragraph)) {
                    closed = true;
                    break;
                }
                inner.push(e);
            }
            if closed && is_display_only(&inner) {
                out.extend(inner.into_iter().filter_map(|e| match e {
                    Event::InlineHtml(h) => Some(Event::Html(h)),
                    _ => None,
                }));
            } else {
                out.push(event);
                out.extend(inner);
                if closed {
                    out.push(Event::End(TagEnd::Paragraph));
                }
            }
            continue;
        }
        out.push(event);
    }
    out
}

fn is_display_only(inner: &[Event<'_>]) -> bool {
    let mut any = false;
    for e in inner {
        match e {
            Event::InlineHtml(h) if h.starts_with(r#"<div class="math"#) => any = true,
            Event::Text(t) if t.trim().is_empty() => {}
            Event::SoftBreak => {}
            _ => return false,
        }
    }
    any
}
