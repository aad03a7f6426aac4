use std::{cmp::Reverse, collections::HashSet, fmt};

use crate::editing::Document;
use crate::parsing::rope::Span;
use crate::preview::Widget;

/// What a decoration does to its range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// Attribute for the whole line, anchored zero-length at the line start.
    LineAttribute { class: String },
    /// Styles the range.
    Mark { class: String },
    /// Hides the range (`None`) or draws a widget in its place.
    Replace { widget: Option<Widget> },
}

impl DecorationKind {
    /// Ordering among decorations starting at the same offset.
    fn rank(&self) -> u8 {
        match self {
            DecorationKind::LineAttribute { .. } => 0,
            DecorationKind::Mark { .. } => 1,
            DecorationKind::Replace { .. } => 2,
        }
    }
}

/// One rendering instruction over `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decoration {
    pub from: usize,
    pub to: usize,
    pub kind: DecorationKind,
}

impl Decoration {
    pub fn mark(from: usize, to: usize, class: impl Into<String>) -> Self {
        Self {
            from,
            to,
            kind: DecorationKind::Mark {
                class: class.into(),
            },
        }
    }

    pub fn hide(span: Span) -> Self {
        Self {
            from: span.start,
            to: span.end,
            kind: DecorationKind::Replace { widget: None },
        }
    }

    pub fn widget(span: Span, widget: Widget) -> Self {
        Self {
            from: span.start,
            to: span.end,
            kind: DecorationKind::Replace {
                widget: Some(widget),
            },
        }
    }

    pub fn line(at: usize, class: impl Into<String>) -> Self {
        Self {
            from: at,
            to: at,
            kind: DecorationKind::LineAttribute {
                class: class.into(),
            },
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    pub fn is_hidden_marker(&self) -> bool {
        matches!(self.kind, DecorationKind::Replace { widget: None })
    }

    pub fn widget_ref(&self) -> Option<&Widget> {
        match &self.kind {
            DecorationKind::Replace { widget } => widget.as_ref(),
            _ => None,
        }
    }

    fn sort_key(&self) -> (usize, u8, Reverse<usize>) {
        (self.from, self.kind.rank(), Reverse(self.to))
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} ", self.from, self.to)?;
        match &self.kind {
            DecorationKind::LineAttribute { class } => write!(f, "line {class}"),
            DecorationKind::Mark { class } => write!(f, "mark {class}"),
            DecorationKind::Replace { widget: None } => write!(f, "hide"),
            DecorationKind::Replace {
                widget: Some(widget),
            } => write!(f, "widget {} {:?}", widget.name(), widget.label().trim_end()),
        }
    }
}

/// An immutable, ordered set of decorations for one document snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    version: u64,
    snapshot: u64,
    decorations: Vec<Decoration>,
    dropped: usize,
}

impl DecorationSet {
    pub fn empty(doc: &Document) -> Self {
        Self {
            version: doc.version(),
            snapshot: doc.snapshot_id(),
            ..Default::default()
        }
    }

    /// The document version this set was built against.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// False unless `doc` is the very snapshot this set was built from; hosts
    /// must not apply a stale set.
    pub fn is_current_for(&self, doc: &Document) -> bool {
        self.snapshot == doc.snapshot_id()
    }

    pub fn as_slice(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// Decorations discarded as degenerate during the build.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Decorations starting inside `span` (end inclusive), in order.
    pub fn starting_in(&self, span: Span) -> impl Iterator<Item = &Decoration> {
        let first = self.decorations.partition_point(|d| d.from < span.start);
        self.decorations[first..]
            .iter()
            .take_while(move |d| d.from <= span.end)
    }

    /// Widgets whose replaced range covers `offset` (end inclusive).
    pub fn widgets_at(&self, offset: usize) -> impl Iterator<Item = &Widget> {
        self.decorations
            .iter()
            .filter(move |d| d.span().touches(offset))
            .filter_map(Decoration::widget_ref)
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.decorations.iter()
    }
}

impl fmt::Display for DecorationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version {}", self.version)?;
        for d in &self.decorations {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Collects decorations for one build, dropping degenerate ones.
///
/// Rejected: marks and replaces that are empty or inverted, anything outside
/// the visible ranges, and replaces overlapping an earlier replace.
#[derive(Debug)]
pub struct DecorationSetBuilder {
    version: u64,
    snapshot: u64,
    doc_len: usize,
    visible: Vec<Span>,
    decorations: Vec<Decoration>,
    replaced: Vec<Span>,
    dropped: usize,
}

impl DecorationSetBuilder {
    /// `visible` must be normalized (sorted, disjoint, non-empty).
    pub fn new(doc: &Document, visible: Vec<Span>) -> Self {
        Self {
            version: doc.version(),
            snapshot: doc.snapshot_id(),
            doc_len: doc.len(),
            visible,
            decorations: vec![],
            replaced: vec![],
            dropped: 0,
        }
    }

    pub fn push(&mut self, d: Decoration) {
        if let Some(reason) = self.rejection(&d) {
            log::trace!("dropping decoration {d}: {reason}");
            self.dropped += 1;
            return;
        }
        if matches!(d.kind, DecorationKind::Replace { .. }) {
            self.replaced.push(d.span());
        }
        self.decorations.push(d);
    }

    fn rejection(&self, d: &Decoration) -> Option<&'static str> {
        let span = d.span();
        match d.kind {
            DecorationKind::LineAttribute { .. } => {
                if d.from > d.to {
                    return Some("inverted");
                }
                if !self.line_start_visible(d.from) {
                    return Some("outside visible ranges");
                }
            }
            DecorationKind::Mark { .. } | DecorationKind::Replace { .. } => {
                if d.from >= d.to {
                    return Some("empty");
                }
                if !self.visible.iter().any(|r| r.contains_span(span)) {
                    return Some("outside visible ranges");
                }
            }
        }
        if matches!(d.kind, DecorationKind::Replace { .. })
            && self.replaced.iter().any(|r| r.overlaps(span))
        {
            return Some("overlaps an earlier replace");
        }
        None
    }

    /// Half-open test, except that the empty last line of the document
    /// belongs to a range ending at the document end.
    fn line_start_visible(&self, at: usize) -> bool {
        self.visible
            .iter()
            .any(|r| (r.start <= at && at < r.end) || (at == r.end && at == self.doc_len))
    }

    pub fn finish(mut self) -> DecorationSet {
        let mut seen = HashSet::new();
        self.decorations.retain(|d| seen.insert(d.clone()));
        self.decorations.sort_by_key(Decoration::sort_key);
        DecorationSet {
            version: self.version,
            snapshot: self.snapshot,
            decorations: self.decorations,
            dropped: self.dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builder() -> DecorationSetBuilder {
        builder_for(&Document::new(&"x".repeat(40)))
    }

    fn builder_for(doc: &Document) -> DecorationSetBuilder {
        DecorationSetBuilder::new(doc, vec![Span::new(0, 20)])
    }

    #[test]
    fn degenerate_decorations_are_dropped() {
        let mut b = builder();
        b.push(Decoration::mark(4, 4, "cm-bold"));
        b.push(Decoration::mark(6, 2, "cm-bold"));
        b.push(Decoration::hide(Span::new(18, 25)));
        b.push(Decoration::line(30, "cm-heading-1"));
        let set = b.finish();
        assert!(set.is_empty());
        assert_eq!(set.dropped(), 4);
    }

    #[test]
    fn overlapping_replace_is_dropped_touching_is_kept() {
        let mut b = builder();
        b.push(Decoration::hide(Span::new(0, 4)));
        b.push(Decoration::hide(Span::new(2, 6)));
        b.push(Decoration::hide(Span::new(4, 6)));
        let set = b.finish();
        assert_eq!(
            set.as_slice(),
            &[
                Decoration::hide(Span::new(0, 4)),
                Decoration::hide(Span::new(4, 6))
            ]
        );
        assert_eq!(set.dropped(), 1);
    }

    #[test]
    fn sorted_line_attributes_first_then_longer() {
        let mut b = builder();
        b.push(Decoration::hide(Span::new(0, 2)));
        b.push(Decoration::mark(2, 7, "cm-heading-content-1"));
        b.push(Decoration::mark(0, 9, "cm-blockquote"));
        b.push(Decoration::mark(0, 3, "cm-bold"));
        b.push(Decoration::line(0, "cm-heading-1"));
        b.push(Decoration::line(0, "cm-heading-1"));
        let set = b.finish();
        assert_eq!(
            set.as_slice(),
            &[
                Decoration::line(0, "cm-heading-1"),
                Decoration::mark(0, 9, "cm-blockquote"),
                Decoration::mark(0, 3, "cm-bold"),
                Decoration::hide(Span::new(0, 2)),
                Decoration::mark(2, 7, "cm-heading-content-1"),
            ]
        );
    }

    #[test]
    fn line_attribute_at_range_end_is_outside() {
        let mut b = builder();
        b.push(Decoration::line(19, "cm-heading-1"));
        b.push(Decoration::line(20, "cm-code-block"));
        let set = b.finish();
        assert_eq!(set.as_slice(), &[Decoration::line(19, "cm-heading-1")]);
        assert_eq!(set.dropped(), 1);
    }

    #[test]
    fn trailing_empty_line_at_document_end_is_visible() {
        let doc = Document::new(&format!("{}\n", "x".repeat(19)));
        let mut b = builder_for(&doc);
        b.push(Decoration::line(20, "cm-code-block"));
        assert_eq!(b.finish().len(), 1);
    }

    #[test]
    fn stale_detection_by_snapshot() {
        let doc = Document::new("x");
        let other = Document::new("y");
        let set = DecorationSet::empty(&doc);
        assert!(set.is_current_for(&doc));
        assert!(set.is_current_for(&doc.clone()));
        assert_eq!(other.version(), doc.version());
        assert!(!set.is_current_for(&other));
        assert!(!DecorationSet::default().is_current_for(&doc));
    }

    #[test]
    fn display_dump() {
        let mut b = builder();
        b.push(Decoration::line(0, "cm-heading-1"));
        b.push(Decoration::hide(Span::new(0, 2)));
        assert_eq!(
            b.finish().to_string(),
            "version 0\n0..0 line cm-heading-1\n0..2 hide\n"
        );
    }
}
