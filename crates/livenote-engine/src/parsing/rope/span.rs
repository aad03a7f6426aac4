/// A byte range `[start, end)` into a document snapshot.
///
/// Construct matches and decorations are all expressed in spans, so slicing the
/// document with any span reproduces the exact source text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when `offset` lies inside the span, end inclusive.
    ///
    /// End-inclusive because a caret sitting right after the last character of
    /// a line still belongs to that line.
    #[must_use]
    pub fn touches(self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// True when the two spans share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains_span(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Moves a line-local span to absolute document offsets.
    #[must_use]
    pub fn shift(self, base: usize) -> Span {
        Span {
            start: self.start + base,
            end: self.end + base,
        }
    }

    /// Clamps both ends to `limit`.
    #[must_use]
    pub fn clamp_to(self, limit: usize) -> Span {
        Span {
            start: self.start.min(limit),
            end: self.end.min(limit),
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(r: std::ops::Range<usize>) -> Self {
        Span {
            start: r.start,
            end: r.end,
        }
    }
}

/// Sorts, clamps and merges a list of visible ranges into disjoint spans.
///
/// Empty and inverted ranges are discarded; touching ranges are merged.
pub fn normalize_ranges(ranges: &[Span], limit: usize) -> Vec<Span> {
    let mut sorted: Vec<Span> = ranges
        .iter()
        .map(|r| r.clamp_to(limit))
        .filter(|r| r.start < r.end)
        .collect();
    sorted.sort();

    let mut out: Vec<Span> = Vec::with_capacity(sorted.len());
    for r in sorted {
        match out.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => out.push(r),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_saturates_on_inverted_span() {
        assert_eq!(Span::new(5, 2).len(), 0);
        assert!(Span::new(5, 2).is_empty());
    }

    #[test]
    fn overlap_excludes_touching_spans() {
        assert!(Span::new(0, 3).overlaps(Span::new(2, 5)));
        assert!(!Span::new(0, 3).overlaps(Span::new(3, 5)));
    }

    #[test]
    fn touches_is_end_inclusive() {
        let sp = Span::new(4, 8);
        assert!(sp.touches(4));
        assert!(sp.touches(8));
        assert!(!sp.touches(9));
    }

    #[test]
    fn normalize_merges_and_clamps() {
        let ranges = [Span::new(10, 20), Span::new(0, 5), Span::new(4, 8), Span::new(18, 99)];
        assert_eq!(
            normalize_ranges(&ranges, 30),
            vec![Span::new(0, 8), Span::new(10, 30)]
        );
    }

    #[test]
    fn normalize_drops_inverted_ranges() {
        assert!(normalize_ranges(&[Span::new(6, 2)], 10).is_empty());
    }

    #[test]
    fn normalize_drops_empty_ranges() {
        assert!(normalize_ranges(&[Span::new(6, 6), Span::new(20, 30)], 10).is_empty());
        assert_eq!(
            normalize_ranges(&[Span::new(3, 3), Span::new(4, 6)], 10),
            vec![Span::new(4, 6)]
        );
    }
}
