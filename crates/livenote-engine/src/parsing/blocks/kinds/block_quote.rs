use crate::parsing::rope::Span;

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
    pub const CONTENT_CLASS: &'static str = "cm-blockquote";
    pub const LINE_CLASS: &'static str = "cm-blockquote-line";

    /// Strips blockquote prefixes from a line.
    ///
    /// Handles `> text`, `>> nested` and `> > spaced nested`, each `>` taking at
    /// most one following space.
    ///
    /// # Returns
    /// `(depth, marker)` where `marker` spans from the first `>` to where the
    /// content begins; `None` when the line is not a quote.
    pub fn strip_prefixes(s: &str) -> Option<(u8, Span)> {
        let b = s.as_bytes();
        let mut i = s.len() - s.trim_start_matches([' ', '\t']).len();
        let first = i;
        let mut depth = 0u8;

        loop {
            if i < b.len() && b[i] == (Self::PREFIX as u8) {
                depth = depth.saturating_add(1);
                i += 1;
                if i < b.len() && b[i] == b' ' {
                    i += 1;
                }
            } else {
                break;
            }
            // spaces between nested markers
            let mut j = i;
            while j < b.len() && b[j] == b' ' {
                j += 1;
            }
            if j < b.len() && b[j] == (Self::PREFIX as u8) {
                i = j;
            }
        }

        (depth > 0).then_some((depth, Span::new(first, i)))
    }
}
