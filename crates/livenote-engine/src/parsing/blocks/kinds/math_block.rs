use crate::parsing::{inline::scan_math, rope::LineRef, rope::Span, ConstructKind};

/// A closed multi-line `$$` region. `first`/`last` index the line slice it was
/// found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathRegion {
    pub first: usize,
    pub last: usize,
    /// From the opening `$$` to the end of the closing line.
    pub span: Span,
    pub expression: String,
}

/// Display math spread over several lines:
///
/// ```text
/// $$
/// \int_0^1 x\,dx
/// $$
/// ```
pub struct MathBlock;

impl MathBlock {
    pub const DELIMITER: &'static str = "$$";
    /// Line attribute for region lines shown as source.
    pub const SOURCE_CLASS: &'static str = "cm-math-source";

    /// True when the line starts with `$$` that does not open a complete
    /// single-line display span.
    pub fn opens(line: &str) -> bool {
        let trimmed = line.trim();
        if !trimmed.starts_with(Self::DELIMITER) {
            return false;
        }
        let indent = line.len() - line.trim_start().len();
        !scan_math(0, line)
            .iter()
            .any(|m| m.from == indent && matches!(m.kind, ConstructKind::BlockMath { .. }))
    }

    /// Looks for a region opened at `lines[start]` and closed by the first later
    /// line whose trimmed text ends with `$$`.
    ///
    /// Returns `None` when the line does not open a region, when no closer
    /// exists within `lines`, or when the expression is empty.
    pub fn find_region(lines: &[LineRef], start: usize) -> Option<MathRegion> {
        let opener = lines.get(start)?;
        if !Self::opens(&opener.text) {
            return None;
        }
        let indent = opener.text.len() - opener.text.trim_start().len();
        let head = opener.text.trim()[Self::DELIMITER.len()..].to_string();
        let mut parts = vec![head];

        for (idx, line) in lines.iter().enumerate().skip(start + 1) {
            let t = line.text.trim();
            if let Some(body) = t.strip_suffix(Self::DELIMITER) {
                parts.push(body.to_string());
                let expression = parts.join("\n").trim().to_string();
                if expression.is_empty() {
                    return None;
                }
                return Some(MathRegion {
                    first: start,
                    last: idx,
                    span: Span::new(opener.abs(indent), line.span.end),
                    expression,
                });
            }
            parts.push(line.text.clone());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Document;

    fn lines(text: &str) -> Vec<LineRef> {
        let doc = Document::new(text);
        doc.lines_in(Span::new(0, doc.len())).collect()
    }

    #[test]
    fn opener_detection() {
        assert!(MathBlock::opens("$$"));
        assert!(MathBlock::opens("  $$ x"));
        assert!(!MathBlock::opens("$$x$$"));
        assert!(!MathBlock::opens("text $$"));
    }

    #[test]
    fn closed_region() {
        let ls = lines("$$\nx^2\n$$\nafter");
        let region = MathBlock::find_region(&ls, 0).unwrap();
        assert_eq!((region.first, region.last), (0, 2));
        assert_eq!(region.span, Span::new(0, 9));
        assert_eq!(region.expression, "x^2");
    }

    #[test]
    fn closer_with_trailing_content() {
        let ls = lines("$$ a +\nb $$");
        let region = MathBlock::find_region(&ls, 0).unwrap();
        assert_eq!(region.expression, "a +\nb");
    }

    #[test]
    fn unclosed_region_is_none() {
        let ls = lines("$$\nx^2\n");
        assert_eq!(MathBlock::find_region(&ls, 0), None);
    }

    #[test]
    fn empty_region_is_none() {
        let ls = lines("$$\n\n$$");
        assert_eq!(MathBlock::find_region(&ls, 0), None);
    }
}
