use crate::parsing::{ConstructKind, ConstructMatch, rope::LineRef};

use super::{
    fence::{FenceLine, FenceTracker},
    kinds::{BlockQuote, Heading, ListItem},
};

/// Classification of a single visible line.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// The line that was classified.
    pub line: LineRef,
    /// Set when the line belongs to fenced code; such lines carry no other
    /// block or inline constructs.
    pub fence: Option<FenceLine>,
    /// Every block construct anchored on this line.
    pub blocks: Vec<ConstructMatch>,
}

impl LineClass {
    pub fn in_fence(&self) -> bool {
        self.fence.is_some()
    }
}

/// Classifies lines for the live preview.
///
/// Precedence: fenced code first (raw zone), then headings, checkbox items (a
/// refinement of unordered items, so the two are exclusive), unordered items,
/// ordered items and blockquotes. All matching rules are reported.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub fn classify(&self, lr: &LineRef, fences: &mut FenceTracker) -> LineClass {
        if let Some(fence) = fences.observe(&lr.text) {
            return LineClass {
                line: lr.clone(),
                fence: Some(fence),
                blocks: vec![ConstructMatch {
                    kind: ConstructKind::FencedCodeLine {
                        boundary: fence.is_boundary(),
                    },
                    from: lr.span.start,
                    to: lr.span.end,
                    content_from: lr.span.start,
                    content_to: lr.span.end,
                }],
            };
        }

        LineClass {
            line: lr.clone(),
            fence: None,
            blocks: self.blocks(lr),
        }
    }

    /// Block constructs of a line outside fenced code.
    pub fn blocks(&self, lr: &LineRef) -> Vec<ConstructMatch> {
        let text = lr.text.as_str();
        let end = lr.span.end;
        let mut out = vec![];

        if let Some((level, content)) = Heading::parse(text) {
            out.push(ConstructMatch {
                kind: ConstructKind::Heading { level },
                from: lr.abs(0),
                to: end,
                content_from: lr.abs(content),
                content_to: end,
            });
        }

        if let Some(cb) = ListItem::checkbox(text) {
            out.push(ConstructMatch {
                kind: ConstructKind::CheckboxItem {
                    depth: cb.depth,
                    checked: cb.checked,
                    token: cb.token.shift(lr.span.start),
                },
                from: lr.abs(cb.bullet.start),
                to: end,
                content_from: lr.abs(cb.content_start),
                content_to: end,
            });
        } else if let Some(m) = ListItem::unordered(text) {
            out.push(ConstructMatch {
                kind: ConstructKind::UnorderedListItem { depth: m.depth },
                from: lr.abs(m.marker.start),
                to: end,
                content_from: lr.abs(m.content_start),
                content_to: end,
            });
        }

        if let Some((m, number)) = ListItem::ordered(text) {
            out.push(ConstructMatch {
                kind: ConstructKind::OrderedListItem {
                    depth: m.depth,
                    number,
                },
                from: lr.abs(m.marker.start),
                to: end,
                content_from: lr.abs(m.content_start),
                content_to: end,
            });
        }

        if let Some((depth, marker)) = BlockQuote::strip_prefixes(text) {
            out.push(ConstructMatch {
                kind: ConstructKind::Blockquote { depth },
                from: lr.abs(marker.start),
                to: end,
                content_from: lr.abs(marker.end),
                content_to: end,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::Span;

    fn line(text: &str, start: usize) -> LineRef {
        LineRef {
            number: 1,
            span: Span::new(start, start + text.len()),
            text: text.to_string(),
        }
    }

    fn kinds(text: &str) -> Vec<ConstructKind> {
        MarkdownLineClassifier
            .blocks(&line(text, 0))
            .into_iter()
            .map(|m| m.kind)
            .collect()
    }

    #[test]
    fn heading_line() {
        let found = MarkdownLineClassifier.blocks(&line("## Sub", 10));
        assert_eq!(
            found,
            vec![ConstructMatch {
                kind: ConstructKind::Heading { level: 2 },
                from: 10,
                to: 16,
                content_from: 13,
                content_to: 16,
            }]
        );
    }

    #[test]
    fn checkbox_excludes_plain_unordered() {
        let found = MarkdownLineClassifier.blocks(&line("- [x] done", 0));
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].kind,
            ConstructKind::CheckboxItem {
                depth: 0,
                checked: true,
                token: Span::new(2, 5),
            }
        );
        assert_eq!(found[0].content(), Span::new(6, 10));
    }

    #[test]
    fn nested_unordered_depth() {
        assert_eq!(
            kinds("    * deep"),
            vec![ConstructKind::UnorderedListItem { depth: 2 }]
        );
    }

    #[test]
    fn ordered_and_quote() {
        assert_eq!(
            kinds("3. third"),
            vec![ConstructKind::OrderedListItem {
                depth: 0,
                number: "3".into()
            }]
        );
        assert_eq!(kinds("> quoted"), vec![ConstructKind::Blockquote { depth: 1 }]);
    }

    #[test]
    fn plain_line_has_no_blocks() {
        assert!(kinds("just text").is_empty());
        assert!(kinds("").is_empty());
    }

    #[test]
    fn fenced_lines_are_raw() {
        let mut fences = FenceTracker::default();
        let open = MarkdownLineClassifier.classify(&line("```", 0), &mut fences);
        assert_eq!(open.fence, Some(FenceLine::Opening));
        let body = MarkdownLineClassifier.classify(&line("# inside", 4), &mut fences);
        assert_eq!(body.fence, Some(FenceLine::Body));
        assert_eq!(
            body.blocks[0].kind,
            ConstructKind::FencedCodeLine { boundary: false }
        );
        let close = MarkdownLineClassifier.classify(&line("```", 13), &mut fences);
        assert_eq!(close.fence, Some(FenceLine::Closing));
        let after = MarkdownLineClassifier.classify(&line("# out", 17), &mut fences);
        assert!(!after.in_fence());
        assert_eq!(after.blocks[0].kind, ConstructKind::Heading { level: 1 });
    }
}
