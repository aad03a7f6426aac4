use crate::editing::{Document, Selection};
use crate::parsing::{
    ConstructKind, ConstructMatch,
    blocks::{
        FenceTracker, LineClass, MarkdownLineClassifier,
        kinds::{BlockQuote, Checkbox, CodeFence, Heading, ListItem, MathBlock, MathRegion},
    },
    inline::{
        EmphasisScanner, EmphasisStyle,
        kinds::{CodeSpan, MathSpan},
        scan_line,
    },
    rope::{LineRef, Span, normalize_ranges},
};
use crate::preview::{
    CheckboxWidget, Decoration, DecorationSet, FenceScope, PreviewError, PreviewOptions, Widget,
    decoration::DecorationSetBuilder,
};

/// Everything one build pass looks at.
#[derive(Debug, Clone, Copy)]
pub struct BuildInput<'a> {
    pub doc: &'a Document,
    pub selection: Selection,
    pub visible_ranges: &'a [Span],
}

impl BuildInput<'_> {
    /// 1-based number of the line holding the selection head.
    pub fn active_line(&self) -> usize {
        self.doc.line_at(self.selection.head).number
    }
}

/// Compiled preview rules. Building is a pure function of the input.
pub struct DecorationBuilder {
    options: PreviewOptions,
    emphasis: EmphasisScanner,
    classifier: MarkdownLineClassifier,
}

impl DecorationBuilder {
    pub fn new(options: PreviewOptions) -> Result<Self, PreviewError> {
        Ok(Self {
            emphasis: options.emphasis_scanner()?,
            options,
            classifier: MarkdownLineClassifier,
        })
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// Decorates every line of every visible range.
    pub fn build(&self, input: &BuildInput) -> DecorationSet {
        let doc = input.doc;
        let ranges = normalize_ranges(input.visible_ranges, doc.len());
        let active = input.active_line();
        let mut out = DecorationSetBuilder::new(doc, ranges.clone());

        for range in &ranges {
            let lines: Vec<LineRef> = doc.lines_in(*range).collect();
            let mut fences = self.fence_tracker(doc, &lines);
            let mut i = 0;
            while i < lines.len() {
                let class = self.classifier.classify(&lines[i], &mut fences);
                if class.in_fence() {
                    self.decorate_fence_line(&class, &mut out);
                    i += 1;
                    continue;
                }
                if let Some(region) = MathBlock::find_region(&lines, i) {
                    self.decorate_math_region(&lines, &region, active, &mut out);
                    i = region.last + 1;
                    continue;
                }
                self.decorate_line(&class, class.line.number == active, &mut out);
                i += 1;
            }
        }

        let set = out.finish();
        log::trace!(
            "built {} decorations for version {} ({} dropped)",
            set.len(),
            set.version(),
            set.dropped()
        );
        set
    }

    fn fence_tracker(&self, doc: &Document, lines: &[LineRef]) -> FenceTracker {
        match (self.options.fence_scope, lines.first()) {
            (FenceScope::Document, Some(first)) if first.number > 1 => {
                let before: Vec<LineRef> = doc
                    .lines_in(Span::new(0, first.span.start))
                    .take_while(|l| l.number < first.number)
                    .collect();
                FenceTracker::primed(before.iter().map(|l| l.text.as_str()))
            }
            _ => FenceTracker::default(),
        }
    }

    fn decorate_fence_line(&self, class: &LineClass, out: &mut DecorationSetBuilder) {
        let boundary = class.fence.is_some_and(|f| f.is_boundary());
        let css = if boundary {
            CodeFence::FENCE_CLASS
        } else {
            CodeFence::BLOCK_CLASS
        };
        out.push(Decoration::line(class.line.span.start, css));
    }

    fn decorate_math_region(
        &self,
        lines: &[LineRef],
        region: &MathRegion,
        active: usize,
        out: &mut DecorationSetBuilder,
    ) {
        let region_lines = &lines[region.first..=region.last];
        if region_lines.iter().any(|l| l.number == active) {
            for line in region_lines {
                out.push(Decoration::line(line.span.start, MathBlock::SOURCE_CLASS));
            }
        } else {
            out.push(Decoration::widget(
                region.span,
                Widget::Math {
                    expression: region.expression.clone(),
                    display: true,
                },
            ));
        }
    }

    fn decorate_line(&self, class: &LineClass, active: bool, out: &mut DecorationSetBuilder) {
        let line = &class.line;
        for block in &class.blocks {
            self.decorate_block(line, block, active, out);
        }
        for m in scan_line(&self.emphasis, line.span.start, &line.text) {
            self.decorate_inline(&m, active, out);
        }
    }

    fn decorate_block(
        &self,
        line: &LineRef,
        m: &ConstructMatch,
        active: bool,
        out: &mut DecorationSetBuilder,
    ) {
        let content = m.content();
        match &m.kind {
            ConstructKind::Heading { level } => {
                out.push(Decoration::line(line.span.start, Heading::line_class(*level)));
                out.push(Decoration::mark(
                    content.start,
                    content.end,
                    Heading::content_class(*level),
                ));
                if !active {
                    out.push(Decoration::hide(m.leading_marker()));
                }
            }
            ConstructKind::UnorderedListItem { depth } => {
                out.push(Decoration::mark(
                    content.start,
                    content.end,
                    ListItem::class(*depth),
                ));
                if !active {
                    out.push(Decoration::widget(
                        m.leading_marker(),
                        Widget::Bullet {
                            depth: *depth,
                            glyph: self.options.bullet_glyph(*depth).to_string(),
                        },
                    ));
                }
            }
            ConstructKind::CheckboxItem {
                depth,
                checked,
                token,
            } => {
                out.push(Decoration::mark(
                    content.start,
                    content.end,
                    format!("{} {}", ListItem::class(*depth), Checkbox::class(*checked)),
                ));
                if !active {
                    out.push(Decoration::hide(Span::new(m.from, token.start)));
                    out.push(Decoration::widget(
                        *token,
                        Widget::Checkbox(CheckboxWidget {
                            checked: *checked,
                            from: token.start,
                            to: token.end,
                        }),
                    ));
                    out.push(Decoration::hide(Span::new(token.end, m.content_from)));
                }
            }
            ConstructKind::OrderedListItem { depth, number } => {
                out.push(Decoration::mark(
                    content.start,
                    content.end,
                    ListItem::class(*depth),
                ));
                if !active {
                    out.push(Decoration::widget(
                        m.leading_marker(),
                        Widget::Ordinal {
                            label: format!("{number}."),
                        },
                    ));
                }
            }
            ConstructKind::Blockquote { .. } => {
                out.push(Decoration::line(line.span.start, BlockQuote::LINE_CLASS));
                out.push(Decoration::mark(
                    content.start,
                    content.end,
                    BlockQuote::CONTENT_CLASS,
                ));
                if !active {
                    out.push(Decoration::hide(m.leading_marker()));
                }
            }
            other => log::trace!("no block decoration for {other:?}"),
        }
    }

    fn decorate_inline(&self, m: &ConstructMatch, active: bool, out: &mut DecorationSetBuilder) {
        let content = m.content();
        let styled = match &m.kind {
            ConstructKind::InlineMath { expression } | ConstructKind::BlockMath { expression } => {
                if active {
                    out.push(Decoration::mark(m.from, m.to, MathSpan::SOURCE_CLASS));
                } else {
                    out.push(Decoration::widget(
                        m.span(),
                        Widget::Math {
                            expression: expression.clone(),
                            display: matches!(m.kind, ConstructKind::BlockMath { .. }),
                        },
                    ));
                }
                return;
            }
            ConstructKind::BoldSpan => EmphasisStyle::Bold.class(),
            ConstructKind::ItalicSpan => EmphasisStyle::Italic.class(),
            ConstructKind::StrikethroughSpan => EmphasisStyle::Strikethrough.class(),
            ConstructKind::InlineCodeSpan => CodeSpan::CLASS,
            other => {
                log::trace!("no inline decoration for {other:?}");
                return;
            }
        };
        out.push(Decoration::mark(content.start, content.end, styled));
        if !active {
            out.push(Decoration::hide(m.leading_marker()));
            out.push(Decoration::hide(m.trailing_marker()));
        }
    }
}

/// One-shot build with freshly compiled `options`.
pub fn build_decorations(
    input: &BuildInput,
    options: &PreviewOptions,
) -> Result<DecorationSet, PreviewError> {
    Ok(DecorationBuilder::new(options.clone())?.build(input))
}
