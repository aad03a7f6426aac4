use livenote_engine::{
    CheckboxWidget, Decoration, DecorationKind, DecorationSet, Document, FenceScope,
    PreviewOptions, Span, TextEdit, Widget,
    parsing::inline::{EmphasisRule, EmphasisStyle},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::{decorate, decorate_with, dump};

#[test]
fn emphasis_on_inactive_line() {
    let doc = Document::new("**bold** and _ital_\nnext");
    let set = decorate(&doc, 22);
    assert_eq!(
        set.as_slice(),
        &[
            Decoration::hide(Span::new(0, 2)),
            Decoration::mark(2, 6, "cm-bold"),
            Decoration::hide(Span::new(6, 8)),
            Decoration::hide(Span::new(13, 14)),
            Decoration::mark(14, 18, "cm-italic"),
            Decoration::hide(Span::new(18, 19)),
        ]
    );
}

#[test]
fn emphasis_on_active_line_keeps_markers() {
    let doc = Document::new("**bold** and _ital_");
    assert_eq!(
        dump(&decorate(&doc, 3)),
        vec!["2..6 mark cm-bold", "14..18 mark cm-italic"]
    );
}

#[test]
fn checkbox_item_on_inactive_line() {
    let doc = Document::new("title\n- [x] done");
    let set = decorate(&doc, 0);
    assert_eq!(
        set.as_slice(),
        &[
            Decoration::hide(Span::new(6, 8)),
            Decoration::widget(
                Span::new(8, 11),
                Widget::Checkbox(CheckboxWidget {
                    checked: true,
                    from: 8,
                    to: 11,
                })
            ),
            Decoration::hide(Span::new(11, 12)),
            Decoration::mark(12, 16, "cm-list-level-0 cm-task-done"),
        ]
    );
}

#[test]
fn unclosed_block_math_is_plain_text() {
    let doc = Document::new("$$\n");
    assert!(decorate(&doc, 3).is_empty());
}

#[test]
fn active_heading_keeps_its_marker() {
    let doc = Document::new("# Title");
    assert_eq!(
        decorate(&doc, 4).as_slice(),
        &[
            Decoration::line(0, "cm-heading-1"),
            Decoration::mark(2, 7, "cm-heading-content-1"),
        ]
    );
}

#[test]
fn inactive_heading_hides_its_marker() {
    let doc = Document::new("### Deep\nx");
    assert_eq!(
        dump(&decorate(&doc, 9)),
        vec![
            "0..0 line cm-heading-3",
            "0..4 hide",
            "4..8 mark cm-heading-content-3",
        ]
    );
}

#[rstest]
#[case::bullet("- item", vec!["0..2 widget bullet \"•\"", "2..6 mark cm-list-level-0"])]
#[case::nested_bullet("  * item", vec!["2..4 widget bullet \"◦\"", "4..8 mark cm-list-level-1"])]
#[case::ordinal("12. twelve", vec!["0..4 widget ordinal \"12.\"", "4..10 mark cm-list-level-0"])]
#[case::quote("> quote", vec!["0..0 line cm-blockquote-line", "0..2 hide", "2..7 mark cm-blockquote"])]
#[case::code_span("run `ls` now", vec!["4..5 hide", "5..7 mark cm-inline-code", "7..8 hide"])]
#[case::strike("--gone--", vec!["0..2 hide", "2..6 mark cm-strikethrough", "6..8 hide"])]
#[case::inline_math("$x^2$", vec!["0..5 widget math-inline \"x^2\""])]
#[case::display_math("$$x$$", vec!["0..5 widget math-display \"x\""])]
#[case::plain("nothing here", vec![])]
fn single_construct_inactive(#[case] line: &str, #[case] expected: Vec<&str>) {
    let doc = Document::new(&format!("{line}\n"));
    assert_eq!(dump(&decorate(&doc, doc.len())), expected);
}

#[test]
fn active_line_has_no_replacements() {
    let doc = Document::new("# H\n- [ ] task\n1. one\n> q\n**b** `c` $m$");
    for number in 1..=doc.line_count() {
        let line = doc.line(number).unwrap();
        let set = decorate(&doc, line.span.start);
        let replaced_on_active = set.iter().any(|d| {
            matches!(d.kind, DecorationKind::Replace { .. }) && line.span.contains_span(d.span())
        });
        assert!(!replaced_on_active, "line {number} has replacements");
    }
}

#[test]
fn active_math_is_shown_as_source() {
    let doc = Document::new("see $x$");
    assert_eq!(dump(&decorate(&doc, 0)), vec!["4..7 mark cm-math-source"]);
}

#[test]
fn identical_lines_hide_identically() {
    let doc = Document::new("- a **b**\n- a **b**");
    let on_first = decorate(&doc, 0);
    let on_second = decorate(&doc, 10);

    let relative = |set: &DecorationSet, line: usize| -> Vec<String> {
        let span = doc.line(line).unwrap().span;
        set.iter()
            .filter(|d| span.contains_span(d.span()))
            .map(|d| format!("{}..{} {:?}", d.from - span.start, d.to - span.start, d.kind))
            .collect()
    };
    assert!(!relative(&on_first, 2).is_empty());
    assert_eq!(relative(&on_first, 2), relative(&on_second, 1));
}

#[test]
fn marks_stay_within_their_line() {
    let text = "# Heading **b**\n  - [x] nested _i_\n3. x `c`\n> > deep\n--s-- and $m$\n";
    let doc = Document::new(text);
    let set = decorate(&doc, doc.len());
    assert!(!set.is_empty());
    for d in &set {
        let line = doc.line_at(d.from);
        assert!(
            line.span.contains_span(d.span()),
            "{d} leaves {:?}",
            line.span
        );
    }
}

#[test]
fn math_is_not_redecorated_by_emphasis() {
    let doc = Document::new("$a_1 + b_1$ and **x**\n");
    let set = decorate(&doc, doc.len());
    let math = Span::new(0, 11);
    let inside: Vec<_> = set.iter().filter(|d| d.span().overlaps(math)).collect();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].widget_ref().map(Widget::name), Some("math-inline"));
}

#[test]
fn fenced_code_is_raw() {
    let doc = Document::new("```\n# not\n```\n# Heading");
    assert_eq!(
        dump(&decorate(&doc, 0)),
        vec![
            "0..0 line cm-code-block cm-code-fence",
            "4..4 line cm-code-block",
            "10..10 line cm-code-block cm-code-fence",
            "14..14 line cm-heading-1",
            "14..16 hide",
            "16..23 mark cm-heading-content-1",
        ]
    );
}

#[test]
fn fence_scope_decides_mid_block_viewports() {
    let doc = Document::new("```\ninside\n# h\n```");
    let visible = [Span::new(4, 14)];

    let viewport = decorate_with(&doc, 0, &visible, &PreviewOptions::default());
    assert_eq!(
        dump(&viewport),
        vec![
            "11..11 line cm-heading-1",
            "11..13 hide",
            "13..14 mark cm-heading-content-1",
        ]
    );

    let options = PreviewOptions {
        fence_scope: FenceScope::Document,
        ..Default::default()
    };
    let document = decorate_with(&doc, 0, &visible, &options);
    assert_eq!(
        dump(&document),
        vec!["4..4 line cm-code-block", "11..11 line cm-code-block"]
    );
}

#[test]
fn nothing_outside_visible_ranges() {
    let doc = Document::new("# A\n# B\n# C");
    let set = decorate_with(&doc, 0, &[Span::new(4, 7)], &PreviewOptions::default());
    assert_eq!(
        dump(&set),
        vec![
            "4..4 line cm-heading-1",
            "4..6 hide",
            "6..7 mark cm-heading-content-1",
        ]
    );
}

#[rstest]
#[case::heading_after_range("a\n# B\n# C", Span::new(0, 2))]
#[case::empty_range("a\n# B\n# C", Span::new(6, 6))]
#[case::fence_after_range("x\n```\n", Span::new(0, 2))]
fn line_starting_at_range_end_is_not_decorated(#[case] text: &str, #[case] visible: Span) {
    let doc = Document::new(text);
    let set = decorate_with(&doc, 0, &[visible], &PreviewOptions::default());
    assert_eq!(dump(&set), Vec::<String>::new());
}

#[test]
fn fenced_trailing_line_at_document_end_is_decorated() {
    let doc = Document::new("```\ncode\n");
    assert_eq!(
        dump(&decorate(&doc, 0)),
        vec![
            "0..0 line cm-code-block cm-code-fence",
            "4..4 line cm-code-block",
            "9..9 line cm-code-block",
        ]
    );
}

#[test]
fn set_for_another_note_is_stale() {
    let old = Document::new("# Old title\n");
    let set = decorate(&old, old.len());
    assert!(!set.is_empty());
    assert!(!set.is_current_for(&Document::new("plain text!\n")));
}

#[test]
fn multi_line_math_region() {
    let doc = Document::new("$$\nx^2\n$$\nafter");
    assert_eq!(
        decorate(&doc, 11).as_slice(),
        &[Decoration::widget(
            Span::new(0, 9),
            Widget::Math {
                expression: "x^2".into(),
                display: true,
            }
        )]
    );
    assert_eq!(
        dump(&decorate(&doc, 4)),
        vec![
            "0..0 line cm-math-source",
            "3..3 line cm-math-source",
            "7..7 line cm-math-source",
        ]
    );
}

#[test]
fn configured_emphasis_rule() {
    let options = PreviewOptions {
        emphasis: vec![EmphasisRule::new("==", EmphasisStyle::Bold)],
        ..Default::default()
    };
    let doc = Document::new("==loud== **quiet**\n");
    let set = decorate_with(&doc, doc.len(), &[Span::new(0, doc.len())], &options);
    assert_eq!(
        dump(&set),
        vec!["0..2 hide", "2..6 mark cm-bold", "6..8 hide"]
    );
}

#[test]
fn sets_record_their_version() {
    let doc = Document::new("- [ ] a");
    let set = decorate(&doc, 0);
    assert!(set.is_current_for(&doc));
    let next = doc.apply(&TextEdit::replace(2, 5, "[x]")).unwrap();
    assert!(!set.is_current_for(&next));
}
