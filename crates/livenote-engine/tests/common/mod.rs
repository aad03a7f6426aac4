use livenote_engine::{
    BuildInput, DecorationSet, Document, PreviewOptions, Selection, Span, build_decorations,
};

/// Builds decorations for the whole document with the cursor at `head`.
#[allow(dead_code)]
pub fn decorate(doc: &Document, head: usize) -> DecorationSet {
    decorate_with(doc, head, &[Span::new(0, doc.len())], &PreviewOptions::default())
}

#[allow(dead_code)]
pub fn decorate_with(
    doc: &Document,
    head: usize,
    ranges: &[Span],
    options: &PreviewOptions,
) -> DecorationSet {
    let input = BuildInput {
        doc,
        selection: Selection::cursor(head),
        visible_ranges: ranges,
    };
    build_decorations(&input, options).expect("valid options")
}

/// Decorations as `from..to kind` lines, for readable diffs.
#[allow(dead_code)]
pub fn dump(set: &DecorationSet) -> Vec<String> {
    set.iter().map(|d| d.to_string()).collect()
}
