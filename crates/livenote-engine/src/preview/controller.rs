use crate::editing::{Document, EditorHost, Selection};
use crate::parsing::rope::{Span, normalize_ranges};
use crate::preview::{
    BuildInput, DecorationBuilder, DecorationSet, PreviewError, PreviewOptions, Widget,
};

/// Whether the published set still matches the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Clean,
    Dirty,
}

/// One notification from the host view.
#[derive(Debug, Clone, Copy)]
pub struct ViewUpdate<'a> {
    pub doc: &'a Document,
    pub selection: Selection,
    pub visible_ranges: &'a [Span],
    pub doc_changed: bool,
    pub viewport_changed: bool,
    /// The host moved the selection. When false (and the document is
    /// unchanged) the previous active line is reused without a lookup.
    pub selection_set: bool,
}

impl<'a> ViewUpdate<'a> {
    /// The initial notification for a freshly opened view.
    pub fn initial(doc: &'a Document, selection: Selection, visible_ranges: &'a [Span]) -> Self {
        Self {
            doc,
            selection,
            visible_ranges,
            doc_changed: true,
            viewport_changed: true,
            selection_set: true,
        }
    }
}

/// What the last published set was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildKey {
    snapshot: u64,
    ranges: Vec<Span>,
    active_line: usize,
}

/// Keeps the published [`DecorationSet`] in step with the host view.
///
/// Rebuilds only when the document, the viewport or the active line changes;
/// moving the cursor within a line keeps the current set.
pub struct LivePreview {
    builder: DecorationBuilder,
    state: PreviewState,
    current: DecorationSet,
    key: Option<BuildKey>,
    builds: u64,
}

impl LivePreview {
    pub fn new(options: PreviewOptions) -> Result<Self, PreviewError> {
        Ok(Self {
            builder: DecorationBuilder::new(options)?,
            state: PreviewState::Dirty,
            current: DecorationSet::default(),
            key: None,
            builds: 0,
        })
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// The last published set.
    pub fn decorations(&self) -> &DecorationSet {
        &self.current
    }

    /// Number of builds so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn options(&self) -> &PreviewOptions {
        self.builder.options()
    }

    /// Forces the next update to rebuild.
    pub fn invalidate(&mut self) {
        self.state = PreviewState::Dirty;
    }

    /// Handles one view notification and returns the current set.
    pub fn update(&mut self, update: &ViewUpdate) -> &DecorationSet {
        let input = BuildInput {
            doc: update.doc,
            selection: update.selection,
            visible_ranges: update.visible_ranges,
        };
        let snapshot = update.doc.snapshot_id();
        let active_line = match &self.key {
            Some(old) if !update.selection_set && old.snapshot == snapshot => old.active_line,
            _ => input.active_line(),
        };
        let key = BuildKey {
            snapshot,
            ranges: normalize_ranges(update.visible_ranges, update.doc.len()),
            active_line,
        };

        if update.doc_changed || update.viewport_changed || self.key.as_ref() != Some(&key) {
            self.state = PreviewState::Dirty;
        }
        if self.state == PreviewState::Dirty {
            let reason = match &self.key {
                None => "first build",
                Some(old) if update.doc_changed || old.snapshot != key.snapshot => {
                    "document changed"
                }
                Some(_) if update.viewport_changed => "viewport changed",
                Some(old) if old.active_line != key.active_line => "active line changed",
                Some(_) => "invalidated",
            };
            self.current = self.builder.build(&input);
            self.builds += 1;
            log::debug!(
                "rebuilt preview ({reason}): line {}, {} ranges, {} decorations",
                key.active_line,
                key.ranges.len(),
                self.current.len()
            );
            self.key = Some(key);
            self.state = PreviewState::Clean;
        }
        &self.current
    }

    /// Toggles the checkbox widget covering `offset` in the current set.
    ///
    /// Returns `false` when no checkbox widget is there or its offsets are
    /// stale in `doc`.
    pub fn toggle_checkbox_at(
        &self,
        doc: &Document,
        offset: usize,
        host: &mut impl EditorHost,
    ) -> bool {
        let checkbox = self.current.widgets_at(offset).find_map(|w| match w {
            Widget::Checkbox(cb) => Some(*cb),
            _ => None,
        });
        match checkbox {
            Some(cb) => cb.toggle(doc, host),
            None => false,
        }
    }
}
