use crate::editing::{Document, EditError};

/// A single text replacement of `[from, to)` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl TextEdit {
    pub fn replace(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at, at, text)
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self::replace(from, to, "")
    }
}

/// Editor selection; the preview only looks at `head`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn cursor(at: usize) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Capability the host editor hands to the engine for text mutation.
///
/// Each `dispatch` is one edit transaction; the host serializes them against
/// its own input and applies them to its buffer.
pub trait EditorHost {
    fn dispatch(&mut self, edit: TextEdit);
}

/// A host that queues dispatched edits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingEdits {
    edits: Vec<TextEdit>,
}

impl PendingEdits {
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies the queued edits in order, each against the previous result.
    pub fn apply_to(self, doc: &Document) -> Result<Document, EditError> {
        self.edits
            .iter()
            .try_fold(doc.clone(), |doc, edit| doc.apply(edit))
    }
}

impl EditorHost for PendingEdits {
    fn dispatch(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }
}
