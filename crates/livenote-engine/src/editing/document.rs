use std::{
    borrow::Cow,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use xi_rope::{Delta, LinesMetric, Rope};

use crate::editing::TextEdit;
use crate::parsing::rope::{self, LineRef, LinesIn, Span};

/// Errors from applying a [`TextEdit`] to a [`Document`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit {from}..{to} is outside the document (length {len})")]
    OutOfBounds { from: usize, to: usize, len: usize },
    #[error("edit range {from}..{to} is inverted")]
    Inverted { from: usize, to: usize },
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

/// Replaces `\r\n` and lone `\r` with `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

static NEXT_SNAPSHOT: AtomicU64 = AtomicU64::new(1);

fn next_snapshot() -> u64 {
    NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed)
}

/// One immutable snapshot of a note's text.
///
/// Offsets are UTF-8 byte offsets into the normalized text, line numbers are
/// 1-based. Cloning is cheap (the rope is shared).
#[derive(Clone)]
pub struct Document {
    /// xi-rope buffer holding the whole note
    pub(crate) buffer: Rope,
    /// Incremented by every applied edit
    pub(crate) version: u64,
    /// Unique per snapshot within the process, shared only by clones
    pub(crate) snapshot: u64,
}

impl Document {
    /// Create a version 0 snapshot from text.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(normalize_newlines(text).as_ref()),
            version: 0,
            snapshot: next_snapshot(),
        }
    }

    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Identity of this snapshot. Two documents with equal versions but
    /// different histories never share it.
    pub fn snapshot_id(&self) -> u64 {
        self.snapshot
    }

    /// Get the buffer length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    /// Text of `span`, clamped to the document.
    pub fn slice(&self, span: Span) -> String {
        rope::slice_to_string(&self.buffer, span)
    }

    /// Number of lines; an empty document has one empty line.
    pub fn line_count(&self) -> usize {
        self.buffer.measure::<LinesMetric>() + 1
    }

    /// The line holding `offset` (clamped to the document end).
    pub fn line_at(&self, offset: usize) -> LineRef {
        rope::line_at(&self.buffer, offset)
    }

    /// The 1-based line `number`, if it exists.
    pub fn line(&self, number: usize) -> Option<LineRef> {
        if number == 0 || number > self.line_count() {
            return None;
        }
        Some(self.line_at(self.buffer.offset_of_line(number - 1)))
    }

    /// Lines intersecting `range`, see [`rope::lines_in`].
    pub fn lines_in(&self, range: Span) -> LinesIn<'_> {
        rope::lines_in(&self.buffer, range)
    }

    /// Whether `offset` is inside the document and on a char boundary.
    pub fn is_boundary(&self, offset: usize) -> bool {
        if offset > self.len() {
            return false;
        }
        let line = self.line_at(offset);
        line.text.is_char_boundary(offset - line.span.start)
    }

    /// Applies `edit`, returning the next snapshot.
    ///
    /// Inserted text is newline-normalized. The receiver is left untouched.
    pub fn apply(&self, edit: &TextEdit) -> Result<Document, EditError> {
        let len = self.len();
        let (from, to) = (edit.from, edit.to);
        if from > to {
            return Err(EditError::Inverted { from, to });
        }
        if to > len {
            return Err(EditError::OutOfBounds { from, to, len });
        }
        for offset in [from, to] {
            if !self.is_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }

        let insert = normalize_newlines(&edit.insert);
        let delta = Delta::simple_edit(from..to, Rope::from(insert.as_ref()), len);
        Ok(Document {
            buffer: delta.apply(&self.buffer),
            version: self.version + 1,
            snapshot: next_snapshot(),
        })
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("version", &self.version)
            .field("snapshot", &self.snapshot)
            .field("len", &self.len())
            .field("text", &rope::preview(&self.text(), 40))
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}
