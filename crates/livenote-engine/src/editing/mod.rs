/*!
 * # Editing Core
 *
 * The text model the preview engine reads and the edit path back into the host.
 *
 * ### Single Source of Truth: xi-rope Buffer
 * - Every [`Document`] snapshot stores its text in one **`xi_rope::Rope`**
 * - Snapshots are immutable; [`Document::apply`] returns the next snapshot with
 *   `version + 1`, so a decoration set can name the version it was built for
 * - Line endings are normalized to `\n` on construction
 *
 * ### Host Capabilities
 * - The engine never mutates the buffer itself. It asks the host for changes
 *   through [`EditorHost::dispatch`], one [`TextEdit`] per transaction
 * - [`PendingEdits`] is a ready-made host that queues edits for later
 *   application, used by tests and the terminal viewer
 *
 * ## Usage Pattern
 *
 * ```rust
 * use livenote_engine::editing::{Document, EditorHost, PendingEdits, TextEdit};
 *
 * let doc = Document::new("- [ ] task\n");
 * let mut host = PendingEdits::default();
 * host.dispatch(TextEdit::replace(2, 5, "[x]"));
 * let doc = host.apply_to(&doc).unwrap();
 * assert_eq!(doc.text(), "- [x] task\n");
 * assert_eq!(doc.version(), 1);
 * ```
 */

pub mod document;
pub mod edit;

pub use document::{Document, EditError, normalize_newlines};
pub use edit::{EditorHost, PendingEdits, Selection, TextEdit};
