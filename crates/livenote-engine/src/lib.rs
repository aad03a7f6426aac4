pub mod editing;
pub mod export;
pub mod io;
pub mod math;
pub mod parsing;
pub mod preview;

// Re-export key types for easier usage
pub use editing::{Document, EditError, EditorHost, PendingEdits, Selection, TextEdit};
pub use export::render_html;
pub use io::*;
pub use math::{MathMode, MathResult, render_math};
pub use parsing::rope::Span;
pub use preview::{
    BuildInput, CheckboxWidget, Decoration, DecorationBuilder, DecorationKind, DecorationSet,
    FenceScope, LivePreview, PreviewError, PreviewOptions, PreviewState, ViewUpdate, Widget,
    build_decorations,
};
