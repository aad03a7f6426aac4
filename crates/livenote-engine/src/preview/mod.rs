//! # Live Preview
//!
//! Turns a document snapshot, a selection and the visible ranges into a
//! [`DecorationSet`]: marks, hidden markers, widgets and line attributes the
//! host overlays on its text without changing it.
//!
//! ## Modules
//!
//! - **`options`**: `PreviewOptions`, the configurable part of the rules
//! - **`decoration`**: `Decoration`, `DecorationSet` and the validating builder
//! - **`widget`**: `Widget` value types and the checkbox toggle callback
//! - **`builder`**: `DecorationBuilder`, one build pass over the viewport
//! - **`controller`**: `LivePreview`, deciding when to rebuild

pub mod builder;
pub mod controller;
pub mod decoration;
pub mod options;
pub mod widget;

pub use builder::{BuildInput, DecorationBuilder, build_decorations};
pub use controller::{LivePreview, PreviewState, ViewUpdate};
pub use decoration::{Decoration, DecorationKind, DecorationSet};
pub use options::{FenceScope, PreviewOptions};
pub use widget::{CheckboxWidget, Widget};

use crate::parsing::inline::EmphasisStyle;

/// Invalid preview configuration.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("emphasis rule for {style:?} has an empty delimiter")]
    EmptyDelimiter { style: EmphasisStyle },
    #[error("invalid emphasis pattern: {0}")]
    Regex(#[from] regex::Error),
}
