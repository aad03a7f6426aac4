//! # Markdown Parsing
//!
//! Line-oriented recognition of the constructs the live preview decorates.
//!
//! - **`rope`**: spans, line iteration and slicing over `xi_rope::Rope`
//! - **`blocks`**: the line classifier (headings, lists, checkboxes, quotes,
//!   fences) and the multi-line `$$` math region finder
//! - **`inline`**: delimiter scanners for math, emphasis and code spans
//!
//! Everything here is pure: a line (plus, for fences, a small accumulator) in,
//! [`ConstructMatch`]es out.

pub mod blocks;
pub mod inline;
pub mod rope;
pub mod types;

pub use types::{ConstructKind, ConstructMatch};
