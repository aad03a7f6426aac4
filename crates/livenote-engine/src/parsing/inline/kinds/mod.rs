//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! - **`MathSpan`**: `$`, `$$` and the `\` escape
//! - **`CodeSpan`**: the backtick
//! - **`EmphasisRule`** / **`EmphasisStyle`**: configurable symmetric pairs
//!
//! Scanners refer to these constants and never hardcode delimiters.

pub mod code_span;
pub mod emphasis;
pub mod math;

pub use code_span::CodeSpan;
pub use emphasis::{EmphasisRule, EmphasisStyle};
pub use math::MathSpan;
