//! # Line Classification
//!
//! Block constructs the live preview decorates are all recognised from the
//! leading structure of a single line. The only state carried between lines is
//! the fenced-code flag ([`FenceTracker`]), which lives for one build pass.
//!
//! ## Modules
//!
//! - **`kinds`**: per-construct syntax knowledge (`Heading`, `ListItem`,
//!   `Checkbox`, `BlockQuote`, `CodeFence`, `MathBlock`)
//! - **`fence`**: `FenceTracker`, the fenced-code accumulator
//! - **`classify`**: `MarkdownLineClassifier` producing a `LineClass` per line

pub mod classify;
pub mod fence;
pub mod kinds;

pub use classify::{LineClass, MarkdownLineClassifier};
pub use fence::{FenceLine, FenceTracker};
