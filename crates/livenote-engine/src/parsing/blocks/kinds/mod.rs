//! Block kinds. Each type owns its syntax (markers, patterns, classes) so the
//! classifier never hardcodes them.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list;
pub mod math_block;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind};
pub use heading::Heading;
pub use list::{Checkbox, CheckboxMarker, ListItem, ListMarker};
pub use math_block::{MathBlock, MathRegion};
