pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineRef, LinesIn, line_at, lines_in};
pub use slice::{preview, slice_to_string};
pub use span::{Span, normalize_ranges};
