//! # Inline Scanning
//!
//! Per-line delimiter scanners. Each scanner handles one construct family and
//! returns non-overlapping matches with absolute document offsets.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants and emphasis rule types
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with position tracking
//! - **`scanner`**: `scan_math` and `scan_code_spans`
//! - **`emphasis`**: `EmphasisScanner`, regex-driven symmetric pairs
//!
//! ## Precedence
//!
//! Math is scanned first. Any emphasis or code match overlapping a math span is
//! discarded, see [`suppress_overlapping`].

pub mod cursor;
pub mod emphasis;
pub mod kinds;
pub mod scanner;

pub use emphasis::EmphasisScanner;
pub use kinds::{EmphasisRule, EmphasisStyle};
pub use scanner::{scan_code_spans, scan_math};

use crate::parsing::ConstructMatch;

/// Drops every candidate that overlaps one of the `winners`.
pub fn suppress_overlapping(
    candidates: Vec<ConstructMatch>,
    winners: &[ConstructMatch],
) -> Vec<ConstructMatch> {
    candidates
        .into_iter()
        .filter(|c| !winners.iter().any(|w| w.span().overlaps(c.span())))
        .collect()
}

/// All inline constructs of one line: math first, then emphasis, then code,
/// with math taking precedence over everything it overlaps.
pub fn scan_line(emphasis: &EmphasisScanner, base: usize, s: &str) -> Vec<ConstructMatch> {
    let math = scan_math(base, s);
    let mut out = suppress_overlapping(emphasis.scan(base, s), &math);
    out.extend(suppress_overlapping(scan_code_spans(base, s), &math));
    let mut all = math;
    all.append(&mut out);
    all
}
