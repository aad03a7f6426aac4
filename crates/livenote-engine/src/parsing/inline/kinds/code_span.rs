/// Code span inline type with owned delimiter constant.
///
/// A single backtick pair; the content may not contain backticks or newlines.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
    pub const CLASS: &'static str = "cm-inline-code";
}
