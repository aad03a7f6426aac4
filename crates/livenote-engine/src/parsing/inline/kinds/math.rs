/// Math span delimiters.
///
/// `$...$` is inline math, `$$...$$` display math. `\$` is a literal dollar.
pub struct MathSpan;

impl MathSpan {
    pub const DOLLAR: u8 = b'$';
    pub const ESCAPE: u8 = b'\\';
    pub const INLINE: &'static [u8] = b"$";
    pub const DISPLAY: &'static [u8] = b"$$";
    /// Class for math source shown raw on the active line.
    pub const SOURCE_CLASS: &'static str = "cm-math-source";
}
