/// Which fence characters opened a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";
    /// Line attribute for every line of a fenced block.
    pub const BLOCK_CLASS: &'static str = "cm-code-block";
    /// Line attribute for the opening and closing fence lines.
    pub const FENCE_CLASS: &'static str = "cm-code-block cm-code-fence";

    /// Fence signature of a line, ignoring leading whitespace.
    pub fn sig(line: &str) -> Option<FenceKind> {
        let t = line.trim_start();
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    /// A fence only closes a block opened with the same characters.
    pub fn closes(kind: FenceKind, sig: Option<FenceKind>) -> bool {
        sig == Some(kind)
    }
}
