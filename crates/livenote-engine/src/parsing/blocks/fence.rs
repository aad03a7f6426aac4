use super::kinds::{CodeFence, FenceKind};

/// How a line relates to fenced code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceLine {
    Opening,
    Body,
    Closing,
}

impl FenceLine {
    pub fn is_boundary(self) -> bool {
        !matches!(self, FenceLine::Body)
    }
}

/// The running "inside fenced code" flag of one build pass.
///
/// Lives on the stack of a single build and is fed every line in order. It is
/// never shared between builds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FenceTracker {
    open: Option<FenceKind>,
}

impl FenceTracker {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Feeds the next line. Returns how it belongs to a fenced block, or `None`
    /// for ordinary lines.
    pub fn observe(&mut self, line: &str) -> Option<FenceLine> {
        let sig = CodeFence::sig(line);
        match self.open {
            None => {
                let kind = sig?;
                self.open = Some(kind);
                Some(FenceLine::Opening)
            }
            Some(kind) if CodeFence::closes(kind, sig) => {
                self.open = None;
                Some(FenceLine::Closing)
            }
            Some(_) => Some(FenceLine::Body),
        }
    }

    /// A tracker that has already seen `lines`.
    pub fn primed<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tracker = Self::default();
        for line in lines {
            tracker.observe(line);
        }
        tracker
    }
}
