use serde::{Deserialize, Serialize};

use crate::parsing::inline::{EmphasisRule, EmphasisScanner};
use crate::preview::PreviewError;

/// Where the fenced-code flag starts for each visible range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FenceScope {
    /// Start every visible range outside a fence.
    #[default]
    Viewport,
    /// Replay fence lines from the document start up to each range.
    Document,
}

/// User-tunable preview rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    pub fence_scope: FenceScope,
    /// Bullet glyphs cycled by nesting depth.
    pub bullet_glyphs: Vec<String>,
    pub emphasis: Vec<EmphasisRule>,
}

impl PreviewOptions {
    pub const DEFAULT_GLYPHS: [&'static str; 3] = ["•", "◦", "▪"];

    /// Glyph for a bullet at `depth`.
    pub fn bullet_glyph(&self, depth: usize) -> &str {
        if self.bullet_glyphs.is_empty() {
            Self::DEFAULT_GLYPHS[depth % Self::DEFAULT_GLYPHS.len()]
        } else {
            &self.bullet_glyphs[depth % self.bullet_glyphs.len()]
        }
    }

    pub fn emphasis_scanner(&self) -> Result<EmphasisScanner, PreviewError> {
        EmphasisScanner::new(&self.emphasis)
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            fence_scope: FenceScope::default(),
            bullet_glyphs: Self::DEFAULT_GLYPHS.iter().map(|g| g.to_string()).collect(),
            emphasis: EmphasisRule::defaults(),
        }
    }
}
