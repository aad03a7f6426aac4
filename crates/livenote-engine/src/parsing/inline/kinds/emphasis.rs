use serde::{Deserialize, Serialize};

use crate::parsing::ConstructKind;

/// Visual style of a symmetric delimiter pair such as `**bold**`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisStyle {
    Bold,
    Italic,
    Strikethrough,
}

impl EmphasisStyle {
    pub fn class(self) -> &'static str {
        match self {
            EmphasisStyle::Bold => "cm-bold",
            EmphasisStyle::Italic => "cm-italic",
            EmphasisStyle::Strikethrough => "cm-strikethrough",
        }
    }

    pub fn kind(self) -> ConstructKind {
        match self {
            EmphasisStyle::Bold => ConstructKind::BoldSpan,
            EmphasisStyle::Italic => ConstructKind::ItalicSpan,
            EmphasisStyle::Strikethrough => ConstructKind::StrikethroughSpan,
        }
    }
}

/// One configured emphasis rule: a delimiter and the style it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisRule {
    pub delimiter: String,
    pub style: EmphasisStyle,
}

impl EmphasisRule {
    pub fn new(delimiter: impl Into<String>, style: EmphasisStyle) -> Self {
        Self {
            delimiter: delimiter.into(),
            style,
        }
    }

    /// `**bold**`, `_italic_` and `--strikethrough--`.
    pub fn defaults() -> Vec<EmphasisRule> {
        vec![
            EmphasisRule::new("**", EmphasisStyle::Bold),
            EmphasisRule::new("_", EmphasisStyle::Italic),
            EmphasisRule::new("--", EmphasisStyle::Strikethrough),
        ]
    }
}
