use regex::Regex;

use crate::{parsing::ConstructMatch, preview::PreviewError};

use super::kinds::{EmphasisRule, EmphasisStyle};

struct CompiledRule {
    style: EmphasisStyle,
    delim_len: usize,
    re: Regex,
}

/// Scans lines for the configured symmetric delimiter pairs.
///
/// Each rule compiles to `<delim>(\S(?:[^\n]*?\S)?)<delim>`: the content starts
/// and ends with non-whitespace and is matched lazily, so `**a** **b**` gives two
/// spans. Matches of one rule never overlap each other; different rules may.
pub struct EmphasisScanner {
    rules: Vec<CompiledRule>,
}

impl EmphasisScanner {
    pub fn new(rules: &[EmphasisRule]) -> Result<Self, PreviewError> {
        let rules = rules
            .iter()
            .map(|rule| {
                if rule.delimiter.is_empty() {
                    return Err(PreviewError::EmptyDelimiter { style: rule.style });
                }
                let d = regex::escape(&rule.delimiter);
                let re = Regex::new(&format!(r"{d}(\S(?:[^\n]*?\S)?){d}"))?;
                Ok(CompiledRule {
                    style: rule.style,
                    delim_len: rule.delimiter.len(),
                    re,
                })
            })
            .collect::<Result<Vec<_>, PreviewError>>()?;
        Ok(Self { rules })
    }

    /// All matches of every rule, grouped by rule in configuration order.
    pub fn scan(&self, base: usize, s: &str) -> Vec<ConstructMatch> {
        let mut out = vec![];
        for rule in &self.rules {
            for caps in rule.re.captures_iter(s) {
                let (Some(full), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                debug_assert_eq!(inner.start(), full.start() + rule.delim_len);
                out.push(ConstructMatch {
                    kind: rule.style.kind(),
                    from: base + full.start(),
                    to: base + full.end(),
                    content_from: base + inner.start(),
                    content_to: base + inner.end(),
                });
            }
        }
        out
    }
}

impl Default for EmphasisScanner {
    fn default() -> Self {
        Self::new(&EmphasisRule::defaults()).expect("default emphasis rules are valid")
    }
}
