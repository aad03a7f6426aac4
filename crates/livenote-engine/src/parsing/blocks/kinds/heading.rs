use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+").expect("valid heading regex"));

/// ATX heading: 1-6 `#` followed by at least one space.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    /// Returns `(level, content_start)` for a heading line.
    pub fn parse(line: &str) -> Option<(u8, usize)> {
        let caps = HEADING.captures(line)?;
        let level = caps.get(1)?.len() as u8;
        Some((level, caps.get(0)?.end()))
    }

    /// Whole-line attribute class, keyed by level.
    pub fn line_class(level: u8) -> String {
        format!("cm-heading-{level}")
    }

    pub fn content_class(level: u8) -> String {
        format!("cm-heading-content-{level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", Some((1, 2)))]
    #[case("###   Spaced", Some((3, 6)))]
    #[case("###### six", Some((6, 7)))]
    #[case("####### seven", None)]
    #[case("#nospace", None)]
    #[case(" # indented", None)]
    #[case("# ", Some((1, 2)))]
    fn heading_cases(#[case] line: &str, #[case] expected: Option<(u8, usize)>) {
        assert_eq!(Heading::parse(line), expected);
    }
}
