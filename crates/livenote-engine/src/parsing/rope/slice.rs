use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
///
/// This allocates; prefer working with spans where possible.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    let sp = sp.clamp_to(rope.len());
    rope.slice_to_cow(sp.start..sp.end).into_owned()
}

/// Shortens `s` to at most `max` bytes on a char boundary, appending "...".
///
/// Used for human-readable decoration dumps.
pub fn preview(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("hello world", 5), "hello...");
        assert_eq!(preview("hello", 0), "...");
    }

    #[test]
    fn preview_backs_off_to_char_boundary() {
        // "é" is two bytes; cutting at 2 would split it
        assert_eq!(preview("aé b", 2), "a...");
    }

    #[test]
    fn slice_to_string_partial_span() {
        let rope = Rope::from("hello world");
        assert_eq!(slice_to_string(&rope, Span::new(6, 11)), "world");
    }
}
