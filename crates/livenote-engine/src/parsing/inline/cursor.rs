/// A byte cursor over one line of text.
///
/// Tracks the absolute document offset of its position via `base`, so scanners
/// can work on line-local strings and still report document offsets.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being scanned.
    pub s: &'a str,
    /// Document offset of `s[0]`.
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte just before the cursor, if any.
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|j| self.s.as_bytes().get(j).copied())
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes. May step past the end; `eof` then holds.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Local text between two local indices.
    pub fn text(&self, from: usize, to: usize) -> &'a str {
        &self.s[from..to]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("$x$", 10);
        assert_eq!(cur.pos(), 10);
        assert_eq!(cur.prev(), None);
        assert_eq!(cur.bump(), Some(b'$'));
        assert_eq!(cur.prev(), Some(b'$'));
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("$$", 0);
        assert!(cur.starts_with(b"$$"));
        cur.bump_n(5);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"$"));
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.pos(), 1);
    }
}
