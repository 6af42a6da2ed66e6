//! Backing storage for piece text.
//!
//! A piece never owns characters. It names a range in one of two buffers:
//! the original text the table was created with, or the append buffer that
//! accumulates everything inserted since. Neither buffer ever moves or
//! drops a character, so a range handed out once stays valid for the life
//! of the table.

/// Which buffer a piece draws its characters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// The immutable text supplied at construction.
    Original,
    /// The append buffer.
    Additional,
}

/// Append-only storage for every character inserted during a session.
///
/// Grows monotonically. There is no compaction: a host that needs to bound
/// memory rebuilds the table from a rendered snapshot instead.
#[derive(Clone, Debug, Default)]
pub struct AppendBuffer {
    chars: Vec<char>,
}

impl AppendBuffer {
    /// Create an empty buffer.
    pub fn new() -> AppendBuffer {
        return AppendBuffer { chars: Vec::new() };
    }

    /// Append `text`, returning `(start, len)` of the range it now occupies.
    pub fn append(&mut self, text: &str) -> (usize, usize) {
        let start = self.chars.len();
        self.chars.extend(text.chars());
        return (start, self.chars.len() - start);
    }

    /// Number of characters appended so far.
    pub fn len(&self) -> usize {
        return self.chars.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.chars.is_empty();
    }

    /// Characters in `[start, start + len)`.
    ///
    /// Panics if the range was never handed out by [`AppendBuffer::append`].
    pub fn slice(&self, start: usize, len: usize) -> &[char] {
        return &self.chars[start..start + len];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_contiguous_ranges() {
        let mut buffer = AppendBuffer::new();
        assert_eq!(buffer.append("abc"), (0, 3));
        assert_eq!(buffer.append("de"), (3, 2));
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.slice(1, 3), &['b', 'c', 'd']);
    }

    #[test]
    fn append_counts_chars_not_bytes() {
        let mut buffer = AppendBuffer::new();
        assert_eq!(buffer.append("あいう"), (0, 3));
        assert_eq!(buffer.append("x"), (3, 1));
        assert_eq!(buffer.slice(2, 2), &['う', 'x']);
    }

    #[test]
    fn empty_append_is_a_zero_length_range() {
        let mut buffer = AppendBuffer::new();
        buffer.append("ab");
        assert_eq!(buffer.append(""), (2, 0));
        assert!(!buffer.is_empty());
    }

    #[test]
    fn earlier_ranges_survive_growth() {
        let mut buffer = AppendBuffer::new();
        let (start, len) = buffer.append("hello");
        for _ in 0..1000 {
            buffer.append("filler");
        }
        assert_eq!(buffer.slice(start, len).iter().collect::<String>(), "hello");
    }
}
