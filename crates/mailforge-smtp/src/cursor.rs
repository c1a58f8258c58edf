//! Pull-model cursor over an assembled message.
//!
//! The transport asks for one wire line at a time until the sequence is
//! exhausted. The cursor owns the lines and its own read position, so nothing
//! about an in-flight transfer lives outside the sending call.

/// Cursor over the ordered line sequence of an assembled message.
#[derive(Debug, Clone)]
pub struct LineCursor {
    lines: Vec<String>,
    position: usize,
}

impl LineCursor {
    /// Creates a cursor positioned at the first line.
    #[must_use]
    pub const fn new(lines: Vec<String>) -> Self {
        Self { lines, position: 0 }
    }

    /// Returns the next line and advances, or `None` once exhausted.
    pub fn next_line(&mut self) -> Option<&str> {
        let line = self.lines.get(self.position)?;
        self.position += 1;
        Some(line)
    }

    /// Number of lines not yet pulled.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.lines.len() - self.position
    }
}

impl From<Vec<String>> for LineCursor {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_pulls_lines_in_order() {
        let mut cursor = LineCursor::new(vec!["a\r\n".to_string(), "b\r\n".to_string()]);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.next_line(), Some("a\r\n"));
        assert_eq!(cursor.next_line(), Some("b\r\n"));
        assert_eq!(cursor.next_line(), None);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_empty_sequence() {
        let mut cursor = LineCursor::new(Vec::new());
        assert_eq!(cursor.next_line(), None);
        // Stays exhausted
        assert_eq!(cursor.next_line(), None);
    }
}
