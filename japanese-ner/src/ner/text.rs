//! Character offset handling.
//!
//! Entity offsets are counted in Unicode scalar values (what a reader counts and
//! what the model reports), while Rust slices by byte. [`CharIndex`] holds the
//! byte position of every character boundary so conversions are O(1).

/// Byte positions of every character boundary in a text.
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    text: &'a str,
    // boundaries[i] is the byte offset of char i; the last entry is text.len()
    boundaries: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    /// Build the index for `text`.
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// The indexed text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.char_len() == 0
    }

    /// Byte offset of the character boundary `char_pos`.
    pub fn byte_offset(&self, char_pos: usize) -> Option<usize> {
        self.boundaries.get(char_pos).copied()
    }

    /// Slice `[start, end)` in character coordinates.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        if start > end {
            return None;
        }
        let from = self.byte_offset(start)?;
        let to = self.byte_offset(end)?;
        Some(&self.text[from..to])
    }

    /// Character at `char_pos`.
    pub fn char_at(&self, char_pos: usize) -> Option<char> {
        self.slice(char_pos, char_pos + 1)
            .and_then(|s| s.chars().next())
    }
}
