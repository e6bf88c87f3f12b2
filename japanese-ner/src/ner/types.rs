//! Entity and chunk structures.

use serde::{Deserialize, Serialize};

use super::EntityLabel;

/// A named-entity mention in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The exact substring `text[start..end]` (character offsets)
    pub word: String,
    /// The entity label
    pub label: EntityLabel,
    /// Model confidence (0.0 to 1.0)
    pub score: f64,
    /// Starting character position in the original text
    pub start: usize,
    /// Ending character position (exclusive) in the original text
    pub end: usize,
}

impl Entity {
    /// Create a new entity.
    pub fn new(word: impl Into<String>, label: EntityLabel, score: f64, start: usize, end: usize) -> Self {
        Self {
            word: word.into(),
            label,
            score,
            start,
            end,
        }
    }

    /// Span length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of characters shared with `other`'s span.
    pub fn overlap_len(&self, other: &Entity) -> usize {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }

    /// Get a formatted string representation of the entity.
    pub fn format(&self) -> String {
        format!(
            "{} [{}] ({}..{}, score: {:.2})",
            self.word, self.label, self.start, self.end, self.score
        )
    }
}

/// A window of a document sent to the model in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Position of this chunk in the sequence
    pub index: usize,
    /// The window text
    pub text: &'a str,
    /// Document character position where the window begins
    pub offset: usize,
    /// Document character position where the window ends (exclusive)
    pub end: usize,
}

impl Chunk<'_> {
    /// Window length in characters.
    pub fn char_len(&self) -> usize {
        self.end - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_len() {
        let a = Entity::new("東京大学", EntityLabel::Organization, 0.9, 10, 16);
        let b = Entity::new("東京大", EntityLabel::Organization, 0.8, 10, 13);
        let c = Entity::new("教授", EntityLabel::Person, 0.7, 16, 18);

        assert_eq!(a.overlap_len(&b), 3);
        assert_eq!(b.overlap_len(&a), 3);
        assert_eq!(a.overlap_len(&c), 0);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn test_format() {
        let entity = Entity::new("田中太郎", EntityLabel::Person, 0.98, 0, 4);
        assert_eq!(entity.format(), "田中太郎 [person] (0..4, score: 0.98)");
    }
}
