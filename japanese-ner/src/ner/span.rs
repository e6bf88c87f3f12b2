//! Chunk-local to document-global offset translation.

use super::text::CharIndex;
use super::{Entity, EntityLabel};
use crate::model::RawPrediction;
use crate::{NerError, Result};

/// Translates window-local predictions into document coordinates.
///
/// Every mapped span is checked against the document: `start < end` and
/// `end <= len(document)`. Anything else means the chunker or the model
/// produced an inconsistent offset, and the mapper reports
/// [`NerError::InvalidSpan`] so the caller can drop that one prediction.
#[derive(Debug, Clone)]
pub struct SpanMapper<'a> {
    index: CharIndex<'a>,
}

impl<'a> SpanMapper<'a> {
    pub fn new(document: &'a str) -> Self {
        Self {
            index: CharIndex::new(document),
        }
    }

    /// Length of the document in characters.
    pub fn document_len(&self) -> usize {
        self.index.char_len()
    }

    /// Shift a chunk-local span by the chunk's document offset.
    pub fn map(&self, offset: usize, prediction: &RawPrediction) -> Result<(usize, usize)> {
        let len = self.index.char_len();
        let invalid = |start: usize, end: usize| NerError::InvalidSpan { start, end, len };

        let start = offset
            .checked_add(prediction.start)
            .ok_or_else(|| invalid(usize::MAX, usize::MAX))?;
        let end = offset
            .checked_add(prediction.end)
            .ok_or_else(|| invalid(start, usize::MAX))?;

        if start >= end || end > len {
            return Err(invalid(start, end));
        }
        Ok((start, end))
    }

    /// Map a prediction and build the entity, recovering `word` from the
    /// document so that it always equals `document[start..end]`.
    pub fn to_entity(&self, offset: usize, prediction: &RawPrediction, label: EntityLabel) -> Result<Entity> {
        let (start, end) = self.map(offset, prediction)?;
        let word = self.index.slice(start, end).ok_or(NerError::InvalidSpan {
            start,
            end,
            len: self.index.char_len(),
        })?;
        Ok(Entity::new(word, label, prediction.score, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "田中太郎は東京大学の教授です。";

    #[test]
    fn test_offset_zero_is_identity() {
        let mapper = SpanMapper::new(TEXT);
        let prediction = RawPrediction::new("PER", 0.98, 0, 4);
        assert_eq!(mapper.map(0, &prediction).unwrap(), (0, 4));
    }

    #[test]
    fn test_shifts_by_offset() {
        let mapper = SpanMapper::new(TEXT);
        let prediction = RawPrediction::new("LOC", 0.95, 0, 4);
        let entity = mapper.to_entity(5, &prediction, EntityLabel::Location).unwrap();
        assert_eq!((entity.start, entity.end), (5, 9));
        assert_eq!(entity.word, "東京大学");
        assert_eq!(entity.score, 0.95);
    }

    #[test]
    fn test_end_at_document_length_is_valid() {
        let mapper = SpanMapper::new(TEXT);
        let prediction = RawPrediction::new("PER", 0.5, 0, 1);
        assert_eq!(mapper.map(14, &prediction).unwrap(), (14, 15));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mapper = SpanMapper::new(TEXT);
        let prediction = RawPrediction::new("PER", 0.5, 3, 5);
        let err = mapper.map(12, &prediction).unwrap_err();
        assert!(matches!(
            err,
            NerError::InvalidSpan {
                start: 15,
                end: 17,
                len: 15
            }
        ));
    }

    #[test]
    fn test_rejects_empty_and_reversed_spans() {
        let mapper = SpanMapper::new(TEXT);
        assert!(mapper.map(0, &RawPrediction::new("PER", 0.5, 3, 3)).is_err());
        assert!(mapper.map(0, &RawPrediction::new("PER", 0.5, 4, 2)).is_err());
    }

    #[test]
    fn test_rejects_overflow() {
        let mapper = SpanMapper::new(TEXT);
        let prediction = RawPrediction::new("PER", 0.5, 1, usize::MAX);
        assert!(mapper.map(2, &prediction).is_err());
    }
}
