//! Per-entity validators applied to the merged entity list.

use super::Entity;
use super::traits::EntityValidator;

/// Drops entities scored below a threshold
#[derive(Debug, Clone)]
pub struct ConfidenceValidator {
    threshold: f64,
    name: String,
}

impl ConfidenceValidator {
    /// Create a new confidence validator with the given threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            name: format!("confidence_validator_{:.2}", threshold),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl EntityValidator for ConfidenceValidator {
    fn validate(&self, entity: &Entity, _text: &str) -> bool {
        entity.score >= self.threshold
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Drops entities whose surface form is only whitespace.
///
/// Aggregating tokenizers occasionally emit a span over a lone separator.
#[derive(Debug, Clone, Default)]
pub struct BlankWordValidator;

impl EntityValidator for BlankWordValidator {
    fn validate(&self, entity: &Entity, _text: &str) -> bool {
        !entity.word.trim().is_empty()
    }

    fn name(&self) -> &str {
        "blank_word_validator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::EntityLabel;

    #[test]
    fn test_confidence_threshold() {
        let validator = ConfidenceValidator::new(0.5);
        let high = Entity::new("東京", EntityLabel::Location, 0.5, 0, 2);
        let low = Entity::new("東京", EntityLabel::Location, 0.49, 0, 2);
        assert!(validator.validate(&high, "東京"));
        assert!(!validator.validate(&low, "東京"));
        assert_eq!(validator.name(), "confidence_validator_0.50");
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(ConfidenceValidator::new(1.5).threshold(), 1.0);
        assert_eq!(ConfidenceValidator::new(-1.0).threshold(), 0.0);
    }

    #[test]
    fn test_blank_words() {
        let validator = BlankWordValidator;
        let blank = Entity::new("　", EntityLabel::Person, 0.9, 0, 1);
        let word = Entity::new("田中", EntityLabel::Person, 0.9, 0, 2);
        assert!(!validator.validate(&blank, "　"));
        assert!(validator.validate(&word, "田中"));
    }
}
