//! Entity merger for detections repeated across chunk overlaps.

use std::cmp::Ordering;

use super::Entity;
use super::traits::EntityPostProcessor;
use crate::config::MergeConfig;

/// Collapses duplicate detections of the same mention.
///
/// Two entities are duplicates when they carry the same label and their spans
/// share more than `overlap_threshold` of the shorter span's length. Among
/// duplicates the longer span wins, then the higher score. The kept entity is
/// never altered, so its score is the model's own score for that span.
///
/// Candidates are visited in priority order and each one is kept only if it
/// duplicates nothing already kept. The surviving set is therefore pairwise
/// distinct, and merging it again changes nothing.
#[derive(Debug, Clone)]
pub struct EntityMerger {
    overlap_threshold: f64,
    name: String,
}

impl EntityMerger {
    /// Create a merger with the given overlap threshold (clamped to `[0, 1)`)
    pub fn new(overlap_threshold: f64) -> Self {
        let overlap_threshold = if overlap_threshold.is_finite() {
            overlap_threshold.clamp(0.0, 0.999)
        } else {
            MergeConfig::default().overlap_threshold
        };
        Self {
            overlap_threshold,
            name: "entity_merger".to_string(),
        }
    }

    pub fn from_config(config: &MergeConfig) -> Self {
        Self::new(config.overlap_threshold)
    }

    pub fn overlap_threshold(&self) -> f64 {
        self.overlap_threshold
    }

    /// Whether `a` and `b` describe the same mention
    pub fn is_duplicate(&self, a: &Entity, b: &Entity) -> bool {
        if a.label != b.label {
            return false;
        }
        let shorter = a.len().min(b.len());
        let overlap = a.overlap_len(b);
        overlap > 0 && overlap as f64 > self.overlap_threshold * shorter as f64
    }

    /// Merge duplicates and return the survivors in reading order.
    pub fn merge(&self, mut entities: Vec<Entity>) -> Vec<Entity> {
        entities.sort_by(priority);

        let mut kept: Vec<Entity> = Vec::with_capacity(entities.len());
        for candidate in entities {
            if !kept.iter().any(|existing| self.is_duplicate(existing, &candidate)) {
                kept.push(candidate);
            }
        }

        sort_reading_order(&mut kept);
        kept
    }
}

impl Default for EntityMerger {
    fn default() -> Self {
        Self::from_config(&MergeConfig::default())
    }
}

impl EntityPostProcessor for EntityMerger {
    fn process(&self, entities: Vec<Entity>) -> Vec<Entity> {
        self.merge(entities)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Longest first, then highest score, then earliest.
fn priority(a: &Entity, b: &Entity) -> Ordering {
    b.len()
        .cmp(&a.len())
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.end.cmp(&b.end))
        .then_with(|| a.label.cmp(&b.label))
}

/// Sort by `start`, then `end`, then label, then score descending.
pub fn sort_reading_order(entities: &mut [Entity]) {
    entities.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| b.score.total_cmp(&a.score))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::EntityLabel;

    fn org(start: usize, end: usize, score: f64) -> Entity {
        Entity::new("x".repeat(end - start), EntityLabel::Organization, score, start, end)
    }

    #[test]
    fn test_keeps_full_span_over_truncated() {
        let merger = EntityMerger::default();
        let merged = merger.merge(vec![org(10, 13, 0.99), org(10, 16, 0.80)]);
        assert_eq!(merged, vec![org(10, 16, 0.80)]);
    }

    #[test]
    fn test_equal_length_prefers_higher_score_without_averaging() {
        let merger = EntityMerger::default();
        let merged = merger.merge(vec![org(4, 8, 0.70), org(4, 8, 0.90)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].score, 0.90);
    }

    #[test]
    fn test_different_labels_are_not_merged() {
        let merger = EntityMerger::default();
        let location = Entity::new("東京", EntityLabel::Location, 0.9, 0, 2);
        let person = Entity::new("東京", EntityLabel::Person, 0.8, 0, 2);
        let merged = merger.merge(vec![person.clone(), location.clone()]);
        assert_eq!(merged, vec![person, location]);
    }

    #[test]
    fn test_small_overlap_below_threshold_is_kept() {
        let merger = EntityMerger::new(0.5);
        // shares 1 of 4 characters
        let merged = merger.merge(vec![org(0, 4, 0.9), org(3, 7, 0.9)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_adjacent_spans_are_distinct() {
        let merger = EntityMerger::new(0.0);
        let merged = merger.merge(vec![org(0, 4, 0.9), org(4, 8, 0.9)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_output_is_sorted() {
        let merger = EntityMerger::default();
        let merged = merger.merge(vec![org(20, 22, 0.5), org(0, 3, 0.5), org(0, 2, 0.4).with_label(EntityLabel::Event)]);
        let spans: Vec<_> = merged.iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(spans, vec![(0, 2), (0, 3), (20, 22)]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let merger = EntityMerger::new(0.3);
        let entities = vec![
            org(0, 5, 0.6),
            org(3, 9, 0.7),
            org(7, 12, 0.8),
            org(7, 12, 0.95),
            org(30, 33, 0.5),
            org(31, 33, 0.9),
            Entity::new("abc", EntityLabel::Person, 0.4, 3, 6),
        ];
        let once = merger.merge(entities);
        let twice = merger.merge(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_and_single() {
        let merger = EntityMerger::default();
        assert!(merger.merge(vec![]).is_empty());
        assert_eq!(merger.merge(vec![org(1, 2, 0.1)]), vec![org(1, 2, 0.1)]);
    }

    impl Entity {
        fn with_label(mut self, label: EntityLabel) -> Self {
            self.label = label;
            self
        }
    }
}
