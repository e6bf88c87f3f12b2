//! Aggregate statistics over analyzed documents.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::batch::DocumentAnalysis;
use crate::ner::EntityLabel;

/// How many of the most frequent words are reported
pub const TOP_WORDS: usize = 10;

/// Per-document summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStats {
    pub filename: String,
    pub entity_count: usize,
    /// Distinct labels among the document's entities
    pub unique_labels: usize,
    /// Text length in characters
    pub text_length: usize,
}

/// Statistics over a set of analyzed documents
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_documents: usize,
    pub total_entities: usize,
    pub label_counts: BTreeMap<EntityLabel, usize>,
    pub word_counts: BTreeMap<String, usize>,
    pub documents: Vec<DocumentStats>,
    pub avg_entities_per_doc: f64,
    /// Most frequent entity words, count descending then word ascending
    pub most_common: Vec<(String, usize)>,
    /// Share of each label among all entities, in percent
    pub label_distribution: BTreeMap<EntityLabel, f64>,
}

impl Statistics {
    /// Labels ordered by count descending, then by label
    pub fn labels_by_count(&self) -> Vec<(EntityLabel, usize)> {
        let mut labels: Vec<_> = self.label_counts.iter().map(|(l, c)| (*l, *c)).collect();
        labels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        labels
    }
}

/// Calculate statistics from analysis results
pub fn calculate_statistics(results: &[DocumentAnalysis]) -> Statistics {
    let mut label_counts: BTreeMap<EntityLabel, usize> = BTreeMap::new();
    let mut word_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut documents = Vec::with_capacity(results.len());

    for result in results {
        let mut labels = BTreeSet::new();
        for entity in &result.entities {
            *label_counts.entry(entity.label).or_default() += 1;
            *word_counts.entry(entity.word.clone()).or_default() += 1;
            labels.insert(entity.label);
        }

        documents.push(DocumentStats {
            filename: result.filename.clone(),
            entity_count: result.entity_count,
            unique_labels: labels.len(),
            text_length: result.content.chars().count(),
        });
    }

    let total_documents = results.len();
    let total_entities: usize = results.iter().map(|r| r.entity_count).sum();
    let avg_entities_per_doc = if total_documents > 0 {
        total_entities as f64 / total_documents as f64
    } else {
        0.0
    };

    let mut most_common: Vec<(String, usize)> =
        word_counts.iter().map(|(w, c)| (w.clone(), *c)).collect();
    most_common.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    most_common.truncate(TOP_WORDS);

    let labelled: usize = label_counts.values().sum();
    let label_distribution = if labelled > 0 {
        label_counts
            .iter()
            .map(|(label, count)| (*label, *count as f64 / labelled as f64 * 100.0))
            .collect()
    } else {
        BTreeMap::new()
    };

    Statistics {
        total_documents,
        total_entities,
        label_counts,
        word_counts,
        documents,
        avg_entities_per_doc,
        most_common,
        label_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::Entity;
    use crate::report::test_support::analysis;

    #[test]
    fn test_statistics() {
        let results = vec![
            analysis(
                "a.txt",
                "田中太郎は東京大学の教授です。",
                vec![
                    Entity::new("田中太郎", EntityLabel::Person, 0.98, 0, 4),
                    Entity::new("東京大学", EntityLabel::Institution, 0.95, 5, 9),
                ],
            ),
            analysis(
                "b.txt",
                "田中太郎が大阪へ。",
                vec![
                    Entity::new("田中太郎", EntityLabel::Person, 0.9, 0, 4),
                    Entity::new("大阪", EntityLabel::Location, 0.9, 5, 7),
                ],
            ),
            analysis("c.txt", "なし", vec![]),
        ];

        let stats = calculate_statistics(&results);
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.total_entities, 4);
        assert_eq!(stats.label_counts[&EntityLabel::Person], 2);
        assert!((stats.avg_entities_per_doc - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.most_common[0], ("田中太郎".to_string(), 2));
        assert_eq!(stats.most_common[1], ("大阪".to_string(), 1));
        assert_eq!(stats.label_distribution[&EntityLabel::Person], 50.0);
        assert_eq!(stats.labels_by_count()[0], (EntityLabel::Person, 2));

        assert_eq!(
            stats.documents[0],
            DocumentStats {
                filename: "a.txt".to_string(),
                entity_count: 2,
                unique_labels: 2,
                text_length: 15,
            }
        );
        assert_eq!(stats.documents[2].unique_labels, 0);
    }

    #[test]
    fn test_top_words_are_capped() {
        let entities = (0..15)
            .map(|i| Entity::new(format!("語{:02}", i), EntityLabel::Product, 0.5, i, i + 1))
            .collect();
        let stats = calculate_statistics(&[analysis("a.txt", &"x".repeat(20), entities)]);
        assert_eq!(stats.most_common.len(), TOP_WORDS);
        assert_eq!(stats.most_common[0].0, "語00");
    }

    #[test]
    fn test_empty_results() {
        let stats = calculate_statistics(&[]);
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.avg_entities_per_doc, 0.0);
        assert!(stats.label_distribution.is_empty());
        assert!(stats.most_common.is_empty());
    }
}
