//! Performance benchmarks for chunking, merging and the analysis pipeline
//!
//! Run with: cargo bench --bench chunking_benchmarks

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use japanese_ner::config::ChunkingConfig;
use japanese_ner::model::{CharCountEstimator, RawPrediction, TokenClassifier};
use japanese_ner::ner::{Analyzer, Chunker, Entity, EntityLabel, EntityMerger};
use std::sync::Arc;

const SENTENCE: &str = "田中太郎は東京大学で日本語処理の研究を続けている。";

fn document(sentences: usize) -> String {
    SENTENCE.repeat(sentences)
}

/// Reports every 田中太郎 without doing any real work
struct NameSpotter;

#[async_trait]
impl TokenClassifier for NameSpotter {
    async fn classify(&self, text: &str) -> japanese_ner::model::Result<Vec<RawPrediction>> {
        let sentence_len = SENTENCE.chars().count();
        let len = text.chars().count();
        Ok((0..len)
            .step_by(sentence_len)
            .filter(|start| start + 4 <= len)
            .map(|start| RawPrediction::new("PER", 0.9, start, start + 4))
            .collect())
    }

    fn name(&self) -> &str {
        "name_spotter"
    }
}

// =============================================================================
// Benchmark 1: Chunking
// =============================================================================

fn bench_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunking");
    let chunker = Chunker::new(Arc::new(CharCountEstimator::new()), ChunkingConfig::default());

    for sentences in [10, 100, 1000].iter() {
        let text = document(*sentences);
        group.bench_with_input(BenchmarkId::new("split", sentences), &text, |b, text| {
            b.iter(|| black_box(chunker.split(black_box(text))).len());
        });
    }

    group.finish();
}

// =============================================================================
// Benchmark 2: Merging
// =============================================================================

fn duplicated_entities(count: usize) -> Vec<Entity> {
    (0..count)
        .flat_map(|i| {
            let start = i * 10;
            [
                Entity::new("田中太郎", EntityLabel::Person, 0.9, start, start + 4),
                Entity::new("田中", EntityLabel::Person, 0.6, start, start + 2),
                Entity::new("田中太郎", EntityLabel::Person, 0.8, start, start + 4),
            ]
        })
        .collect()
}

fn bench_merging(c: &mut Criterion) {
    let mut group = c.benchmark_group("merging");
    let merger = EntityMerger::default();

    for count in [10, 100, 1000].iter() {
        let entities = duplicated_entities(*count);
        group.bench_with_input(BenchmarkId::new("merge", count), &entities, |b, entities| {
            b.iter(|| black_box(merger.merge(entities.clone())).len());
        });
    }

    group.finish();
}

// =============================================================================
// Benchmark 3: Full analysis
// =============================================================================

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let rt = tokio::runtime::Runtime::new().unwrap();
    let analyzer = Analyzer::builder()
        .classifier(Arc::new(NameSpotter))
        .build()
        .unwrap();

    for sentences in [10, 100, 1000].iter() {
        let text = document(*sentences);
        group.bench_with_input(BenchmarkId::new("analyze", sentences), &text, |b, text| {
            b.to_async(&rt).iter(|| async {
                analyzer.analyze(text).await.unwrap().len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunking, bench_merging, bench_analysis);
criterion_main!(benches);
