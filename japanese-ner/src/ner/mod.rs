//! Named entity recognition over documents of any length.
//!
//! The pipeline for one text:
//!
//! 1. [`Analyzer`] decides between a single model call and chunked analysis
//! 2. [`Chunker`] cuts long text into overlapping windows
//! 3. each window goes through the model ([`crate::model::TokenClassifier`])
//! 4. [`SpanMapper`] moves window-local offsets into document coordinates
//! 5. [`EntityMerger`] collapses detections repeated across window overlaps
//!
//! All offsets are character (Unicode scalar value) positions, never bytes.

pub mod analyzer;
pub mod chunker;
pub mod label;
pub mod merger;
pub mod span;
pub mod text;
pub mod traits;
pub mod types;
pub mod validators;

pub use analyzer::{Analysis, AnalysisPlan, AnalysisStage, Analyzer, AnalyzerBuilder, ChunkFailure};
pub use chunker::{Chunker, Chunks};
pub use label::{EntityLabel, ParsedTag};
pub use merger::{EntityMerger, sort_reading_order};
pub use span::SpanMapper;
pub use text::CharIndex;
pub use traits::{EntityPostProcessor, EntityValidator};
pub use types::{Chunk, Entity};
pub use validators::{BlankWordValidator, ConfidenceValidator};
