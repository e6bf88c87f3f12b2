//! Batch analysis over many documents.

mod executor;
mod types;

pub use executor::BatchAnalyzer;
pub use types::{BatchFailure, BatchOutcome, BatchProgress, Document, DocumentAnalysis};
