//! Overlapping window chunker.
//!
//! A document whose estimated token count exceeds the model's effective limit
//! (`max_input_tokens - special_tokens_reserve`) is cut into windows of about
//! `chunk_tokens`. Consecutive windows share `overlap_ratio` of the window
//! length, and never less than `max_mention_chars`, so a mention cut by one
//! window's end reappears whole at the head of the next window.

use std::sync::Arc;

use super::text::CharIndex;
use super::types::Chunk;
use crate::config::ChunkingConfig;
use crate::model::TokenEstimator;

/// Characters after which a window may end early.
const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '!', '?', '\n'];

/// Splits text into overlapping windows that fit the model input
#[derive(Clone)]
pub struct Chunker {
    estimator: Arc<dyn TokenEstimator>,
    config: ChunkingConfig,
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("estimator", &self.estimator.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Chunker {
    /// Create a new chunker
    pub fn new(estimator: Arc<dyn TokenEstimator>, config: ChunkingConfig) -> Self {
        Self { estimator, config }
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Token budget left for text once special tokens are accounted for.
    pub fn effective_limit(&self) -> usize {
        self.config
            .max_input_tokens
            .saturating_sub(self.config.special_tokens_reserve)
            .max(1)
    }

    /// Estimated token count of `text`.
    pub fn estimate(&self, text: &str) -> usize {
        self.estimator.estimate_token_count(text)
    }

    /// Whether `text` is too long for a single model call.
    pub fn needs_chunking(&self, text: &str) -> bool {
        self.estimate(text) > self.effective_limit()
    }

    /// Iterate over the windows of `text`.
    ///
    /// Text that fits in one call yields a single chunk covering all of it.
    /// Empty text yields nothing. The iterator is `Clone`, so a sequence can be
    /// restarted from any point.
    pub fn chunks<'a>(&self, text: &'a str) -> Chunks<'a> {
        let single = !self.needs_chunking(text);
        let index = CharIndex::new(text);
        let next_start = if index.is_empty() { None } else { Some(0) };
        Chunks {
            index,
            estimator: Arc::clone(&self.estimator),
            config: self.config.clone(),
            limit: self.effective_limit(),
            single,
            next_start,
            next_index: 0,
        }
    }

    /// Collect every window of `text`.
    pub fn split<'a>(&self, text: &'a str) -> Vec<Chunk<'a>> {
        self.chunks(text).collect()
    }
}

/// Iterator over the windows of one text
#[derive(Clone)]
pub struct Chunks<'a> {
    index: CharIndex<'a>,
    estimator: Arc<dyn TokenEstimator>,
    config: ChunkingConfig,
    limit: usize,
    single: bool,
    next_start: Option<usize>,
    next_index: usize,
}

impl<'a> Chunks<'a> {
    fn fits(&self, start: usize, end: usize) -> bool {
        match self.index.slice(start, end) {
            Some(window) => self.estimator.estimate_token_count(window) <= self.limit,
            None => false,
        }
    }

    /// Overlap for a window of `len` characters; always leaves progress.
    fn overlap_for(&self, len: usize) -> usize {
        let by_ratio = (len as f64 * self.config.overlap_ratio).ceil() as usize;
        by_ratio
            .max(self.config.max_mention_chars)
            .min(len.saturating_sub(1))
    }

    /// Move `end` back to just after the last sentence terminator in the
    /// window's tail, if one exists far enough from `start`.
    fn snap_to_sentence(&self, start: usize, end: usize) -> usize {
        let len = end - start;
        let floor = start + (len / 2).max(2 * self.overlap_for(len));
        (floor..end)
            .rev()
            .find(|&pos| {
                self.index
                    .char_at(pos)
                    .is_some_and(|c| SENTENCE_TERMINATORS.contains(&c))
            })
            .map(|pos| pos + 1)
            .unwrap_or(end)
    }

    fn make_chunk(&mut self, start: usize, end: usize) -> Option<Chunk<'a>> {
        let text = self.index.slice(start, end)?;
        let chunk = Chunk {
            index: self.next_index,
            text,
            offset: start,
            end,
        };
        self.next_index += 1;
        Some(chunk)
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start.take()?;
        let total = self.index.char_len();

        if self.single {
            return self.make_chunk(0, total);
        }

        let mut end = (start + self.config.chunk_tokens.max(1)).min(total);
        while end - start > 1 && !self.fits(start, end) {
            let shrunk = ((end - start) * 3 / 4).max(1);
            end = start + shrunk;
        }

        if end < total && self.config.prefer_sentence_boundaries {
            end = self.snap_to_sentence(start, end);
        }

        if end < total {
            let overlap = self.overlap_for(end - start);
            self.next_start = Some(end - overlap);
        }

        self.make_chunk(start, end)
    }
}
