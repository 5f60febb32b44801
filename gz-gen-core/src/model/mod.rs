//! Top-level module for compression-ranked prediction.
//!
//! This module provides:
//! - The cleaned, tokenized training corpus and its vocabulary (`Corpus`)
//! - Scoring configuration (`ScoringInput`)
//! - The full-vocabulary compression scorer (`Scorer`, `Ranking`)
//! - A session cache for rankings (`RankingCache`)

/// Training corpus loading and vocabulary building.
pub mod corpus;

/// Compression scorer and ranking types.
///
/// Ranks every vocabulary word by the gzip size of
/// corpus + prompt + word.
pub mod scorer;

/// Scoring configuration: compression level, worker threads and context
/// mode, with validated setters.
pub mod scoring_input;

/// Bounded per-session cache of rankings keyed by prompt tokens.
pub mod cache;
