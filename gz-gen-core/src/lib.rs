//! Compression-ranked next-word prediction library.
//!
//! This crate ranks the words of a training vocabulary as continuations of a
//! partial sentence, using gzip as a stand-in language model:
//! - Corpus loading, parenthetical stripping and vocabulary building
//! - Pluggable word-boundary tokenization
//! - Full-vocabulary scoring by compressed size, optionally in parallel
//! - A session cache for repeated prompts
//!
//! The word whose addition yields the smallest compressed text is the most
//! probable continuation under the compressor's implicit model.

/// Corpus, scorer and ranking types.
///
/// This module exposes the high-level scoring interface.
pub mod model;

/// Text cleaning and tokenization.
pub mod text;

/// Error types returned by loading, configuration and scoring.
pub mod error;

/// Training file reading.
///
/// Not exposed
pub(crate) mod io;

pub use error::{ConfigError, CorpusError, ScoringError};
pub use model::cache::RankingCache;
pub use model::corpus::Corpus;
pub use model::scorer::{Ranking, ScoredCandidate, Scorer};
pub use model::scoring_input::{ContextMode, ScoringInput};
pub use text::tokenizer::{Tokenizer, WordTokenizer};
