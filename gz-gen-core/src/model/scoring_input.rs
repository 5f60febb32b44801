use crate::error::ConfigError;

/// Which text is compressed in front of each candidate word.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ContextMode {
	/// Corpus tokens, then prompt tokens, then the candidate.
	#[default]
	Full,
	/// Prompt tokens, then the candidate. Much cheaper, but the corpus only
	/// contributes the vocabulary.
	PromptOnly,
}

/// Parameters for a `Scorer`.
///
/// # Invariants
/// - `compression_level` is in `0..=9`
/// - `threads` is at most `MAX_THREADS`; `0` means one per CPU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringInput {
	/// Gzip level. Defaults to 9, the level of a stock `gzip.compress` call.
	compression_level: u32,

	/// Worker threads for one scoring pass.
	threads: usize,

	/// What goes in front of each candidate.
	pub context_mode: ContextMode,
}

impl ScoringInput {
	pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;
	pub const MAX_THREADS: usize = 1024;

	/// Returns the configured gzip level.
	pub fn compression_level(&self) -> u32 {
		self.compression_level
	}

	/// Sets the gzip level (0..=9).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_compression_level(&mut self, level: u32) -> Result<(), ConfigError> {
		if level > 9 {
			return Err(ConfigError::CompressionLevel(level));
		}
		self.compression_level = level;
		Ok(())
	}

	/// Returns the configured thread count (`0` = one per CPU).
	pub fn threads(&self) -> usize {
		self.threads
	}

	/// Sets the number of scoring threads. `0` selects one per CPU,
	/// `1` scores on the calling thread.
	///
	/// # Errors
	/// Returns an error above `MAX_THREADS`.
	pub fn set_threads(&mut self, threads: usize) -> Result<(), ConfigError> {
		if threads > Self::MAX_THREADS {
			return Err(ConfigError::Threads { got: threads, max: Self::MAX_THREADS });
		}
		self.threads = threads;
		Ok(())
	}

	/// Thread count actually used for `candidates` words: never more
	/// workers than words, never zero.
	pub(crate) fn effective_threads(&self, candidates: usize) -> usize {
		let wanted = if self.threads == 0 { num_cpus::get() } else { self.threads };
		wanted.min(candidates).max(1)
	}
}

impl Default for ScoringInput {
	fn default() -> Self {
		Self {
			compression_level: Self::DEFAULT_COMPRESSION_LEVEL,
			threads: 0,
			context_mode: ContextMode::Full,
		}
	}
}
