use std::io::Write;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use super::corpus::Corpus;
use super::scoring_input::{ContextMode, ScoringInput};
use crate::error::ScoringError;
use crate::text::tokenizer::Tokenizer;

/// One vocabulary word and the gzip size of the text it completes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoredCandidate {
	pub word: String,
	pub compressed_size: usize,
}

/// Every vocabulary word, ascending by compressed size.
///
/// # Invariants
/// - Sorted by `compressed_size`, ties by `word`
/// - Holds exactly one entry per vocabulary word of the scorer that built it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranking {
	candidates: Vec<ScoredCandidate>,
}

impl Ranking {
	fn from_unsorted(mut candidates: Vec<ScoredCandidate>) -> Self {
		candidates.sort_by(|a, b| {
			a.compressed_size
				.cmp(&b.compressed_size)
				.then_with(|| a.word.cmp(&b.word))
		});
		Self { candidates }
	}

	/// The most probable continuation, if the vocabulary is not empty.
	pub fn best(&self) -> Option<&ScoredCandidate> {
		self.candidates.first()
	}

	/// The first `k` entries (fewer if the ranking is shorter).
	pub fn top(&self, k: usize) -> &[ScoredCandidate] {
		&self.candidates[..k.min(self.candidates.len())]
	}

	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate> {
		self.candidates.iter()
	}

	pub fn into_vec(self) -> Vec<ScoredCandidate> {
		self.candidates
	}
}

impl<'a> IntoIterator for &'a Ranking {
	type Item = &'a ScoredCandidate;
	type IntoIter = std::slice::Iter<'a, ScoredCandidate>;

	fn into_iter(self) -> Self::IntoIter {
		self.candidates.iter()
	}
}

/// Ranks vocabulary words as continuations of a prompt.
///
/// Holds the corpus, the tokenizer and the configuration fixed at startup.
/// `score` only reads them, so a `Scorer` can be shared freely and a given
/// prompt always produces the same ranking.
///
/// For each word `w`, the scored text is the single-space join of the corpus
/// tokens, the prompt tokens and `w`. Its gzip size is the score: the
/// smaller, the more predictable `w` is after what came before.
pub struct Scorer {
	corpus: Corpus,
	/// Corpus tokens joined once; every candidate text starts with it.
	corpus_text: String,
	tokenizer: Arc<dyn Tokenizer + Send + Sync>,
	input: ScoringInput,
}

impl Scorer {
	pub fn new<T>(corpus: Corpus, tokenizer: T, input: ScoringInput) -> Self
	where
		T: Tokenizer + Send + Sync + 'static,
	{
		Self::with_shared_tokenizer(corpus, Arc::new(tokenizer), input)
	}

	/// Same as `new`, for a tokenizer that is also used elsewhere.
	pub fn with_shared_tokenizer(
		corpus: Corpus,
		tokenizer: Arc<dyn Tokenizer + Send + Sync>,
		input: ScoringInput,
	) -> Self {
		let corpus_text = corpus.tokens().join(" ");
		Self { corpus, corpus_text, tokenizer, input }
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	pub fn input(&self) -> &ScoringInput {
		&self.input
	}

	/// Splits a prompt the same way the corpus was split.
	pub fn tokenize_prompt(&self, prompt: &str) -> Vec<String> {
		self.tokenizer.tokenize(prompt)
	}

	/// Ranks the whole vocabulary as continuations of `prompt`.
	///
	/// An empty prompt is valid: words are then ranked as continuations of
	/// the corpus alone.
	///
	/// # Errors
	/// `ScoringError` if compressing any candidate fails; no partial
	/// ranking is returned.
	pub fn score(&self, prompt: &str) -> Result<Ranking, ScoringError> {
		self.score_tokens(&self.tokenize_prompt(prompt))
	}

	/// The single best continuation of `prompt`.
	pub fn best(&self, prompt: &str) -> Result<Option<ScoredCandidate>, ScoringError> {
		Ok(self.score(prompt)?.into_vec().into_iter().next())
	}

	/// Ranks the vocabulary after an already tokenized prompt.
	pub fn score_tokens(&self, prompt_tokens: &[String]) -> Result<Ranking, ScoringError> {
		let started = Instant::now();
		let prefix = self.context(prompt_tokens);
		let words: Vec<&String> = self.corpus.vocabulary().iter().collect();
		let threads = self.input.effective_threads(words.len());
		let level = self.input.compression_level();

		let candidates = if threads <= 1 {
			score_words(&prefix, &words, level)?
		} else {
			score_words_parallel(&prefix, &words, level, threads)?
		};

		log::debug!(
			"scored {} candidates after {} prompt tokens on {} thread(s) in {:.2?}",
			candidates.len(),
			prompt_tokens.len(),
			threads,
			started.elapsed()
		);
		Ok(Ranking::from_unsorted(candidates))
	}

	/// Text placed before every candidate: each preceding token followed by
	/// one space. Empty tokens still get their separator.
	fn context(&self, prompt_tokens: &[String]) -> String {
		let mut context = match self.input.context_mode {
			ContextMode::Full if !self.corpus.is_empty() => {
				let mut text = String::with_capacity(self.corpus_text.len() + 1);
				text.push_str(&self.corpus_text);
				text.push(' ');
				text
			}
			_ => String::new(),
		};
		for token in prompt_tokens {
			context.push_str(token);
			context.push(' ');
		}
		context
	}
}

/// Gzip size of `text` at `level`.
pub(crate) fn compressed_size(text: &[u8], level: u32) -> std::io::Result<usize> {
	let mut encoder = GzEncoder::new(Vec::with_capacity(text.len() / 2 + 64), Compression::new(level));
	encoder.write_all(text)?;
	Ok(encoder.finish()?.len())
}

/// Scores `words` one after the other, reusing a single `prefix + word`
/// buffer.
fn score_words(prefix: &str, words: &[&String], level: u32) -> Result<Vec<ScoredCandidate>, ScoringError> {
	let mut text = prefix.as_bytes().to_vec();
	let base = text.len();

	let mut candidates = Vec::with_capacity(words.len());
	for word in words {
		text.truncate(base);
		text.extend_from_slice(word.as_bytes());
		let compressed_size = compressed_size(&text, level).map_err(|source| ScoringError::Compression {
			word: (*word).clone(),
			source,
		})?;
		candidates.push(ScoredCandidate { word: (*word).clone(), compressed_size });
	}
	Ok(candidates)
}

/// Splits `words` into one chunk per thread and scores them on scoped
/// workers. Results come back in arbitrary order; the caller sorts them.
fn score_words_parallel(
	prefix: &str,
	words: &[&String],
	level: u32,
	threads: usize,
) -> Result<Vec<ScoredCandidate>, ScoringError> {
	in_chunks(words, threads, |chunk| score_words(prefix, chunk, level))
}

/// Runs `f` over `threads` chunks of `items` on scoped threads and
/// concatenates the results.
///
/// Every worker is joined before anything is returned. A worker panic is
/// resumed on the caller; otherwise the first error received wins.
fn in_chunks<T, R, E, F>(items: &[T], threads: usize, f: F) -> Result<Vec<R>, E>
where
	T: Sync,
	R: Send,
	E: Send,
	F: Fn(&[T]) -> Result<Vec<R>, E> + Sync,
{
	let chunk_size = items.len().div_ceil(threads.max(1)).max(1);
	let f = &f;

	thread::scope(|scope| {
		let (tx, rx) = mpsc::channel();
		let mut workers = Vec::with_capacity(threads);
		for chunk in items.chunks(chunk_size) {
			let tx = tx.clone();
			workers.push(scope.spawn(move || {
				// The receiver outlives every worker.
				let _ = tx.send(f(chunk));
			}));
		}
		drop(tx);

		let partials: Vec<_> = rx.iter().collect();
		for worker in workers {
			if let Err(payload) = worker.join() {
				std::panic::resume_unwind(payload);
			}
		}

		let mut results = Vec::with_capacity(items.len());
		for partial in partials {
			results.extend(partial?);
		}
		Ok(results)
	})
}
