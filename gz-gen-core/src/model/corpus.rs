use std::collections::BTreeSet;
use std::path::Path;

use crate::error::CorpusError;
use crate::io::read_text;
use crate::text::strip_parentheticals;
use crate::text::tokenizer::Tokenizer;

/// The training text, cleaned and tokenized once at startup.
///
/// ## Responsibilities:
/// - Strip parenthetical annotations from the raw text
/// - Keep the ordered token stream fed to the compressor
/// - Derive the candidate vocabulary
///
/// ## Invariants
/// - Immutable after construction
/// - `vocabulary` is exactly the set of distinct `tokens`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
	/// Tokens of the cleaned text, in order.
	tokens: Vec<String>,
	/// Distinct tokens. Ordered, so iteration is lexicographic.
	vocabulary: BTreeSet<String>,
}

impl Corpus {
	/// Builds a corpus from in-memory text.
	pub fn from_text<T: Tokenizer + ?Sized>(text: &str, tokenizer: &T) -> Self {
		let cleaned = strip_parentheticals(text);
		Self::from_tokens(tokenizer.tokenize(&cleaned))
	}

	/// Builds a corpus from an already tokenized stream.
	pub fn from_tokens(tokens: Vec<String>) -> Self {
		let vocabulary = tokens.iter().cloned().collect();
		Self { tokens, vocabulary }
	}

	/// Reads and tokenizes a UTF-8 training file. Nothing is written back.
	///
	/// # Errors
	/// - `CorpusError::NotFound` if the file is missing or unreadable
	/// - `CorpusError::Decode` if it is not valid UTF-8
	pub fn load<P, T>(path: P, tokenizer: &T) -> Result<Self, CorpusError>
	where
		P: AsRef<Path>,
		T: Tokenizer + ?Sized,
	{
		let path = path.as_ref();
		let text = read_text(path)?;
		let corpus = Self::from_text(&text, tokenizer);
		log::info!(
			"loaded {}: {} tokens, {} distinct",
			path.display(),
			corpus.tokens.len(),
			corpus.vocabulary.len()
		);
		Ok(corpus)
	}

	/// Returns the token stream in corpus order.
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Returns the candidate vocabulary.
	pub fn vocabulary(&self) -> &BTreeSet<String> {
		&self.vocabulary
	}

	/// Number of tokens (not distinct words).
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::text::tokenizer::WordTokenizer;

	#[test]
	fn parenthetical_words_do_not_reach_the_corpus() {
		let corpus = Corpus::from_text("The cat (a small mammal) sat.", &WordTokenizer);
		assert_eq!(corpus.tokens(), ["The", "cat", "sat", "."]);
		for word in ["a", "small", "mammal"] {
			assert!(!corpus.vocabulary().contains(word));
		}
	}

	#[test]
	fn nested_parenthesis_tail_survives() {
		let corpus = Corpus::from_text("word (outer (inner) outer)", &WordTokenizer);
		assert_eq!(corpus.tokens(), ["word", "outer", ")"]);
	}

	#[test]
	fn vocabulary_deduplicates() {
		let corpus = Corpus::from_text("the cat sat on the mat", &WordTokenizer);
		assert_eq!(corpus.len(), 6);
		let vocabulary: Vec<&str> = corpus.vocabulary().iter().map(String::as_str).collect();
		assert_eq!(vocabulary, ["cat", "mat", "on", "sat", "the"]);
	}

	#[test]
	fn empty_text_gives_empty_corpus() {
		let corpus = Corpus::from_text("(only a note)", &WordTokenizer);
		assert!(corpus.is_empty());
		assert!(corpus.vocabulary().is_empty());
	}
}
