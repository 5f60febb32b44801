use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::scorer::{Ranking, Scorer};
use crate::error::ScoringError;

/// Rankings already computed during one interactive session.
///
/// Keyed by the prompt's tokens, since the scored text depends on nothing
/// else once the scorer is fixed: `"the cat"` and `"the  cat "` share an
/// entry. The oldest entry is evicted once `capacity` is reached.
///
/// A cache must only be used with the scorer it was filled from.
#[derive(Debug)]
pub struct RankingCache {
	capacity: usize,
	entries: HashMap<Vec<String>, Rc<Ranking>>,
	order: VecDeque<Vec<String>>,
	hits: u64,
	misses: u64,
}

impl RankingCache {
	pub const DEFAULT_CAPACITY: usize = 32;

	/// Creates an empty cache. A capacity of 0 disables caching.
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			entries: HashMap::new(),
			order: VecDeque::new(),
			hits: 0,
			misses: 0,
		}
	}

	/// Returns the ranking of `prompt`, scoring it only on a miss.
	///
	/// # Errors
	/// Propagates the scorer's error; failures are not cached.
	pub fn score(&mut self, scorer: &Scorer, prompt: &str) -> Result<Rc<Ranking>, ScoringError> {
		let key = scorer.tokenize_prompt(prompt);
		if let Some(ranking) = self.entries.get(&key) {
			self.hits += 1;
			return Ok(Rc::clone(ranking));
		}

		self.misses += 1;
		let ranking = Rc::new(scorer.score_tokens(&key)?);
		if self.capacity > 0 {
			if self.entries.len() >= self.capacity {
				if let Some(oldest) = self.order.pop_front() {
					self.entries.remove(&oldest);
				}
			}
			self.order.push_back(key.clone());
			self.entries.insert(key, Rc::clone(&ranking));
		}
		Ok(ranking)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// (hits, misses) since creation.
	pub fn stats(&self) -> (u64, u64) {
		(self.hits, self.misses)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
		self.order.clear();
	}
}

impl Default for RankingCache {
	fn default() -> Self {
		Self::new(Self::DEFAULT_CAPACITY)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::corpus::Corpus;
	use crate::model::scoring_input::ScoringInput;
	use crate::text::tokenizer::WordTokenizer;

	fn scorer() -> Scorer {
		let mut input = ScoringInput::default();
		input.set_threads(1).unwrap();
		Scorer::new(Corpus::from_text("the cat sat on the mat", &WordTokenizer), WordTokenizer, input)
	}

	#[test]
	fn hit_returns_same_ranking_as_fresh_call() {
		let scorer = scorer();
		let mut cache = RankingCache::default();
		let first = cache.score(&scorer, "the cat").unwrap();
		let second = cache.score(&scorer, "  the   cat ").unwrap();
		assert!(Rc::ptr_eq(&first, &second));
		assert_eq!(*first, scorer.score("the cat").unwrap());
		assert_eq!(cache.stats(), (1, 1));
	}

	#[test]
	fn oldest_entry_is_evicted() {
		let scorer = scorer();
		let mut cache = RankingCache::new(2);
		cache.score(&scorer, "the").unwrap();
		cache.score(&scorer, "cat").unwrap();
		cache.score(&scorer, "mat").unwrap();
		assert_eq!(cache.len(), 2);
		cache.score(&scorer, "the").unwrap();
		assert_eq!(cache.stats(), (0, 4));
	}

	#[test]
	fn zero_capacity_never_stores() {
		let scorer = scorer();
		let mut cache = RankingCache::new(0);
		cache.score(&scorer, "the").unwrap();
		cache.score(&scorer, "the").unwrap();
		assert!(cache.is_empty());
		assert_eq!(cache.stats(), (0, 2));
	}
}
