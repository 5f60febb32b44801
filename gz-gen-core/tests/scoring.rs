use std::collections::BTreeSet;

use gz_gen_core::{ContextMode, Corpus, Ranking, ScoringInput, Scorer, WordTokenizer};
use proptest::prelude::*;

fn scorer_with(text: &str, configure: impl FnOnce(&mut ScoringInput)) -> Scorer {
	let mut input = ScoringInput::default();
	configure(&mut input);
	Scorer::new(Corpus::from_text(text, &WordTokenizer), WordTokenizer, input)
}

fn words(ranking: &Ranking) -> BTreeSet<String> {
	ranking.iter().map(|c| c.word.clone()).collect()
}

fn assert_sorted(ranking: &Ranking) {
	let sizes: Vec<usize> = ranking.iter().map(|c| c.compressed_size).collect();
	assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]), "not sorted: {sizes:?}");
}

#[test]
fn cat_on_the_mat_ranks_whole_vocabulary() {
	let scorer = scorer_with("the cat sat on the mat", |_| {});
	let ranking = scorer.score("the cat").unwrap();

	assert_eq!(ranking.len(), 5);
	assert_eq!(&words(&ranking), scorer.corpus().vocabulary());
	assert_sorted(&ranking);

	let sizes: BTreeSet<usize> = ranking.iter().map(|c| c.compressed_size).collect();
	assert!(sizes.len() > 1, "every candidate compressed to the same size: {sizes:?}");
}

#[test]
fn stored_blocks_rank_by_word_length() {
	// Level 0 stores the text verbatim, so the shortest word wins outright.
	let scorer = scorer_with("the cat sat on the mat", |input| input.set_compression_level(0).unwrap());
	let ranking = scorer.score("the cat").unwrap();

	let best = ranking.best().unwrap();
	assert_eq!(best.word, "on");
	assert!(ranking.iter().skip(1).all(|c| c.compressed_size > best.compressed_size));
}

#[test]
fn repeated_calls_are_identical() {
	let scorer = scorer_with("It was the best of times, it was the worst of times.", |_| {});
	let first = scorer.score("it was the").unwrap();
	for _ in 0..3 {
		assert_eq!(scorer.score("it was the").unwrap(), first);
	}
}

#[test]
fn empty_prompt_still_ranks_everything() {
	let scorer = scorer_with("the cat sat on the mat", |_| {});
	let ranking = scorer.score("").unwrap();
	assert_eq!(ranking.len(), scorer.corpus().vocabulary().len());
	assert_sorted(&ranking);
}

#[test]
fn prompt_words_outside_vocabulary_are_fine() {
	let scorer = scorer_with("the cat sat on the mat", |_| {});
	let ranking = scorer.score("a zebra (striped) appeared").unwrap();
	assert_eq!(ranking.len(), 5);
	assert!(!words(&ranking).contains("zebra"));
}

#[test]
fn prompt_only_mode_still_ranks_everything() {
	let scorer = scorer_with("the cat sat on the mat", |input| input.context_mode = ContextMode::PromptOnly);
	let ranking = scorer.score("the cat").unwrap();
	assert_eq!(ranking.len(), 5);
	assert_sorted(&ranking);
}

#[test]
fn ties_are_broken_by_word() {
	let scorer = scorer_with("b a d c", |input| input.set_compression_level(0).unwrap());
	let ranking = scorer.score("").unwrap();
	let order: Vec<&str> = ranking.iter().map(|c| c.word.as_str()).collect();
	assert_eq!(order, ["a", "b", "c", "d"]);
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(24))]

	#[test]
	fn ranking_is_a_sorted_permutation_of_vocabulary(
		corpus in prop::collection::vec("[a-e]{1,4}", 1..20),
		prompt in prop::collection::vec("[a-g]{1,4}", 0..5),
		threads in 1usize..4,
	) {
		let scorer = scorer_with(&corpus.join(" "), |input| input.set_threads(threads).unwrap());
		let ranking = scorer.score(&prompt.join(" ")).unwrap();

		prop_assert_eq!(ranking.len(), scorer.corpus().vocabulary().len());
		prop_assert_eq!(&words(&ranking), scorer.corpus().vocabulary());
		let sizes: Vec<usize> = ranking.iter().map(|c| c.compressed_size).collect();
		prop_assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));
	}
}
