use std::sync::LazyLock;

use regex::Regex;

/// Splits text into word-level tokens.
///
/// The corpus and every prompt must go through the same tokenizer, since
/// the scorer joins their tokens into one buffer.
pub trait Tokenizer {
	/// Returns the tokens of `text` in order.
	fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
	F: Fn(&str) -> Vec<String>,
{
	fn tokenize(&self, text: &str) -> Vec<String> {
		self(text)
	}
}

/// Penn-Treebank style word tokenizer.
///
/// Text is first cut into sentences, then each sentence is split so that
/// punctuation, brackets and quotes become their own tokens and English
/// clitics are detached (`"don't"` → `do`, `n't`; `"cat's"` → `cat`, `'s`).
/// A period is only split off at the end of a sentence, so `"3.14"` and
/// `"e.g."` inside a sentence stay whole.
///
/// Sentence boundaries are `.`, `!` or `?` (plus closing quotes/brackets)
/// followed by whitespace and a token that does not start lowercase.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

struct Rule {
	pattern: Regex,
	replacement: &'static str,
}

fn rules(table: &[(&str, &'static str)]) -> Vec<Rule> {
	table
		.iter()
		.map(|(pattern, replacement)| Rule {
			pattern: Regex::new(pattern).expect("tokenizer pattern is valid"),
			replacement,
		})
		.collect()
}

fn apply(rules: &[Rule], mut text: String) -> String {
	for rule in rules {
		text = rule.pattern.replace_all(&text, rule.replacement).into_owned();
	}
	text
}

static SENTENCE_END: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("sentence pattern is valid"));

static STARTING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
	rules(&[
		(r#"^""#, "``"),
		(r"(``)", " ${1} "),
		(r#"([ (\[{<])("|'')"#, "${1} `` "),
	])
});

static PUNCTUATION: LazyLock<Vec<Rule>> = LazyLock::new(|| {
	rules(&[
		(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2}${3} "),
		(r"([:,])([^\d])", " ${1} ${2}"),
		(r"([:,])$", " ${1} "),
		(r"\.\.\.", " ... "),
		(r"[;@#$%&]", " ${0} "),
		(r"[?!]", " ${0} "),
		(r"([^'])' ", "${1} ' "),
		(r"[\]\[(){}<>]", " ${0} "),
		(r"--", " -- "),
	])
});

static ENDING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
	rules(&[
		(r#"""#, " '' "),
		(r"(\S)('')", "${1} ${2} "),
		(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
		(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
	])
});

static CONTRACTIONS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
	rules(&[
		(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
		(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
		(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
		(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
		(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
		(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
		(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
		(r"(?i)\b(wan)(na)\b", " ${1} ${2} "),
		(r"(?i) ('t)(is)\b", " ${1} ${2} "),
		(r"(?i) ('t)(was)\b", " ${1} ${2} "),
	])
});

impl WordTokenizer {
	/// Cuts `text` after each sentence terminator.
	fn sentences(text: &str) -> Vec<&str> {
		let mut sentences = Vec::new();
		let mut start = 0;
		for boundary in SENTENCE_END.find_iter(text) {
			let next_is_lower = text[boundary.end()..]
				.chars()
				.next()
				.is_some_and(char::is_lowercase);
			if next_is_lower {
				continue;
			}
			sentences.push(&text[start..boundary.end()]);
			start = boundary.end();
		}
		if start < text.len() {
			sentences.push(&text[start..]);
		}
		sentences
	}

	fn split_sentence(sentence: &str, tokens: &mut Vec<String>) {
		let mut text = apply(&STARTING_QUOTES, sentence.trim().to_owned());
		text = apply(&PUNCTUATION, text);
		text = format!(" {text} ");
		text = apply(&ENDING_QUOTES, text);
		text = apply(&CONTRACTIONS, text);
		tokens.extend(text.split_whitespace().map(str::to_owned));
	}
}

impl Tokenizer for WordTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let mut tokens = Vec::new();
		for sentence in Self::sentences(text) {
			Self::split_sentence(sentence, &mut tokens);
		}
		tokens
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<String> {
		WordTokenizer.tokenize(text)
	}

	#[test]
	fn splits_on_whitespace() {
		assert_eq!(tokens("the cat sat on the mat"), ["the", "cat", "sat", "on", "the", "mat"]);
	}

	#[test]
	fn final_period_is_a_token() {
		assert_eq!(tokens("The cat sat."), ["The", "cat", "sat", "."]);
	}

	#[test]
	fn every_sentence_ends_with_its_own_period() {
		assert_eq!(tokens("It rained. We left!"), ["It", "rained", ".", "We", "left", "!"]);
	}

	#[test]
	fn lowercase_continuation_is_not_a_sentence_break() {
		assert_eq!(tokens("see e.g. this case"), ["see", "e.g.", "this", "case"]);
	}

	#[test]
	fn inner_decimal_point_is_kept() {
		assert_eq!(tokens("pi is 3.14 here"), ["pi", "is", "3.14", "here"]);
	}

	#[test]
	fn punctuation_is_separated() {
		assert_eq!(tokens("Well, hello; world?"), ["Well", ",", "hello", ";", "world", "?"]);
	}

	#[test]
	fn commas_inside_numbers_stay() {
		assert_eq!(tokens("about 1,000 cats"), ["about", "1,000", "cats"]);
	}

	#[test]
	fn contractions_are_detached() {
		assert_eq!(tokens("I don't know"), ["I", "do", "n't", "know"]);
		assert_eq!(tokens("the cat's toy"), ["the", "cat", "'s", "toy"]);
		assert_eq!(tokens("we'll see"), ["we", "'ll", "see"]);
		assert_eq!(tokens("I cannot go"), ["I", "can", "not", "go"]);
	}

	#[test]
	fn quotes_become_treebank_quotes() {
		assert_eq!(tokens(r#""Hi" she said"#), ["``", "Hi", "''", "she", "said"]);
	}

	#[test]
	fn brackets_are_tokens() {
		assert_eq!(tokens("a [b] c"), ["a", "[", "b", "]", "c"]);
	}

	#[test]
	fn empty_and_blank_inputs_have_no_tokens() {
		assert!(tokens("").is_empty());
		assert!(tokens("   \n\t").is_empty());
	}

	#[test]
	fn closures_are_tokenizers() {
		let by_space = |text: &str| text.split(' ').map(str::to_owned).collect::<Vec<_>>();
		assert_eq!(by_space.tokenize("a b"), ["a", "b"]);
	}
}
