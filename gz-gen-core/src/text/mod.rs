//! Text preparation shared by the corpus loader and the scorer.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Word-boundary tokenization.
pub mod tokenizer;

/// From `(` to the nearest following `)`. Nesting is not tracked.
static PARENTHETICAL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

/// Removes every parenthetical span from `text`.
///
/// A span runs from an opening parenthesis to the first closing one after
/// it, so `"word (outer (inner) outer)"` becomes `"word  outer)"`. Corpora
/// with nested parentheses keep the tail of the outer group.
pub fn strip_parentheticals(text: &str) -> Cow<'_, str> {
	PARENTHETICAL.replace_all(text, "")
}
