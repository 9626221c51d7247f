use std::fmt;

use serde::{Deserialize, Serialize};

use super::random::IndexSource;

/// Words observed right after a given prefix.
///
/// Conceptually, this is the set of outgoing edges of a node in the
/// Markov chain. Instead of counting occurrences, every observation is
/// kept in encounter order, so a word seen twice appears twice.
///
/// ## Invariants
/// - Once stored in a chain, the list is never empty
/// - Words are only appended, never removed or reordered
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Successors {
	words: Vec<String>,
}

impl Successors {
	/// Records one more observation of `word`.
	pub fn push(&mut self, word: &str) {
		self.words.push(word.to_owned());
	}

	/// Picks one observation uniformly.
	///
	/// Since duplicates are kept, a word observed `k` times out of `n`
	/// is returned with probability `k / n`.
	///
	/// Returns `None` if the list is empty.
	pub fn predict<S: IndexSource + ?Sized>(&self, source: &mut S) -> Option<&str> {
		if self.words.is_empty() {
			return None;
		}
		self.words.get(source.pick(self.words.len())).map(String::as_str)
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

impl fmt::Display for Successors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}]", self.words.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::random::ScriptedIndices;

	#[test]
	fn keeps_duplicates_in_encounter_order() {
		let mut successors = Successors::default();
		successors.push("ran.");
		successors.push("sat.");
		successors.push("ran.");
		assert_eq!(successors.words(), ["ran.", "sat.", "ran."]);
		assert_eq!(successors.len(), 3);
	}

	#[test]
	fn predict_uses_the_picked_index() {
		let mut successors = Successors::default();
		successors.push("a");
		successors.push("b");
		successors.push("c");

		let mut source = ScriptedIndices::new(vec![2, 0, 4]);
		assert_eq!(successors.predict(&mut source), Some("c"));
		assert_eq!(successors.predict(&mut source), Some("a"));
		// 4 % 3
		assert_eq!(successors.predict(&mut source), Some("b"));
	}

	#[test]
	fn empty_list_predicts_nothing() {
		let successors = Successors::default();
		let mut source = ScriptedIndices::new(vec![0]);
		assert_eq!(successors.predict(&mut source), None);
	}
}
