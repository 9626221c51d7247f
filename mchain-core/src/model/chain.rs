use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::prefix::Prefix;
use super::random::IndexSource;
use super::successors::Successors;
use crate::error::{ChainError, Result};
use crate::io::read_file;
use crate::tokenizer::tokenize;

/// Minimum number of words needed to form one (prefix, successor) triple.
pub const MIN_TRAINING_WORDS: usize = 3;

/// Minimum number of words needed to pick a generation seed.
///
/// The seed is drawn from `[0, N - 3)`, which is empty below four words.
pub const MIN_GENERATION_WORDS: usize = 4;

/// One entry of the transition table, as returned by `ChainModel::debug_dump`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
	pub prefix: Prefix,
	pub successors: Successors,
}

/// Second-order Markov chain over words.
///
/// The `ChainModel` keeps the training words and maps every two-word
/// prefix seen in them to the list of words that followed it.
///
/// # Responsibilities
/// - Build the transition table in a single pass over the words
/// - Generate sentence-split text by walking the table
/// - Expose the table for diagnostics
///
/// # Invariants
/// - `words` has at least `MIN_TRAINING_WORDS` entries
/// - Every successor list in `chain` is non-empty
/// - Nothing is mutated after training: generation only takes `&self`
#[derive(Clone, Debug)]
pub struct ChainModel {
	/// Training words, in order.
	words: Vec<String>,

	/// Mapping from a two-word prefix to every word observed after it.
	chain: HashMap<Prefix, Successors>,
}

impl ChainModel {
	/// Tokenizes `text` and trains a model on it.
	///
	/// # Errors
	/// Returns `InsufficientTrainingData` if the text has fewer than three words.
	pub fn train(text: &[u8]) -> Result<Self> {
		Self::from_words(tokenize(text))
	}

	/// Reads a text file and trains a model on its content.
	///
	/// # Errors
	/// - `Io` if the file cannot be read
	/// - `InsufficientTrainingData` if the file has fewer than three words
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let bytes = read_file(&filepath)?;
		Self::train(&bytes)
	}

	/// Trains a model on an already tokenized sequence.
	///
	/// For every index `i` in `0..=N-3`, the word `words[i + 2]` is appended
	/// to the successors of `(words[i], words[i + 1])`. Exactly `N - 2`
	/// observations are recorded, in encounter order.
	///
	/// # Errors
	/// Returns `InsufficientTrainingData` if `words` has fewer than three entries.
	/// No partial model is built in that case.
	pub fn from_words(words: Vec<String>) -> Result<Self> {
		if words.len() < MIN_TRAINING_WORDS {
			return Err(ChainError::InsufficientTrainingData {
				words: words.len(),
				required: MIN_TRAINING_WORDS,
			});
		}

		let mut chain: HashMap<Prefix, Successors> = HashMap::new();
		for triple in words.windows(3) {
			chain
				.entry(Prefix::new(&triple[0], &triple[1]))
				.or_default()
				.push(&triple[2]);
		}

		debug!(
			"trained chain: {} words, {} prefixes, {} observations",
			words.len(),
			chain.len(),
			words.len() - 2
		);

		Ok(Self { words, chain })
	}

	/// Training words, in order.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Number of training words.
	pub fn word_count(&self) -> usize {
		self.words.len()
	}

	/// Number of distinct prefixes in the transition table.
	pub fn prefix_count(&self) -> usize {
		self.chain.len()
	}

	/// Returns the successors recorded for `prefix`, if any.
	pub fn successors(&self, prefix: &Prefix) -> Option<&Successors> {
		self.chain.get(prefix)
	}

	/// Returns every (prefix, successors) pair of the table.
	///
	/// Diagnostic only: the order is unspecified.
	pub fn debug_dump(&self) -> Vec<Transition> {
		self.chain
			.iter()
			.map(|(prefix, successors)| Transition {
				prefix: prefix.clone(),
				successors: successors.clone(),
			})
			.collect()
	}

	/// Generates text by performing `steps` walks along the chain.
	///
	/// # Behavior
	/// - Starts from a random position `seed` in `[0, N - 3)`, with the pair
	///   `(words[seed], words[seed + 1])`.
	/// - At each step the first word of the pair is emitted. A word ending
	///   with `.` closes the current sentence.
	/// - The pair then moves forward by one successor sampled from the table.
	///   On a dead end (unknown pair), a single word is drawn at a random
	///   position in `[0, N - 3)` and spliced in as the new second word.
	/// - After the last step, the second word of the pair is emitted and the
	///   last sentence always gets a trailing `.`, even if it already has one.
	///
	/// The output holds `steps + 1` words. Every random choice goes through
	/// `source`, so a deterministic source gives a deterministic result.
	///
	/// # Errors
	/// - `InvalidSteps` if `steps` is zero
	/// - `InsufficientGenerationData` if the model has fewer than four words
	pub fn generate<S: IndexSource + ?Sized>(&self, steps: usize, source: &mut S) -> Result<String> {
		if steps == 0 {
			return Err(ChainError::InvalidSteps);
		}
		if self.words.len() < MIN_GENERATION_WORDS {
			return Err(ChainError::InsufficientGenerationData {
				words: self.words.len(),
				required: MIN_GENERATION_WORDS,
			});
		}

		let seed_range = self.words.len() - 3;
		let seed = source.pick(seed_range);
		let (mut w1, mut w2) = (self.words[seed].as_str(), self.words[seed + 1].as_str());

		let mut current: Vec<&str> = Vec::new();
		let mut sentences: Vec<String> = Vec::new();
		for _ in 0..steps {
			current.push(w1);
			if w1.ends_with('.') {
				sentences.push(current.join(" "));
				current.clear();
			}

			let successors = self.chain.get(&Prefix::new(w1, w2));
			let next = match successors.and_then(|s| s.predict(&mut *source)) {
				Some(next) => next,
				None => {
					// Dead end: splice a single fresh word, no look-ahead
					let restart = source.pick(seed_range);
					trace!("dead end at {} {}, restarting at word {}", w1, w2, restart);
					self.words[restart].as_str()
				}
			};
			(w1, w2) = (w2, next);
		}

		current.push(w2);
		let mut last = current.join(" ");
		last.push('.');
		sentences.push(last);

		Ok(sentences.join(" "))
	}
}

impl fmt::Display for ChainModel {
	/// One `[w1 w2] => [s1 s2 ...]` line per prefix, in table order.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (prefix, successors) in &self.chain {
			writeln!(f, "{} => {}", prefix, successors)?;
		}
		Ok(())
	}
}
