use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Provider of uniform indices used by generation.
///
/// Every random decision of the chain (seed word, successor, restart word)
/// goes through this trait, so generation is reproducible whenever the
/// source is.
pub trait IndexSource {
	/// Returns an index in `[0, upper)`.
	///
	/// Callers guarantee `upper > 0`.
	fn pick(&mut self, upper: usize) -> usize;
}

/// Uniform index source backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngIndexSource<R: Rng> {
	rng: R,
}

impl<R: Rng> RngIndexSource<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl RngIndexSource<ThreadRng> {
	/// Uses the thread-local generator (non reproducible).
	pub fn thread() -> Self {
		Self::new(rand::rng())
	}
}

impl RngIndexSource<StdRng> {
	/// Uses a generator seeded with `seed`.
	///
	/// Two sources built with the same seed produce the same indices.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> IndexSource for RngIndexSource<R> {
	fn pick(&mut self, upper: usize) -> usize {
		self.rng.random_range(0..upper)
	}
}

/// Deterministic index source replaying a fixed list of choices.
///
/// Choices are cycled and reduced modulo `upper`, so any script is valid
/// for any range. An empty script always picks `0`.
#[derive(Debug, Clone)]
pub struct ScriptedIndices {
	choices: Vec<usize>,
	position: usize,
}

impl ScriptedIndices {
	pub fn new(choices: Vec<usize>) -> Self {
		Self { choices, position: 0 }
	}
}

impl IndexSource for ScriptedIndices {
	fn pick(&mut self, upper: usize) -> usize {
		if self.choices.is_empty() {
			return 0;
		}
		let choice = self.choices[self.position % self.choices.len()];
		self.position += 1;
		choice % upper
	}
}
