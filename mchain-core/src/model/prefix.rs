use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered pair of two consecutive words.
///
/// Equality and hashing use both words, in order:
/// `("a", "b")` and `("b", "a")` are different keys.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
	first: String,
	second: String,
}

impl Prefix {
	pub fn new(first: &str, second: &str) -> Self {
		Self { first: first.to_owned(), second: second.to_owned() }
	}
}

impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{} {}]", self.first, self.second)
	}
}
