/// Errors raised by the chain model.
///
/// Dead ends met during generation are not errors: they are recovered
/// in-band by restarting from a random word.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	#[error("source text too short: {words} words, training needs at least {required}")]
	InsufficientTrainingData { words: usize, required: usize },
	#[error("source text too short: {words} words, generation needs at least {required}")]
	InsufficientGenerationData { words: usize, required: usize },
	#[error("number of steps must be positive")]
	InvalidSteps,
	#[error("failed to read source text: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;
