//! Word-level Markov chain text generation library.
//!
//! This crate provides a second-order Markov chain generator including:
//! - A whitespace tokenizer that keeps punctuation attached to words
//! - A chain model mapping two-word prefixes to observed successors
//! - Sentence-aware generation driven by an injectable index source
//! - Small I/O helpers used by the binaries
//!
//! The trained model is immutable: generation only reads the transition
//! table, so a single model can serve any number of callers.

/// Chain model, prefixes, successor lists and index sources.
pub mod model;

/// Splits raw text into word tokens.
pub mod tokenizer;

/// Error type shared by training and generation.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::{ChainError, Result};
pub use model::chain::{ChainModel, Transition};
pub use model::prefix::Prefix;
pub use model::random::{IndexSource, RngIndexSource, ScriptedIndices};
pub use model::successors::Successors;
