//! Top-level module for the Markov chain.
//!
//! This module provides:
//! - The trained chain model (`ChainModel`)
//! - Two-word prefix keys (`Prefix`)
//! - Successor lists with uniform sampling (`Successors`)
//! - Injectable index sources for reproducible generation (`IndexSource`)

/// Chain model: one-pass training and sentence-aware generation.
pub mod chain;

/// Two-word prefix used as transition table key.
pub mod prefix;

/// Observed successors of a single prefix.
///
/// Repetition encodes frequency, so uniform sampling over the list is
/// frequency-weighted sampling over distinct words.
pub mod successors;

/// Sources of uniform indices (random or scripted).
pub mod random;
