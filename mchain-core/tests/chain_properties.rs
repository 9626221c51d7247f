use std::collections::HashMap;
use std::io::Write;
use std::thread;

use mchain_core::tokenizer::tokenize;
use mchain_core::{ChainError, ChainModel, Prefix, RngIndexSource, ScriptedIndices};
use tempfile::NamedTempFile;

const POEM: &str = "\
The sea is calm tonight. The tide is full, the moon lies fair
upon the straits. On the French coast the light gleams and is gone.
The cliffs of England stand, glimmering and vast, out in the tranquil bay.
Come to the window, sweet is the night air. Only, from the long line of spray
where the sea meets the moon-blanched land, listen. You hear the grating roar
of pebbles which the waves draw back, and fling, at their return, up the high strand.
";

fn sorted(mut words: Vec<String>) -> Vec<String> {
	words.sort();
	words
}

#[test]
fn table_matches_every_triple() {
	let words = tokenize(POEM.as_bytes());
	let model = ChainModel::train(POEM.as_bytes()).unwrap();

	let mut expected: HashMap<Prefix, Vec<String>> = HashMap::new();
	for i in 0..=words.len() - 3 {
		expected
			.entry(Prefix::new(&words[i], &words[i + 1]))
			.or_default()
			.push(words[i + 2].clone());
	}

	assert_eq!(model.prefix_count(), expected.len());
	for transition in model.debug_dump() {
		let observed = expected.remove(&transition.prefix).expect("unexpected prefix");
		assert_eq!(sorted(transition.successors.words().to_vec()), sorted(observed));
	}
	assert!(expected.is_empty());
}

#[test]
fn same_seed_same_text() {
	let model = ChainModel::train(POEM.as_bytes()).unwrap();
	let first = model.generate(200, &mut RngIndexSource::seeded(2024)).unwrap();
	let second = model.generate(200, &mut RngIndexSource::seeded(2024)).unwrap();
	assert_eq!(first, second);

	let script = vec![5, 1, 0, 3, 2, 8, 13, 21];
	let first = model.generate(64, &mut ScriptedIndices::new(script.clone())).unwrap();
	let second = model.generate(64, &mut ScriptedIndices::new(script)).unwrap();
	assert_eq!(first, second);
}

#[test]
fn every_sentence_ends_with_a_period() {
	let model = ChainModel::train(POEM.as_bytes()).unwrap();
	let mut source = RngIndexSource::seeded(11);
	for steps in [1, 2, 7, 50, 500] {
		let text = model.generate(steps, &mut source).unwrap();
		assert!(text.ends_with('.'));
		assert!(!text.contains("  "));
		assert!(!text.starts_with(' '));
		assert_eq!(text.split(' ').count(), steps + 1);
	}
}

#[test]
fn dead_ends_never_abort_generation() {
	// Every prefix is unique, so most walks hit a dead end quickly
	let text: String = (0..200).map(|i| format!("w{} ", i)).collect();
	let model = ChainModel::train(text.as_bytes()).unwrap();
	assert_eq!(model.prefix_count(), 198);

	let output = model.generate(20_000, &mut RngIndexSource::thread()).unwrap();
	assert!(!output.is_empty());
	assert!(output.ends_with('.'));
	assert_eq!(output.split(' ').count(), 20_001);
}

#[test]
fn minimal_generation_text() {
	let model = ChainModel::train(b"one two three four").unwrap();
	let output = model.generate(10, &mut RngIndexSource::seeded(1)).unwrap();
	assert!(output.starts_with("one two"));
}

#[test]
fn model_is_shared_across_threads() {
	let model = ChainModel::train(POEM.as_bytes()).unwrap();
	let outputs: Vec<String> = thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|seed| {
				let model = &model;
				scope.spawn(move || model.generate(100, &mut RngIndexSource::seeded(seed)).unwrap())
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	for (seed, output) in outputs.iter().enumerate() {
		let again = model.generate(100, &mut RngIndexSource::seeded(seed as u64)).unwrap();
		assert_eq!(output, &again);
	}
}

#[test]
fn train_from_file() {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(POEM.as_bytes()).unwrap();
	let model = ChainModel::from_file(file.path()).unwrap();
	assert_eq!(model.words(), tokenize(POEM.as_bytes()));

	let dir = tempfile::tempdir().unwrap();
	assert!(matches!(ChainModel::from_file(dir.path().join("missing.txt")), Err(ChainError::Io(_))));
}

#[test]
fn errors_describe_the_problem() {
	let err = ChainModel::train(b"too short").unwrap_err();
	assert_eq!(err.to_string(), "source text too short: 2 words, training needs at least 3");

	let model = ChainModel::train(b"just three words").unwrap();
	let err = model.generate(3, &mut ScriptedIndices::new(vec![0])).unwrap_err();
	assert_eq!(err.to_string(), "source text too short: 3 words, generation needs at least 4");
}
