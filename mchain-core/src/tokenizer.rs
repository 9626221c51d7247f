/// Turns raw text into the ordered word sequence used for training.
///
/// - Invalid UTF-8 is replaced lossily
/// - Leading/trailing whitespace of the whole text is stripped
/// - Newlines become spaces, then the text is split on runs of whitespace
///
/// Punctuation stays attached to its word: a trailing `.` is what marks
/// the end of a sentence during generation.
///
/// Never fails. A result that is too short to train on is reported by
/// the chain model, not here.
pub fn tokenize(text: &[u8]) -> Vec<String> {
	let text = String::from_utf8_lossy(text);
	text.trim()
		.replace('\n', " ")
		.split_whitespace()
		.map(str::to_owned)
		.collect()
}
