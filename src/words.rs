//! # Word validation
//!
//! Checks declared words, and words formed accidentally on the grid, against
//! the [dictionary](Dictionary).

use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::{
	dictionary::Dictionary,
	validation::{ErrorCode, ValidationError}
};

/// Validate words against the dictionary.
///
/// * Every declared word missing from the dictionary is an
///   [`INVALID_WORD`](ErrorCode::InvalidWord) error, once per declaration.
/// * Every grid word that was not declared is accidental: an
///   [`ACCIDENTAL_INVALID`](ErrorCode::AccidentalInvalid) error if it is
///   missing from the dictionary, or an
///   [`ACCIDENTAL_VALID`](ErrorCode::AccidentalValid) warning otherwise.
///
/// # Arguments
///
/// * `dictionary` - The dictionary.
/// * `declared` - The declared words, in declaration order.
/// * `grid_words` - The words physically present on the grid.
///
/// # Returns
///
/// A 2-tuple comprising the errors and the warnings. Accidental words are
/// reported in sorted order.
pub fn validate_words<T: AsRef<str>>(
	dictionary: &Dictionary,
	declared: &[T],
	grid_words: &BTreeSet<String>
) -> (Vec<ValidationError>, Vec<ValidationError>)
{
	let mut errors = Vec::new();
	let mut warnings = Vec::new();

	for word in declared.iter().map(AsRef::as_ref)
	{
		if !dictionary.contains(word)
		{
			errors.push(
				ValidationError::new(
					ErrorCode::InvalidWord,
					format!("'{}' is not a valid dictionary word", word)
				)
				.with_word(word)
			);
		}
	}

	let declared = declared.iter()
		.map(AsRef::as_ref)
		.collect::<HashSet<&str>>();
	for word in grid_words.iter().filter(|w| !declared.contains(w.as_str()))
	{
		if dictionary.contains(word)
		{
			debug!("accidental but valid: {}", word);
			warnings.push(
				ValidationError::new(
					ErrorCode::AccidentalValid,
					format!(
						"Accidental word '{}' formed on grid (valid, but not \
						declared)",
						word
					)
				)
				.with_word(word.clone())
			);
		}
		else
		{
			debug!("accidental and invalid: {}", word);
			errors.push(
				ValidationError::new(
					ErrorCode::AccidentalInvalid,
					format!(
						"Accidental word '{}' on grid is not a valid dictionary \
						word. Move words apart so that they only touch where \
						they cross.",
						word
					)
				)
				.with_word(word.clone())
			);
		}
	}
	(errors, warnings)
}

#[cfg(test)]
mod test
{
	use std::collections::BTreeSet;

	use crate::{
		dictionary::Dictionary,
		validation::{CascadeLevel, ErrorCode},
		words::validate_words
	};

	#[test]
	fn test_validate_words()
	{
		let dictionary =
			Dictionary::from_words(&["at", "ta", "cat", "na"]).unwrap();
		let grid_words = ["AT", "TA", "NA", "AC", "CAT"].iter()
			.map(|w| w.to_string())
			.collect::<BTreeSet<_>>();
		let (errors, warnings) =
			validate_words(&dictionary, &["AT", "TA", "CAT", "XYZZY", "CAT"], &grid_words);
		let errors = errors.iter()
			.map(|e| {
				assert_eq!(e.cascade_level, CascadeLevel::Medium);
				(e.code, e.word.as_deref().unwrap())
			})
			.collect::<Vec<_>>();
		assert_eq!(
			errors,
			vec![
				(ErrorCode::InvalidWord, "XYZZY"),
				(ErrorCode::AccidentalInvalid, "AC")
			]
		);
		assert_eq!(warnings.len(), 1);
		assert_eq!(warnings[0].code, ErrorCode::AccidentalValid);
		assert_eq!(warnings[0].word.as_deref(), Some("NA"));
		assert_eq!(warnings[0].cascade_level, CascadeLevel::Medium);
	}

	/// Each declaration of an invalid word is reported.
	#[test]
	fn test_repeated_invalid_word()
	{
		let dictionary = Dictionary::new();
		let (errors, warnings) =
			validate_words(&dictionary, &["QI", "QI"], &BTreeSet::new());
		assert_eq!(errors.len(), 2);
		assert!(warnings.is_empty());
	}
}
