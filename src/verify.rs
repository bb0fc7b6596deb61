//! # Verification
//!
//! Herein is the [`Verifier`], which composes parsing, structural validation,
//! position resolution, grid assembly, word extraction, and word validation
//! into a single call.

use std::sync::Arc;

use log::{debug, trace};

use crate::{
	dictionary::Dictionary,
	grid::{build_grid, compute_positions},
	parser::parse_board,
	structure::validate_structure,
	validation::ValidationResult,
	words::validate_words
};

/// Verifies board specifications against a shared dictionary. Verification
/// is a pure function of the board, so a single verifier may serve
/// any number of boards, and any number of verifiers may share a dictionary.
#[derive(Clone, Debug)]
#[must_use]
pub struct Verifier
{
	/// The dictionary to check words against.
	dictionary: Arc<Dictionary>
}

impl Verifier
{
	/// Construct a verifier for the given dictionary.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary to check words against.
	///
	/// # Returns
	///
	/// The verifier.
	#[inline]
	pub fn new(dictionary: Arc<Dictionary>) -> Self { Self { dictionary } }

	/// The dictionary used by the verifier.
	#[inline]
	#[must_use]
	pub fn dictionary(&self) -> &Arc<Dictionary> { &self.dictionary }

	/// Verify a board specification. Every check that can run does run, so
	/// the result carries the complete error list; use
	/// [`ValidationResult::feedback`] to obtain the errors worth displaying.
	///
	/// # Arguments
	///
	/// * `spec` - The raw board specification, optionally wrapped in `<board>`
	///   tags.
	///
	/// # Returns
	///
	/// The verification result.
	pub fn verify(&self, spec: &str) -> ValidationResult
	{
		let (entries, mut errors) = parse_board(spec);
		if entries.is_empty()
		{
			debug!("no entries: {} parse errors", errors.len());
			return ValidationResult { valid: false, errors, ..Default::default() }
		}

		let (structure_errors, anchors) = validate_structure(&entries);
		errors.extend(structure_errors);

		let positions = compute_positions(&entries, &anchors);
		let (grid, grid_errors) = build_grid(&entries, &positions);
		errors.extend(grid_errors);

		let words = entries.into_iter().map(|e| e.word).collect::<Vec<_>>();
		let grid_words = grid.words();
		trace!("grid words: {:?}", grid_words);
		let (word_errors, warnings) =
			validate_words(&self.dictionary, &words, &grid_words);
		errors.extend(word_errors);

		debug!(
			"verified {} words: {} errors, {} warnings",
			words.len(),
			errors.len(),
			warnings.len()
		);
		ValidationResult {
			valid: errors.is_empty(),
			errors,
			warnings,
			words,
			grid: (!grid.is_empty()).then(|| grid.render()),
			tiles_used: grid.len(),
			letters_used: grid.letters()
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
