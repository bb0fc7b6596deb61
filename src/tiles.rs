//! # Tile reconciliation
//!
//! A board is only playable if it is built from exactly the tiles in the
//! player's hand. The verifier itself knows nothing about hands, so the
//! caller reconciles the letters on the grid against the hand and injects the
//! outcome into the [result](ValidationResult) before displaying feedback.

use std::collections::BTreeMap;

use log::debug;

use crate::validation::{ErrorCode, ValidationError, ValidationResult};

/// The outcome of reconciling a board against a hand. Counts are keyed by
/// uppercase letter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct TileReport
{
	/// Letters on the board beyond what the hand holds.
	pub not_in_hand: BTreeMap<char, usize>,

	/// Letters in the hand that the board does not use.
	pub unused: BTreeMap<char, usize>
}

impl TileReport
{
	/// Check whether the board uses the hand exactly.
	#[inline]
	#[must_use]
	pub fn is_exact(&self) -> bool
	{
		self.not_in_hand.is_empty() && self.unused.is_empty()
	}
}

/// Reconcile the letters on the board against a hand. Letters played but not
/// held are a [`TILES_NOT_IN_HAND`](ErrorCode::TilesNotInHand) error; letters
/// held but not played are a [`TILES_UNUSED`](ErrorCode::TilesUnused) warning.
///
/// # Arguments
///
/// * `result` - The verification result, which receives any error or
///   warning.
/// * `hand` - The tiles in the hand, in any case and order.
///
/// # Returns
///
/// The reconciliation report.
pub fn reconcile_tiles(result: &mut ValidationResult, hand: &[char]) -> TileReport
{
	let board = tally(result.letters_used.iter().copied());
	let held = tally(hand.iter().copied());
	let report = TileReport {
		not_in_hand: difference(&board, &held),
		unused: difference(&held, &board)
	};
	debug!("tile reconciliation: {:?}", report);
	if !report.not_in_hand.is_empty()
	{
		result.push_error(ValidationError::new(
			ErrorCode::TilesNotInHand,
			format!(
				"Board uses tiles not in hand: {}",
				describe(&report.not_in_hand)
			)
		));
	}
	if !report.unused.is_empty()
	{
		result.push_warning(ValidationError::new(
			ErrorCode::TilesUnused,
			format!("Tiles in hand not used: {}", describe(&report.unused))
		));
	}
	report
}

/// Count letters, folding case.
fn tally(letters: impl Iterator<Item = char>) -> BTreeMap<char, usize>
{
	let mut counts = BTreeMap::new();
	for letter in letters
	{
		*counts.entry(letter.to_ascii_uppercase()).or_insert(0) += 1;
	}
	counts
}

/// The multiset difference `a - b`.
fn difference(
	a: &BTreeMap<char, usize>,
	b: &BTreeMap<char, usize>
) -> BTreeMap<char, usize>
{
	a.iter()
		.filter_map(|(&letter, &count)| {
			let excess = count.saturating_sub(b.get(&letter).copied().unwrap_or(0));
			(excess > 0).then_some((letter, excess))
		})
		.collect()
}

/// Describe letter counts, e.g., `A×2, Q×1`.
fn describe(counts: &BTreeMap<char, usize>) -> String
{
	counts.iter()
		.map(|(letter, count)| format!("{}×{}", letter, count))
		.collect::<Vec<_>>()
		.join(", ")
}
