//! # Structural validation
//!
//! Checks that every attached word refers to an earlier word, that both
//! indices of the shared letter are in bounds, that the shared letters agree,
//! and that the two words cross at right angles. These checks consider only
//! the declarations, never the assembled grid.

use std::collections::HashMap;

use log::trace;

use crate::{
	board::WordEntry,
	validation::{ErrorCode, ValidationError}
};

/// How an entry is anchored for position resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Anchor
{
	/// The root word, placed at the origin.
	Root,

	/// Attached to the entry at the given index, which always precedes it.
	Target(usize),

	/// The entry cannot be placed, because its target is missing or an index
	/// is out of bounds.
	Unresolved
}

/// Validate the structure of the given entries.
///
/// # Arguments
///
/// * `entries` - The entries, in declaration order. The first is the root.
///
/// # Returns
///
/// A 2-tuple comprising the structural errors, in declaration order, and the
/// anchor of each entry. Entries that fail only the letter agreement or
/// perpendicularity checks are still anchored, so that downstream checks can
/// run on a best-effort grid.
pub fn validate_structure(
	entries: &[WordEntry]
) -> (Vec<ValidationError>, Vec<Anchor>)
{
	let mut errors = Vec::new();
	let mut anchors = Vec::with_capacity(entries.len());
	// Entries that have passed the existence and bounds checks, by name. A
	// later declaration of the same name shadows an earlier one.
	let mut placed = HashMap::<&str, usize>::new();

	for (index, entry) in entries.iter().enumerate()
	{
		let Some(attachment) = &entry.attachment else {
			anchors.push(Anchor::Root);
			placed.insert(&entry.word, index);
			continue
		};
		let fail = |code, message: String| {
			ValidationError::new(code, message)
				.with_word(entry.word.clone())
				.with_line(entry.line)
		};

		let Some(&target_index) = placed.get(attachment.target.as_str()) else {
			errors.push(fail(
				ErrorCode::TargetNotFound,
				format!(
					"Target word '{}' not placed before '{}'. A word can only \
					attach to a word declared on an earlier line.",
					attachment.target,
					entry.word
				)
			));
			anchors.push(Anchor::Unresolved);
			continue
		};
		let target = &entries[target_index];

		let Some(target_letter) = target.letter(attachment.target_idx) else {
			errors.push(fail(
				ErrorCode::TargetIndexOob,
				format!(
					"Target index {} out of bounds for '{}' (length {})",
					attachment.target_idx,
					target.word,
					target.len()
				)
			));
			anchors.push(Anchor::Unresolved);
			continue
		};

		let Some(word_letter) = entry.letter(attachment.word_idx) else {
			errors.push(fail(
				ErrorCode::WordIndexOob,
				format!(
					"Word index {} out of bounds for '{}' (length {})",
					attachment.word_idx,
					entry.word,
					entry.len()
				)
			));
			anchors.push(Anchor::Unresolved);
			continue
		};

		if target_letter != word_letter
		{
			errors.push(fail(
				ErrorCode::LetterMismatch,
				format!(
					"Letter mismatch: {}[{}]='{}' vs {}[{}]='{}'. \
					TIP: {} should share the letter '{}' at position {}, not '{}'.",
					entry.word,
					attachment.word_idx,
					word_letter,
					target.word,
					attachment.target_idx,
					target_letter,
					entry.word,
					target_letter,
					attachment.word_idx,
					word_letter
				)
			));
		}

		if entry.direction == target.direction
		{
			errors.push(fail(
				ErrorCode::SameDirection,
				format!(
					"'{}' must be perpendicular to '{}' (both are {})",
					entry.word,
					target.word,
					entry.direction
				)
			));
		}

		trace!("{} anchored to {}", entry.word, target.word);
		anchors.push(Anchor::Target(target_index));
		placed.insert(&entry.word, index);
	}
	(errors, anchors)
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
