//! # Cascade filtering
//!
//! A single mistake in a board specification tends to cause a flood of
//! downstream errors: a letter mismatch misplaces a word, which then collides
//! with its neighbours and forms gibberish runs. Showing all of them buries
//! the actual mistake, so the errors are filtered by
//! [cascade level](CascadeLevel) before being shown to the author:
//!
//! * Any [fatal](CascadeLevel::Fatal) error: show only fatal errors.
//! * Any [critical](CascadeLevel::Critical) error: show critical errors,
//!   [`INVALID_WORD`](ErrorCode::InvalidWord) errors, and
//!   [low](CascadeLevel::Low) (tile) errors.
//! * Any [high](CascadeLevel::High) error: show high, medium and low errors.
//! * Otherwise: show everything.
//!
//! Filtering only affects what is displayed. The validity of a board is
//! always decided by the complete error list.

use log::trace;

use crate::validation::{CascadeLevel, ErrorCode, ValidationError};

/// The default maximum number of errors to display.
pub const DEFAULT_MAX_ERRORS: usize = 5;

/// Filter out errors that are likely consequences of more fundamental errors,
/// then cap the number of errors. The relative order of the surviving errors
/// is preserved. A synthetic [`ADDITIONAL_ERRORS`](ErrorCode::AdditionalErrors)
/// summary always survives, so filtering an already filtered list of at most
/// `max_errors` errors answers it unchanged.
///
/// # Arguments
///
/// * `errors` - The complete error list.
/// * `max_errors` - The maximum number of errors to answer. If the filtered
///   list is longer, only the first `max_errors - 1` errors are kept, followed
///   by a summary of the rest.
///
/// # Returns
///
/// The errors worth displaying.
#[must_use]
pub fn filter_cascading_errors(
	errors: &[ValidationError],
	max_errors: usize
) -> Vec<ValidationError>
{
	let has = |level| errors.iter().any(|e| e.cascade_level == level);
	let show: fn(&ValidationError) -> bool =
		if has(CascadeLevel::Fatal)
		{
			|e| e.cascade_level == CascadeLevel::Fatal
		}
		else if has(CascadeLevel::Critical)
		{
			|e| match e.cascade_level
			{
				CascadeLevel::Critical | CascadeLevel::Low => true,
				CascadeLevel::Medium => e.code == ErrorCode::InvalidWord,
				_ => false
			}
		}
		else if has(CascadeLevel::High)
		{
			|e| e.cascade_level >= CascadeLevel::High
		}
		else
		{
			|_| true
		};
	let shown = errors.iter()
		.filter(|e| e.code == ErrorCode::AdditionalErrors || show(e))
		.cloned()
		.collect::<Vec<_>>();
	trace!("showing {} of {} errors", shown.len(), errors.len());
	cap(shown, max_errors)
}

/// Cap the number of errors, summarizing the excess.
fn cap(mut errors: Vec<ValidationError>, max_errors: usize) -> Vec<ValidationError>
{
	if errors.len() <= max_errors
	{
		return errors
	}
	let level = errors[0].cascade_level;
	let kept = max_errors.saturating_sub(1);
	let hidden = errors.len() - kept;
	errors.truncate(kept);
	errors.push(
		ValidationError::new(
			ErrorCode::AdditionalErrors,
			format!(
				"... and {} more similar error{}. Fix the above first.",
				hidden,
				if hidden > 1 { "s" } else { "" }
			)
		)
		.at_level(level)
	);
	errors
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		cascade::{filter_cascading_errors, DEFAULT_MAX_ERRORS},
		validation::{CascadeLevel, ErrorCode, ValidationError}
	};

	/// Construct an error at the default level of its code.
	fn error(code: ErrorCode) -> ValidationError
	{
		ValidationError::new(code, code.as_str())
	}

	/// Filter with the default cap, answering just the codes.
	fn codes(errors: &[ValidationError]) -> Vec<ErrorCode>
	{
		filter_cascading_errors(errors, DEFAULT_MAX_ERRORS)
			.into_iter()
			.map(|e| e.code)
			.collect()
	}

	#[test]
	fn test_empty()
	{
		assert!(filter_cascading_errors(&[], DEFAULT_MAX_ERRORS).is_empty());
	}

	/// Fatal errors hide everything else, tile errors included.
	#[test]
	fn test_fatal()
	{
		let errors = [
			error(ErrorCode::TilesNotInHand),
			error(ErrorCode::InvalidRoot),
			error(ErrorCode::LetterMismatch),
			error(ErrorCode::GridConflict),
			error(ErrorCode::InvalidWord)
		];
		assert_eq!(codes(&errors), vec![ErrorCode::InvalidRoot]);
	}

	/// Structural errors hide grid conflicts and accidental words, but not
	/// intentional invalid words or tile errors.
	#[test]
	fn test_critical()
	{
		let errors = [
			error(ErrorCode::LetterMismatch),
			error(ErrorCode::GridConflict),
			error(ErrorCode::AccidentalInvalid),
			error(ErrorCode::InvalidWord),
			error(ErrorCode::TilesNotInHand)
		];
		assert_eq!(
			codes(&errors),
			vec![
				ErrorCode::LetterMismatch,
				ErrorCode::InvalidWord,
				ErrorCode::TilesNotInHand
			]
		);
	}

	/// Grid conflicts hide nothing below them.
	#[test]
	fn test_high()
	{
		let errors = [
			error(ErrorCode::GridConflict),
			error(ErrorCode::InvalidWord),
			error(ErrorCode::AccidentalInvalid),
			error(ErrorCode::TilesNotInHand)
		];
		assert_eq!(codes(&errors), errors.map(|e| e.code).to_vec());
	}

	#[test]
	fn test_low_priority_only()
	{
		let errors = [
			error(ErrorCode::InvalidWord),
			error(ErrorCode::AccidentalInvalid),
			error(ErrorCode::TilesUnused)
		];
		assert_eq!(codes(&errors).len(), 3);
	}

	/// The relative order of the input survives.
	#[test]
	fn test_order()
	{
		let errors = [
			error(ErrorCode::TilesNotInHand),
			error(ErrorCode::InvalidWord),
			error(ErrorCode::SameDirection)
		];
		assert_eq!(codes(&errors), errors.map(|e| e.code).to_vec());
	}

	/// Excess errors are summarized.
	#[test]
	fn test_cap()
	{
		let errors = vec![error(ErrorCode::LetterMismatch); 10];
		let filtered = filter_cascading_errors(&errors, 5);
		assert_eq!(filtered.len(), 5);
		let summary = filtered.last().unwrap();
		assert_eq!(summary.code, ErrorCode::AdditionalErrors);
		assert_eq!(summary.cascade_level, CascadeLevel::Critical);
		assert_eq!(
			summary.message,
			"... and 6 more similar errors. Fix the above first."
		);
		// Exactly the maximum needs no summary.
		let filtered = filter_cascading_errors(&errors[..5], 5);
		assert_eq!(filtered, errors[..5].to_vec());
		// One more than the maximum hides two.
		let filtered = filter_cascading_errors(&errors[..6], 5);
		assert_eq!(filtered.len(), 5);
		assert!(filtered[4].message.contains("2 more similar errors"));
	}

	/// A zero cap leaves only the summary, which may hide a single error.
	#[test]
	fn test_zero_cap()
	{
		let errors = vec![error(ErrorCode::GridConflict)];
		let filtered = filter_cascading_errors(&errors, 0);
		assert_eq!(filtered.len(), 1);
		assert_eq!(filtered[0].code, ErrorCode::AdditionalErrors);
		assert_eq!(filtered[0].cascade_level, CascadeLevel::High);
		assert_eq!(
			filtered[0].message,
			"... and 1 more similar error. Fix the above first."
		);
	}

	/// Filtering a filtered list changes nothing.
	#[test]
	fn test_idempotence()
	{
		let mut errors = vec![error(ErrorCode::InvalidWord)];
		errors.extend(vec![error(ErrorCode::WordIndexOob); 6]);
		errors.push(error(ErrorCode::AccidentalInvalid));
		errors.push(error(ErrorCode::TilesNotInHand));
		let once = filter_cascading_errors(&errors, 5);
		assert_eq!(once.len(), 5);
		assert_eq!(once[0].code, ErrorCode::InvalidWord);
		assert_eq!(once[4].code, ErrorCode::AdditionalErrors);
		assert_eq!(once[4].cascade_level, CascadeLevel::Medium);
		let twice = filter_cascading_errors(&once, 5);
		assert_eq!(twice, once);
	}
}
