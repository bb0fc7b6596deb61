//! # Validation
//!
//! The vocabulary of verification outcomes: error codes, their cascade
//! levels, individual errors and warnings, and the aggregate result handed
//! back to the caller.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::cascade::filter_cascading_errors;

////////////////////////////////////////////////////////////////////////////////
//                              Cascade levels.                               //
////////////////////////////////////////////////////////////////////////////////

/// The priority tier of an error. Lower levels are more fundamental, and an
/// error at a lower level can render errors at higher levels mere noise.
#[derive(
	Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd,
	Serialize, Deserialize
)]
#[serde(into = "u8", try_from = "u8")]
pub enum CascadeLevel
{
	/// The board could not be parsed.
	Fatal = 0,

	/// The declared topology is internally inconsistent.
	Critical = 1,

	/// Two words disagree about the content of a cell.
	High = 2,

	/// A word is not in the dictionary.
	Medium = 3,

	/// The board does not match the player's tiles.
	Low = 4
}

impl From<CascadeLevel> for u8
{
	fn from(level: CascadeLevel) -> Self { level as u8 }
}

impl TryFrom<u8> for CascadeLevel
{
	type Error = String;

	fn try_from(level: u8) -> Result<Self, Self::Error>
	{
		match level
		{
			0 => Ok(Self::Fatal),
			1 => Ok(Self::Critical),
			2 => Ok(Self::High),
			3 => Ok(Self::Medium),
			4 => Ok(Self::Low),
			_ => Err(format!("no such cascade level: {}", level))
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                Error codes.                                //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of validation error and warning codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode
{
	EmptyBoard,
	InvalidRoot,
	InvalidLine,
	TargetNotFound,
	TargetIndexOob,
	WordIndexOob,
	LetterMismatch,
	SameDirection,
	GridConflict,
	InvalidWord,
	AccidentalInvalid,
	AccidentalValid,
	TilesNotInHand,
	TilesUnused,

	/// Synthetic summary of errors hidden by the
	/// [cascade filter](filter_cascading_errors).
	AdditionalErrors
}

impl ErrorCode
{
	/// The cascade level at which the code is reported.
	#[must_use]
	pub const fn cascade_level(self) -> CascadeLevel
	{
		match self
		{
			Self::EmptyBoard | Self::InvalidRoot | Self::InvalidLine =>
				CascadeLevel::Fatal,
			Self::TargetNotFound
				| Self::TargetIndexOob
				| Self::WordIndexOob
				| Self::LetterMismatch
				| Self::SameDirection => CascadeLevel::Critical,
			Self::GridConflict => CascadeLevel::High,
			Self::InvalidWord
				| Self::AccidentalInvalid
				| Self::AccidentalValid => CascadeLevel::Medium,
			Self::TilesNotInHand | Self::TilesUnused => CascadeLevel::Low,
			// Summaries adopt the level of the errors they summarize.
			Self::AdditionalErrors => CascadeLevel::Fatal
		}
	}

	/// The symbolic name of the code, as it appears on the wire.
	#[must_use]
	pub const fn as_str(self) -> &'static str
	{
		match self
		{
			Self::EmptyBoard => "EMPTY_BOARD",
			Self::InvalidRoot => "INVALID_ROOT",
			Self::InvalidLine => "INVALID_LINE",
			Self::TargetNotFound => "TARGET_NOT_FOUND",
			Self::TargetIndexOob => "TARGET_INDEX_OOB",
			Self::WordIndexOob => "WORD_INDEX_OOB",
			Self::LetterMismatch => "LETTER_MISMATCH",
			Self::SameDirection => "SAME_DIRECTION",
			Self::GridConflict => "GRID_CONFLICT",
			Self::InvalidWord => "INVALID_WORD",
			Self::AccidentalInvalid => "ACCIDENTAL_INVALID",
			Self::AccidentalValid => "ACCIDENTAL_VALID",
			Self::TilesNotInHand => "TILES_NOT_IN_HAND",
			Self::TilesUnused => "TILES_UNUSED",
			Self::AdditionalErrors => "ADDITIONAL_ERRORS"
		}
	}
}

impl Display for ErrorCode
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// A single validation error or warning.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationError
{
	/// What went wrong.
	pub code: ErrorCode,

	/// Human-readable explanation, possibly with a remediation tip.
	pub message: String,

	/// The word concerned, if any.
	pub word: Option<String>,

	/// The 1-based line of the board body concerned, if any.
	pub line: Option<usize>,

	/// The priority tier of the error.
	pub cascade_level: CascadeLevel
}

impl ValidationError
{
	/// Construct an error at the default cascade level of its code.
	///
	/// # Arguments
	///
	/// * `code` - What went wrong.
	/// * `message` - The explanation.
	pub fn new(code: ErrorCode, message: impl Into<String>) -> Self
	{
		Self {
			code,
			message: message.into(),
			word: None,
			line: None,
			cascade_level: code.cascade_level()
		}
	}

	/// Attach the word concerned.
	pub fn with_word(mut self, word: impl Into<String>) -> Self
	{
		self.word = Some(word.into());
		self
	}

	/// Attach the line concerned.
	pub fn with_line(mut self, line: usize) -> Self
	{
		self.line = Some(line);
		self
	}

	/// Override the cascade level.
	pub fn at_level(mut self, cascade_level: CascadeLevel) -> Self
	{
		self.cascade_level = cascade_level;
		self
	}
}

impl Display for ValidationError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self.line
		{
			Some(line) => write!(f, "{} (line {}): {}", self.code, line, self.message),
			None => write!(f, "{}: {}", self.code, self.message)
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Results.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The outcome of verifying a board specification.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult
{
	/// Whether the board passed every check. This reflects the complete,
	/// unfiltered error list.
	pub valid: bool,

	/// Every error found.
	pub errors: Vec<ValidationError>,

	/// Informational findings that do not affect validity.
	pub warnings: Vec<ValidationError>,

	/// The declared words, in declaration order.
	pub words: Vec<String>,

	/// The rendered grid, if any word was placed.
	pub grid: Option<String>,

	/// The number of occupied cells.
	pub tiles_used: usize,

	/// The letters occupying the grid, sorted.
	pub letters_used: Vec<char>
}

impl ValidationResult
{
	/// Record an additional error. The result is no longer valid.
	pub fn push_error(&mut self, error: ValidationError)
	{
		self.valid = false;
		self.errors.push(error);
	}

	/// Record an additional warning. Validity is unaffected.
	pub fn push_warning(&mut self, warning: ValidationError)
	{
		self.warnings.push(warning);
	}

	/// The errors worth showing to the author, after suppressing cascading
	/// noise.
	///
	/// # Arguments
	///
	/// * `max_errors` - The maximum number of errors to answer, including the
	///   summary of any hidden errors.
	#[must_use]
	pub fn feedback(&self, max_errors: usize) -> Vec<ValidationError>
	{
		filter_cascading_errors(&self.errors, max_errors)
	}
}

#[cfg(test)]
mod test
{
	use crate::validation::{
		CascadeLevel, ErrorCode, ValidationError, ValidationResult
	};

	#[test]
	fn test_cascade_levels()
	{
		assert_eq!(u8::from(CascadeLevel::Fatal), 0);
		assert_eq!(u8::from(CascadeLevel::Critical), 1);
		assert_eq!(u8::from(CascadeLevel::High), 2);
		assert_eq!(u8::from(CascadeLevel::Medium), 3);
		assert_eq!(u8::from(CascadeLevel::Low), 4);
		assert_eq!(CascadeLevel::try_from(3), Ok(CascadeLevel::Medium));
		assert!(CascadeLevel::try_from(5).is_err());
		assert_eq!(ErrorCode::InvalidLine.cascade_level(), CascadeLevel::Fatal);
		assert_eq!(
			ErrorCode::SameDirection.cascade_level(),
			CascadeLevel::Critical
		);
		assert_eq!(ErrorCode::GridConflict.cascade_level(), CascadeLevel::High);
		assert_eq!(
			ErrorCode::AccidentalValid.cascade_level(),
			CascadeLevel::Medium
		);
		assert_eq!(ErrorCode::TilesUnused.cascade_level(), CascadeLevel::Low);
	}

	#[test]
	fn test_serialization()
	{
		let error = ValidationError::new(ErrorCode::TargetIndexOob, "oops")
			.with_word("DOG")
			.with_line(2);
		let json = serde_json::to_value(&error).unwrap();
		assert_eq!(json["code"], "TARGET_INDEX_OOB");
		assert_eq!(json["cascade_level"], 1);
		assert_eq!(json["word"], "DOG");
		assert_eq!(json["line"], 2);
		let back: ValidationError = serde_json::from_value(json).unwrap();
		assert_eq!(back, error);
		assert_eq!(error.to_string(), "TARGET_INDEX_OOB (line 2): oops");
	}

	#[test]
	fn test_push()
	{
		let mut result = ValidationResult { valid: true, ..Default::default() };
		result.push_warning(ValidationError::new(ErrorCode::TilesUnused, "Q"));
		assert!(result.valid);
		result.push_error(ValidationError::new(ErrorCode::TilesNotInHand, "Z"));
		assert!(!result.valid);
		assert_eq!(result.errors.len(), 1);
		assert_eq!(result.warnings.len(), 1);
	}
}
