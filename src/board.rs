//! # Board
//!
//! The vocabulary of a board specification: word placements as declared by
//! the author, and positions as resolved onto the grid.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                Directions.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The orientation of a word on the grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Direction
{
	/// Left to right, along a row.
	#[serde(rename = "H")]
	Horizontal,

	/// Top to bottom, along a column.
	#[serde(rename = "V")]
	Vertical
}

impl Direction
{
	/// Parse a direction letter, ignoring case.
	///
	/// # Returns
	///
	/// The direction, or `None` if the letter is neither `H` nor `V`.
	#[must_use]
	pub fn from_letter(letter: char) -> Option<Self>
	{
		match letter.to_ascii_uppercase()
		{
			'H' => Some(Self::Horizontal),
			'V' => Some(Self::Vertical),
			_ => None
		}
	}

	/// The unit step taken from one letter to the next, as `(dx, dy)`.
	#[inline]
	#[must_use]
	pub const fn step(self) -> (i32, i32)
	{
		match self
		{
			Self::Horizontal => (1, 0),
			Self::Vertical => (0, 1)
		}
	}
}

impl Display for Direction
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Horizontal => write!(f, "H"),
			Self::Vertical => write!(f, "V")
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Entries.                                  //
////////////////////////////////////////////////////////////////////////////////

/// How a non-root word attaches to an earlier word: the letter at
/// `word_idx` of this word is shared with the letter at `target_idx` of
/// `target`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Attachment
{
	/// The name of the earlier word.
	pub target: String,

	/// The 0-based offset of the shared letter within the target.
	pub target_idx: usize,

	/// The 0-based offset of the shared letter within this word.
	pub word_idx: usize
}

/// A single declared word placement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WordEntry
{
	/// The word, in uppercase ASCII letters.
	pub word: String,

	/// The orientation of the word.
	pub direction: Direction,

	/// The attachment to an earlier word. Only the root has none.
	#[serde(flatten)]
	pub attachment: Option<Attachment>,

	/// The 1-based line of the board body that declared the word, counting
	/// only non-blank lines.
	pub line: usize
}

impl WordEntry
{
	/// Construct the root entry.
	pub fn root(word: impl Into<String>, direction: Direction) -> Self
	{
		Self { word: word.into(), direction, attachment: None, line: 1 }
	}

	/// Construct an attached entry.
	///
	/// # Arguments
	///
	/// * `word` - The word.
	/// * `word_idx` - The offset of the shared letter within `word`.
	/// * `target` - The name of the earlier word.
	/// * `target_idx` - The offset of the shared letter within `target`.
	/// * `direction` - The orientation of `word`.
	/// * `line` - The declaring line.
	pub fn attached(
		word: impl Into<String>,
		word_idx: usize,
		target: impl Into<String>,
		target_idx: usize,
		direction: Direction,
		line: usize
	) -> Self
	{
		Self {
			word: word.into(),
			direction,
			attachment: Some(Attachment {
				target: target.into(),
				target_idx,
				word_idx
			}),
			line
		}
	}

	/// Check whether this is the root entry.
	#[inline]
	#[must_use]
	pub fn is_root(&self) -> bool { self.attachment.is_none() }

	/// The length of the word, in letters.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.word.len() }

	/// Always `false`; the parser never produces empty words.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.word.is_empty() }

	/// The letter at the given offset, if any.
	#[inline]
	#[must_use]
	pub fn letter(&self, index: usize) -> Option<char>
	{
		self.word.as_bytes().get(index).map(|&b| b as char)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Positions.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The resolved placement of a word: the cell of its first letter and its
/// orientation. `x` grows rightwards and `y` grows downwards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Position
{
	pub x: i32,
	pub y: i32,
	pub direction: Direction
}

impl Position
{
	/// The cell occupied by the letter at the given offset.
	#[inline]
	#[must_use]
	pub fn cell(&self, offset: usize) -> (i32, i32)
	{
		let (dx, dy) = self.direction.step();
		let offset = offset as i32;
		(self.x + dx * offset, self.y + dy * offset)
	}
}
