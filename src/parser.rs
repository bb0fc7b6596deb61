//! # Parser
//!
//! Herein is the parser for board specifications. A specification is a
//! sequence of non-blank lines, optionally wrapped in `<board>` tags:
//!
//! ```text
//! ROOT_WORD (H|V)
//! WORD[wordIdx] @ TARGET[targetIdx] (H|V)
//! ...
//! ```
//!
//! Everything is case-insensitive and normalized to uppercase. A bad root
//! line is fatal, but a bad later line is merely skipped, so that the author
//! learns about every malformed line at once.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::{
	board::{Direction, WordEntry},
	validation::{ErrorCode, ValidationError}
};

/// Matches the content of the first `<board>…</board>` pair.
static BOARD_TAGS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)<board>(.*?)</board>").unwrap());

/// Matches the root line: `WORD H`.
static ROOT_LINE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\s+([HhVv])$").unwrap());

/// Matches an attached line: `WORD[j] @ TARGET[i] V`.
static ATTACHED_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^([A-Za-z]+)\[([0-9]+)\]\s*@\s*([A-Za-z]+)\[([0-9]+)\]\s+([HhVv])$"
	)
	.unwrap()
});

/// Extract the body of a board specification. If the text contains a
/// `<board>…</board>` pair, the (trimmed) content of the first pair is the
/// body; otherwise, the whole trimmed text is.
///
/// # Arguments
///
/// * `spec` - The raw specification.
///
/// # Returns
///
/// The body.
#[must_use]
pub fn extract_board_content(spec: &str) -> &str
{
	match BOARD_TAGS.captures(spec).and_then(|c| c.get(1))
	{
		Some(body) => body.as_str().trim(),
		None => spec.trim()
	}
}

/// Parse a board specification into word entries, collecting errors as they
/// arise.
///
/// # Arguments
///
/// * `spec` - The raw specification.
///
/// # Returns
///
/// A 2-tuple comprising the entries, in declaration order, and the parse
/// errors. If the body is empty or the root line is malformed, there are no
/// entries and exactly one error.
pub fn parse_board(spec: &str) -> (Vec<WordEntry>, Vec<ValidationError>)
{
	let lines = extract_board_content(spec)
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>();
	let mut entries = Vec::with_capacity(lines.len());
	let mut errors = Vec::new();

	let Some(&root_line) = lines.first() else {
		errors.push(ValidationError::new(
			ErrorCode::EmptyBoard,
			"Board specification is empty. Start with a root line such as: CAT H"
		));
		return (entries, errors)
	};
	match parse_root(root_line)
	{
		Some(root) => entries.push(root),
		None =>
		{
			errors.push(
				ValidationError::new(
					ErrorCode::InvalidRoot,
					format!(
						"Invalid root line format: '{}'. The first line must \
						be a word followed by H or V. Example: CAT H",
						root_line
					)
				)
				.with_line(1)
			);
			return (entries, errors)
		}
	}

	for (index, &line) in lines.iter().enumerate().skip(1)
	{
		let line_number = index + 1;
		match parse_attached(line, line_number)
		{
			Some(entry) =>
			{
				trace!("line {}: {:?}", line_number, entry);
				entries.push(entry);
			},
			None => errors.push(
				ValidationError::new(
					ErrorCode::InvalidLine,
					format!(
						"Invalid line format: '{}'. Expected \
						WORD[index] @ TARGET[index] H|V. Example: TAR[0] @ CAT[2] V",
						line
					)
				)
				.with_line(line_number)
			)
		}
	}
	(entries, errors)
}

/// Parse the root line.
fn parse_root(line: &str) -> Option<WordEntry>
{
	let captures = ROOT_LINE.captures(line)?;
	let direction = Direction::from_letter(captures[2].chars().next()?)?;
	Some(WordEntry::root(captures[1].to_ascii_uppercase(), direction))
}

/// Parse a line that attaches a word to an earlier word. Indices too large to
/// represent saturate, so that they are reported as out of bounds.
fn parse_attached(line: &str, line_number: usize) -> Option<WordEntry>
{
	let captures = ATTACHED_LINE.captures(line)?;
	let word_idx = captures[2].parse().unwrap_or(usize::MAX);
	let target_idx = captures[4].parse().unwrap_or(usize::MAX);
	let direction = Direction::from_letter(captures[5].chars().next()?)?;
	Some(WordEntry::attached(
		captures[1].to_ascii_uppercase(),
		word_idx,
		captures[3].to_ascii_uppercase(),
		target_idx,
		direction,
		line_number
	))
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
