//! # Grid
//!
//! Herein are position resolution, grid assembly, grid rendering, and the
//! discovery of every word physically present on the grid.

use std::collections::{BTreeSet, HashMap};

use log::trace;

use crate::{
	board::{Position, WordEntry},
	structure::Anchor,
	validation::{ErrorCode, ValidationError}
};

////////////////////////////////////////////////////////////////////////////////
//                            Position resolution.                            //
////////////////////////////////////////////////////////////////////////////////

/// Compute the position of every anchored entry. The root sits at the
/// origin; every other entry is positioned relative to its target, which
/// always precedes it, so a single forward pass suffices.
///
/// # Arguments
///
/// * `entries` - The entries, in declaration order.
/// * `anchors` - The anchor of each entry, as determined by
///   [structural validation](crate::structure::validate_structure).
///
/// # Returns
///
/// The position of each entry, or `None` for unresolved entries.
pub fn compute_positions(
	entries: &[WordEntry],
	anchors: &[Anchor]
) -> Vec<Option<Position>>
{
	let mut positions = Vec::<Option<Position>>::with_capacity(entries.len());
	for (entry, anchor) in entries.iter().zip(anchors)
	{
		let position = match (*anchor, &entry.attachment)
		{
			(Anchor::Root, _) =>
				Some(Position { x: 0, y: 0, direction: entry.direction }),
			(Anchor::Target(target), Some(attachment)) =>
				positions.get(target).copied().flatten().map(|target| {
					// Find the cell of the shared letter, then back up along
					// this word's own axis.
					let (shared_x, shared_y) =
						target.cell(attachment.target_idx);
					let (dx, dy) = entry.direction.step();
					let back = attachment.word_idx as i32;
					Position {
						x: shared_x - dx * back,
						y: shared_y - dy * back,
						direction: entry.direction
					}
				}),
			_ => None
		};
		positions.push(position);
	}
	positions
}

////////////////////////////////////////////////////////////////////////////////
//                                   Grid.                                    //
////////////////////////////////////////////////////////////////////////////////

/// A sparse grid of letters, keyed by `(x, y)`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct Grid(HashMap<(i32, i32), char>);

/// The inclusive bounds of the occupied cells of a [`Grid`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Bounds
{
	min_x: i32,
	max_x: i32,
	min_y: i32,
	max_y: i32
}

impl Grid
{
	/// Construct an empty grid.
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Check if no cell is occupied.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// The number of occupied cells.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.0.len() }

	/// The letter in the given cell, if any.
	#[inline]
	#[must_use]
	pub fn get(&self, x: i32, y: i32) -> Option<char>
	{
		self.0.get(&(x, y)).copied()
	}

	/// Write a letter into a cell, unless the cell is already occupied.
	///
	/// # Returns
	///
	/// The letter already occupying the cell, if any. The grid is unchanged
	/// in that case.
	pub fn place(&mut self, x: i32, y: i32, letter: char) -> Option<char>
	{
		match self.0.get(&(x, y))
		{
			Some(&existing) => Some(existing),
			None =>
			{
				self.0.insert((x, y), letter);
				None
			}
		}
	}

	/// The letters occupying the grid, sorted.
	#[must_use]
	pub fn letters(&self) -> Vec<char>
	{
		let mut letters = self.0.values().copied().collect::<Vec<_>>();
		letters.sort_unstable();
		letters
	}

	/// Compute the bounding box of the occupied cells.
	fn bounds(&self) -> Option<Bounds>
	{
		let mut cells = self.0.keys();
		let &(x, y) = cells.next()?;
		let init = Bounds { min_x: x, max_x: x, min_y: y, max_y: y };
		Some(cells.fold(init, |b, &(x, y)| Bounds {
			min_x: b.min_x.min(x),
			max_x: b.max_x.max(x),
			min_y: b.min_y.min(y),
			max_y: b.max_y.max(y)
		}))
	}

	/// Render the grid as text: one line per row of the bounding box, top to
	/// bottom, with `.` for empty cells.
	///
	/// # Returns
	///
	/// The rendered grid, or an empty string for an empty grid.
	#[must_use]
	pub fn render(&self) -> String
	{
		let Some(b) = self.bounds() else { return String::new() };
		(b.min_y ..= b.max_y)
			.map(|y| {
				(b.min_x ..= b.max_x)
					.map(|x| self.get(x, y).unwrap_or('.'))
					.collect::<String>()
			})
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// Find every maximal horizontal or vertical run of 2 or more letters,
	/// whether or not it was declared.
	///
	/// # Returns
	///
	/// The distinct words on the grid.
	#[must_use]
	pub fn words(&self) -> BTreeSet<String>
	{
		let mut words = BTreeSet::new();
		let Some(b) = self.bounds() else { return words };
		let mut run = String::new();
		// Scan one past the far edge, so that the last run is always flushed.
		for y in b.min_y ..= b.max_y
		{
			for x in b.min_x ..= b.max_x + 1
			{
				Self::extend_run(&mut words, &mut run, self.get(x, y));
			}
		}
		for x in b.min_x ..= b.max_x
		{
			for y in b.min_y ..= b.max_y + 1
			{
				Self::extend_run(&mut words, &mut run, self.get(x, y));
			}
		}
		words
	}

	/// Extend the current run with a cell, flushing the run on a gap.
	fn extend_run(
		words: &mut BTreeSet<String>,
		run: &mut String,
		cell: Option<char>
	) {
		match cell
		{
			Some(letter) => run.push(letter),
			None =>
			{
				if run.len() >= 2
				{
					words.insert(run.clone());
				}
				run.clear();
			}
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                              Grid assembly.                                //
////////////////////////////////////////////////////////////////////////////////

/// Lay every positioned entry onto a grid, in declaration order. When two
/// words disagree about a cell, the first writer keeps the cell and the
/// conflict is reported against the later word.
///
/// # Arguments
///
/// * `entries` - The entries, in declaration order.
/// * `positions` - The position of each entry, if resolved.
///
/// # Returns
///
/// A 2-tuple comprising the grid, complete even in the presence of
/// conflicts, and the conflicts.
pub fn build_grid(
	entries: &[WordEntry],
	positions: &[Option<Position>]
) -> (Grid, Vec<ValidationError>)
{
	let mut grid = Grid::new();
	let mut errors = Vec::new();
	for (entry, position) in entries.iter().zip(positions)
	{
		let Some(position) = position else { continue };
		for (offset, letter) in entry.word.chars().enumerate()
		{
			let (x, y) = position.cell(offset);
			match grid.place(x, y, letter)
			{
				Some(existing) if existing != letter =>
				{
					trace!("conflict at ({}, {}): {} vs {}", x, y, existing, letter);
					errors.push(
						ValidationError::new(
							ErrorCode::GridConflict,
							format!(
								"Cell conflict at ({}, {}): existing '{}' vs new \
								'{}' from '{}'",
								x,
								y,
								existing,
								letter,
								entry.word
							)
						)
						.with_word(entry.word.clone())
						.with_line(entry.line)
					);
				},
				_ => {}
			}
		}
	}
	(grid, errors)
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
