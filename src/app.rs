//! # Application
//!
//! The interactive board checker: a multi-line editor for a board
//! specification, alongside the grid it describes and the feedback that an
//! author would receive. Every edit re-verifies the board.

use std::{io, time::Duration};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::trace;
use ratatui::{
	buffer::Buffer, layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Color, Style, Stylize},
	text::{Line, Span},
	widgets::{
		block::{Position, Title},
		Block, Borders, List, ListItem, Paragraph, Widget
	},
	Frame
};

use banana_verifier::{validation::ValidationResult, verify::Verifier};

use crate::tui::Tui;

////////////////////////////////////////////////////////////////////////////////
//                                Application.                                //
////////////////////////////////////////////////////////////////////////////////

/// The application state.
#[must_use]
pub struct App
{
	/// Whether the application is running.
	state: ExecutionState,

	/// The verifier for the board.
	verifier: Verifier,

	/// The maximum number of errors to display.
	max_errors: usize,

	/// The lines of the board specification. Never empty.
	lines: Vec<String>,

	/// The coordinates of the cursor. The first element is the column, in
	/// characters, and the second element is the row. The origin is the start
	/// of the first line.
	cursor: (usize, usize),

	/// The verification result for the current content of the editor.
	result: ValidationResult
}

// Public interface.
impl App
{
	/// Create a new application state, with an empty board.
	///
	/// # Arguments
	///
	/// * `verifier` - The verifier for the board.
	/// * `max_errors` - The maximum number of errors to display.
	///
	/// # Returns
	///
	/// The new application state.
	pub fn new(verifier: Verifier, max_errors: usize) -> Self
	{
		let mut app = Self {
			state: ExecutionState::Editing,
			verifier,
			max_errors,
			lines: vec![String::new()],
			cursor: (0, 0),
			result: ValidationResult::default()
		};
		app.reverify();
		app
	}

	/// Run the application until the user exits, rendering the frame and
	/// processing events.
	///
	/// # Arguments
	///
	/// * `tui` - The text-based user interface (TUI).
	///
	/// # Returns
	///
	/// The final board specification.
	///
	/// # Errors
	///
	/// Any error that occurs while running the application.
	pub fn run(mut self, tui: &mut Tui) -> io::Result<String>
	{
		while self.is_running()
		{
			tui.draw(|frame| self.render_frame(frame))?;
			self.process_event()?;
		}
		Ok(self.spec())
	}

	/// Check if the application is running.
	///
	/// # Returns
	///
	/// `true` if the application is running, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool
	{
		matches!(self.state, ExecutionState::Editing)
	}

	/// The board specification in the editor.
	#[must_use]
	pub fn spec(&self) -> String
	{
		self.lines.join("\n")
	}
}

// Private implementation details.
impl App
{
	/// Verify the content of the editor, replacing the cached result.
	fn reverify(&mut self)
	{
		self.result = self.verifier.verify(&self.spec());
		trace!(
			"reverified: valid={}, {} errors",
			self.result.valid,
			self.result.errors.len()
		);
	}

	/// The current line.
	#[inline]
	#[must_use]
	fn current_line(&self) -> &str { &self.lines[self.cursor.1] }

	/// The number of characters in the current line.
	#[inline]
	#[must_use]
	fn current_len(&self) -> usize { self.current_line().chars().count() }

	/// The byte offset of the cursor within the current line.
	#[must_use]
	fn byte_offset(&self) -> usize
	{
		let line = self.current_line();
		line.char_indices()
			.nth(self.cursor.0)
			.map_or(line.len(), |(offset, _)| offset)
	}

	/// Move the cursor vertically, clamping the column to the new line.
	///
	/// # Arguments
	///
	/// * `dy` - The change in the row.
	fn move_row(&mut self, dy: isize)
	{
		let Some(row) = self.cursor.1.checked_add_signed(dy) else { return };
		if row < self.lines.len()
		{
			self.cursor.1 = row;
			self.cursor.0 = self.cursor.0.min(self.current_len());
		}
	}

	/// Move the cursor left, wrapping to the end of the previous line.
	fn move_left(&mut self)
	{
		if self.cursor.0 > 0
		{
			self.cursor.0 -= 1;
		}
		else if self.cursor.1 > 0
		{
			self.cursor.1 -= 1;
			self.cursor.0 = self.current_len();
		}
	}

	/// Move the cursor right, wrapping to the start of the next line.
	fn move_right(&mut self)
	{
		if self.cursor.0 < self.current_len()
		{
			self.cursor.0 += 1;
		}
		else if self.cursor.1 + 1 < self.lines.len()
		{
			self.cursor = (0, self.cursor.1 + 1);
		}
	}

	/// Insert a character at the cursor.
	///
	/// # Arguments
	///
	/// * `c` - The character to insert.
	fn insert(&mut self, c: char)
	{
		let offset = self.byte_offset();
		self.lines[self.cursor.1].insert(offset, c);
		self.cursor.0 += 1;
		self.reverify();
	}

	/// Split the current line at the cursor.
	fn split_line(&mut self)
	{
		let offset = self.byte_offset();
		let rest = self.lines[self.cursor.1].split_off(offset);
		self.lines.insert(self.cursor.1 + 1, rest);
		self.cursor = (0, self.cursor.1 + 1);
		self.reverify();
	}

	/// Delete the character before the cursor. At the start of a line, join
	/// the line to the previous one instead.
	fn delete(&mut self)
	{
		if self.cursor.0 > 0
		{
			self.cursor.0 -= 1;
			let offset = self.byte_offset();
			self.lines[self.cursor.1].remove(offset);
		}
		else if self.cursor.1 > 0
		{
			let line = self.lines.remove(self.cursor.1);
			self.cursor.1 -= 1;
			self.cursor.0 = self.current_len();
			self.lines[self.cursor.1].push_str(&line);
		}
		else
		{
			return
		}
		self.reverify();
	}

	/// Clear the content of the current line.
	fn clear(&mut self)
	{
		self.lines[self.cursor.1].clear();
		self.cursor.0 = 0;
		self.reverify();
	}

	/// Clear the whole board.
	fn clear_all(&mut self)
	{
		self.lines = vec![String::new()];
		self.cursor = (0, 0);
		self.reverify();
	}

	/// Split the frame into the editor, grid, and feedback areas.
	///
	/// # Arguments
	///
	/// * `area` - The frame area.
	///
	/// # Returns
	///
	/// The editor, grid, and feedback areas, respectively.
	fn layout(area: Rect) -> (Rect, Rect, Rect)
	{
		let outer = Layout::default()
			.direction(Direction::Horizontal)
			.margin(1)
			.constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
			.split(area);
		let right = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
			.split(outer[1]);
		(outer[0], right[0], right[1])
	}

	/// Render the application frame, placing the terminal cursor in the
	/// editor.
	///
	/// # Arguments
	///
	/// * `frame` - The target frame.
	fn render_frame(&self, frame: &mut Frame)
	{
		let area = frame.area();
		frame.render_widget(self, area);
		let (editor, _, _) = Self::layout(area);
		let inner = Block::default().borders(Borders::ALL).inner(editor);
		if inner.width > 0 && inner.height > 0
		{
			let (x, y) = Self::cursor_offset(self.cursor, inner);
			frame.set_cursor_position((inner.x + x, inner.y + y));
		}
	}

	/// Compute the offset of the terminal cursor within the editor, clamped
	/// to the editor.
	///
	/// # Arguments
	///
	/// * `cursor` - The column and row of the cursor.
	/// * `inner` - The inner area of the editor, which must not be empty.
	///
	/// # Returns
	///
	/// The column and row offsets.
	fn cursor_offset(cursor: (usize, usize), inner: Rect) -> (u16, u16)
	{
		let clamp = |n: usize, limit: u16| {
			u16::try_from(n).unwrap_or(u16::MAX).min(limit.saturating_sub(1))
		};
		(clamp(cursor.0, inner.width), clamp(cursor.1, inner.height))
	}

	/// Render the editor.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_editor(&self, area: Rect, buf: &mut Buffer)
	{
		let text = self.lines.iter()
			.map(|line| Line::from(line.as_str()))
			.collect::<Vec<_>>();
		Paragraph::new(text)
			.block(
				Block::default()
					.borders(Borders::ALL)
					.border_style(Style::default().fg(Color::White))
					.title(
						Title::default()
							.content("Board")
							.position(Position::Top)
							.alignment(Alignment::Center)
					)
					.title(
						Title::default()
							.content("⎋ – exit".yellow().bold())
							.position(Position::Top)
							.alignment(Alignment::Left)
					)
					.title(
						Title::default()
							.content(
								"\
									←↑↓→ - move \
									↵ - split \
									⌫ - delete \
									⌦ - clear line \
									⇧⌦ - clear all\
								".cyan()
							)
							.position(Position::Bottom)
							.alignment(Alignment::Center)
					)
			)
			.render(area, buf);
	}

	/// Render the grid described by the board.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_grid(&self, area: Rect, buf: &mut Buffer)
	{
		let grid = self.result.grid.as_deref().unwrap_or("");
		let tiles = format!("{} tiles", self.result.tiles_used);
		Paragraph::new(grid)
			.block(
				Block::default()
					.borders(Borders::ALL)
					.title(
						Title::default()
							.content("Grid")
							.alignment(Alignment::Center)
					)
					.title(
						Title::default()
							.content(tiles.cyan())
							.position(Position::Bottom)
							.alignment(Alignment::Right)
					)
			)
			.style(Style::default().fg(Color::White))
			.render(area, buf);
	}

	/// Render the filtered errors and the warnings.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_feedback(&self, area: Rect, buf: &mut Buffer)
	{
		let errors = self.result.feedback(self.max_errors);
		let mut items = errors.iter()
			.map(|e| {
				ListItem::new(e.to_string())
					.style(Style::default().fg(Color::Red))
			})
			.collect::<Vec<_>>();
		items.extend(
			self.result.warnings.iter()
				.map(|w| {
					ListItem::new(w.to_string())
						.style(Style::default().fg(Color::Yellow))
				})
		);
		let status =
			if self.result.valid { Span::from("valid").green().bold() }
			else { Span::from("invalid").red().bold() };
		List::new(items)
			.block(
				Block::default()
					.borders(Borders::ALL)
					.title(
						Title::default()
							.content("Feedback")
							.alignment(Alignment::Center)
					)
					.title(
						Title::default()
							.content(status)
							.alignment(Alignment::Right)
					)
			)
			.render(area, buf);
	}

	/// Process events. Block briefly, so that the frame is redrawn
	/// regularly, e.g., after the terminal is resized.
	///
	/// # Errors
	///
	/// Any error that occurs while processing events.
	fn process_event(&mut self) -> io::Result<()>
	{
		if poll(Duration::from_millis(50))?
		{
			match read()?
			{
				Event::Key(event) if event.kind == KeyEventKind::Press =>
					self.process_key_event(event),
				_ => {}
			}
		}
		Ok(())
	}

	/// Process a key event:
	///
	/// * Escape - Exit the application.
	/// * Up, Down, Left, Right - Move the cursor.
	/// * Home, End - Move the cursor to the start or end of the line.
	/// * Enter - Split the line at the cursor.
	/// * Backspace - Delete the character before the cursor, joining lines at
	///   the start of a line.
	/// * Delete - Clear the current line.
	/// * Shift+Delete - Clear the board.
	/// * Other characters - Insert the character at the cursor.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event(&mut self, event: KeyEvent)
	{
		if !self.is_running()
		{
			return
		}
		match event.code
		{
			KeyCode::Esc => self.state = ExecutionState::Exiting,
			KeyCode::Up => self.move_row(-1),
			KeyCode::Down => self.move_row(1),
			KeyCode::Left => self.move_left(),
			KeyCode::Right => self.move_right(),
			KeyCode::Home => self.cursor.0 = 0,
			KeyCode::End => self.cursor.0 = self.current_len(),
			KeyCode::Enter => self.split_line(),
			KeyCode::Backspace => self.delete(),
			KeyCode::Delete if event.modifiers.contains(KeyModifiers::SHIFT) =>
				self.clear_all(),
			KeyCode::Delete => self.clear(),
			KeyCode::Char(c)
				if !c.is_control()
					&& !event.modifiers.contains(KeyModifiers::CONTROL) =>
				self.insert(c),
			_ => {}
		}
	}
}

impl Widget for &App
{
	fn render(self, area: Rect, buf: &mut Buffer)
	{
		let (editor, grid, feedback) = App::layout(area);
		self.render_editor(editor, buf);
		self.render_grid(grid, buf);
		self.render_feedback(feedback, buf);
	}
}

/// The execution state of the application.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ExecutionState
{
	/// The user is editing the board.
	Editing,

	/// The application is exiting.
	Exiting
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
