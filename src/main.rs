//! # Banana Verifier
//!
//! Verifies Bananagrams-style crossword boards written in the board placement
//! language. Via command line options, the user chooses the dictionary. Then
//! the user can look up words, verify a board read from a file or standard
//! input, or interactively edit a board in a text-based user interface (TUI)
//! that re-verifies the board after every keystroke.

mod app;
mod tui;

use std::{fs, io, path::PathBuf, process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand};
use log::{debug, error, trace};
use serde::Serialize;

use app::App;
use banana_verifier::{
	cascade::DEFAULT_MAX_ERRORS,
	dictionary::Dictionary,
	tiles::reconcile_tiles,
	validation::{ValidationError, ValidationResult},
	verify::Verifier
};
use tui::with_tui;

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for verifying crossword boards.
///
/// No dictionary ships with the program. Supply a word list as
/// `<directory>/<dictionary>.txt` (by default `dict/twl06.txt`), one word per
/// line, or a prebuilt `<directory>/<dictionary>.dawg`; the latter is created
/// from the former on first use, or by `generate`.
#[derive(Clone, Debug, Parser)]
#[command(version = "1.0", author = "Todd L Smith")]
struct Opts
{
	/// The path to the directory containing the dictionary files.
	#[arg(short = 'd', long, default_value = "dict")]
	directory: String,

	/// The name of the dictionary. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "twl06")]
	dictionary: String,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just generate the binary dictionary and exit.
	Generate,

	/// Check whether words are in the dictionary.
	Lookup {
		/// The words to look up.
		#[arg(required = true)]
		words: Vec<String>
	},

	/// Verify a board specification. The exit status is 0 if the board is
	/// valid, and 1 otherwise.
	Verify {
		/// The file containing the board specification. Read from standard
		/// input if omitted.
		file: Option<PathBuf>,

		/// The tiles in the player's hand. If given, the board must use
		/// exactly these tiles.
		#[arg(long)]
		hand: Option<String>,

		/// The maximum number of errors to display.
		#[arg(short = 'm', long, default_value_t = DEFAULT_MAX_ERRORS)]
		max_errors: usize,

		/// Emit the complete result as JSON.
		#[arg(long)]
		json: bool
	},

	/// Open the text-based user interface (TUI) for interactively editing and
	/// checking a board. The final board will be written to standard output.
	Check {
		/// The maximum number of errors to display.
		#[arg(short = 'm', long, default_value_t = DEFAULT_MAX_ERRORS)]
		max_errors: usize,

		/// Suppress emission of the final board to standard output.
		#[arg(short = 'q', long)]
		quiet: bool
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
fn main() -> ExitCode
{
	env_logger::init();

	// Parse the command line options.
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	// Open the dictionary, creating the binary dictionary if necessary.
	let dictionary = match Dictionary::open(&opts.directory, &opts.dictionary)
	{
		Ok(dictionary) => Arc::new(dictionary),
		Err(e) =>
		{
			error!(
				"Failed to open dictionary: {}/{}.dawg or {0}/{1}.txt: {}",
				opts.directory,
				opts.dictionary,
				e
			);
			return ExitCode::FAILURE
		}
	};
	let verifier = Verifier::new(dictionary);

	// Execute the appropriate subcommand.
	match opts.command
	{
		Command::Generate =>
		{
			trace!("Exiting after generating binary dictionary");
			ExitCode::SUCCESS
		},
		Command::Lookup { words } =>
		{
			for word in words
			{
				let status =
					if verifier.dictionary().contains(&word) { "valid" }
					else { "invalid" };
				println!("{}: {}", word.to_ascii_uppercase(), status);
			}
			ExitCode::SUCCESS
		},
		Command::Verify { file, hand, max_errors, json } =>
		{
			let spec = match read_spec(file.as_ref())
			{
				Ok(spec) => spec,
				Err(e) =>
				{
					error!("Failed to read board: {}", e);
					return ExitCode::FAILURE
				}
			};
			let mut result = verifier.verify(&spec);
			if let Some(hand) = hand
			{
				let hand = hand.chars()
					.filter(char::is_ascii_alphabetic)
					.collect::<Vec<_>>();
				let _ = reconcile_tiles(&mut result, &hand);
			}
			if json
			{
				if let Err(e) = print_json(&result, max_errors)
				{
					error!("Failed to emit result: {}", e);
					return ExitCode::FAILURE
				}
			}
			else
			{
				print_summary(&result, max_errors);
			}
			if result.valid { ExitCode::SUCCESS } else { ExitCode::from(1) }
		},
		Command::Check { max_errors, quiet } =>
		{
			trace!("Opening TUI");
			let app = App::new(verifier, max_errors);
			match with_tui(|tui| app.run(tui))
			{
				Ok(spec) =>
				{
					if !quiet
					{
						println!("{}", spec);
					}
					ExitCode::SUCCESS
				},
				Err(e) =>
				{
					error!("Failed to drive TUI: {}", e);
					ExitCode::FAILURE
				}
			}
		}
	}
}

/// Read a board specification.
///
/// # Arguments
///
/// * `file` - The file to read, or `None` for standard input.
///
/// # Returns
///
/// The board specification.
///
/// # Errors
///
/// Any error that occurs while reading.
fn read_spec(file: Option<&PathBuf>) -> io::Result<String>
{
	match file
	{
		Some(path) => fs::read_to_string(path),
		None => io::read_to_string(io::stdin())
	}
}

/// The JSON report for a verified board: the complete result, plus the
/// errors worth displaying.
#[derive(Serialize)]
struct Report<'a>
{
	#[serde(flatten)]
	result: &'a ValidationResult,
	feedback: Vec<ValidationError>
}

/// Print the result as JSON to standard output.
///
/// # Arguments
///
/// * `result` - The verification result.
/// * `max_errors` - The maximum number of errors to include in the feedback.
///
/// # Errors
///
/// Any error that occurs during serialization.
fn print_json(result: &ValidationResult, max_errors: usize) -> serde_json::Result<()>
{
	let report = Report { result, feedback: result.feedback(max_errors) };
	println!("{}", serde_json::to_string_pretty(&report)?);
	Ok(())
}

/// Print a human-readable summary of the result to standard output.
///
/// # Arguments
///
/// * `result` - The verification result.
/// * `max_errors` - The maximum number of errors to print.
fn print_summary(result: &ValidationResult, max_errors: usize)
{
	println!("{}", if result.valid { "VALID" } else { "INVALID" });
	if let Some(grid) = &result.grid
	{
		println!();
		println!("{}", grid);
		println!();
		println!("{} tiles", result.tiles_used);
	}
	let errors = result.feedback(max_errors);
	if !errors.is_empty()
	{
		println!();
		println!("Errors:");
		for error in errors
		{
			println!("  {}", error);
		}
	}
	if !result.warnings.is_empty()
	{
		println!();
		println!("Warnings:");
		for warning in &result.warnings
		{
			println!("  {}", warning);
		}
	}
}
