//! # Banana Verifier
//!
//! Bananagrams-style crossword boards are easy to describe in prose and easy
//! to get wrong. This crate verifies boards written in a small placement
//! language, one word per line:
//!
//! ```text
//! <board>
//! CAT H
//! TAR[0] @ CAT[2] V
//! </board>
//! ```
//!
//! The first line places the root word at the origin. Every subsequent line
//! attaches a word to a previously declared word, by naming the letter that
//! they share. The [verifier](verify::Verifier) parses the board, checks its
//! topology, lays the words onto a grid, and checks every word on the grid,
//! declared or accidental, against a [dictionary](dictionary::Dictionary).
//! Errors are ranked by [cascade level](validation::CascadeLevel), so that
//! the author sees the fundamental mistake rather than its consequences.

pub mod board;
pub mod cascade;
pub mod dawg;
pub mod dictionary;
pub mod grid;
pub mod parser;
pub mod structure;
pub mod tiles;
pub mod validation;
pub mod verify;
pub mod words;
