//! # Directed acyclic word graph
//!
//! Herein is the compressed successor automaton that backs dictionary
//! membership. The automaton is a flat arena of packed 4-byte records. Each
//! record describes one outgoing edge of a node:
//!
//! ```text
//! bit  31     has_more_sibling
//! bits 24-30  letter (7-bit ASCII)
//! bits 0-23   child_index
//! ```
//!
//! The edges of a node are laid out contiguously as a _sibling list_; the last
//! edge of the list has `has_more_sibling` clear. Index 0 is the start of the
//! root sibling list. Letters are lowercase ASCII, and every complete word is
//! followed by an edge labelled with the [terminal marker](TERMINAL), whose
//! child index is meaningless.

use std::{
	collections::HashMap,
	error::Error,
	fmt::{self, Display, Formatter}
};

use log::trace;

////////////////////////////////////////////////////////////////////////////////
//                                 Records.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The letter that marks the end of a complete word.
pub const TERMINAL: u8 = b'$';

/// The largest child index representable by a record.
pub const MAX_CHILD_INDEX: u32 = 0x00ff_ffff;

/// A single packed edge record.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Node(u32);

impl Node
{
	/// Pack an edge record.
	///
	/// # Arguments
	///
	/// * `has_more_sibling` - Whether another edge follows in the same
	///   sibling list.
	/// * `letter` - The edge label. Only the low 7 bits are kept.
	/// * `child_index` - The start of the child sibling list. Only the low 24
	///   bits are kept.
	///
	/// # Returns
	///
	/// The packed record.
	#[inline]
	#[must_use]
	pub const fn new(has_more_sibling: bool, letter: u8, child_index: u32)
		-> Self
	{
		let more = if has_more_sibling { 0x8000_0000 } else { 0 };
		Self(more | ((letter as u32 & 0x7f) << 24) | (child_index & MAX_CHILD_INDEX))
	}

	/// Whether another edge follows in the same sibling list.
	#[inline]
	#[must_use]
	pub const fn has_more_sibling(&self) -> bool { self.0 & 0x8000_0000 != 0 }

	/// The edge label.
	#[inline]
	#[must_use]
	pub const fn letter(&self) -> u8 { ((self.0 >> 24) & 0x7f) as u8 }

	/// The start of the child sibling list.
	#[inline]
	#[must_use]
	pub const fn child_index(&self) -> usize
	{
		(self.0 & MAX_CHILD_INDEX) as usize
	}

	/// The raw record, as stored on disk.
	#[inline]
	#[must_use]
	pub const fn bits(&self) -> u32 { self.0 }
}

////////////////////////////////////////////////////////////////////////////////
//                                 Automaton.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The automaton proper: an arena of [records](Node) addressed by index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct Dawg(Box<[Node]>);

impl Dawg
{
	/// Decode an automaton from its packed little-endian representation.
	///
	/// # Arguments
	///
	/// * `bytes` - The packed records, 4 bytes apiece.
	///
	/// # Returns
	///
	/// The decoded automaton.
	///
	/// # Errors
	///
	/// [`DawgError::Truncated`] if the length is not a multiple of 4.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, DawgError>
	{
		if bytes.len() % 4 != 0
		{
			return Err(DawgError::Truncated(bytes.len()))
		}
		let nodes = bytes.chunks_exact(4)
			.map(|chunk| {
				Node(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
			})
			.collect::<Box<[_]>>();
		Ok(Self(nodes))
	}

	/// Encode the automaton into its packed little-endian representation.
	#[must_use]
	pub fn to_bytes(&self) -> Vec<u8>
	{
		self.0.iter().flat_map(|node| node.bits().to_le_bytes()).collect()
	}

	/// The number of records in the arena.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.0.len() }

	/// Check if the arena holds no records at all, in which case the
	/// automaton accepts nothing.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// Scan the sibling list starting at `index` for an edge labelled
	/// `letter`.
	///
	/// # Arguments
	///
	/// * `index` - The start of a sibling list.
	/// * `letter` - The sought edge label.
	///
	/// # Returns
	///
	/// The child index of the matching edge, or `None` if the sibling list
	/// ends first. Indices that fall outside the arena are treated as the end
	/// of the list, so a corrupt blob can never cause a panic.
	#[must_use]
	pub fn child(&self, mut index: usize, letter: u8) -> Option<usize>
	{
		loop
		{
			let node = self.0.get(index)?;
			if node.letter() == letter
			{
				return Some(node.child_index())
			}
			if !node.has_more_sibling()
			{
				return None
			}
			index += 1;
		}
	}

	/// Check whether the automaton accepts the given letters, which must
	/// already be normalized to the stored alphabet.
	///
	/// # Arguments
	///
	/// * `letters` - The letters of the candidate word.
	///
	/// # Returns
	///
	/// `true` if the walk ends at a terminal marker, `false` otherwise.
	#[must_use]
	pub fn accepts(&self, letters: &[u8]) -> bool
	{
		let mut index = 0;
		for &letter in letters.iter().chain(std::iter::once(&TERMINAL))
		{
			match self.child(index, letter)
			{
				Some(child) => index = child,
				None => return false
			}
		}
		true
	}

	/// Visit every complete word accepted by the automaton, in sorted order.
	///
	/// # Arguments
	///
	/// * `f` - The visitor, which receives each word's letters.
	pub fn for_each_word<F: FnMut(&[u8])>(&self, mut f: F)
	{
		let mut prefix = Vec::new();
		if !self.is_empty()
		{
			self.visit(0, &mut prefix, &mut f);
		}
	}

	/// Count the complete words accepted by the automaton.
	#[must_use]
	pub fn word_count(&self) -> usize
	{
		let mut count = 0;
		self.for_each_word(|_| count += 1);
		count
	}

	/// Depth-first traversal helper for [`for_each_word`](Self::for_each_word).
	fn visit<F: FnMut(&[u8])>(
		&self,
		mut index: usize,
		prefix: &mut Vec<u8>,
		f: &mut F
	) {
		while let Some(node) = self.0.get(index)
		{
			if node.letter() == TERMINAL
			{
				f(prefix);
			}
			else if node.child_index() != 0
			{
				prefix.push(node.letter());
				self.visit(node.child_index(), prefix, f);
				prefix.pop();
			}
			if !node.has_more_sibling()
			{
				break
			}
			index += 1;
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Builder.                                  //
////////////////////////////////////////////////////////////////////////////////

/// An edge awaiting layout. The child is the identifier of an interned
/// sibling list, not yet an arena index.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Edge
{
	letter: u8,
	child: Option<usize>
}

/// Builds a minimal [`Dawg`] from sorted, distinct words. Identical sibling
/// lists are interned, so every shared suffix is stored exactly once.
#[derive(Debug, Default)]
pub struct DawgBuilder
{
	/// The distinct sibling lists, in order of creation. Children are always
	/// created before their parents.
	lists: Vec<Vec<Edge>>,

	/// Reverse lookup from sibling list content to its identifier.
	interned: HashMap<Vec<Edge>, usize>
}

impl DawgBuilder
{
	/// Build an automaton for the given words.
	///
	/// # Arguments
	///
	/// * `words` - The words, already normalized to lowercase ASCII letters,
	///   sorted, and deduplicated.
	///
	/// # Returns
	///
	/// The automaton.
	///
	/// # Errors
	///
	/// [`DawgError::TooManyRecords`] if the arena would be too large for the
	/// 24-bit child index.
	pub fn build<T: AsRef<[u8]>>(words: &[T]) -> Result<Dawg, DawgError>
	{
		// Append the terminal marker to every word. The marker sorts before
		// every letter, so the input order is preserved.
		let words = words.iter()
			.map(|w| {
				let mut word = w.as_ref().to_vec();
				word.push(TERMINAL);
				word
			})
			.collect::<Vec<_>>();
		debug_assert!(words.windows(2).all(|w| w[0] < w[1]));
		let mut builder = Self::default();
		let root = builder.build_list(&words, 0);
		builder.layout(root)
	}

	/// Recursively build the sibling list reached after consuming `depth`
	/// letters common to all of `words`.
	fn build_list(&mut self, words: &[Vec<u8>], depth: usize) -> usize
	{
		let mut edges = Vec::new();
		let mut start = 0;
		while start < words.len()
		{
			let letter = words[start][depth];
			let run = words[start..].iter()
				.take_while(|w| w[depth] == letter)
				.count();
			let child =
				if letter == TERMINAL { None }
				else { Some(self.build_list(&words[start..start + run], depth + 1)) };
			edges.push(Edge { letter, child });
			start += run;
		}
		self.intern(edges)
	}

	/// Answer the identifier of the given sibling list, creating it if it is
	/// new.
	fn intern(&mut self, edges: Vec<Edge>) -> usize
	{
		if let Some(&id) = self.interned.get(&edges)
		{
			return id
		}
		let id = self.lists.len();
		self.lists.push(edges.clone());
		self.interned.insert(edges, id);
		id
	}

	/// Lay the interned sibling lists out in the arena, root first.
	fn layout(self, root: usize) -> Result<Dawg, DawgError>
	{
		let order = std::iter::once(root)
			.chain((0..self.lists.len()).filter(|&id| id != root))
			.collect::<Vec<_>>();
		let mut offsets = vec![0usize; self.lists.len()];
		let mut total = 0usize;
		for &id in &order
		{
			offsets[id] = total;
			total += self.lists[id].len();
		}
		if total > MAX_CHILD_INDEX as usize
		{
			return Err(DawgError::TooManyRecords(total))
		}
		let mut nodes = Vec::with_capacity(total);
		for &id in &order
		{
			let edges = &self.lists[id];
			for (i, edge) in edges.iter().enumerate()
			{
				let child = edge.child.map_or(0, |c| offsets[c] as u32);
				nodes.push(Node::new(i + 1 < edges.len(), edge.letter, child));
			}
		}
		trace!(
			"laid out {} sibling lists in {} records",
			self.lists.len(),
			nodes.len()
		);
		Ok(Dawg(nodes.into_boxed_slice()))
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of [`Dawg`] construction errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DawgError
{
	/// The packed representation is not a whole number of records. Carries
	/// the offending byte length.
	Truncated(usize),

	/// The automaton needs more records than a 24-bit child index can
	/// address. Carries the required record count.
	TooManyRecords(usize)
}

impl Display for DawgError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Truncated(len) =>
				write!(f, "{} bytes is not a whole number of records", len),
			Self::TooManyRecords(count) =>
				write!(f, "{} records exceed the 24-bit child index", count)
		}
	}
}

impl Error for DawgError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::dawg::{Dawg, DawgBuilder, DawgError, Node, TERMINAL};

	/// Build an automaton from a handful of sorted words.
	fn build(words: &[&str]) -> Dawg
	{
		let mut words = words.to_vec();
		words.sort();
		words.dedup();
		DawgBuilder::build(&words).unwrap()
	}

	/// Ensure that the packed fields survive a round trip through a record.
	#[test]
	fn test_node_packing()
	{
		let node = Node::new(true, b'q', 0x00ab_cdef);
		assert!(node.has_more_sibling());
		assert_eq!(node.letter(), b'q');
		assert_eq!(node.child_index(), 0x00ab_cdef);
		let node = Node::new(false, TERMINAL, 0);
		assert!(!node.has_more_sibling());
		assert_eq!(node.letter(), TERMINAL);
		assert_eq!(node.bits(), (TERMINAL as u32) << 24);
	}

	/// Every word is accepted, and no mere prefix or extension is.
	#[test]
	fn test_accepts()
	{
		let dawg = build(&["cat", "cats", "car", "cart", "dog", "do"]);
		for word in ["cat", "cats", "car", "cart", "dog", "do"]
		{
			assert!(dawg.accepts(word.as_bytes()), "{}", word);
		}
		for word in ["", "c", "ca", "catss", "d", "dogs", "ar", "at"]
		{
			assert!(!dawg.accepts(word.as_bytes()), "{}", word);
		}
	}

	/// Shared suffixes are stored once.
	#[test]
	fn test_suffix_sharing()
	{
		let dawg = build(&["bake", "cake", "fake", "lake", "make"]);
		// Root list (5 records), "ake" chain (3 records), terminal (1 record).
		assert_eq!(dawg.len(), 9);
		assert_eq!(dawg.word_count(), 5);
	}

	/// Words come back out in sorted order.
	#[test]
	fn test_for_each_word()
	{
		let dawg = build(&["ta", "at", "an", "na"]);
		let mut words = Vec::new();
		dawg.for_each_word(|w| words.push(String::from_utf8(w.to_vec()).unwrap()));
		assert_eq!(words, vec!["an", "at", "na", "ta"]);
	}

	/// The empty automaton accepts nothing.
	#[test]
	fn test_empty()
	{
		let dawg = build(&[]);
		assert!(dawg.is_empty());
		assert!(!dawg.accepts(b""));
		assert!(!dawg.accepts(b"a"));
		assert_eq!(dawg.word_count(), 0);
	}

	/// Encoding and decoding produce the same arena, and a ragged blob is
	/// refused.
	#[test]
	fn test_bytes()
	{
		let dawg = build(&["hello", "help", "world"]);
		let bytes = dawg.to_bytes();
		assert_eq!(bytes.len(), dawg.len() * 4);
		assert_eq!(Dawg::from_bytes(&bytes).unwrap(), dawg);
		assert_eq!(
			Dawg::from_bytes(&bytes[..bytes.len() - 1]),
			Err(DawgError::Truncated(bytes.len() - 1))
		);
	}

	/// A child index pointing outside the arena is a miss, not a panic.
	#[test]
	fn test_corrupt_child_index()
	{
		let bytes = Node::new(false, b'a', 0x0000_1000).bits().to_le_bytes();
		let dawg = Dawg::from_bytes(&bytes).unwrap();
		assert!(!dawg.accepts(b"a"));
		assert!(!dawg.accepts(b"ab"));
	}
}
