//! # Dictionary
//!
//! Herein is support for dictionary construction and manipulation. All runtime
//! operations are performed against a [`Dictionary`], which wraps a
//! [directed acyclic word graph](Dawg). Dictionaries are immutable once
//! constructed, so a single instance can be shared by any number of threads
//! behind an [`Arc`](std::sync::Arc).

use std::{
	fs::{self, File},
	io::{self, BufRead, BufReader, ErrorKind, Read, Write},
	path::{Path, PathBuf}
};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use log::{debug, trace, warn};

use crate::dawg::{Dawg, DawgBuilder, DawgError};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// A dictionary is a [`Dawg`] of lowercase words.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct Dictionary(Dawg);

impl Dictionary
{
	/// Construct an empty dictionary. Same as [`Default::default`].
	///
	/// # Returns
	///
	/// An empty dictionary.
	#[inline]
	pub fn new() -> Self { Self(Default::default()) }

	/// Check if the dictionary is empty.
	///
	/// # Returns
	///
	/// `true` if the dictionary is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// Count the words in the dictionary. This walks the whole automaton, so
	/// it is not free.
	#[must_use]
	pub fn word_count(&self) -> usize { self.0.word_count() }

	/// Check if the dictionary contains the given word. The check is
	/// case-insensitive. Anything other than ASCII letters can never be
	/// contained.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the dictionary contains the word, `false` otherwise.
	#[must_use]
	pub fn contains(&self, word: &str) -> bool
	{
		match normalize(word)
		{
			Some(letters) => self.0.accepts(&letters),
			None => false
		}
	}

	/// Construct a dictionary from the given words. Words are folded to
	/// lowercase. Words containing anything other than ASCII letters are
	/// skipped with a warning.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the dictionary.
	///
	/// # Returns
	///
	/// A dictionary containing the words.
	///
	/// # Errors
	///
	/// [`DawgError::TooManyRecords`] if the word list is too large for the
	/// compact representation.
	pub fn from_words<T: AsRef<str>>(words: &[T]) -> Result<Self, DawgError>
	{
		let mut normalized = words.iter()
			.map(AsRef::as_ref)
			.filter(|word| !word.is_empty())
			.filter_map(|word| {
				let letters = normalize(word);
				if letters.is_none()
				{
					warn!("Skipping unrepresentable word: {:?}", word);
				}
				letters
			})
			.collect::<Vec<_>>();
		normalized.sort_unstable();
		normalized.dedup();
		trace!("Building automaton for {} words", normalized.len());
		Ok(Self(DawgBuilder::build(&normalized)?))
	}

	/// Open a dictionary with the given name. Only the specified directory will
	/// be searched. `name` denotes the dictionary file, sans the extension. If
	/// a compressed dictionary (`<name>.dawg`) exists _and_ is newer than the
	/// text file (`<name>.txt`), or the text file is missing, the compressed
	/// dictionary will be read; otherwise, the text file will be read and a
	/// compressed dictionary will be created (to optimize future reads). An
	/// unreadable compressed dictionary is rebuilt from the text file, if
	/// there is one.
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the dictionary file.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn open<T: AsRef<Path>>(dir: T, name: &str) -> Result<Self, io::Error>
	{
		let dawg_path = dir.as_ref().join(format!("{}.dawg", name));
		let txt_path = dir.as_ref().join(format!("{}.txt", name));
		// Compare the modification times of the compressed and text files,
		// preferring the compressed file only if it's newer than the text
		// file. The compressed file alone is also acceptable, as that is how
		// a prebuilt dictionary is shipped. If the compressed file cannot be
		// read, we fall back to the text file, which also rewrites it.
		let dawg_time = dawg_path.metadata().and_then(|m| m.modified());
		let use_dawg = match (dawg_time, txt_path.metadata())
		{
			(Ok(dawg_time), Ok(txt_meta)) => txt_meta.modified()
				.map(|txt_time| dawg_time > txt_time)
				.unwrap_or(false),
			(Ok(_), Err(_)) => true,
			(Err(_), _) => false
		};
		if use_dawg
		{
			match Self::load_compressed(&dawg_path)
			{
				Ok(dictionary) =>
				{
					debug!(
						"Read compressed dictionary: {} ({} words)",
						dawg_path.display(),
						dictionary.word_count()
					);
					return Ok(dictionary)
				},
				Err(e) if txt_path.exists() => warn!(
					"Rebuilding unreadable compressed dictionary: {}: {}",
					dawg_path.display(),
					e
				),
				Err(e) => return Err(e)
			}
		}
		let dictionary = Self::read_from_file(&txt_path)?;
		debug!(
			"Read text dictionary: {} ({} words)",
			txt_path.display(),
			dictionary.word_count()
		);
		match dictionary.save_compressed(&dawg_path)
		{
			Ok(_) =>
			{
				trace!("Wrote compressed dictionary: {}", dawg_path.display())
			},
			Err(e) => warn!(
				"Failed to write compressed dictionary: {}: {}",
				dawg_path.display(),
				e
			)
		}
		Ok(dictionary)
	}

	/// Construct a dictionary from the contents of the given file. Each
	/// non-blank line in the file is considered a single word.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the word list is too large, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let words = reader.lines()
			.map(|line| line.map(|l| l.trim().to_string()))
			.collect::<Result<Vec<_>, _>>()?;
		Self::from_words(&words)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
	}

	/// Decompress a dictionary from the given file. The file must contain a
	/// zlib stream of packed automaton records.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// The dictionary.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn load_compressed<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;
		Self::from_compressed_bytes(&content)
	}

	/// Decompress a dictionary from an in-memory zlib stream of packed
	/// automaton records.
	///
	/// # Errors
	///
	/// [`ErrorKind::InvalidData`] if the stream is corrupt or the records are
	/// truncated.
	pub fn from_compressed_bytes(bytes: &[u8]) -> Result<Self, io::Error>
	{
		let mut decoder = ZlibDecoder::new(bytes);
		let mut packed = Vec::new();
		decoder.read_to_end(&mut packed)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		let dawg = Dawg::from_bytes(&packed)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		trace!("Decompressed {} records", dawg.len());
		Ok(Self(dawg))
	}

	/// Compress the dictionary into a zlib stream of packed automaton records.
	///
	/// # Errors
	///
	/// Any error reported by the compressor.
	pub fn to_compressed_bytes(&self) -> Result<Vec<u8>, io::Error>
	{
		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
		encoder.write_all(&self.0.to_bytes())?;
		encoder.finish()
	}

	/// Compress the dictionary to the given file. The content is written to a
	/// sibling `.tmp` file first and then renamed into place, so the target
	/// is never left truncated.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// If the file cannot be created, written, or renamed, an error is
	/// returned.
	pub fn save_compressed<T: AsRef<Path>>(&self, path: T) -> Result<(), io::Error>
	{
		let path = path.as_ref();
		let content = self.to_compressed_bytes()?;
		let mut tmp_path = path.as_os_str().to_owned();
		tmp_path.push(".tmp");
		let tmp_path = PathBuf::from(tmp_path);
		let written = File::create(&tmp_path)
			.and_then(|mut file| {
				file.write_all(&content)?;
				file.sync_all()
			})
			.and_then(|_| fs::rename(&tmp_path, path));
		if written.is_err()
		{
			let _ = fs::remove_file(&tmp_path);
		}
		written
	}
}

/// Fold a word into the stored alphabet.
///
/// # Returns
///
/// The lowercase ASCII letters of the word, or `None` if the word contains
/// anything else.
fn normalize(word: &str) -> Option<Vec<u8>>
{
	word.bytes()
		.map(|b| b.is_ascii_alphabetic().then(|| b.to_ascii_lowercase()))
		.collect()
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{
		fs::{self, File},
		io::ErrorKind,
		path::Path,
		sync::Arc,
		thread,
		time::{Duration, SystemTime}
	};

	use crate::dictionary::Dictionary;
	use tempfile::tempdir;

	/// Set the modification time of a file, relative to now.
	fn touch(path: &Path, offset_secs: i64)
	{
		let now = SystemTime::now();
		let offset = Duration::from_secs(offset_secs.unsigned_abs());
		let time =
			if offset_secs < 0 { now - offset }
			else { now + offset };
		File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
	}

	/// Some words to populate the dictionaries with.
	const WORDS: [&str; 8] =
		["hello", "world", "cat", "cats", "tar", "at", "ta", "na"];

	/// Test basic functionality of [`Dictionary`]:
	///
	/// * [`Dictionary::new`]
	/// * [`Dictionary::is_empty`]
	/// * [`Dictionary::from_words`]
	/// * [`Dictionary::contains`]
	#[test]
	fn test_from_words()
	{
		let dictionary = Dictionary::new();
		assert!(dictionary.is_empty());
		assert!(!dictionary.contains("hello"));
		let dictionary = Dictionary::from_words(&WORDS).unwrap();
		assert!(!dictionary.is_empty());
		assert_eq!(dictionary.word_count(), WORDS.len());
		for word in WORDS
		{
			assert!(dictionary.contains(word), "{}", word);
		}
		assert!(!dictionary.contains("hell"));
		assert!(!dictionary.contains("ca"));
		assert!(!dictionary.contains("worlds"));
	}

	/// Lookups ignore case, and junk is never a word.
	#[test]
	fn test_normalization()
	{
		let dictionary =
			Dictionary::from_words(&["Hello", "WORLD", "two words", "naïve"])
				.unwrap();
		assert_eq!(dictionary.word_count(), 2);
		assert!(dictionary.contains("hello"));
		assert!(dictionary.contains("HELLO"));
		assert!(dictionary.contains("World"));
		assert!(!dictionary.contains(""));
		assert!(!dictionary.contains("two words"));
		assert!(!dictionary.contains("hello!"));
		assert!(!dictionary.contains("naïve"));
	}

	/// Test compressing and decompressing a dictionary:
	///
	/// * [`Dictionary::to_compressed_bytes`]
	/// * [`Dictionary::from_compressed_bytes`]
	#[test]
	fn test_compressed_bytes()
	{
		let dictionary = Dictionary::from_words(&WORDS).unwrap();
		let bytes = dictionary.to_compressed_bytes().unwrap();
		let decompressed = Dictionary::from_compressed_bytes(&bytes).unwrap();
		assert_eq!(dictionary, decompressed);
		let error = Dictionary::from_compressed_bytes(b"not zlib").unwrap_err();
		assert_eq!(error.kind(), ErrorKind::InvalidData);
	}

	/// Test opening a dictionary by name:
	///
	/// * [`Dictionary::open`]
	/// * [`Dictionary::read_from_file`]
	/// * [`Dictionary::save_compressed`]
	/// * [`Dictionary::load_compressed`]
	#[test]
	fn test_open()
	{
		let dir = tempdir().unwrap();
		fs::write(dir.path().join("small.txt"), "cat\n\nTAR\n  at  \n").unwrap();
		let dictionary = Dictionary::open(dir.path(), "small").unwrap();
		assert_eq!(dictionary.word_count(), 3);
		assert!(dictionary.contains("tar"));
		// The compressed dictionary should have been written alongside.
		let dawg_path = dir.path().join("small.dawg");
		assert!(dawg_path.exists());
		assert_eq!(Dictionary::load_compressed(&dawg_path).unwrap(), dictionary);
		// Without the text file, the compressed dictionary is used.
		fs::remove_file(dir.path().join("small.txt")).unwrap();
		assert_eq!(Dictionary::open(dir.path(), "small").unwrap(), dictionary);
		// Without either, opening fails.
		assert!(Dictionary::open(dir.path(), "missing").is_err());
	}

	/// The fresher of the two files wins when both exist.
	#[test]
	fn test_open_freshness()
	{
		let dir = tempdir().unwrap();
		let txt_path = dir.path().join("fresh.txt");
		let dawg_path = dir.path().join("fresh.dawg");
		fs::write(&txt_path, "cat
at
").unwrap();
		let original = Dictionary::open(dir.path(), "fresh").unwrap();
		assert!(original.contains("cat"));
		// A newer compressed dictionary is preferred over the edited text.
		fs::write(&txt_path, "dog
").unwrap();
		touch(&txt_path, -3600);
		touch(&dawg_path, 0);
		let dictionary = Dictionary::open(dir.path(), "fresh").unwrap();
		assert_eq!(dictionary, original);
		assert!(!dictionary.contains("dog"));
		// An older compressed dictionary is rebuilt from the text.
		touch(&dawg_path, -7200);
		let dictionary = Dictionary::open(dir.path(), "fresh").unwrap();
		assert!(dictionary.contains("dog"));
		assert!(!dictionary.contains("cat"));
		assert_eq!(Dictionary::load_compressed(&dawg_path).unwrap(), dictionary);
	}

	/// A corrupt compressed dictionary is rebuilt from the text file, and is
	/// only fatal without one.
	#[test]
	fn test_open_corrupt()
	{
		let dir = tempdir().unwrap();
		let txt_path = dir.path().join("w.txt");
		let dawg_path = dir.path().join("w.dawg");
		fs::write(&txt_path, "cat
at").unwrap();
		fs::write(&dawg_path, b"x\x9c").unwrap();
		touch(&txt_path, -3600);
		touch(&dawg_path, 0);
		let dictionary = Dictionary::open(dir.path(), "w").unwrap();
		assert_eq!(dictionary.word_count(), 2);
		assert!(dictionary.contains("cat"));
		// The compressed dictionary was replaced, leaving no scratch file.
		assert_eq!(Dictionary::load_compressed(&dawg_path).unwrap(), dictionary);
		assert!(!dir.path().join("w.dawg.tmp").exists());
		// Without the text file, the corruption is reported.
		fs::write(&dawg_path, b"x\x9c").unwrap();
		fs::remove_file(&txt_path).unwrap();
		let error = Dictionary::open(dir.path(), "w").unwrap_err();
		assert_eq!(error.kind(), ErrorKind::InvalidData);
	}

	/// A single dictionary may be shared by many threads.
	#[test]
	fn test_shared()
	{
		let dictionary = Arc::new(Dictionary::from_words(&WORDS).unwrap());
		let handles = (0..4)
			.map(|_| {
				let dictionary = Arc::clone(&dictionary);
				thread::spawn(move || WORDS.iter().all(|w| dictionary.contains(w)))
			})
			.collect::<Vec<_>>();
		for handle in handles
		{
			assert!(handle.join().unwrap());
		}
	}
}
