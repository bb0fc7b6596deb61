use std::{fs, hint::black_box, path::Path, sync::Arc, time::Duration};

use const_format::concatcp;
use criterion::{measurement::Measurement, BenchmarkGroup, Criterion};
use banana_verifier::{dictionary::Dictionary, verify::Verifier};

/// The name of the dictionary.
const NAME: &str = "bench";

/// The name of the text file.
const FILE_TXT: &str = concatcp!(NAME, ".txt");

/// The name of the binary file.
const FILE_DAWG: &str = concatcp!(NAME, ".dawg");

/// A board of several crossing words.
const BOARD: &str = "\
	<board>
	SCURRIES H
	SCAT[0] @ SCURRIES[0] V
	CAT[0] @ SCAT[1] H
	TRIES[0] @ SCAT[3] H
	RUSE[0] @ SCURRIES[4] V
	</board>";

/// Generate a word list with plenty of shared prefixes and suffixes,
/// including the words of [`BOARD`].
fn words() -> Vec<String>
{
	let stems = ["cat", "scat", "tri", "ruse", "scurr", "bak", "mak", "tak"];
	let endings = ["", "e", "es", "ed", "er", "ers", "ing", "ies", "s"];
	let mut words = Vec::new();
	for prefix in ["", "re", "un", "over", "pre"]
	{
		for stem in stems
		{
			for ending in endings
			{
				words.push(format!("{}{}{}", prefix, stem, ending));
			}
		}
	}
	words
}

/// Benchmark building a dictionary from a word list.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_from_words<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	let words = words();
	g.bench_function("from_words", |b| {
		b.iter(|| Dictionary::from_words(black_box(&words)).unwrap());
	});
}

/// Benchmark reading a dictionary from a text file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `dir` - The directory containing the dictionary files.
fn bench_read_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>, dir: &Path)
{
	let path = dir.join(FILE_TXT);
	g.bench_function("read_from_file", |b| {
		b.iter(|| Dictionary::read_from_file(&path).unwrap());
	});
}

/// Benchmark loading a dictionary from a compressed binary file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `dir` - The directory containing the dictionary files.
fn bench_load_compressed<M: Measurement>(g: &mut BenchmarkGroup<M>, dir: &Path)
{
	let path = dir.join(FILE_DAWG);
	g.bench_function("load_compressed", |b| {
		b.iter(|| Dictionary::load_compressed(&path).unwrap());
	});
}

/// Benchmark word lookup.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `dictionary` - The dictionary.
fn bench_contains<M: Measurement>(g: &mut BenchmarkGroup<M>, dictionary: &Dictionary)
{
	g.bench_function("contains", |b| {
		b.iter(|| {
			assert!(!dictionary.contains(black_box("OVERSCATTERS")));
			assert!(dictionary.contains(black_box("UNTRIES")));
		});
	});
}

/// Benchmark verifying a board.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `verifier` - The verifier.
fn bench_verify<M: Measurement>(g: &mut BenchmarkGroup<M>, verifier: &Verifier)
{
	g.bench_function("verify", |b| {
		b.iter(|| {
			let result = verifier.verify(black_box(BOARD));
			assert!(!result.words.is_empty());
		});
	});
}

/// Run all benchmarks.
///
/// The main purpose of the benchmarking is to ensure that
/// [`load_compressed`](Dictionary::load_compressed) is faster than
/// [`read_from_file`](Dictionary::read_from_file).
fn main()
{
	// Ensure that both the text and binary files exist.
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join(FILE_TXT), words().join("\n")).unwrap();
	let dictionary = Arc::new(Dictionary::open(dir.path(), NAME).unwrap());
	assert!(dir.path().join(FILE_DAWG).exists());
	let verifier = Verifier::new(Arc::clone(&dictionary));

	// Run the benchmarks.
	let mut criterion = Criterion::default().configure_from_args();
	let mut group = criterion.benchmark_group("benchmarks");
	group.measurement_time(Duration::from_secs(10));
	bench_from_words(&mut group);
	bench_read_from_file(&mut group, dir.path());
	bench_load_compressed(&mut group, dir.path());
	bench_contains(&mut group, &dictionary);
	bench_verify(&mut group, &verifier);
	group.finish();

	// Generate the final summary.
	criterion.final_summary();
}
