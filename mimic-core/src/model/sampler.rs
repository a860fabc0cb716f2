use std::collections::{BTreeMap, HashMap};

use rand::Rng;

use crate::error::ModelError;
use super::ngram::EMPTY_TOKEN;
use super::pos::{PosCountTable, PosFrequencyTable, PosTagger};
use super::stats::SuffixTable;

/// The weighted candidate pool: a virtual multiset of next-token options.
///
/// Each group (one per part-of-speech tag) contributes its whole option
/// list once per unit of the group's total count. A group with options
/// `[a, b]` and count 3 therefore occupies six slots laid out as
/// `a b a b a b`, and every token in the group carries the group's count
/// as its weight — options inside high-count groups are over-represented
/// multiplicatively. This is an amplification policy, not a normalized
/// distribution.
///
/// The pool is never materialized: one uniform index draw is resolved
/// against group spans, which selects exactly the entry the flattened
/// layout would hold at that index.
#[derive(Debug, Default)]
pub struct WeightedPool {
	groups: Vec<PoolGroup>,
	total: u64,
}

#[derive(Debug)]
struct PoolGroup {
	count: u64,
	options: Vec<String>,
}

impl WeightedPool {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends one group of options sharing a tag, weighted by the group's
	/// summed occurrence count.
	pub fn push_group(&mut self, options: Vec<String>, count: u64) {
		self.total += count * options.len() as u64;
		self.groups.push(PoolGroup { count, options });
	}

	/// Number of slots in the virtual flattened pool.
	pub fn len(&self) -> u64 {
		self.total
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Entry at `index` of the flattened layout.
	pub fn get(&self, mut index: u64) -> Option<&str> {
		for group in &self.groups {
			let width = group.options.len() as u64;
			let span = group.count * width;
			if index < span {
				// The repetitions cycle through the option list.
				return group
					.options
					.get((index % width) as usize)
					.map(String::as_str);
			}
			index -= span;
		}
		None
	}

	/// One uniform draw over the pool, `None` when it is empty.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.total == 0 {
			return None;
		}
		self.get(rng.random_range(0..self.total))
	}
}

/// Samples the token that follows `prefix`.
///
/// # Behavior
/// 1. Look up the successor counts for `prefix` (empty if unknown).
/// 2. Classify `prefix` and fetch its tag's aggregate from `pos_counts`.
///    The aggregate takes no part in the final weighting; the lookup is
///    kept as observed behavior (see the decisions in DESIGN.md).
/// 3. Group the candidates by their own tag; per group, collect the option
///    list and sum the candidates' occurrence counts.
/// 4. Fill the weighted pool group by group and draw once.
/// 5. An empty pool yields [`EMPTY_TOKEN`]: the chain terminates here.
///
/// Candidates are visited in sorted order and groups in tag order, so the
/// pool layout is reproducible under a seeded RNG.
///
/// `pos_freq` is accepted but unused, matching the reference signature.
///
/// # Errors
/// Propagates `Classification` errors from the tagger; the sampling call
/// aborts rather than defaulting a tag.
pub fn sample_next<T, R>(
	suffix: &SuffixTable,
	_pos_freq: &PosFrequencyTable,
	pos_counts: &PosCountTable,
	prefix: &str,
	tagger: &T,
	rng: &mut R,
) -> Result<String, ModelError>
where
	T: PosTagger + ?Sized,
	R: Rng + ?Sized,
{
	// An unknown prefix means "no known successors", not an error.
	let no_successors = HashMap::new();
	let next_word_frequencies = suffix.successors(prefix).unwrap_or(&no_successors);

	let prefix_tag = tagger.classify(prefix)?;
	// Fetched, not folded into the weights.
	let _next_pos_frequencies = pos_counts.get(&prefix_tag);

	let mut candidates: Vec<&String> = next_word_frequencies.keys().collect();
	candidates.sort();

	let mut groups: BTreeMap<String, (Vec<String>, u64)> = BTreeMap::new();
	for candidate in candidates {
		let tag = tagger.classify(candidate)?;
		let entry = groups.entry(tag).or_insert_with(|| (Vec::new(), 0));
		entry.0.push(candidate.clone());
		entry.1 += next_word_frequencies[candidate];
	}

	let mut pool = WeightedPool::new();
	for (_tag, (options, count)) in groups {
		pool.push_group(options, count);
	}

	match pool.pick(rng) {
		Some(token) => Ok(token.to_owned()),
		None => Ok(EMPTY_TOKEN.to_owned()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn tag_all(tag: &'static str) -> impl Fn(&str) -> Result<String, ModelError> {
		move |_: &str| Ok(tag.to_owned())
	}

	fn first_letter_tag(token: &str) -> Result<String, ModelError> {
		Ok(token.chars().next().unwrap_or('?').to_uppercase().to_string())
	}

	fn suffix_of(pairs: &[(&str, &str)]) -> SuffixTable {
		let mut table = SuffixTable::new();
		for (prefix, successor) in pairs {
			table.observe(prefix, successor);
		}
		table
	}

	#[test]
	fn pool_layout_repeats_whole_option_lists() {
		let mut pool = WeightedPool::new();
		pool.push_group(vec!["a".to_owned(), "b".to_owned()], 3);
		pool.push_group(vec!["z".to_owned()], 2);

		assert_eq!(pool.len(), 8);
		let layout: Vec<&str> = (0..8).map(|i| pool.get(i).unwrap()).collect();
		assert_eq!(layout, vec!["a", "b", "a", "b", "a", "b", "z", "z"]);
		assert!(pool.get(8).is_none());
	}

	#[test]
	fn empty_pool_picks_nothing() {
		let pool = WeightedPool::new();
		let mut rng = StdRng::seed_from_u64(0);
		assert!(pool.pick(&mut rng).is_none());

		let mut zero_weight = WeightedPool::new();
		zero_weight.push_group(vec!["a".to_owned()], 0);
		assert!(zero_weight.pick(&mut rng).is_none());
	}

	#[test]
	fn unknown_prefix_yields_sentinel() {
		let suffix = suffix_of(&[("x", "y")]);
		let mut rng = StdRng::seed_from_u64(7);
		let next = sample_next(
			&suffix,
			&PosFrequencyTable::default(),
			&PosCountTable::default(),
			"missing",
			&tag_all("NN"),
			&mut rng,
		)
		.unwrap();
		assert_eq!(next, EMPTY_TOKEN);
	}

	#[test]
	fn single_candidate_is_always_chosen() {
		let suffix = suffix_of(&[("x", "y"), ("x", "y")]);
		for seed in 0..16 {
			let mut rng = StdRng::seed_from_u64(seed);
			let next = sample_next(
				&suffix,
				&PosFrequencyTable::default(),
				&PosCountTable::default(),
				"x",
				&tag_all("NN"),
				&mut rng,
			)
			.unwrap();
			assert_eq!(next, "y");
		}
	}

	#[test]
	fn sampled_token_is_an_observed_successor() {
		let suffix = suffix_of(&[("go", "fast"), ("go", "slow"), ("go", "away")]);
		let mut rng = StdRng::seed_from_u64(42);
		for _ in 0..64 {
			let next = sample_next(
				&suffix,
				&PosFrequencyTable::default(),
				&PosCountTable::default(),
				"go",
				&first_letter_tag,
				&mut rng,
			)
			.unwrap();
			assert!(["fast", "slow", "away"].contains(&next.as_str()));
		}
	}

	#[test]
	fn per_tag_count_sums_candidate_frequencies() {
		// "fine" and "fun" share a tag; their group spans
		// (2 + 1) * 2 = 6 slots. "slow" alone spans 1.
		let suffix = suffix_of(&[
			("go", "fine"),
			("go", "fine"),
			("go", "fun"),
			("go", "slow"),
		]);

		// Rebuild the grouping the sampler performs and check the layout.
		let freqs = suffix.successors("go").unwrap();
		let mut candidates: Vec<&String> = freqs.keys().collect();
		candidates.sort();

		let mut groups: BTreeMap<String, (Vec<String>, u64)> = BTreeMap::new();
		for candidate in candidates {
			let tag = first_letter_tag(candidate).unwrap();
			let entry = groups.entry(tag).or_insert_with(|| (Vec::new(), 0));
			entry.0.push(candidate.clone());
			entry.1 += freqs[candidate];
		}

		let mut pool = WeightedPool::new();
		for (_tag, (options, count)) in groups {
			pool.push_group(options, count);
		}

		assert_eq!(pool.len(), 7);
		let layout: Vec<&str> = (0..7).map(|i| pool.get(i).unwrap()).collect();
		assert_eq!(
			layout,
			vec!["fine", "fun", "fine", "fun", "fine", "fun", "slow"]
		);
	}

	#[test]
	fn classifier_failure_aborts_the_call() {
		let suffix = suffix_of(&[("x", "y")]);
		let failing = |token: &str| -> Result<String, ModelError> {
			Err(ModelError::Classification {
				token: token.to_owned(),
				reason: "no lexicon".to_owned(),
			})
		};
		let mut rng = StdRng::seed_from_u64(0);
		let err = sample_next(
			&suffix,
			&PosFrequencyTable::default(),
			&PosCountTable::default(),
			"x",
			&failing,
			&mut rng,
		)
		.unwrap_err();
		assert!(matches!(err, ModelError::Classification { .. }));
	}
}
