use std::path::PathBuf;

use clap::{Parser, Subcommand};

use mimic_core::io::{
	self, FREQUENCY_TABLE_FILE, POS_COUNT_FILE, POS_FREQUENCY_FILE, SUFFIX_TABLE_FILE,
};
use mimic_core::model::analyzer::CorpusStats;
use mimic_core::model::generator::Generator;
use mimic_core::model::pos::{LexiconTagger, PosCountTable, PosFrequencyTable};
use mimic_core::model::stats::{FrequencyTable, SuffixTable};

/// Builds and samples a pastiche model over a corpus of short posts.
#[derive(Parser)]
#[command(name = "mimic", version, about)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Analyze a raw corpus file and export the statistics tables.
	Analyze {
		/// Raw corpus: a JSON array of records with a `text` field.
		corpus: PathBuf,

		/// Directory receiving `count.json` and `freq.json`.
		#[arg(long, default_value = "data")]
		out_dir: PathBuf,
	},

	/// Load the exported tables and print one generated text.
	Generate {
		/// Directory holding the four table files.
		#[arg(long, default_value = "data")]
		data_dir: PathBuf,

		/// Seed word; a random corpus token when omitted.
		#[arg(long)]
		seed: Option<String>,

		/// Character bound of the generated text.
		#[arg(long, default_value_t = 280)]
		max_length: usize,

		/// Optional word → tag JSON lexicon for the tagger.
		#[arg(long)]
		lexicon: Option<PathBuf>,
	},
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	match Cli::parse().command {
		Command::Analyze { corpus, out_dir } => {
			let stats = CorpusStats::load_or_build(&corpus)?;
			stats.write_tables(&out_dir)?;
			log::info!(
				"exported {} prefixes and {} distinct tokens to {}",
				stats.suffix.len(),
				stats.frequency.len(),
				out_dir.display()
			);
		}
		Command::Generate {
			data_dir,
			seed,
			max_length,
			lexicon,
		} => {
			let suffix: SuffixTable = io::read_json(data_dir.join(SUFFIX_TABLE_FILE))?;
			let frequency: FrequencyTable = io::read_json(data_dir.join(FREQUENCY_TABLE_FILE))?;
			let pos_counts = PosCountTable::load(data_dir.join(POS_COUNT_FILE))?;
			let pos_freq = PosFrequencyTable::load(data_dir.join(POS_FREQUENCY_FILE))?;

			let tagger = match lexicon {
				Some(path) => LexiconTagger::from_file(path)?,
				None => LexiconTagger::default(),
			};

			let generator = Generator::new(suffix, frequency, pos_freq, pos_counts, tagger);

			let mut rng = rand::rng();
			let seed = match seed {
				Some(seed) => seed,
				None => generator
					.random_seed(&mut rng)
					.ok_or("the model is empty, no seed available")?,
			};

			let text = generator.generate_with_rng(&seed, max_length, &mut rng)?;
			println!("{text}");
		}
	}

	Ok(())
}
