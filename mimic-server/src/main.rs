use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use serde::Deserialize;

use mimic_core::io::{
	self, FREQUENCY_TABLE_FILE, POS_COUNT_FILE, POS_FREQUENCY_FILE, SUFFIX_TABLE_FILE,
};
use mimic_core::model::generator::Generator;
use mimic_core::model::pos::{LexiconTagger, PosCountTable, PosFrequencyTable};
use mimic_core::model::stats::{FrequencyTable, SuffixTable};

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>,
	max_length: Option<usize>,
}

struct SharedData {
	generator: Generator<LexiconTagger>,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Walks the chain from the given (or a random) seed and returns the
/// generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let max_length = query
		.max_length
		.unwrap_or(Generator::<LexiconTagger>::DEFAULT_MAX_LENGTH);
	if max_length == 0 {
		return HttpResponse::BadRequest().body("max_length must be > 0");
	}

	let data = match data.lock() {
		Ok(data) => data,
		Err(_) => return HttpResponse::InternalServerError().body("state poisoned"),
	};

	let mut rng = rand::rng();
	let seed = match &query.seed {
		Some(seed) if !seed.is_empty() => seed.clone(),
		_ => match data.generator.random_seed(&mut rng) {
			Some(seed) => seed,
			None => return HttpResponse::InternalServerError().body("the model is empty"),
		},
	};

	match data.generator.generate_with_rng(&seed, max_length, &mut rng) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(error) => HttpResponse::InternalServerError().body(error.to_string()),
	}
}

/// HTTP GET endpoint `/v1/seed`
///
/// Returns one random seed token from the corpus frequencies.
#[get("/v1/seed")]
async fn get_seed(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data = match data.lock() {
		Ok(data) => data,
		Err(_) => return HttpResponse::InternalServerError().body("state poisoned"),
	};

	match data.generator.random_seed(&mut rand::rng()) {
		Some(seed) => HttpResponse::Ok().body(seed),
		None => HttpResponse::InternalServerError().body("the model is empty"),
	}
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let data_dir = std::env::args()
		.nth(1)
		.unwrap_or_else(|| "data".to_owned());
	let data_dir = std::path::PathBuf::from(data_dir);

	let load = || -> Result<SharedData, Box<dyn std::error::Error>> {
		let suffix: SuffixTable = io::read_json(data_dir.join(SUFFIX_TABLE_FILE))?;
		let frequency: FrequencyTable = io::read_json(data_dir.join(FREQUENCY_TABLE_FILE))?;
		let pos_counts = PosCountTable::load(data_dir.join(POS_COUNT_FILE))?;
		let pos_freq = PosFrequencyTable::load(data_dir.join(POS_FREQUENCY_FILE))?;
		Ok(SharedData {
			generator: Generator::new(
				suffix,
				frequency,
				pos_freq,
				pos_counts,
				LexiconTagger::default(),
			),
		})
	};

	let shared = match load() {
		Ok(shared) => shared,
		Err(error) => {
			return Err(std::io::Error::new(
				std::io::ErrorKind::InvalidData,
				error.to_string(),
			));
		}
	};
	let data = web::Data::new(Mutex::new(shared));

	log::info!("serving generation on 127.0.0.1:8080");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(data.clone())
			.service(get_generated)
			.service(get_seed)
	})
	.bind(("127.0.0.1", 8080))?
	.run()
	.await
}
