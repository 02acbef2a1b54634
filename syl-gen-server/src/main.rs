use std::env;
use std::sync::{Arc, RwLock};

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use syl_gen_core::corpus::{Gender, Selection};
use syl_gen_core::error::GenerationError;
use syl_gen_core::model::generation_request::{GenerationRequest, DEFAULT_LANGUAGE};
use syl_gen_core::model::generator::Generator;

/// Attempt ceiling applied when the query does not set one.
/// Generation retries until it has enough names, the server never waits forever.
const DEFAULT_MAX_ATTEMPTS: usize = 100_000;
const MAX_COUNT: usize = 1_000;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	languages: Option<String>, // comma separated
	genders: Option<String>, // "mfx", "m,f"
	max_length: Option<usize>,
	max_attempts: Option<usize>,
	seed: Option<u64>,
	report_attempts: Option<bool>
}

/// Struct representing query parameters for the `/v1/statistics` endpoint
#[derive(Deserialize)]
struct SelectionParams {
	languages: Option<String>,
	genders: Option<String>
}

struct SharedData {
	data_folder: String,
	generator: Generator
}

fn parse_languages(languages: &Option<String>) -> Vec<String> {
	match languages {
		Some(s) if !s.trim().is_empty() => s.split(',').map(|l| l.trim().to_owned()).collect(),
		_ => vec![DEFAULT_LANGUAGE.to_owned()],
	}
}

fn parse_genders(genders: &Option<String>) -> Result<Vec<Gender>, String> {
	match genders {
		Some(s) if !s.trim().is_empty() => Gender::parse_tags(s),
		_ => Ok(Gender::ALL.to_vec()),
	}
}

impl GenerateParams {
	/// Builds the generation request, falling back to defaults.
	fn request(&self) -> Result<GenerationRequest, String> {
		let count = self.count.unwrap_or(10);
		if count > MAX_COUNT {
			return Err(format!("count must be at most {}", MAX_COUNT));
		}

		let mut request = GenerationRequest::new(count);
		request.set_languages(parse_languages(&self.languages))?;
		request.set_genders(&parse_genders(&self.genders)?)?;
		request.max_length = self.max_length.unwrap_or(request.max_length);
		request.max_attempts = Some(self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS));
		request.seed = self.seed;
		request.report_attempts = self.report_attempts.unwrap_or(false);
		request.validate()?;
		Ok(request)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates names for the requested languages and genders.
/// Returns `{ "names": [...], "attempts": n }` as JSON.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let request = match query.request() {
		Ok(r) => r,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared = data.into_inner();
	let result = web::block(move || {
		let shared_data = shared.read().map_err(|_| "Corpus lock failed".to_owned())?;
		Ok::<_, String>(shared_data.generator.generate_names(&request))
	})
		.await;

	match result {
		Ok(Ok(Ok(outcome))) => HttpResponse::Ok().json(outcome),
		Ok(Ok(Err(e @ GenerationError::EmptyModel(_)))) => HttpResponse::NotFound().body(e.to_string()),
		Ok(Ok(Err(e @ GenerationError::AttemptsExhausted { .. }))) => HttpResponse::UnprocessableEntity().body(e.to_string()),
		Ok(Ok(Err(e @ GenerationError::LengthUnreachable { .. }))) => HttpResponse::UnprocessableEntity().body(e.to_string()),
		Ok(Ok(Err(e @ GenerationError::InvalidRequest(_)))) => HttpResponse::BadRequest().body(e.to_string()),
		Ok(Ok(Err(e))) => HttpResponse::InternalServerError().body(e.to_string()),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e),
		Err(e) => HttpResponse::InternalServerError().body(format!("Generation failed: {e}")),
	}
}

#[get("/v1/languages")]
async fn get_languages(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.get_languages().join("\n"))
}

/// HTTP GET endpoint `/v1/statistics`
///
/// Returns the syllable → successors lists of a selection as JSON,
/// pretty printed like the exported statistics files.
#[get("/v1/statistics")]
async fn get_statistics(data: web::Data<RwLock<SharedData>>, query: web::Query<SelectionParams>) -> impl Responder {
	let genders = match parse_genders(&query.genders) {
		Ok(g) => g,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};
	let selection = Selection::new(parse_languages(&query.languages), &genders);

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};
	let table = shared_data.generator.build_table(&selection);
	if table.is_empty() {
		return HttpResponse::NotFound().body(GenerationError::EmptyModel(selection).to_string());
	}
	match serde_json::to_string_pretty(&table.successor_lists()) {
		Ok(body) => HttpResponse::Ok().content_type("application/json").body(body),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to encode statistics: {e}"))
	}
}

#[put("/v1/reload")]
async fn put_reload(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};

	match Generator::new(&shared_data.data_folder) {
		Ok(generator) => {
			shared_data.generator = generator;
			HttpResponse::Ok().body("Corpus reloaded successfully")
		}
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to load corpus: {e}"))
	}
}

/// Main entry point for the server.
///
/// Loads the name corpus, wraps the generator in a `RwLock`
/// and starts an Actix-web HTTP server.
///
/// # Configuration
/// - `SYL_GEN_DATA`: corpus folder (default `./data`)
/// - `SYL_GEN_ADDR`: bind address (default `127.0.0.1:5000`)
/// - `RUST_LOG`: log filter (default `info`)
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let data_folder = env::var("SYL_GEN_DATA").unwrap_or_else(|_| "./data".to_owned());
	let address = env::var("SYL_GEN_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());

	let generator = Generator::new(&data_folder)?;
	log::info!("serving {} on {}", generator.get_languages().join(", "), address);

	let shared_data = SharedData { data_folder, generator };
	let shared_model = web::Data::from(Arc::new(RwLock::new(shared_data)));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_languages)
			.service(get_statistics)
			.service(put_reload)
	})
		.bind(address)?
		.run()
		.await?;

	Ok(())
}
