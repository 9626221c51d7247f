use std::env;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};

use serde::Deserialize;
use mchain_core::io::{get_filename, list_files, normalize_folder};
use mchain_core::{ChainError, ChainModel, RngIndexSource};

const DEFAULT_STEPS: usize = 100;

/// Upper bound on `steps` for one request: generation runs on the worker
/// thread while holding the model read lock.
const MAX_STEPS: usize = 100_000;

/// Server settings, read from the environment.
///
/// - `MCHAIN_HOST` (default `127.0.0.1`)
/// - `MCHAIN_PORT` (default `5000`)
/// - `MCHAIN_DATA` folder holding the `.txt` sources (default `./data`)
#[derive(Debug, Clone)]
struct ServerConfig {
	host: String,
	port: u16,
	data: PathBuf,
}

impl ServerConfig {
	fn from_env() -> Self {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
		let port = match lookup("MCHAIN_PORT") {
			Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
				warn!("Invalid MCHAIN_PORT '{}', using 5000", value);
				5000
			}),
			None => 5000,
		};
		Self {
			host: lookup("MCHAIN_HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
			port,
			data: normalize_folder(&lookup("MCHAIN_DATA").unwrap_or_else(|| "./data".to_owned())),
		}
	}
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	steps: Option<usize>,
	seed: Option<u64>
}

#[derive(Deserialize)]
struct ModelQuery {
	name: Option<String>
}

struct SharedData {
	data: PathBuf,
	model: Option<ChainModel>,
	name: Option<String>
}

/// Whether `name` is a single plain path component (no folder, no `..`).
fn is_plain_name(name: &str) -> bool {
	let mut components = Path::new(name).components();
	matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Maps a chain error to an HTTP response.
fn chain_error(e: ChainError) -> HttpResponse {
	match e {
		ChainError::Io(e) => HttpResponse::InternalServerError().body(format!("Failed to read text: {e}")),
		e => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates text with the loaded chain. A `seed` makes the result
/// reproducible; without it the thread generator is used.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let steps = query.steps.unwrap_or(DEFAULT_STEPS);
	if steps > MAX_STEPS {
		return HttpResponse::BadRequest().body(format!("steps must be at most {MAX_STEPS}"));
	}

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let model = match &shared_data.model {
		Some(model) => model,
		None => return HttpResponse::Conflict().body("No model loaded"),
	};

	let result = match query.seed {
		Some(seed) => model.generate(steps, &mut RngIndexSource::seeded(seed)),
		None => model.generate(steps, &mut RngIndexSource::thread()),
	};
	match result {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => chain_error(e),
	}
}

/// HTTP GET endpoint `/v1/chain`
///
/// Dumps the transition table of the loaded chain as JSON.
#[get("/v1/chain")]
async fn get_chain(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.model {
		Some(model) => HttpResponse::Ok().json(model.debug_dump()),
		None => HttpResponse::Conflict().body("No model loaded"),
	}
}

#[get("/v1/models")]
async fn get_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let folder = match data.read() {
		Ok(m) => m.data.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&folder, "txt") {
		Ok(files) => {
			// Names as accepted by `/v1/load_model`: only the extension is dropped
			let names: Vec<String> = files.iter().filter_map(|file| get_filename(file).ok()).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models")
	}
}

#[get("/v1/loaded_model")]
async fn get_loaded_model(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.name {
		Some(name) => HttpResponse::Ok().body(name.clone()),
		None => HttpResponse::NotFound().body("No model loaded"),
	}
}

#[put("/v1/load_model")]
async fn put_model(data: web::Data<RwLock<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let query_name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	// Only plain names: the file must live directly in the data folder
	if !is_plain_name(query_name) {
		return HttpResponse::BadRequest().body("Invalid model name");
	}
	let name = query_name.to_owned();

	let folder = match data.read() {
		Ok(m) => m.data.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	// Train outside of the lock, generation keeps serving the previous model
	let model = match ChainModel::from_file(folder.join(format!("{name}.txt"))) {
		Ok(m) => m,
		Err(e) => {
			warn!("Failed to load model {}: {}", name, e);
			return chain_error(e);
		}
	};
	info!("Loaded model {} ({} words, {} prefixes)", name, model.word_count(), model.prefix_count());

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = Some(model);
	shared_data.name = Some(name);

	HttpResponse::Ok().body("Model loaded successfully")
}

/// Main entry point for the server.
///
/// Wraps the chain in a `RwLock`: generation only reads the model, so
/// concurrent requests share it, while loading a new text takes the
/// write lock for the swap only.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = ServerConfig::from_env();
	info!("Serving {} on {}:{}", config.data.display(), config.host, config.port);

	let shared_data = SharedData {
		data: config.data.clone(),
		model: None,
		name: None,
	};
	let shared_model = web::Data::new(RwLock::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_chain)
			.service(get_models)
			.service(put_model)
			.service(get_loaded_model)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
