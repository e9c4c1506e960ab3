use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use car_finder::config::{LoggingSettings, Settings, StorageBackend};
use car_finder::core::Catalog;
use car_finder::routes::{self, AppState};
use car_finder::services::{shared, FavoritesStore, JsonStorage, ListingRepository, MemoryStorage, PreferenceStore, SharedStorage};
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.pretty().init(),
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is not configured yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging);
    info!("Starting Car Finder catalog service...");

    // Listing source and cache
    let source = settings
        .catalog
        .listing_source()
        .map_err(|e| startup_error("Invalid catalog configuration", e))?;
    let listings = ListingRepository::new(source, Duration::from_secs(settings.catalog.cache_ttl_secs));

    // Warm the cache; a failure here is not fatal since requests retry the load
    match listings.get_all().await {
        Ok(all) => info!("Catalog ready with {} listings from {}", all.len(), listings.source().describe()),
        Err(e) => error!("Initial listing load failed ({}), will retry on first request", e),
    }

    // Local storage shared by the wishlist and preferences
    let storage: SharedStorage = match settings.storage.backend {
        StorageBackend::Json => {
            let json = JsonStorage::open(&settings.storage.path)
                .map_err(|e| startup_error("Failed to open wishlist storage", e))?;
            shared(json)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage, wishlist will not survive restarts");
            shared(MemoryStorage::new())
        }
    };

    let favorites = FavoritesStore::load(storage.clone())
        .map_err(|e| startup_error("Failed to load wishlist", e))?;
    info!("Wishlist loaded with {} entries", favorites.len());

    let preferences = PreferenceStore::new(storage);
    let catalog = Catalog::new(settings.catalog.page_size);

    let app_state = AppState::new(listings, catalog, favorites, preferences);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
