use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use next_stop::config::{LogFormat, LoggingSettings, Settings};
use next_stop::routes::{self, AppState, handle_json_payload_error};
use next_stop::services::Catalog;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.log_format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load_default_or_env()
        .and_then(|settings| settings.validate().map(|_| settings))
        .map_err(|e| startup_error("Configuration error", e))?;

    init_logging(&settings.logging);

    info!("Starting next-stop service...");

    let catalog = Catalog::from_settings(settings.catalog.path.as_deref()).map_err(|e| {
        error!("Failed to load stop catalog: {}", e);
        startup_error("Catalog error", e)
    })?;

    match settings.catalog.path.as_deref() {
        Some(path) => info!("Loaded {} stops from {}", catalog.len(), path),
        None => info!("Using built-in sample catalog ({} stops)", catalog.len()),
    }

    let default_offset = settings
        .time
        .default_offset()
        .ok_or_else(|| startup_error("Configuration error", "invalid default UTC offset"))?;

    let app_state = AppState {
        catalog,
        default_offset,
    };

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
