#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the collision dashboard.
//!
//! Loads the collision export once at startup and serves the filter
//! options and on-demand reports as JSON, plus the frontend static files
//! when they have been built.

mod handlers;
pub mod interactive;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use crash_dash_dataset::{Dataset, DatasetError, paths::dataset_path};
use thiserror::Error;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8050;

/// Default frontend build directory.
pub const DEFAULT_STATIC_DIR: &str = "app/dist";

/// Errors that can stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The HTTP server failed to bind or run.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The loaded collision dataset, read-only for the process lifetime.
    pub dataset: Arc<Dataset>,
}

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Collision CSV export to load.
    pub dataset_path: PathBuf,
    /// Frontend build served at `/` when it exists.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            dataset_path: dataset_path(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT`, `DATASET_PATH` and `STATIC_DIR`, falling
    /// back to the defaults for unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let port = std::env::var("PORT").map_or(DEFAULT_PORT, |p| {
            p.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {p:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            })
        });
        let static_dir = std::env::var("STATIC_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

        Self {
            bind_addr,
            port,
            dataset_path: dataset_path(),
            static_dir,
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/options", web::get().to(handlers::options))
            .route("/report", web::post().to(handlers::report)),
    );
}

/// Loads the dataset and runs the HTTP server until shutdown.
///
/// The caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// * [`ServerError::Dataset`] if the dataset file is missing or unreadable
/// * [`ServerError::Io`] if the server fails to bind or run
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let dataset = crash_dash_dataset::load(&config.dataset_path)?;
    log::info!(
        "Loaded {} collisions ({} boroughs, {} years)",
        dataset.len(),
        dataset.lookups().boroughs.len(),
        dataset.lookups().years.len(),
    );

    let state = web::Data::new(AppState {
        dataset: Arc::new(dataset),
    });

    let static_dir = config.static_dir.is_dir().then(|| config.static_dir.clone());
    if static_dir.is_none() {
        log::info!(
            "Static directory {} not found, serving the API only",
            config.static_dir.display()
        );
    }

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api);

        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
