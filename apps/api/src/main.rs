mod config;
mod errors;
mod export;
mod i18n;
mod layout;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::export::SpoolCapture;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileStorage, KeyValueStorage, MemoryStorage, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae v{}", env!("CARGO_PKG_VERSION"));

    // Restore the editing session from the data directory
    let storage: Box<dyn KeyValueStorage> = match config.storage {
        StorageBackend::File => {
            let storage = FileStorage::open(&config.data_dir)?;
            info!("Session storage at {}", storage.dir().display());
            Box::new(storage)
        }
        StorageBackend::Memory => {
            warn!("In-memory session storage; edits are lost on exit");
            Box::new(MemoryStorage::new())
        }
    };
    let session = SessionStore::open(storage);

    // Capture requests are spooled for an external renderer
    let capture = Arc::new(SpoolCapture::new(&config.export_dir));
    info!("Capture spool at {}", config.export_dir.display());

    let state = AppState::new(session, config.clone(), capture);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
