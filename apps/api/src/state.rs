use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;

use crate::config::Config;
use crate::errors::AppError;
use crate::export::DocumentCapture;
use crate::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one editing session. Never held across an `.await`.
    pub session: Arc<Mutex<SessionStore>>,
    pub config: Config,
    /// Pluggable capture backend. Default: SpoolCapture into `config.export_dir`.
    pub capture: Arc<dyn DocumentCapture>,
}

impl AppState {
    pub fn new(session: SessionStore, config: Config, capture: Arc<dyn DocumentCapture>) -> Self {
        AppState {
            session: Arc::new(Mutex::new(session)),
            config,
            capture,
        }
    }

    pub fn session(&self) -> Result<MutexGuard<'_, SessionStore>, AppError> {
        self.session
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("session lock poisoned")))
    }
}
