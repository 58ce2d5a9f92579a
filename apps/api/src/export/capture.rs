//! Document capture: hands a fully rendered layout to whatever turns it
//! into a downloadable file.
//!
//! The core's whole contract with the collaborator is the `CaptureRequest`:
//! the layout tree plus a suggested file name. Capture is fire-and-forget;
//! callers spawn it and only log failures.
//!
//! `AppState` holds an `Arc<dyn DocumentCapture>`. The default backend is
//! `SpoolCapture`, which drops each request as JSON into a directory for an
//! external renderer to pick up.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::export::json::suggested_capture_file_name;
use crate::layout::LayoutTree;
use crate::models::Document;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture spool I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode capture request: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptureRequest {
    pub file_name: String,
    pub layout: LayoutTree,
    pub requested_at: DateTime<Utc>,
}

impl CaptureRequest {
    pub fn new(document: &Document, layout: LayoutTree) -> CaptureRequest {
        CaptureRequest {
            file_name: suggested_capture_file_name(&document.personal.name),
            layout,
            requested_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait DocumentCapture: Send + Sync {
    async fn capture(&self, request: CaptureRequest) -> Result<(), CaptureError>;

    /// Backend name, reported in the capture response.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// SpoolCapture
// ────────────────────────────────────────────────────────────────────────────

pub struct SpoolCapture {
    dir: PathBuf,
}

impl SpoolCapture {
    pub fn new(dir: impl Into<PathBuf>) -> SpoolCapture {
        SpoolCapture { dir: dir.into() }
    }

    fn spool_path(&self, request: &CaptureRequest) -> PathBuf {
        let stamp = request.requested_at.format("%Y%m%dT%H%M%S%.3fZ");
        self.dir.join(format!("{stamp}-{}.json", request.file_name))
    }
}

#[async_trait]
impl DocumentCapture for SpoolCapture {
    async fn capture(&self, request: CaptureRequest) -> Result<(), CaptureError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.spool_path(&request);
        let body = serde_json::to_vec_pretty(&request)?;
        tokio::fs::write(&path, body).await?;
        info!("Spooled capture of '{}' to {}", request.file_name, path.display());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "spool"
    }
}
