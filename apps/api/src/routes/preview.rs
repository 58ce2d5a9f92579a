use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::export::CaptureRequest;
use crate::layout::{preview, project, LayoutTree, Projected};
use crate::state::AppState;

/// GET /api/v1/preview/sections
/// The projected section sequence, before template placement.
pub async fn handle_sections(State(state): State<AppState>) -> Result<Json<Vec<Projected>>, AppError> {
    let session = state.session()?;
    Ok(Json(project(session.document(), session.theme())))
}

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> Result<Json<LayoutTree>, AppError> {
    let session = state.session()?;
    Ok(Json(preview(session.document(), session.theme())))
}

#[derive(Debug, Serialize)]
pub struct CaptureAccepted {
    pub file_name: String,
    pub backend: &'static str,
}

/// POST /api/v1/export/capture
/// Fire-and-forget: the capture runs in the background and failures are only logged.
pub async fn handle_capture(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CaptureAccepted>), AppError> {
    let request = {
        let session = state.session()?;
        CaptureRequest::new(session.document(), preview(session.document(), session.theme()))
    };
    let accepted = CaptureAccepted {
        file_name: request.file_name.clone(),
        backend: state.capture.backend(),
    };

    let capture = state.capture.clone();
    tokio::spawn(async move {
        let file_name = request.file_name.clone();
        match capture.capture(request).await {
            Ok(()) => info!("Capture of '{file_name}' handed off"),
            Err(e) => error!("Capture of '{file_name}' failed: {e}"),
        }
    });

    Ok((StatusCode::ACCEPTED, Json(accepted)))
}
