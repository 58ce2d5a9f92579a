pub mod document;
pub mod health;
pub mod locale;
pub mod preview;
pub mod theme;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document editing
        .route(
            "/api/v1/document",
            get(document::handle_get_document)
                .put(document::handle_replace_document)
                .patch(document::handle_update_field),
        )
        .route("/api/v1/document/reset", post(document::handle_reset))
        .route("/api/v1/document/revisions", get(document::handle_revisions))
        .route(
            "/api/v1/document/sections/:key/move",
            post(document::handle_move_section),
        )
        .route("/api/v1/document/import", post(document::handle_import))
        .route("/api/v1/document/export", get(document::handle_export))
        .route("/api/v1/document/:list/items", post(document::handle_add_item))
        .route(
            "/api/v1/document/:list/items/:id",
            delete(document::handle_remove_item).patch(document::handle_patch_item),
        )
        // Design and locale
        .route(
            "/api/v1/theme",
            get(theme::handle_get_theme).put(theme::handle_set_theme),
        )
        .route("/api/v1/theme/presets", get(theme::handle_presets))
        .route("/api/v1/theme/options", get(theme::handle_options))
        .route(
            "/api/v1/locale",
            get(locale::handle_get_locale).put(locale::handle_set_locale),
        )
        .route("/api/v1/i18n", get(locale::handle_i18n))
        // Rendering and capture
        .route("/api/v1/preview/sections", get(preview::handle_sections))
        .route("/api/v1/preview", get(preview::handle_preview))
        .route("/api/v1/export/capture", post(preview::handle_capture))
        .with_state(state)
}
