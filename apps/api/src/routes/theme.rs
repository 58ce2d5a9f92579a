use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::theme::ThemePreset;
use crate::models::{DividerStyle, FontFamily, SkillDisplayStyle, TemplateKind, Theme, THEME_PRESETS};
use crate::state::AppState;

/// GET /api/v1/theme
pub async fn handle_get_theme(State(state): State<AppState>) -> Result<Json<Theme>, AppError> {
    Ok(Json(state.session()?.theme().clone()))
}

/// PUT /api/v1/theme
/// Missing keys take their defaults and unknown enum values fall back.
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Json(theme): Json<Theme>,
) -> Result<Json<Theme>, AppError> {
    let mut session = state.session()?;
    session.set_theme(theme)?;
    Ok(Json(session.theme().clone()))
}

/// GET /api/v1/theme/presets
pub async fn handle_presets() -> Json<Vec<ThemePreset>> {
    Json(THEME_PRESETS.to_vec())
}

#[derive(Debug, Serialize)]
pub struct FontOption {
    pub value: FontFamily,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    pub templates: [TemplateKind; 4],
    pub fonts: Vec<FontOption>,
    pub skill_display_styles: [SkillDisplayStyle; 3],
    pub section_divider_styles: [DividerStyle; 3],
}

/// GET /api/v1/theme/options
/// Every value the design panel can offer.
pub async fn handle_options() -> Json<ThemeOptions> {
    Json(ThemeOptions {
        templates: TemplateKind::ALL,
        fonts: FontFamily::ALL
            .into_iter()
            .map(|value| FontOption {
                value,
                label: value.display_name(),
            })
            .collect(),
        skill_display_styles: [SkillDisplayStyle::Bar, SkillDisplayStyle::Dots, SkillDisplayStyle::Tags],
        section_divider_styles: [DividerStyle::Solid, DividerStyle::Dashed, DividerStyle::None],
    })
}
