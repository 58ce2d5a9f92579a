use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::i18n::{proficiency_label, proficiency_labels, translations, Translations};
use crate::models::{Locale, Proficiency};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LocaleResponse {
    pub locale: Locale,
    pub rtl: bool,
}

impl From<Locale> for LocaleResponse {
    fn from(locale: Locale) -> Self {
        LocaleResponse {
            locale,
            rtl: locale.is_rtl(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocaleRequest {
    pub locale: Locale,
}

/// GET /api/v1/locale
pub async fn handle_get_locale(State(state): State<AppState>) -> Result<Json<LocaleResponse>, AppError> {
    Ok(Json(state.session()?.locale().into()))
}

/// PUT /api/v1/locale
/// Switching locale does not touch the document; it only changes what a reset restores.
pub async fn handle_set_locale(
    State(state): State<AppState>,
    Json(req): Json<LocaleRequest>,
) -> Result<Json<LocaleResponse>, AppError> {
    let mut session = state.session()?;
    session.set_locale(req.locale)?;
    Ok(Json(session.locale().into()))
}

#[derive(Debug, Deserialize)]
pub struct I18nQuery {
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nResponse {
    pub locale: Locale,
    pub rtl: bool,
    pub strings: &'static Translations,
    pub proficiency_labels: &'static [&'static str; 5],
    /// Choices for the language editor's proficiency dropdown.
    pub proficiency_options: Vec<ProficiencyOption>,
}

#[derive(Debug, Serialize)]
pub struct ProficiencyOption {
    pub value: Proficiency,
    pub label: &'static str,
}

/// GET /api/v1/i18n?locale=ar
/// Defaults to the session's locale.
pub async fn handle_i18n(
    State(state): State<AppState>,
    Query(query): Query<I18nQuery>,
) -> Result<Json<I18nResponse>, AppError> {
    let locale = match query.locale.as_deref() {
        Some(code) => Locale::from_code(code),
        None => state.session()?.locale(),
    };
    Ok(Json(I18nResponse {
        locale,
        rtl: locale.is_rtl(),
        strings: translations(locale),
        proficiency_labels: proficiency_labels(locale),
        proficiency_options: Proficiency::ALL
            .into_iter()
            .map(|value| ProficiencyOption {
                value,
                label: proficiency_label(locale, value),
            })
            .collect(),
    }))
}
