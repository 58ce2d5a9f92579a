use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::export::EXPORT_FILE_NAME;
use crate::models::{Document, DocumentField, FieldUpdate, SectionKey};
use crate::state::AppState;
use crate::store::editing::{
    document_bad_id, is_section_permutation, move_section, update_bad_id, ItemList, MoveDirection,
};

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Result<Json<Document>, AppError> {
    let session = state.session()?;
    Ok(Json(session.document().clone()))
}

/// PUT /api/v1/document
pub async fn handle_replace_document(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<Json<Document>, AppError> {
    check_section_order(&document.section_order)?;
    if let Some((field, id)) = document_bad_id(&document) {
        return Err(bad_item_id(field, id));
    }
    let mut session = state.session()?;
    session.replace(document)?;
    Ok(Json(session.document().clone()))
}

/// PATCH /api/v1/document
/// Body: `{"field": "<top-level key>", "value": <new value>}`.
pub async fn handle_update_field(
    State(state): State<AppState>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<Document>, AppError> {
    if let FieldUpdate::SectionOrder(order) = &update {
        check_section_order(order)?;
    }
    if let Some(id) = update_bad_id(&update) {
        return Err(bad_item_id(update.field(), id));
    }
    let mut session = state.session()?;
    session.update(update)?;
    Ok(Json(session.document().clone()))
}

/// GET /api/v1/document/revisions
/// How many times each top-level field has been written this session.
pub async fn handle_revisions(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, AppError> {
    let session = state.session()?;
    let revisions = DocumentField::ALL
        .into_iter()
        .map(|field| (field.json_key().to_string(), Value::from(session.revision(field))))
        .collect();
    Ok(Json(revisions))
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// POST /api/v1/document/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<Document>, AppError> {
    let mut session = state.session()?;
    session.reset(req.confirm)?;
    Ok(Json(session.document().clone()))
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

/// POST /api/v1/document/sections/:key/move
/// Moving past either end leaves the order unchanged.
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<Vec<SectionKey>>, AppError> {
    let key = SectionKey::parse(&key).ok_or_else(|| AppError::NotFound(format!("Section '{key}' not found")))?;
    let mut session = state.session()?;
    let mut order = session.document().section_order.clone();
    let Some(index) = order.iter().position(|k| *k == key) else {
        return Err(AppError::NotFound(format!("Section '{}' is not in the order", key.as_str())));
    };
    if move_section(&mut order, index, req.direction) {
        session.update(FieldUpdate::SectionOrder(order))?;
    }
    Ok(Json(session.document().section_order.clone()))
}

#[derive(Debug, Serialize)]
pub struct AddedItem {
    pub id: String,
}

/// POST /api/v1/document/:list/items
/// Appends a blank item, overwritten by any fields in the optional body.
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(list): Path<String>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<(StatusCode, Json<AddedItem>), AppError> {
    let list = parse_list(&list)?;
    let fields = body.map(|Json(fields)| fields).unwrap_or_default();
    let mut session = state.session()?;
    let (update, id) = list
        .with_added(session.document(), &fields)
        .map_err(|e| AppError::Validation(format!("Invalid item fields: {e}")))?;
    session.update(update)?;
    info!("Added item {id}");
    Ok((StatusCode::CREATED, Json(AddedItem { id })))
}

/// PATCH /api/v1/document/:list/items/:id
pub async fn handle_patch_item(
    State(state): State<AppState>,
    Path((list, id)): Path<(String, String)>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<StatusCode, AppError> {
    let list = parse_list(&list)?;
    let mut session = state.session()?;
    let update = list
        .with_patched(session.document(), &id, &fields)
        .map_err(|e| AppError::Validation(format!("Invalid item fields: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("Item {id} not found")))?;
    session.update(update)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/document/:list/items/:id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((list, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let list = parse_list(&list)?;
    let mut session = state.session()?;
    let update = list
        .with_removed(session.document(), &id)
        .ok_or_else(|| AppError::NotFound(format!("Item {id} not found")))?;
    session.update(update)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/document/import
/// Multipart upload; the `file` part must hold a document JSON.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Document>, AppError> {
    let mut text = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ImportFailed(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::ImportFailed(e.to_string()))?;
            text = Some(
                String::from_utf8(bytes.to_vec())
                    .map_err(|_| AppError::ImportFailed("file is not UTF-8 text".to_string()))?,
            );
            break;
        }
    }
    let text = text.ok_or_else(|| AppError::Validation("Missing 'file' part".to_string()))?;

    let mut session = state.session()?;
    session.import_json(&text)?;
    Ok(Json(session.document().clone()))
}

/// GET /api/v1/document/export
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let json = state.session()?.export_json()?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        json,
    ))
}

fn check_section_order(order: &[SectionKey]) -> Result<(), AppError> {
    if is_section_permutation(order) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "sectionOrder must list each section exactly once".to_string(),
        ))
    }
}

fn bad_item_id(field: DocumentField, id: &str) -> AppError {
    if id.is_empty() {
        AppError::Validation(format!("{} has an item without an id", field.json_key()))
    } else {
        AppError::Validation(format!("{} repeats item id '{id}'", field.json_key()))
    }
}

fn parse_list(name: &str) -> Result<ItemList, AppError> {
    ItemList::parse(name).ok_or_else(|| AppError::NotFound(format!("List '{name}' not found")))
}
