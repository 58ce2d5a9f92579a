//! Reconciler: repairs a persisted or imported document against the current schema.
//!
//! Loading is a two-stage deserialize:
//! 1. `RawDocument::parse` accepts any JSON object; every field is optional.
//! 2. `reconcile` layers it over a fully-populated default and returns a
//!    `Document` that satisfies every schema invariant.
//!
//! # Merge rules
//! - Top-level fields present in the raw value replace the default's (lists
//!   are replaced wholesale, never merged element-wise).
//! - Lists are read item by item. An item that cannot be read is dropped on
//!   its own; the rest of the user's list is kept.
//! - `personal`, `sectionTitles` and `sectionVisibility` are shallow-merged:
//!   the default supplies only keys the raw value lacks, unknown keys survive.
//! - A raw field that cannot be read as its declared type (a list that is not
//!   an array, a summary that is not a string) keeps the default.
//! - `sectionOrder` is kept only if it is a permutation of the six section
//!   keys; anything else falls back to the default order.
//! - Empty or duplicate item ids are replaced with fresh ones.

use std::collections::HashSet;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::defaults::new_item_id;
use crate::models::{Document, Identified, Locale, SectionKey, Theme};
use crate::store::editing::is_section_permutation;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("document must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// Stage 1: optional-field representation
// ────────────────────────────────────────────────────────────────────────────

/// A loaded document whose fields may be missing, stale or mistyped.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    fields: Map<String, Value>,
}

impl RawDocument {
    pub fn parse(text: &str) -> Result<RawDocument, ReconcileError> {
        let value: Value = serde_json::from_str(text)?;
        RawDocument::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<RawDocument, ReconcileError> {
        match value {
            Value::Object(fields) => Ok(RawDocument { fields }),
            other => Err(ReconcileError::NotAnObject(json_kind(&other))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stage 2: merge with the schema default
// ────────────────────────────────────────────────────────────────────────────

/// Produces a complete document from an optional raw value and the default.
///
/// With no raw value the default is returned unchanged.
pub fn reconcile(loaded: Option<RawDocument>, schema_default: &Document) -> Document {
    let Some(raw) = loaded else {
        return schema_default.clone();
    };
    let mut fields = raw.fields;
    let mut doc = schema_default.clone();

    take_field(&mut fields, "summary", &mut doc.summary);
    take_list(&mut fields, "socialLinks", &mut doc.social_links);
    take_list(&mut fields, "experience", &mut doc.experience);
    take_list(&mut fields, "education", &mut doc.education);
    take_list(&mut fields, "skills", &mut doc.skills);
    take_list(&mut fields, "languages", &mut doc.languages);
    take_list(&mut fields, "projects", &mut doc.projects);
    take_list(&mut fields, "customSections", &mut doc.custom_sections);

    doc.personal = merge_nested(&schema_default.personal, fields.remove("personal"), "personal");
    doc.section_titles = merge_nested(
        &schema_default.section_titles,
        fields.remove("sectionTitles"),
        "sectionTitles",
    );
    doc.section_visibility = merge_nested(
        &schema_default.section_visibility,
        fields.remove("sectionVisibility"),
        "sectionVisibility",
    );

    if let Some(order) = fields.remove("sectionOrder") {
        doc.section_order = repair_section_order(order, &schema_default.section_order);
    }

    // Whatever is left is not part of the schema; keep it for the next export.
    doc.extra.extend(fields);

    let repaired = repair_ids(&mut doc);
    if repaired > 0 {
        debug!("Assigned fresh ids to {repaired} list items");
    }
    doc
}

fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str, target: &mut T) {
    let Some(value) = fields.remove(key) else {
        return;
    };
    match serde_json::from_value(value) {
        Ok(parsed) => *target = parsed,
        Err(e) => warn!("Ignoring unreadable '{key}' field, keeping default: {e}"),
    }
}

fn take_list<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str, target: &mut Vec<T>) {
    let items = match fields.remove(key) {
        None => return,
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Ignoring '{key}': expected an array, found {}, keeping default", json_kind(&other));
            return;
        }
    };
    *target = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Dropping unreadable '{key}[{index}]': {e}");
                None
            }
        })
        .collect();
}

/// Shallow merge of a loaded nested object over the default's.
fn merge_nested<T>(default: &T, loaded: Option<Value>, key: &str) -> T
where
    T: Serialize + DeserializeOwned + Clone,
{
    let overlay = match loaded {
        None | Some(Value::Null) => return default.clone(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            warn!("Ignoring '{key}': expected an object, found {}", json_kind(&other));
            return default.clone();
        }
    };
    let mut base = match serde_json::to_value(default) {
        Ok(Value::Object(map)) => map,
        _ => return default.clone(),
    };
    for (k, v) in overlay {
        let compatible = base
            .get(&k)
            .map_or(true, |existing| std::mem::discriminant(existing) == std::mem::discriminant(&v));
        if compatible {
            base.insert(k, v);
        } else {
            warn!("Ignoring '{key}.{k}': found {}, keeping default", json_kind(&v));
        }
    }
    serde_json::from_value(Value::Object(base)).unwrap_or_else(|e| {
        warn!("Could not rebuild '{key}', keeping default: {e}");
        default.clone()
    })
}

fn repair_section_order(value: Value, default_order: &[SectionKey]) -> Vec<SectionKey> {
    match serde_json::from_value::<Vec<SectionKey>>(value) {
        Ok(order) if is_section_permutation(&order) => order,
        Ok(order) => {
            warn!(
                "Section order {:?} is not a permutation of the section keys, using default",
                order
            );
            default_order.to_vec()
        }
        Err(e) => {
            warn!("Unreadable section order, using default: {e}");
            default_order.to_vec()
        }
    }
}

fn repair_list<T: Identified>(items: &mut [T]) -> usize {
    let mut seen = HashSet::new();
    let mut repaired = 0;
    for item in items.iter_mut() {
        if item.id().is_empty() || !seen.insert(item.id().to_string()) {
            let id = new_item_id();
            seen.insert(id.clone());
            item.set_id(id);
            repaired += 1;
        }
    }
    repaired
}

/// Gives every item with an empty or repeated id a fresh one. Returns the count.
pub fn repair_ids(doc: &mut Document) -> usize {
    repair_list(&mut doc.social_links)
        + repair_list(&mut doc.experience)
        + repair_list(&mut doc.education)
        + repair_list(&mut doc.skills)
        + repair_list(&mut doc.languages)
        + repair_list(&mut doc.projects)
        + repair_list(&mut doc.custom_sections)
}

// ────────────────────────────────────────────────────────────────────────────
// Loaders for persisted entries
// ────────────────────────────────────────────────────────────────────────────

/// Loads the persisted document. Unreadable text is logged and replaced by
/// the default; it never reaches the caller as an error.
pub fn load_document(text: Option<&str>, schema_default: &Document) -> Document {
    let Some(text) = text else {
        return schema_default.clone();
    };
    match RawDocument::parse(text) {
        Ok(raw) => reconcile(Some(raw), schema_default),
        Err(e) => {
            warn!("Discarding unreadable persisted document: {e}");
            schema_default.clone()
        }
    }
}

/// Loads the persisted theme. Missing keys take the default theme's values.
pub fn load_theme(text: Option<&str>) -> Theme {
    let Some(text) = text else {
        return Theme::default();
    };
    serde_json::from_str(text).unwrap_or_else(|e| {
        warn!("Discarding unreadable persisted theme: {e}");
        Theme::default()
    })
}

pub fn load_locale(text: Option<&str>) -> Locale {
    text.map(Locale::from_code).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_en, Proficiency, TemplateKind};
    use serde_json::json;

    fn raw(value: Value) -> Option<RawDocument> {
        Some(RawDocument::from_value(value).unwrap())
    }

    fn round_trip(doc: &Document) -> Option<RawDocument> {
        Some(RawDocument::parse(&serde_json::to_string(doc).unwrap()).unwrap())
    }

    #[test]
    fn test_absent_returns_default() {
        let default = default_en();
        assert_eq!(reconcile(None, &default), default);
    }

    #[test]
    fn test_empty_object_returns_default() {
        let default = default_en();
        assert_eq!(reconcile(raw(json!({})), &default), default);
    }

    #[test]
    fn test_idempotent_for_assorted_inputs() {
        let default = default_en();
        let inputs = vec![
            json!({}),
            json!({"summary": "Hi", "skills": [{"id": "a", "name": "Rust", "level": 150}]}),
            json!({"personal": {"name": "Sam", "pronouns": "they/them"}, "custom": 1}),
            json!({"sectionOrder": ["skills", "summary"], "sectionTitles": {"skills": "Tools"}}),
            json!({"skills": [{"id": "dup", "name": "A", "level": 1}, {"id": "dup", "name": "B", "level": 2}]}),
            json!({"sectionVisibility": {"experience": "nope", "projects": false}}),
        ];
        for input in inputs {
            let once = reconcile(raw(input.clone()), &default);
            let twice = reconcile(round_trip(&once), &default);
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_backfills_new_nested_key() {
        let default = default_en();
        // A document saved before `projects` had a title.
        let loaded = json!({
            "sectionTitles": {
                "summary": "About", "experience": "Work", "education": "School",
                "skills": "Tools", "languages": "Tongues"
            }
        });
        let doc = reconcile(raw(loaded), &default);
        assert_eq!(doc.section_titles.projects, default.section_titles.projects);
        assert_eq!(doc.section_titles.summary, "About");
        assert_eq!(doc.section_titles.experience, "Work");
        assert_eq!(doc.section_titles.skills, "Tools");
        assert_eq!(doc.section_titles.languages, "Tongues");
    }

    #[test]
    fn test_backfills_visibility_flags() {
        let default = default_en();
        let doc = reconcile(raw(json!({"sectionVisibility": {"experience": false}})), &default);
        assert!(!doc.section_visibility.experience);
        assert!(doc.section_visibility.custom_sections);
        assert!(doc.section_visibility.social_links);
    }

    #[test]
    fn test_preserves_unknown_nested_keys() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({
                "personal": {"name": "Sam", "pronouns": "they/them"},
                "sectionVisibility": {"awards": true}
            })),
            &default,
        );
        assert_eq!(doc.personal.name, "Sam");
        assert_eq!(doc.personal.email, default.personal.email);
        assert_eq!(doc.personal.extra.get("pronouns"), Some(&json!("they/them")));
        assert_eq!(doc.section_visibility.extra.get("awards"), Some(&json!(true)));
    }

    #[test]
    fn test_preserves_unknown_top_level_keys() {
        let default = default_en();
        let doc = reconcile(raw(json!({"certifications": ["AWS"]})), &default);
        assert_eq!(doc.extra.get("certifications"), Some(&json!(["AWS"])));
        let exported = serde_json::to_value(&doc).unwrap();
        assert_eq!(exported["certifications"], json!(["AWS"]));
    }

    #[test]
    fn test_lists_are_replaced_wholesale() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({"skills": [{"id": "x", "name": "Rust", "level": 70}]})),
            &default,
        );
        assert_eq!(doc.skills.len(), 1);
        assert_eq!(doc.skills[0].name, "Rust");
        assert_eq!(doc.experience, default.experience);
    }

    #[test]
    fn test_out_of_range_level_passes_through() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({"skills": [{"id": "x", "name": "Rust", "level": 150}]})),
            &default,
        );
        assert_eq!(doc.skills[0].level, 150);
    }

    #[test]
    fn test_language_without_proficiency_keeps_user_list() {
        let default = default_en();
        let doc = reconcile(raw(json!({"languages": [{"id": "l1", "name": "Esperanto"}]})), &default);
        assert_eq!(doc.languages.len(), 1);
        assert_eq!(doc.languages[0].id, "l1");
        assert_eq!(doc.languages[0].name, "Esperanto");
        assert_eq!(doc.languages[0].proficiency, Proficiency::Intermediate);
    }

    #[test]
    fn test_fractional_and_huge_levels_keep_user_skills() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({"skills": [
                {"id": "s1", "name": "Rust", "level": 85.5},
                {"id": "s2", "name": "Go", "level": 60},
                {"id": "s3", "name": "Zig", "level": 1e20}
            ]})),
            &default,
        );
        let names: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go", "Zig"]);
        assert_eq!(doc.skills[0].level, 85);
        assert_eq!(doc.skills[1].level, 60);
        assert_eq!(doc.skills[2].level, i32::MAX);
    }

    #[test]
    fn test_social_link_without_network_is_kept() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({"socialLinks": [{"id": "x", "url": "https://example.com"}]})),
            &default,
        );
        assert_eq!(doc.social_links.len(), 1);
        assert_eq!(doc.social_links[0].network, "");
        assert_eq!(doc.social_links[0].url, "https://example.com");
    }

    #[test]
    fn test_unreadable_item_is_dropped_alone() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({
                "projects": [
                    {"id": "p1", "name": "Alpha"},
                    "not a project",
                    {"id": "p3", "name": ["bad"]},
                    {"id": "p4", "name": "Delta"}
                ]
            })),
            &default,
        );
        let ids: Vec<&str> = doc.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p4"]);
    }

    #[test]
    fn test_unknown_item_keys_survive_round_trip() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({"skills": [{"id": "s1", "name": "Rust", "level": 80, "category": "lang"}]})),
            &default,
        );
        assert_eq!(doc.skills[0].extra.get("category"), Some(&json!("lang")));
        let exported = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            exported["skills"][0],
            json!({"id": "s1", "name": "Rust", "level": 80, "category": "lang"})
        );
        assert_eq!(reconcile(round_trip(&doc), &default), doc);
    }

    #[test]
    fn test_partial_section_order_falls_back_to_default() {
        let default = default_en();
        let doc = reconcile(raw(json!({"sectionOrder": ["skills", "summary"]})), &default);
        assert_eq!(doc.section_order, SectionKey::ALL.to_vec());
    }

    #[test]
    fn test_unknown_section_key_falls_back_to_default() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({"sectionOrder": ["awards", "summary", "experience", "education", "skills", "languages"]})),
            &default,
        );
        assert_eq!(doc.section_order, default.section_order);
    }

    #[test]
    fn test_valid_permutation_kept_verbatim() {
        let default = default_en();
        let order = json!(["projects", "skills", "summary", "languages", "education", "experience"]);
        let doc = reconcile(raw(json!({ "sectionOrder": order })), &default);
        assert_eq!(
            doc.section_order,
            vec![
                SectionKey::Projects,
                SectionKey::Skills,
                SectionKey::Summary,
                SectionKey::Languages,
                SectionKey::Education,
                SectionKey::Experience,
            ]
        );
    }

    #[test]
    fn test_non_array_section_order_falls_back() {
        let default = default_en();
        let doc = reconcile(raw(json!({"sectionOrder": "summary"})), &default);
        assert_eq!(doc.section_order, default.section_order);
    }

    #[test]
    fn test_mistyped_fields_keep_defaults() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({
                "summary": 42,
                "experience": "none",
                "sectionVisibility": {"experience": "no", "projects": false}
            })),
            &default,
        );
        assert_eq!(doc.summary, default.summary);
        assert_eq!(doc.experience, default.experience);
        assert!(doc.section_visibility.experience);
        assert!(!doc.section_visibility.projects);
    }

    #[test]
    fn test_duplicate_and_missing_ids_are_repaired() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({
                "skills": [
                    {"id": "same", "name": "A", "level": 1},
                    {"id": "same", "name": "B", "level": 2},
                    {"name": "C", "level": 3}
                ]
            })),
            &default,
        );
        assert_eq!(doc.skills[0].id, "same");
        assert_ne!(doc.skills[1].id, "same");
        assert!(!doc.skills[2].id.is_empty());
        assert_ne!(doc.skills[1].id, doc.skills[2].id);
    }

    #[test]
    fn test_unknown_proficiency_is_coerced_not_dropped() {
        let default = default_en();
        let doc = reconcile(
            raw(json!({"languages": [{"id": "l", "name": "Esperanto", "proficiency": "Guru"}]})),
            &default,
        );
        assert_eq!(doc.languages.len(), 1);
        assert_eq!(doc.languages[0].proficiency, Proficiency::Intermediate);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(matches!(
            RawDocument::parse("[1, 2]"),
            Err(ReconcileError::NotAnObject("an array"))
        ));
        assert!(matches!(RawDocument::parse("{not json"), Err(ReconcileError::Parse(_))));
    }

    #[test]
    fn test_load_document_recovers_from_corruption() {
        let default = default_en();
        assert_eq!(load_document(Some("\u{0}garbage"), &default), default);
        assert_eq!(load_document(Some("null"), &default), default);
        assert_eq!(load_document(None, &default), default);
    }

    #[test]
    fn test_load_theme_merges_over_default() {
        let theme = load_theme(Some(r#"{"template":"compact","font":"lora"}"#));
        assert_eq!(theme.template, TemplateKind::Compact);
        assert_eq!(theme.color, Theme::default().color);
        assert_eq!(load_theme(Some("oops")), Theme::default());
        assert_eq!(load_theme(None), Theme::default());
    }

    #[test]
    fn test_load_locale() {
        assert_eq!(load_locale(Some("ar")), Locale::Ar);
        assert_eq!(load_locale(Some("de")), Locale::En);
        assert_eq!(load_locale(None), Locale::En);
    }
}
