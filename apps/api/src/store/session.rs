//! Document store for the single editing session's document, theme and locale.
//!
//! Every mutation writes the affected entry back to storage. The store never
//! validates field contents; the editing surface is responsible for that.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{default_for, Document, DocumentField, FieldUpdate, Locale, Theme};
use crate::store::reconcile::{load_document, load_locale, load_theme, reconcile, RawDocument, ReconcileError};
use crate::store::storage::{KeyValueStorage, StorageError, DOCUMENT_KEY, LOCALE_KEY, THEME_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("could not serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("import failed: {0}")]
    Import(#[source] ReconcileError),

    #[error("reset requires confirmation")]
    ResetNotConfirmed,
}

pub struct SessionStore {
    document: Document,
    theme: Theme,
    locale: Locale,
    revisions: HashMap<DocumentField, u64>,
    storage: Box<dyn KeyValueStorage>,
}

impl SessionStore {
    /// Restores the session from storage, falling back to the built-in
    /// default for the stored locale. Unreadable entries never fail startup.
    pub fn open(storage: Box<dyn KeyValueStorage>) -> SessionStore {
        let locale = load_locale(read_entry(storage.as_ref(), LOCALE_KEY).as_deref());
        let theme = load_theme(read_entry(storage.as_ref(), THEME_KEY).as_deref());
        let default = default_for(locale);
        let document = load_document(read_entry(storage.as_ref(), DOCUMENT_KEY).as_deref(), &default);
        info!(
            "Session opened (locale: {}, template: {})",
            locale.code(),
            theme.template.as_str()
        );
        SessionStore {
            document,
            theme,
            locale,
            revisions: HashMap::new(),
            storage,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Number of times `field` has been written this session.
    pub fn revision(&self, field: DocumentField) -> u64 {
        self.revisions.get(&field).copied().unwrap_or(0)
    }

    /// Replaces exactly one top-level field and persists the document.
    ///
    /// The in-memory value is updated even when persisting fails.
    pub fn update(&mut self, update: FieldUpdate) -> Result<(), StoreError> {
        let field = update.field();
        self.document.apply(update);
        *self.revisions.entry(field).or_insert(0) += 1;
        self.persist_document()
    }

    /// Substitutes the whole document and persists it.
    pub fn replace(&mut self, document: Document) -> Result<(), StoreError> {
        self.document = document;
        for field in DocumentField::ALL {
            *self.revisions.entry(field).or_insert(0) += 1;
        }
        self.persist_document()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.theme = theme;
        let json = serde_json::to_string(&self.theme)?;
        self.storage.set(THEME_KEY, &json)?;
        Ok(())
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<(), StoreError> {
        self.locale = locale;
        self.storage.set(LOCALE_KEY, locale.code())?;
        Ok(())
    }

    /// Restores the built-in document for the current locale. The caller
    /// must pass the user's explicit confirmation.
    pub fn reset(&mut self, confirmed: bool) -> Result<(), StoreError> {
        if !confirmed {
            return Err(StoreError::ResetNotConfirmed);
        }
        info!("Resetting document to the '{}' default", self.locale.code());
        self.replace(default_for(self.locale))
    }

    /// Replaces the document with an imported one. Unparseable input leaves
    /// the current document untouched.
    pub fn import_json(&mut self, text: &str) -> Result<(), StoreError> {
        let raw = RawDocument::parse(text).map_err(|e| {
            warn!("Rejected import: {e}");
            StoreError::Import(e)
        })?;
        let document = reconcile(Some(raw), &default_for(self.locale));
        info!("Imported document for '{}'", document.personal.name);
        self.replace(document)
    }

    /// The current document as pretty-printed JSON, verbatim.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    fn persist_document(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.document)?;
        self.storage.set(DOCUMENT_KEY, &json).map_err(|e| {
            warn!("Failed to persist document: {e}");
            StoreError::from(e)
        })
    }
}

fn read_entry(storage: &dyn KeyValueStorage, key: &str) -> Option<String> {
    storage.get(key).unwrap_or_else(|e| {
        warn!("Could not read '{key}' from storage: {e}");
        None
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{
        default_ar, default_en, SectionKey, Skill, SkillDisplayStyle, TemplateKind,
    };
    use crate::store::editing::{is_section_permutation, move_section, MoveDirection};
    use crate::store::storage::MemoryStorage;
    use serde_json::Map;

    fn open_with(storage: Arc<MemoryStorage>) -> SessionStore {
        SessionStore::open(Box::new(storage))
    }

    #[test]
    fn test_fresh_storage_uses_english_default() {
        let store = open_with(Arc::new(MemoryStorage::new()));
        assert_eq!(store.locale(), Locale::En);
        assert_eq!(store.document().personal.name, default_en().personal.name);
        assert_eq!(store.theme(), &Theme::default());
    }

    #[test]
    fn test_stored_arabic_locale_selects_arabic_default() {
        let storage = Arc::new(MemoryStorage::with_entries([(LOCALE_KEY, "ar")]));
        let store = open_with(storage);
        assert_eq!(store.document().personal.name, default_ar().personal.name);
    }

    #[test]
    fn test_corrupt_document_falls_back_silently() {
        let storage = Arc::new(MemoryStorage::with_entries([(DOCUMENT_KEY, "{{{")]));
        let store = open_with(storage);
        assert_eq!(store.document().summary, default_en().summary);
    }

    #[test]
    fn test_update_replaces_one_field_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = open_with(storage.clone());
        let before = store.document().clone();

        store.update(FieldUpdate::Summary("New summary".to_string())).unwrap();

        let doc = store.document();
        assert_eq!(doc.summary, "New summary");
        assert_eq!(doc.experience, before.experience);
        assert_eq!(doc.personal, before.personal);
        assert_eq!(store.revision(DocumentField::Summary), 1);
        assert_eq!(store.revision(DocumentField::Experience), 0);

        let persisted = storage.get(DOCUMENT_KEY).unwrap().unwrap();
        let reloaded: Document = serde_json::from_str(&persisted).unwrap();
        assert_eq!(&reloaded, store.document());
    }

    #[test]
    fn test_update_accepts_out_of_range_level() {
        let mut store = open_with(Arc::new(MemoryStorage::new()));
        let mut skills = store.document().skills.clone();
        skills.push(Skill {
            id: "x".to_string(),
            name: "Rust".to_string(),
            level: 150,
            extra: Map::new(),
        });
        store.update(FieldUpdate::Skills(skills)).unwrap();
        assert_eq!(store.document().skills.last().unwrap().level, 150);
    }

    #[test]
    fn test_section_order_stays_a_permutation_across_moves() {
        let mut store = open_with(Arc::new(MemoryStorage::new()));
        for (i, dir) in [
            (0, MoveDirection::Down),
            (3, MoveDirection::Up),
            (5, MoveDirection::Down),
            (2, MoveDirection::Down),
            (4, MoveDirection::Up),
        ] {
            let mut order = store.document().section_order.clone();
            move_section(&mut order, i, dir);
            store.update(FieldUpdate::SectionOrder(order)).unwrap();
            assert!(is_section_permutation(&store.document().section_order));
        }
        assert_eq!(store.revision(DocumentField::SectionOrder), 5);
    }

    #[test]
    fn test_state_survives_reopen() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = open_with(storage.clone());
            store.update(FieldUpdate::Summary("Persisted".to_string())).unwrap();
            store
                .set_theme(Theme {
                    template: TemplateKind::Creative,
                    ..Theme::default()
                })
                .unwrap();
            store.set_locale(Locale::Ar).unwrap();
        }
        let store = open_with(storage);
        assert_eq!(store.document().summary, "Persisted");
        assert_eq!(store.theme().template, TemplateKind::Creative);
        assert_eq!(store.locale(), Locale::Ar);
    }

    #[test]
    fn test_set_theme_does_not_touch_document() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = open_with(storage.clone());
        store
            .set_theme(Theme {
                skill_display_style: SkillDisplayStyle::Dots,
                ..Theme::default()
            })
            .unwrap();
        assert_eq!(storage.get(DOCUMENT_KEY).unwrap(), None);
        assert!(storage.get(THEME_KEY).unwrap().unwrap().contains("\"dots\""));
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut store = open_with(Arc::new(MemoryStorage::new()));
        store.update(FieldUpdate::Summary("Mine".to_string())).unwrap();
        assert!(matches!(store.reset(false), Err(StoreError::ResetNotConfirmed)));
        assert_eq!(store.document().summary, "Mine");
    }

    #[test]
    fn test_reset_uses_locale_default() {
        let mut store = open_with(Arc::new(MemoryStorage::new()));
        store.set_locale(Locale::Ar).unwrap();
        store.update(FieldUpdate::Summary("Mine".to_string())).unwrap();
        store.reset(true).unwrap();
        assert_eq!(store.document().summary, default_ar().summary);
        assert_eq!(store.revision(DocumentField::Personal), 1);
    }

    #[test]
    fn test_import_round_trips_export() {
        let mut store = open_with(Arc::new(MemoryStorage::new()));
        let mut order = SectionKey::ALL.to_vec();
        order.reverse();
        store.update(FieldUpdate::SectionOrder(order)).unwrap();
        store.update(FieldUpdate::Summary("Exported".to_string())).unwrap();
        let original = store.document().clone();

        let exported = store.export_json().unwrap();
        let mut other = open_with(Arc::new(MemoryStorage::new()));
        other.import_json(&exported).unwrap();
        assert_eq!(other.document(), &original);
    }

    #[test]
    fn test_import_keeps_older_items_and_their_unknown_keys() {
        let mut store = open_with(Arc::new(MemoryStorage::new()));
        let file = r#"{
            "summary": "From an older editor",
            "languages": [{"id": "l1", "name": "Esperanto", "since": 2015}],
            "skills": [{"id": "s1", "name": "Rust", "level": 85.5, "category": "lang"}]
        }"#;
        store.import_json(file).unwrap();

        let doc = store.document();
        assert_eq!(doc.languages.len(), 1);
        assert_eq!(doc.languages[0].name, "Esperanto");
        assert_eq!(doc.skills.len(), 1);
        assert_eq!(doc.skills[0].level, 85);

        let exported: serde_json::Value = serde_json::from_str(&store.export_json().unwrap()).unwrap();
        assert_eq!(exported["languages"][0]["since"], 2015);
        assert_eq!(exported["languages"][0]["proficiency"], "Intermediate");
        assert_eq!(exported["skills"][0]["category"], "lang");
    }

    #[test]
    fn test_failed_import_leaves_document_unchanged() {
        let mut store = open_with(Arc::new(MemoryStorage::new()));
        let before = store.document().clone();
        assert!(matches!(store.import_json("not json"), Err(StoreError::Import(_))));
        assert!(matches!(store.import_json("[]"), Err(StoreError::Import(_))));
        assert_eq!(store.document(), &before);
        assert_eq!(store.revision(DocumentField::Summary), 0);
    }
}
