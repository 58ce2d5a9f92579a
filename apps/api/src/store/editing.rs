//! Pure list and ordering edits performed by the editor before it hands a
//! whole field to `SessionStore::update`.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::defaults::new_item_id;
use crate::models::{
    CustomSection, Document, DocumentField, Education, Experience, FieldUpdate, Identified, Language,
    Proficiency, Project, SectionKey, Skill, SocialLink,
};

/// True when `order` holds each of the six section keys exactly once.
pub fn is_section_permutation(order: &[SectionKey]) -> bool {
    order.len() == SectionKey::ALL.len() && SectionKey::ALL.iter().all(|k| order.contains(k))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Swaps the key at `index` with its neighbour. Out-of-range moves are no-ops
/// and return `false`.
pub fn move_section(order: &mut [SectionKey], index: usize, direction: MoveDirection) -> bool {
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1),
    };
    match target {
        Some(target) if index < order.len() && target < order.len() => {
            order.swap(index, target);
            true
        }
        _ => false,
    }
}

/// The first empty or repeated id in `items`.
pub fn first_bad_id<T: Identified>(items: &[T]) -> Option<&str> {
    let mut seen = HashSet::new();
    items.iter().map(|item| item.id()).find(|id| id.is_empty() || !seen.insert(*id))
}

/// The first empty or repeated id in any list of `doc`, with its field.
pub fn document_bad_id(doc: &Document) -> Option<(DocumentField, &str)> {
    [
        (DocumentField::SocialLinks, first_bad_id(&doc.social_links)),
        (DocumentField::Experience, first_bad_id(&doc.experience)),
        (DocumentField::Education, first_bad_id(&doc.education)),
        (DocumentField::Skills, first_bad_id(&doc.skills)),
        (DocumentField::Languages, first_bad_id(&doc.languages)),
        (DocumentField::Projects, first_bad_id(&doc.projects)),
        (DocumentField::CustomSections, first_bad_id(&doc.custom_sections)),
    ]
    .into_iter()
    .find_map(|(field, id)| id.map(|id| (field, id)))
}

/// The first empty or repeated id in the list carried by `update`. Non-list
/// updates always pass.
pub fn update_bad_id(update: &FieldUpdate) -> Option<&str> {
    match update {
        FieldUpdate::SocialLinks(v) => first_bad_id(v),
        FieldUpdate::Experience(v) => first_bad_id(v),
        FieldUpdate::Education(v) => first_bad_id(v),
        FieldUpdate::Skills(v) => first_bad_id(v),
        FieldUpdate::Languages(v) => first_bad_id(v),
        FieldUpdate::Projects(v) => first_bad_id(v),
        FieldUpdate::CustomSections(v) => first_bad_id(v),
        FieldUpdate::Personal(_)
        | FieldUpdate::Summary(_)
        | FieldUpdate::SectionOrder(_)
        | FieldUpdate::SectionTitles(_)
        | FieldUpdate::SectionVisibility(_) => None,
    }
}

/// Appends `item` and returns its id.
pub fn add_item<T: Identified>(items: &mut Vec<T>, item: T) -> String {
    let id = item.id().to_string();
    items.push(item);
    id
}

/// Removes the item with `id`. Returns whether anything was removed.
pub fn remove_item<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Overwrites the given JSON fields of the item with `id`.
///
/// The id itself cannot be changed. Returns `Ok(false)` when no item matches.
pub fn patch_item<T>(items: &mut [T], id: &str, patch: &Map<String, Value>) -> Result<bool, serde_json::Error>
where
    T: Identified + Serialize + DeserializeOwned,
{
    let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
        return Ok(false);
    };
    let mut value = serde_json::to_value(&*item)?;
    if let Value::Object(fields) = &mut value {
        for (k, v) in patch {
            if k != "id" {
                fields.insert(k.clone(), v.clone());
            }
        }
    }
    *item = serde_json::from_value(value)?;
    Ok(true)
}

// ────────────────────────────────────────────────────────────────────────────
// Blank items, as the editor's "add" buttons create them
// ────────────────────────────────────────────────────────────────────────────

pub fn blank_social_link() -> SocialLink {
    SocialLink {
        id: new_item_id(),
        network: "Website".to_string(),
        url: String::new(),
        extra: Map::new(),
    }
}

pub fn blank_experience() -> Experience {
    Experience {
        id: new_item_id(),
        company: String::new(),
        position: String::new(),
        start_date: String::new(),
        end_date: String::new(),
        description: String::new(),
        extra: Map::new(),
    }
}

pub fn blank_education() -> Education {
    Education {
        id: new_item_id(),
        institution: String::new(),
        degree: String::new(),
        graduation_date: String::new(),
        gpa: None,
        extra: Map::new(),
    }
}

pub fn blank_skill() -> Skill {
    Skill {
        id: new_item_id(),
        name: String::new(),
        level: 50,
        extra: Map::new(),
    }
}

pub fn blank_language() -> Language {
    Language {
        id: new_item_id(),
        name: String::new(),
        proficiency: Proficiency::Intermediate,
        extra: Map::new(),
    }
}

pub fn blank_project() -> Project {
    Project {
        id: new_item_id(),
        name: String::new(),
        url: String::new(),
        description: String::new(),
        extra: Map::new(),
    }
}

pub fn blank_custom_section() -> CustomSection {
    CustomSection {
        id: new_item_id(),
        title: "New Section".to_string(),
        content: String::new(),
        extra: Map::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyed lists addressed by name
// ────────────────────────────────────────────────────────────────────────────

/// The document's seven id-keyed lists, named by their JSON key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemList {
    SocialLinks,
    Experience,
    Education,
    Skills,
    Languages,
    Projects,
    CustomSections,
}

impl ItemList {
    pub fn parse(s: &str) -> Option<ItemList> {
        match s {
            "socialLinks" => Some(ItemList::SocialLinks),
            "experience" => Some(ItemList::Experience),
            "education" => Some(ItemList::Education),
            "skills" => Some(ItemList::Skills),
            "languages" => Some(ItemList::Languages),
            "projects" => Some(ItemList::Projects),
            "customSections" => Some(ItemList::CustomSections),
            _ => None,
        }
    }

    /// The list with a blank item appended and `fields` applied to it.
    /// Returns the whole-field update and the new item's id.
    pub fn with_added(
        self,
        doc: &Document,
        fields: &Map<String, Value>,
    ) -> Result<(FieldUpdate, String), serde_json::Error> {
        Ok(match self {
            ItemList::SocialLinks => {
                let (v, id) = appended(&doc.social_links, blank_social_link(), fields)?;
                (FieldUpdate::SocialLinks(v), id)
            }
            ItemList::Experience => {
                let (v, id) = appended(&doc.experience, blank_experience(), fields)?;
                (FieldUpdate::Experience(v), id)
            }
            ItemList::Education => {
                let (v, id) = appended(&doc.education, blank_education(), fields)?;
                (FieldUpdate::Education(v), id)
            }
            ItemList::Skills => {
                let (v, id) = appended(&doc.skills, blank_skill(), fields)?;
                (FieldUpdate::Skills(v), id)
            }
            ItemList::Languages => {
                let (v, id) = appended(&doc.languages, blank_language(), fields)?;
                (FieldUpdate::Languages(v), id)
            }
            ItemList::Projects => {
                let (v, id) = appended(&doc.projects, blank_project(), fields)?;
                (FieldUpdate::Projects(v), id)
            }
            ItemList::CustomSections => {
                let (v, id) = appended(&doc.custom_sections, blank_custom_section(), fields)?;
                (FieldUpdate::CustomSections(v), id)
            }
        })
    }

    /// The list with item `id` patched, or `None` when no item has that id.
    pub fn with_patched(
        self,
        doc: &Document,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<Option<FieldUpdate>, serde_json::Error> {
        Ok(match self {
            ItemList::SocialLinks => patched(&doc.social_links, id, fields)?.map(FieldUpdate::SocialLinks),
            ItemList::Experience => patched(&doc.experience, id, fields)?.map(FieldUpdate::Experience),
            ItemList::Education => patched(&doc.education, id, fields)?.map(FieldUpdate::Education),
            ItemList::Skills => patched(&doc.skills, id, fields)?.map(FieldUpdate::Skills),
            ItemList::Languages => patched(&doc.languages, id, fields)?.map(FieldUpdate::Languages),
            ItemList::Projects => patched(&doc.projects, id, fields)?.map(FieldUpdate::Projects),
            ItemList::CustomSections => {
                patched(&doc.custom_sections, id, fields)?.map(FieldUpdate::CustomSections)
            }
        })
    }

    /// The list without item `id`, or `None` when no item has that id.
    pub fn with_removed(self, doc: &Document, id: &str) -> Option<FieldUpdate> {
        match self {
            ItemList::SocialLinks => without(&doc.social_links, id).map(FieldUpdate::SocialLinks),
            ItemList::Experience => without(&doc.experience, id).map(FieldUpdate::Experience),
            ItemList::Education => without(&doc.education, id).map(FieldUpdate::Education),
            ItemList::Skills => without(&doc.skills, id).map(FieldUpdate::Skills),
            ItemList::Languages => without(&doc.languages, id).map(FieldUpdate::Languages),
            ItemList::Projects => without(&doc.projects, id).map(FieldUpdate::Projects),
            ItemList::CustomSections => without(&doc.custom_sections, id).map(FieldUpdate::CustomSections),
        }
    }
}

fn appended<T>(items: &[T], blank: T, fields: &Map<String, Value>) -> Result<(Vec<T>, String), serde_json::Error>
where
    T: Identified + Clone + Serialize + DeserializeOwned,
{
    let mut items = items.to_vec();
    let id = add_item(&mut items, blank);
    patch_item(&mut items, &id, fields)?;
    Ok((items, id))
}

fn patched<T>(items: &[T], id: &str, fields: &Map<String, Value>) -> Result<Option<Vec<T>>, serde_json::Error>
where
    T: Identified + Clone + Serialize + DeserializeOwned,
{
    let mut items = items.to_vec();
    Ok(patch_item(&mut items, id, fields)?.then_some(items))
}

fn without<T: Identified + Clone>(items: &[T], id: &str) -> Option<Vec<T>> {
    let mut items = items.to_vec();
    remove_item(&mut items, id).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_ids_are_found() {
        let skill = |id: &str| Skill {
            id: id.to_string(),
            ..blank_skill()
        };
        assert_eq!(first_bad_id(&[skill("a"), skill("b")]), None);
        assert_eq!(first_bad_id(&[skill("a"), skill("b"), skill("a")]), Some("a"));
        assert_eq!(first_bad_id(&[skill("a"), skill("")]), Some(""));

        let update = FieldUpdate::Skills(vec![skill("a"), skill("a")]);
        assert_eq!(update_bad_id(&update), Some("a"));
        assert_eq!(update_bad_id(&FieldUpdate::Summary(String::new())), None);

        let mut doc = crate::models::default_en();
        assert_eq!(document_bad_id(&doc), None);
        doc.projects[0].id = String::new();
        assert_eq!(document_bad_id(&doc), Some((DocumentField::Projects, "")));
    }

    #[test]
    fn test_permutation_check() {
        assert!(is_section_permutation(&SectionKey::ALL));
        let mut reversed = SectionKey::ALL.to_vec();
        reversed.reverse();
        assert!(is_section_permutation(&reversed));
        assert!(!is_section_permutation(&[SectionKey::Skills, SectionKey::Summary]));
        let mut dup = SectionKey::ALL.to_vec();
        dup[5] = SectionKey::Summary;
        assert!(!is_section_permutation(&dup));
    }

    #[test]
    fn test_move_section_swaps_neighbours() {
        let mut order = SectionKey::ALL.to_vec();
        assert!(move_section(&mut order, 1, MoveDirection::Up));
        assert_eq!(order[0], SectionKey::Experience);
        assert_eq!(order[1], SectionKey::Summary);
        assert!(is_section_permutation(&order));
    }

    #[test]
    fn test_move_section_boundaries_are_noops() {
        let mut order = SectionKey::ALL.to_vec();
        assert!(!move_section(&mut order, 0, MoveDirection::Up));
        assert!(!move_section(&mut order, 5, MoveDirection::Down));
        assert!(!move_section(&mut order, 17, MoveDirection::Down));
        assert_eq!(order, SectionKey::ALL.to_vec());
    }

    #[test]
    fn test_any_move_sequence_keeps_permutation() {
        let mut order = SectionKey::ALL.to_vec();
        for step in 0..50usize {
            let dir = if step % 3 == 0 { MoveDirection::Up } else { MoveDirection::Down };
            move_section(&mut order, (step * 7) % 6, dir);
            assert!(is_section_permutation(&order));
        }
    }

    #[test]
    fn test_add_and_remove_items() {
        let mut skills = Vec::new();
        let id = add_item(&mut skills, blank_skill());
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].level, 50);
        assert!(!remove_item(&mut skills, "missing"));
        assert!(remove_item(&mut skills, &id));
        assert!(skills.is_empty());
    }

    #[test]
    fn test_patch_item_updates_fields_but_not_id() {
        let mut skills = vec![blank_skill()];
        let id = skills[0].id.clone();
        let patch = json!({"name": "Rust", "level": 88, "id": "hijack"});
        let patched = patch_item(&mut skills, &id, patch.as_object().unwrap()).unwrap();
        assert!(patched);
        assert_eq!(skills[0].name, "Rust");
        assert_eq!(skills[0].level, 88);
        assert_eq!(skills[0].id, id);
    }

    #[test]
    fn test_patch_item_rejects_wrong_types() {
        let mut skills = vec![blank_skill()];
        let id = skills[0].id.clone();
        let patch = json!({"level": "high"});
        assert!(patch_item(&mut skills, &id, patch.as_object().unwrap()).is_err());
        assert_eq!(skills[0].level, 50);
    }

    #[test]
    fn test_patch_missing_item() {
        let mut links = vec![blank_social_link()];
        let patch = json!({"url": "x"});
        assert!(!patch_item(&mut links, "nope", patch.as_object().unwrap()).unwrap());
    }

    #[test]
    fn test_blank_items_get_distinct_ids() {
        assert_ne!(blank_project().id, blank_project().id);
        assert_eq!(blank_custom_section().title, "New Section");
        assert_eq!(blank_language().proficiency, Proficiency::Intermediate);
    }

    #[test]
    fn test_item_list_names() {
        assert_eq!(ItemList::parse("customSections"), Some(ItemList::CustomSections));
        assert_eq!(ItemList::parse("socialLinks"), Some(ItemList::SocialLinks));
        assert_eq!(ItemList::parse("summary"), None);
    }

    #[test]
    fn test_with_added_applies_fields() {
        let doc = crate::models::default_en();
        let fields = json!({"name": "Zig", "level": 30});
        let (update, id) = ItemList::Skills
            .with_added(&doc, fields.as_object().unwrap())
            .unwrap();
        match update {
            FieldUpdate::Skills(skills) => {
                assert_eq!(skills.len(), doc.skills.len() + 1);
                let added = skills.last().unwrap();
                assert_eq!(added.id, id);
                assert_eq!(added.name, "Zig");
                assert_eq!(added.level, 30);
            }
            other => panic!("expected skills update, got {other:?}"),
        }
    }

    #[test]
    fn test_with_removed_and_patched_miss() {
        let doc = crate::models::default_en();
        assert!(ItemList::Projects.with_removed(&doc, "missing").is_none());
        let fields = Map::new();
        assert!(ItemList::Projects.with_patched(&doc, "missing", &fields).unwrap().is_none());

        let id = doc.projects[0].id.clone();
        match ItemList::Projects.with_removed(&doc, &id) {
            Some(FieldUpdate::Projects(projects)) => assert!(projects.is_empty()),
            other => panic!("expected projects update, got {other:?}"),
        }
    }
}
