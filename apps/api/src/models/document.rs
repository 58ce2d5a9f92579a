//! Résumé document model.
//!
//! Field names serialize in camelCase so exported files keep the browser
//! editor's interchange format.
//!
//! # Invariants
//! - Item ids are unique within their list for the lifetime of the document.
//! - `section_order` is a permutation of [`SectionKey::ALL`].
//! - `section_visibility` carries one flag per section key plus `socialLinks`
//!   and `customSections`.
//!
//! None of these are enforced here; the reconciler repairs them on load and
//! the HTTP editing surface rejects input that breaks them.
//!
//! Every struct carries a flattened `extra` map so keys this model does not
//! know survive load, edit and export.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Section keys
// ────────────────────────────────────────────────────────────────────────────

/// The six reorderable résumé sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Projects,
}

impl SectionKey {
    /// Canonical order, also the default `sectionOrder`.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Languages,
        SectionKey::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Languages => "languages",
            SectionKey::Projects => "projects",
        }
    }

    pub fn parse(s: &str) -> Option<SectionKey> {
        SectionKey::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Items
// ────────────────────────────────────────────────────────────────────────────

/// Anything stored in a keyed document list.
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )*
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub photo: String,
    /// Keys written by newer or older editors that this model does not know.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub id: String,
    /// Free text. LinkedIn, GitHub, Twitter and Website get dedicated icons.
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Newline-separated bullet lines, optionally prefixed with `• `.
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Nominally 0–100. Not validated; renderers clamp for display only.
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: i32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads a skill level from any JSON number, flooring fractions and
/// saturating to the `i32` range. Numeric strings are accepted; anything
/// else reads as 0.
fn lenient_level<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => Ok(n.floor().clamp(i32::MIN as f64, i32::MAX as f64) as i32),
        _ => {
            tracing::warn!("Unreadable skill level {value}, using 0");
            Ok(0)
        }
    }
}

/// Closed proficiency scale. Display labels are localised by `i18n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Fluent,
    Native,
}

impl Proficiency {
    pub const ALL: [Proficiency; 5] = [
        Proficiency::Beginner,
        Proficiency::Intermediate,
        Proficiency::Advanced,
        Proficiency::Fluent,
        Proficiency::Native,
    ];
}

impl From<String> for Proficiency {
    /// Unknown labels read back as `Intermediate`, the editor's default.
    fn from(value: String) -> Self {
        match value.as_str() {
            "Beginner" => Proficiency::Beginner,
            "Advanced" => Proficiency::Advanced,
            "Fluent" => Proficiency::Fluent,
            "Native" => Proficiency::Native,
            "Intermediate" => Proficiency::Intermediate,
            other => {
                tracing::warn!("Unknown language proficiency '{other}', using Intermediate");
                Proficiency::Intermediate
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub proficiency: Proficiency,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

identified!(SocialLink, Experience, Education, Skill, Language, Project, CustomSection);

// ────────────────────────────────────────────────────────────────────────────
// Layout metadata
// ────────────────────────────────────────────────────────────────────────────

/// Per-section heading overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTitles {
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub languages: String,
    pub projects: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SectionTitles {
    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Summary => &self.summary,
            SectionKey::Experience => &self.experience,
            SectionKey::Education => &self.education,
            SectionKey::Skills => &self.skills,
            SectionKey::Languages => &self.languages,
            SectionKey::Projects => &self.projects,
        }
    }

    pub fn set(&mut self, key: SectionKey, title: String) {
        match key {
            SectionKey::Summary => self.summary = title,
            SectionKey::Experience => self.experience = title,
            SectionKey::Education => self.education = title,
            SectionKey::Skills => self.skills = title,
            SectionKey::Languages => self.languages = title,
            SectionKey::Projects => self.projects = title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionVisibility {
    pub summary: bool,
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub languages: bool,
    pub projects: bool,
    pub social_links: bool,
    pub custom_sections: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SectionVisibility {
    /// Everything shown.
    pub fn all_visible() -> Self {
        SectionVisibility {
            summary: true,
            experience: true,
            education: true,
            skills: true,
            languages: true,
            projects: true,
            social_links: true,
            custom_sections: true,
            extra: Map::new(),
        }
    }

    pub fn is_visible(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Summary => self.summary,
            SectionKey::Experience => self.experience,
            SectionKey::Education => self.education,
            SectionKey::Skills => self.skills,
            SectionKey::Languages => self.languages,
            SectionKey::Projects => self.projects,
        }
    }

    pub fn set_visible(&mut self, key: SectionKey, visible: bool) {
        match key {
            SectionKey::Summary => self.summary = visible,
            SectionKey::Experience => self.experience = visible,
            SectionKey::Education => self.education = visible,
            SectionKey::Skills => self.skills = visible,
            SectionKey::Languages => self.languages = visible,
            SectionKey::Projects => self.projects = visible,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// A complete résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub personal: PersonalInfo,
    pub social_links: Vec<SocialLink>,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub projects: Vec<Project>,
    pub custom_sections: Vec<CustomSection>,
    pub section_order: Vec<SectionKey>,
    pub section_titles: SectionTitles,
    pub section_visibility: SectionVisibility,
    /// Unknown top-level keys, carried through load and export untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Names of the top-level document fields, used for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentField {
    Personal,
    SocialLinks,
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Projects,
    CustomSections,
    SectionOrder,
    SectionTitles,
    SectionVisibility,
}

impl DocumentField {
    pub const ALL: [DocumentField; 12] = [
        DocumentField::Personal,
        DocumentField::SocialLinks,
        DocumentField::Summary,
        DocumentField::Experience,
        DocumentField::Education,
        DocumentField::Skills,
        DocumentField::Languages,
        DocumentField::Projects,
        DocumentField::CustomSections,
        DocumentField::SectionOrder,
        DocumentField::SectionTitles,
        DocumentField::SectionVisibility,
    ];

    /// JSON key of this field inside a serialized document.
    pub fn json_key(&self) -> &'static str {
        match self {
            DocumentField::Personal => "personal",
            DocumentField::SocialLinks => "socialLinks",
            DocumentField::Summary => "summary",
            DocumentField::Experience => "experience",
            DocumentField::Education => "education",
            DocumentField::Skills => "skills",
            DocumentField::Languages => "languages",
            DocumentField::Projects => "projects",
            DocumentField::CustomSections => "customSections",
            DocumentField::SectionOrder => "sectionOrder",
            DocumentField::SectionTitles => "sectionTitles",
            DocumentField::SectionVisibility => "sectionVisibility",
        }
    }
}

/// A replacement value for exactly one top-level field.
///
/// Wire form: `{"field": "skills", "value": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Personal(PersonalInfo),
    SocialLinks(Vec<SocialLink>),
    Summary(String),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
    Languages(Vec<Language>),
    Projects(Vec<Project>),
    CustomSections(Vec<CustomSection>),
    SectionOrder(Vec<SectionKey>),
    SectionTitles(SectionTitles),
    SectionVisibility(SectionVisibility),
}

impl FieldUpdate {
    pub fn field(&self) -> DocumentField {
        match self {
            FieldUpdate::Personal(_) => DocumentField::Personal,
            FieldUpdate::SocialLinks(_) => DocumentField::SocialLinks,
            FieldUpdate::Summary(_) => DocumentField::Summary,
            FieldUpdate::Experience(_) => DocumentField::Experience,
            FieldUpdate::Education(_) => DocumentField::Education,
            FieldUpdate::Skills(_) => DocumentField::Skills,
            FieldUpdate::Languages(_) => DocumentField::Languages,
            FieldUpdate::Projects(_) => DocumentField::Projects,
            FieldUpdate::CustomSections(_) => DocumentField::CustomSections,
            FieldUpdate::SectionOrder(_) => DocumentField::SectionOrder,
            FieldUpdate::SectionTitles(_) => DocumentField::SectionTitles,
            FieldUpdate::SectionVisibility(_) => DocumentField::SectionVisibility,
        }
    }
}

impl Document {
    /// Moves `update` into the matching field. Every other field is untouched.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Personal(v) => self.personal = v,
            FieldUpdate::SocialLinks(v) => self.social_links = v,
            FieldUpdate::Summary(v) => self.summary = v,
            FieldUpdate::Experience(v) => self.experience = v,
            FieldUpdate::Education(v) => self.education = v,
            FieldUpdate::Skills(v) => self.skills = v,
            FieldUpdate::Languages(v) => self.languages = v,
            FieldUpdate::Projects(v) => self.projects = v,
            FieldUpdate::CustomSections(v) => self.custom_sections = v,
            FieldUpdate::SectionOrder(v) => self.section_order = v,
            FieldUpdate::SectionTitles(v) => self.section_titles = v,
            FieldUpdate::SectionVisibility(v) => self.section_visibility = v,
        }
    }
}
