//! Output types of projection and rendering.
//!
//! A `LayoutTree` is a fully resolved, serializable description of the page:
//! regions, their colors, the header and the ordered section blocks. Turning
//! it into pixels or PDF is the job of an external collaborator.

use serde::Serialize;

use crate::models::{DividerStyle, FontFamily, Proficiency, Rgb, SectionKey, SkillDisplayStyle, TemplateKind};

// ────────────────────────────────────────────────────────────────────────────
// Projection output
// ────────────────────────────────────────────────────────────────────────────

/// One entry of the projected section sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projected {
    Section(RenderableSection),
    Divider { style: DividerStyle },
}

impl Projected {
    pub fn as_section(&self) -> Option<&RenderableSection> {
        match self {
            Projected::Section(section) => Some(section),
            Projected::Divider { .. } => None,
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, Projected::Divider { .. })
    }
}

/// Identifies where a rendered section came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRef {
    Builtin(SectionKey),
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableSection {
    pub key: SectionRef,
    pub title: String,
    pub content: SectionContent,
}

impl RenderableSection {
    pub fn builtin_key(&self) -> Option<SectionKey> {
        match self.key {
            SectionRef::Builtin(key) => Some(key),
            SectionRef::Custom(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionContent {
    Summary { text: String },
    Experience { entries: Vec<ExperienceView> },
    Education { entries: Vec<EducationView> },
    Skills { style: SkillDisplayStyle, items: Vec<SkillView> },
    Languages { entries: Vec<LanguageView> },
    Projects { entries: Vec<ProjectView> },
    Custom { lines: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceView {
    pub id: String,
    pub position: String,
    pub company: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationView {
    pub id: String,
    pub institution: String,
    /// Degree, followed by `, GPA: x` when a GPA is set.
    pub degree_line: String,
    pub graduation_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageView {
    pub id: String,
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
}

/// A single skill as drawn under one display style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum SkillView {
    /// Proportional fill; `fill_percent` is the level clamped to 0–100.
    Bar { id: String, name: String, level: i32, fill_percent: u8 },
    /// `total` indicators of which `filled` are lit.
    Dots { id: String, name: String, level: i32, filled: u8, total: u8 },
    /// Label chip without a level.
    Tag { id: String, name: String },
}

impl SkillView {
    pub fn name(&self) -> &str {
        match self {
            SkillView::Bar { name, .. } | SkillView::Dots { name, .. } | SkillView::Tag { name, .. } => name,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Render output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutTree {
    pub template: TemplateKind,
    pub font: FontFamily,
    pub density: Density,
    pub page_background: Rgb,
    pub regions: Vec<Region>,
}

#[cfg(test)]
impl LayoutTree {
    /// All sections across regions, in region order.
    pub fn sections(&self) -> impl Iterator<Item = &RenderableSection> {
        self.regions
            .iter()
            .flat_map(|r| r.blocks.iter())
            .filter_map(Projected::as_section)
    }

    pub fn region(&self, kind: RegionKind) -> Option<&Region> {
        self.regions.iter().find(|r| r.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Regular,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Main,
    Side,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub kind: RegionKind,
    pub width_percent: u8,
    pub palette: RegionPalette,
    pub header: Option<HeaderBlock>,
    pub blocks: Vec<Projected>,
}

/// Colors used inside one region. Display-only; the theme is not modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPalette {
    pub background: Rgb,
    pub heading: Rgb,
    pub accent: Rgb,
    pub text: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Start,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub name: String,
    pub job_title: String,
    pub photo: Option<String>,
    pub alignment: Alignment,
    /// Color of a rule drawn under the header, if any.
    pub rule_below: Option<Rgb>,
    pub contacts: Vec<ContactItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactItem {
    pub icon: Option<Icon>,
    pub label: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Mail,
    Phone,
    LinkedIn,
    GitHub,
    Twitter,
    Website,
    /// Social network without a dedicated icon.
    Generic,
}
