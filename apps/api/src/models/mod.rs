pub mod defaults;
pub mod document;
pub mod locale;
pub mod theme;

pub use defaults::default_for;
#[cfg(test)]
pub use defaults::{default_ar, default_en};
pub use document::{
    CustomSection, Document, DocumentField, Education, Experience, FieldUpdate, Identified,
    Language, Proficiency, Project, SectionKey, Skill, SocialLink,
};
pub use locale::Locale;
pub use theme::{
    DividerStyle, FontFamily, Rgb, SkillDisplayStyle, TemplateKind, Theme, THEME_PRESETS,
};
