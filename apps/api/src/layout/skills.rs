//! Per-skill rendering under the three display styles.
//!
//! Levels are not validated anywhere upstream, so every conversion here
//! clamps for display and keeps the raw level on the view.

use crate::layout::tree::SkillView;
use crate::models::{Skill, SkillDisplayStyle};

/// Number of indicators drawn by the `dots` style.
pub const DOT_COUNT: u8 = 10;

pub fn render_skill(skill: &Skill, style: SkillDisplayStyle) -> SkillView {
    match style {
        SkillDisplayStyle::Bar => SkillView::Bar {
            id: skill.id.clone(),
            name: skill.name.clone(),
            level: skill.level,
            fill_percent: bar_fill_percent(skill.level),
        },
        SkillDisplayStyle::Dots => SkillView::Dots {
            id: skill.id.clone(),
            name: skill.name.clone(),
            level: skill.level,
            filled: filled_dots(skill.level),
            total: DOT_COUNT,
        },
        SkillDisplayStyle::Tags => SkillView::Tag {
            id: skill.id.clone(),
            name: skill.name.clone(),
        },
    }
}

/// Width of the bar fill, 0–100.
pub fn bar_fill_percent(level: i32) -> u8 {
    level.clamp(0, 100) as u8
}

/// `floor(level / 10)`, clamped to the available dots.
pub fn filled_dots(level: i32) -> u8 {
    level.div_euclid(10).clamp(0, DOT_COUNT as i32) as u8
}

/// Re-draws an already rendered skill as a tag chip.
pub fn into_tag(view: SkillView) -> SkillView {
    match view {
        SkillView::Bar { id, name, .. } | SkillView::Dots { id, name, .. } => SkillView::Tag { id, name },
        tag @ SkillView::Tag { .. } => tag,
    }
}
