//! Section registry and projection.
//!
//! `project` is pure: the same `(document, theme)` always yields the same
//! sequence. Algorithm:
//! 1. Walk `section_order`, skipping hidden keys, emitting one section each.
//! 2. Put a divider between consecutive sections, never after the last, and
//!    none at all when the divider style is `none`.
//! 3. If custom sections are visible and non-empty, append a divider (only
//!    when something precedes it) and then every custom section in list
//!    order. Custom sections are always last.

use crate::layout::skills::render_skill;
use crate::layout::tree::{
    EducationView, ExperienceView, LanguageView, Projected, ProjectView, RenderableSection,
    SectionContent, SectionRef,
};
use crate::models::{CustomSection, DividerStyle, Document, SectionKey, Theme};

pub fn project(document: &Document, theme: &Theme) -> Vec<Projected> {
    let divider_style = theme.section_divider_style;
    let mut out = Vec::new();

    let visible = document
        .section_order
        .iter()
        .copied()
        .filter(|&key| document.section_visibility.is_visible(key));

    for key in visible {
        push_with_divider(&mut out, divider_style, builtin_section(key, document, theme));
    }

    if document.section_visibility.custom_sections && !document.custom_sections.is_empty() {
        if !out.is_empty() && divider_style != DividerStyle::None {
            out.push(Projected::Divider {
                style: divider_style,
            });
        }
        out.extend(
            document
                .custom_sections
                .iter()
                .map(|section| Projected::Section(custom_section(section))),
        );
    }

    out
}

fn push_with_divider(out: &mut Vec<Projected>, style: DividerStyle, section: RenderableSection) {
    if !out.is_empty() && style != DividerStyle::None {
        out.push(Projected::Divider { style });
    }
    out.push(Projected::Section(section));
}

/// Registry: every section key maps to exactly one renderer.
fn builtin_section(key: SectionKey, document: &Document, theme: &Theme) -> RenderableSection {
    let content = match key {
        SectionKey::Summary => SectionContent::Summary {
            text: document.summary.clone(),
        },
        SectionKey::Experience => SectionContent::Experience {
            entries: document
                .experience
                .iter()
                .map(|exp| ExperienceView {
                    id: exp.id.clone(),
                    position: exp.position.clone(),
                    company: exp.company.clone(),
                    dates: date_range(&exp.start_date, &exp.end_date),
                    bullets: bullet_lines(&exp.description),
                })
                .collect(),
        },
        SectionKey::Education => SectionContent::Education {
            entries: document
                .education
                .iter()
                .map(|edu| EducationView {
                    id: edu.id.clone(),
                    institution: edu.institution.clone(),
                    degree_line: match edu.gpa.as_deref().filter(|g| !g.trim().is_empty()) {
                        Some(gpa) => format!("{}, GPA: {gpa}", edu.degree),
                        None => edu.degree.clone(),
                    },
                    graduation_date: edu.graduation_date.clone(),
                })
                .collect(),
        },
        SectionKey::Skills => SectionContent::Skills {
            style: theme.skill_display_style,
            items: document
                .skills
                .iter()
                .map(|skill| render_skill(skill, theme.skill_display_style))
                .collect(),
        },
        SectionKey::Languages => SectionContent::Languages {
            entries: document
                .languages
                .iter()
                .map(|lang| LanguageView {
                    id: lang.id.clone(),
                    name: lang.name.clone(),
                    proficiency: lang.proficiency,
                })
                .collect(),
        },
        SectionKey::Projects => SectionContent::Projects {
            entries: document
                .projects
                .iter()
                .map(|p| ProjectView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    url: p.url.clone(),
                    description: p.description.clone(),
                })
                .collect(),
        },
    };
    RenderableSection {
        key: SectionRef::Builtin(key),
        title: document.section_titles.get(key).to_string(),
        content,
    }
}

fn custom_section(section: &CustomSection) -> RenderableSection {
    RenderableSection {
        key: SectionRef::Custom(section.id.clone()),
        title: section.title.clone(),
        content: SectionContent::Custom {
            lines: section.content.split('\n').map(str::to_string).collect(),
        },
    }
}

/// Splits a description into bullet lines, dropping blank lines and a
/// leading `•` marker.
pub fn bullet_lines(description: &str) -> Vec<String> {
    description
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            trimmed.strip_prefix('•').map_or(trimmed, str::trim_start).to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} - {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_en, CustomSection, SkillDisplayStyle};
    use serde_json::Map;

    fn section_keys(out: &[Projected]) -> Vec<SectionRef> {
        out.iter()
            .filter_map(Projected::as_section)
            .map(|s| s.key.clone())
            .collect()
    }

    fn divider_count(out: &[Projected]) -> usize {
        out.iter().filter(|p| p.is_divider()).count()
    }

    /// No divider first, last, or next to another divider.
    fn assert_no_orphan_dividers(out: &[Projected]) {
        assert!(!out.first().is_some_and(Projected::is_divider));
        assert!(!out.last().is_some_and(Projected::is_divider));
        for pair in out.windows(2) {
            assert!(!(pair[0].is_divider() && pair[1].is_divider()));
        }
    }

    #[test]
    fn test_default_projection_follows_order() {
        let doc = default_en();
        let out = project(&doc, &Theme::default());
        let expected: Vec<SectionRef> = SectionKey::ALL.iter().map(|&k| SectionRef::Builtin(k)).collect();
        assert_eq!(section_keys(&out), expected);
        assert_eq!(divider_count(&out), 5);
        assert_no_orphan_dividers(&out);
    }

    #[test]
    fn test_projection_is_pure() {
        let doc = default_en();
        let theme = Theme::default();
        assert_eq!(project(&doc, &theme), project(&doc, &theme));
    }

    #[test]
    fn test_hidden_section_removes_one_divider() {
        let mut doc = default_en();
        let theme = Theme::default();
        let before = divider_count(&project(&doc, &theme));

        doc.section_visibility.experience = false;
        let out = project(&doc, &theme);

        assert!(!section_keys(&out).contains(&SectionRef::Builtin(SectionKey::Experience)));
        assert_eq!(divider_count(&out), before - 1);
        assert_no_orphan_dividers(&out);
    }

    #[test]
    fn test_hiding_last_section_leaves_no_trailing_divider() {
        let mut doc = default_en();
        doc.section_visibility.projects = false;
        let out = project(&doc, &Theme::default());
        assert_no_orphan_dividers(&out);
        assert_eq!(divider_count(&out), 4);
    }

    #[test]
    fn test_divider_style_none_emits_no_dividers() {
        let doc = default_en();
        let theme = Theme {
            section_divider_style: DividerStyle::None,
            ..Theme::default()
        };
        let out = project(&doc, &theme);
        assert_eq!(divider_count(&out), 0);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_dashed_divider_style_propagates() {
        let out = project(
            &default_en(),
            &Theme {
                section_divider_style: DividerStyle::Dashed,
                ..Theme::default()
            },
        );
        assert!(out.iter().any(|p| matches!(p, Projected::Divider { style: DividerStyle::Dashed })));
    }

    #[test]
    fn test_custom_sections_always_last() {
        let mut doc = default_en();
        doc.section_order.reverse();
        doc.custom_sections = vec![
            CustomSection {
                id: "c1".to_string(),
                title: "Awards".to_string(),
                content: "Best paper\n\nHonorable mention".to_string(),
                extra: Map::new(),
            },
            CustomSection {
                id: "c2".to_string(),
                title: "Volunteering".to_string(),
                content: "Food bank".to_string(),
                extra: Map::new(),
            },
        ];
        let out = project(&doc, &Theme::default());
        let keys = section_keys(&out);
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[0], SectionRef::Builtin(SectionKey::Projects));
        assert_eq!(keys[6], SectionRef::Custom("c1".to_string()));
        assert_eq!(keys[7], SectionRef::Custom("c2".to_string()));
        // 5 between builtins + 1 before the custom block.
        assert_eq!(divider_count(&out), 6);
        let awards = out.iter().filter_map(Projected::as_section).find(|s| s.title == "Awards").unwrap();
        assert_eq!(
            awards.content,
            SectionContent::Custom {
                lines: vec!["Best paper".to_string(), String::new(), "Honorable mention".to_string()]
            }
        );
    }

    #[test]
    fn test_custom_sections_hidden() {
        let mut doc = default_en();
        doc.custom_sections = vec![CustomSection {
            id: "c1".to_string(),
            title: "Awards".to_string(),
            content: String::new(),
            extra: Map::new(),
        }];
        doc.section_visibility.custom_sections = false;
        let out = project(&doc, &Theme::default());
        assert_eq!(section_keys(&out).len(), 6);
    }

    #[test]
    fn test_only_custom_sections_has_no_leading_divider() {
        let mut doc = default_en();
        for key in SectionKey::ALL {
            doc.section_visibility.set_visible(key, false);
        }
        doc.custom_sections = vec![CustomSection {
            id: "c1".to_string(),
            title: "Awards".to_string(),
            content: "x".to_string(),
            extra: Map::new(),
        }];
        let out = project(&doc, &Theme::default());
        assert_eq!(out.len(), 1);
        assert_no_orphan_dividers(&out);
    }

    #[test]
    fn test_titles_come_from_section_titles() {
        let mut doc = default_en();
        doc.section_titles.skills = "Toolbox".to_string();
        let out = project(&doc, &Theme::default());
        let skills = out
            .iter()
            .filter_map(Projected::as_section)
            .find(|s| s.builtin_key() == Some(SectionKey::Skills))
            .unwrap();
        assert_eq!(skills.title, "Toolbox");
    }

    #[test]
    fn test_skills_follow_theme_style() {
        let doc = default_en();
        let theme = Theme {
            skill_display_style: SkillDisplayStyle::Dots,
            ..Theme::default()
        };
        let out = project(&doc, &theme);
        let skills = out
            .iter()
            .filter_map(Projected::as_section)
            .find(|s| s.builtin_key() == Some(SectionKey::Skills))
            .unwrap();
        match &skills.content {
            SectionContent::Skills { style, items } => {
                assert_eq!(*style, SkillDisplayStyle::Dots);
                assert_eq!(items.len(), doc.skills.len());
            }
            other => panic!("expected skills, got {other:?}"),
        }
    }

    #[test]
    fn test_bullet_lines_strip_markers() {
        let lines = bullet_lines("• First\n\n•Second\nThird  \n   ");
        assert_eq!(lines, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_education_gpa_line() {
        let doc = default_en();
        let out = project(&doc, &Theme::default());
        let edu = out
            .iter()
            .filter_map(Projected::as_section)
            .find(|s| s.builtin_key() == Some(SectionKey::Education))
            .unwrap();
        match &edu.content {
            SectionContent::Education { entries } => {
                assert_eq!(entries[0].degree_line, "B.S. in Computer Science, GPA: 3.8");
            }
            other => panic!("expected education, got {other:?}"),
        }
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range("Jan 2020", "Present"), "Jan 2020 - Present");
        assert_eq!(date_range("Jan 2020", ""), "Jan 2020");
        assert_eq!(date_range("", ""), "");
    }
}
