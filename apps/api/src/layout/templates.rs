//! Template renderer: places projected sections into page regions.
//!
//! Each template is a fixed arrangement of a header block and one or two
//! regions. Templates only regroup and recolor; section content comes from
//! `layout::sections` unchanged, except `compact`, which redraws every skill
//! as a tag. Nothing here writes back to the document or theme.

use tracing::debug;

use crate::layout::sections::project;
use crate::layout::skills::into_tag;
use crate::layout::tree::{
    Alignment, ContactItem, Density, HeaderBlock, Icon, LayoutTree, Projected, Region, RegionKind,
    RegionPalette, SectionContent,
};
use crate::models::{Document, SectionKey, SkillDisplayStyle, TemplateKind, Theme};

/// Width of the creative side column, in percent of the page.
const SIDE_WIDTH_PERCENT: u8 = 33;

/// Projects and renders in one step.
pub fn preview(document: &Document, theme: &Theme) -> LayoutTree {
    render(document, theme, project(document, theme))
}

pub fn render(document: &Document, theme: &Theme, sections: Vec<Projected>) -> LayoutTree {
    debug!(
        "Rendering {} blocks with the '{}' template",
        sections.len(),
        theme.template.as_str()
    );
    match theme.template {
        TemplateKind::Modern => modern(document, theme, sections),
        TemplateKind::Classic => classic(document, theme, sections),
        TemplateKind::Creative => creative(document, theme, sections),
        TemplateKind::Compact => compact(document, theme, sections),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

fn modern(document: &Document, theme: &Theme, sections: Vec<Projected>) -> LayoutTree {
    let header = HeaderBlock {
        photo: photo_of(document),
        alignment: Alignment::Start,
        rule_below: None,
        contacts: contacts(document, ContactStyle::Icons { website_label: true }),
        ..identity(document)
    };
    single_column(theme, TemplateKind::Modern, Density::Regular, header, sections)
}

fn classic(document: &Document, theme: &Theme, sections: Vec<Projected>) -> LayoutTree {
    let header = HeaderBlock {
        photo: None,
        alignment: Alignment::Center,
        rule_below: Some(theme.color.primary),
        contacts: contacts(document, ContactStyle::TextOnly),
        ..identity(document)
    };
    single_column(theme, TemplateKind::Classic, Density::Regular, header, sections)
}

fn compact(document: &Document, theme: &Theme, sections: Vec<Projected>) -> LayoutTree {
    let header = HeaderBlock {
        photo: None,
        alignment: Alignment::Center,
        rule_below: None,
        contacts: contacts(document, ContactStyle::Icons { website_label: false }),
        ..identity(document)
    };
    let sections = sections.into_iter().map(force_tags).collect();
    single_column(theme, TemplateKind::Compact, Density::Compact, header, sections)
}

/// Two regions. The side column sits on the primary color, so everything in
/// it is drawn in the header-text color instead of the theme's text colors.
fn creative(document: &Document, theme: &Theme, sections: Vec<Projected>) -> LayoutTree {
    let header = HeaderBlock {
        photo: photo_of(document),
        alignment: Alignment::Center,
        rule_below: Some(theme.color.header_text),
        contacts: contacts(document, ContactStyle::Icons { website_label: true }),
        ..identity(document)
    };

    let (side_blocks, main_blocks): (Vec<Projected>, Vec<Projected>) = sections
        .into_iter()
        .filter(|block| !block.is_divider())
        .partition(|block| {
            block
                .as_section()
                .and_then(|s| s.builtin_key())
                .is_some_and(in_side_column)
        });

    let on_primary = theme.color.header_text;
    let side = Region {
        kind: RegionKind::Side,
        width_percent: SIDE_WIDTH_PERCENT,
        palette: RegionPalette {
            background: theme.color.primary,
            heading: on_primary,
            accent: on_primary,
            text: on_primary,
        },
        header: Some(header),
        blocks: side_blocks,
    };
    let main = Region {
        kind: RegionKind::Main,
        width_percent: 100 - SIDE_WIDTH_PERCENT,
        palette: page_palette(theme),
        header: None,
        blocks: main_blocks,
    };

    LayoutTree {
        template: TemplateKind::Creative,
        font: theme.font,
        density: Density::Regular,
        page_background: theme.color.background,
        regions: vec![side, main],
    }
}

fn in_side_column(key: SectionKey) -> bool {
    match key {
        SectionKey::Education | SectionKey::Skills | SectionKey::Languages => true,
        SectionKey::Summary | SectionKey::Experience | SectionKey::Projects => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ────────────────────────────────────────────────────────────────────────────

fn single_column(
    theme: &Theme,
    template: TemplateKind,
    density: Density,
    header: HeaderBlock,
    sections: Vec<Projected>,
) -> LayoutTree {
    LayoutTree {
        template,
        font: theme.font,
        density,
        page_background: theme.color.background,
        regions: vec![Region {
            kind: RegionKind::Main,
            width_percent: 100,
            palette: page_palette(theme),
            header: Some(header),
            blocks: sections,
        }],
    }
}

fn page_palette(theme: &Theme) -> RegionPalette {
    RegionPalette {
        background: theme.color.background,
        heading: theme.color.primary,
        accent: theme.color.secondary,
        text: theme.color.text,
    }
}

fn identity(document: &Document) -> HeaderBlock {
    HeaderBlock {
        name: document.personal.name.clone(),
        job_title: document.personal.job_title.clone(),
        photo: None,
        alignment: Alignment::Start,
        rule_below: None,
        contacts: Vec::new(),
    }
}

fn photo_of(document: &Document) -> Option<String> {
    let photo = document.personal.photo.trim();
    (!photo.is_empty()).then(|| photo.to_string())
}

fn force_tags(block: Projected) -> Projected {
    match block {
        Projected::Section(mut section) => {
            if let SectionContent::Skills { style, items } = &mut section.content {
                *style = SkillDisplayStyle::Tags;
                *items = std::mem::take(items).into_iter().map(into_tag).collect();
            }
            Projected::Section(section)
        }
        divider @ Projected::Divider { .. } => divider,
    }
}

#[derive(Debug, Clone, Copy)]
enum ContactStyle {
    Icons { website_label: bool },
    TextOnly,
}

fn contacts(document: &Document, style: ContactStyle) -> Vec<ContactItem> {
    let personal = &document.personal;
    let with_icons = matches!(style, ContactStyle::Icons { .. });
    let icon = |icon: Icon| with_icons.then_some(icon);
    let mut items = Vec::new();

    if !personal.email.is_empty() {
        items.push(ContactItem {
            icon: icon(Icon::Mail),
            label: personal.email.clone(),
            href: Some(format!("mailto:{}", personal.email)),
        });
    }
    if !personal.phone.is_empty() {
        items.push(ContactItem {
            icon: icon(Icon::Phone),
            label: personal.phone.clone(),
            href: Some(format!("tel:{}", personal.phone)),
        });
    }

    if document.section_visibility.social_links {
        for link in &document.social_links {
            let label = match style {
                ContactStyle::Icons { website_label: true } if link.network == "Website" => {
                    personal.website.clone()
                }
                _ => link.network.clone(),
            };
            items.push(ContactItem {
                icon: icon(social_icon(&link.network)),
                label,
                href: (!link.url.is_empty()).then(|| link.url.clone()),
            });
        }
    }
    items
}

/// Icon for a free-text network name.
pub fn social_icon(network: &str) -> Icon {
    match network.to_lowercase().as_str() {
        "linkedin" => Icon::LinkedIn,
        "github" => Icon::GitHub,
        "twitter" => Icon::Twitter,
        "website" => Icon::Website,
        _ => Icon::Generic,
    }
}
