//! Built-in starter documents.
//!
//! Both documents have the same shape: identical keys, the same number of
//! sample items per list, the full section order and every section visible.
//! Only the literal text differs. Each call mints fresh item ids.

use serde_json::Map;
use uuid::Uuid;

use crate::models::document::{
    Document, Education, Experience, Language, PersonalInfo, Proficiency, Project, SectionKey,
    SectionTitles, SectionVisibility, Skill, SocialLink,
};
use crate::models::locale::Locale;

/// Mints a new list-item id.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns the starter document for `locale`.
pub fn default_for(locale: Locale) -> Document {
    match locale {
        Locale::En => default_en(),
        Locale::Ar => default_ar(),
    }
}

pub fn default_en() -> Document {
    Document {
        personal: PersonalInfo {
            name: "Alex Doe".to_string(),
            job_title: "Senior Frontend Developer".to_string(),
            email: "alex.doe@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            website: "alexdoe.dev".to_string(),
            photo: "https://picsum.photos/200".to_string(),
            extra: Map::new(),
        },
        social_links: sample_social_links(),
        summary: "A passionate and creative frontend developer with 8+ years of experience \
                  building responsive, user-friendly web applications with React, TypeScript \
                  and Next.js. Proven ability to lead projects, mentor junior developers and \
                  collaborate with cross-functional teams to deliver high-quality products."
            .to_string(),
        experience: vec![
            experience(
                "Innovate Inc.",
                "Senior Frontend Developer",
                "Jan 2020",
                "Present",
                "• Led the development of a new design system, reducing development time by 30%.\n\
                 • Architected a single-page application for data visualization.\n\
                 • Mentored a team of 4 junior developers.",
            ),
            experience(
                "Tech Solutions LLC",
                "Frontend Developer",
                "Jun 2016",
                "Dec 2019",
                "• Developed and maintained client-facing websites using React and Redux.\n\
                 • Translated wireframes into production code with the design team.\n\
                 • Improved website performance by 20% through lazy loading.",
            ),
        ],
        education: vec![Education {
            id: new_item_id(),
            institution: "State University".to_string(),
            degree: "B.S. in Computer Science".to_string(),
            graduation_date: "May 2016".to_string(),
            gpa: Some("3.8".to_string()),
            extra: Map::new(),
        }],
        skills: vec![
            skill("React", 95),
            skill("TypeScript", 90),
            skill("Node.js", 75),
            skill("UI/UX Design", 80),
            skill("Tailwind CSS", 95),
        ],
        languages: vec![
            language("English", Proficiency::Native),
            language("Spanish", Proficiency::Advanced),
        ],
        projects: vec![Project {
            id: new_item_id(),
            name: "Project Alpha".to_string(),
            url: "https://github.com/alexdoe/project-alpha".to_string(),
            description: "A personal portfolio website built with Next.js and deployed on Vercel."
                .to_string(),
            extra: Map::new(),
        }],
        custom_sections: Vec::new(),
        section_order: SectionKey::ALL.to_vec(),
        section_titles: SectionTitles {
            summary: "Summary".to_string(),
            experience: "Experience".to_string(),
            education: "Education".to_string(),
            skills: "Skills".to_string(),
            languages: "Languages".to_string(),
            projects: "Projects".to_string(),
            extra: Map::new(),
        },
        section_visibility: SectionVisibility::all_visible(),
        extra: Map::new(),
    }
}

pub fn default_ar() -> Document {
    Document {
        personal: PersonalInfo {
            name: "أليكس دو".to_string(),
            job_title: "مطوّر واجهات أمامية أول".to_string(),
            email: "alex.doe@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            website: "alexdoe.dev".to_string(),
            photo: "https://picsum.photos/200".to_string(),
            extra: Map::new(),
        },
        social_links: sample_social_links(),
        summary: "مطوّر واجهات أمامية شغوف ومبدع يتمتع بخبرة تزيد عن 8 سنوات في بناء تطبيقات ويب \
                  سريعة الاستجابة وسهلة الاستخدام باستخدام React و TypeScript و Next.js."
            .to_string(),
        experience: vec![
            experience(
                "شركة إينوفيت",
                "مطوّر واجهات أمامية أول",
                "يناير 2020",
                "الحاضر",
                "• قاد تطوير نظام تصميم جديد قلّل وقت التطوير بنسبة 30%.\n\
                 • صمم وبنى تطبيق صفحة واحدة لتصور البيانات.\n\
                 • أشرف على فريق من 4 مطورين مبتدئين.",
            ),
            experience(
                "حلول التكنولوجيا المحدودة",
                "مطوّر واجهات أمامية",
                "يونيو 2016",
                "ديسمبر 2019",
                "• طوّر وصان مواقع ويب موجهة للعملاء باستخدام React و Redux.\n\
                 • ترجم النماذج الأولية إلى كود بالتعاون مع فريق التصميم.\n\
                 • حسّن أداء الموقع بنسبة 20% من خلال التحميل الكسول.",
            ),
        ],
        education: vec![Education {
            id: new_item_id(),
            institution: "جامعة الولاية".to_string(),
            degree: "بكالوريوس في علوم الحاسب".to_string(),
            graduation_date: "مايو 2016".to_string(),
            gpa: Some("3.8".to_string()),
            extra: Map::new(),
        }],
        skills: vec![
            skill("React", 95),
            skill("TypeScript", 90),
            skill("Node.js", 75),
            skill("تصميم UI/UX", 80),
            skill("Tailwind CSS", 95),
        ],
        languages: vec![
            language("الإنجليزية", Proficiency::Native),
            language("الإسبانية", Proficiency::Advanced),
        ],
        projects: vec![Project {
            id: new_item_id(),
            name: "مشروع ألفا".to_string(),
            url: "https://github.com/alexdoe/project-alpha".to_string(),
            description: "موقع شخصي تم بناؤه باستخدام Next.js ونشره على Vercel.".to_string(),
            extra: Map::new(),
        }],
        custom_sections: Vec::new(),
        section_order: SectionKey::ALL.to_vec(),
        section_titles: SectionTitles {
            summary: "الملخص".to_string(),
            experience: "الخبرة العملية".to_string(),
            education: "التعليم".to_string(),
            skills: "المهارات".to_string(),
            languages: "اللغات".to_string(),
            projects: "المشاريع".to_string(),
            extra: Map::new(),
        },
        section_visibility: SectionVisibility::all_visible(),
        extra: Map::new(),
    }
}

fn sample_social_links() -> Vec<SocialLink> {
    vec![
        SocialLink {
            id: new_item_id(),
            network: "LinkedIn".to_string(),
            url: "https://linkedin.com/in/alexdoe".to_string(),
            extra: Map::new(),
        },
        SocialLink {
            id: new_item_id(),
            network: "GitHub".to_string(),
            url: "https://github.com/alexdoe".to_string(),
            extra: Map::new(),
        },
    ]
}

fn experience(
    company: &str,
    position: &str,
    start_date: &str,
    end_date: &str,
    description: &str,
) -> Experience {
    Experience {
        id: new_item_id(),
        company: company.to_string(),
        position: position.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        description: description.to_string(),
        extra: Map::new(),
    }
}

fn skill(name: &str, level: i32) -> Skill {
    Skill {
        id: new_item_id(),
        name: name.to_string(),
        level,
        extra: Map::new(),
    }
}

fn language(name: &str, proficiency: Proficiency) -> Language {
    Language {
        id: new_item_id(),
        name: name.to_string(),
        proficiency,
        extra: Map::new(),
    }
}
