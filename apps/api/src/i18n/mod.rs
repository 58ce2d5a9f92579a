//! Static display strings for the editor, keyed by locale.
//!
//! Pure lookups. The core never branches on locale except to pick the reset
//! document and the proficiency labels below.

use serde::Serialize;

use crate::models::{Locale, Proficiency};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    pub header: HeaderStrings,
    pub sidebar: SidebarStrings,
    pub editors: EditorStrings,
    pub alerts: AlertStrings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStrings {
    pub title: &'static str,
    pub import: &'static str,
    pub export: &'static str,
    pub export_pdf: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarStrings {
    pub design: &'static str,
    pub template: &'static str,
    pub color_scheme: &'static str,
    pub font_family: &'static str,
    pub skill_style: &'static str,
    pub divider_style: &'static str,
    pub layout: &'static str,
    pub personal_info: &'static str,
    pub social_links: &'static str,
    pub summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub languages: &'static str,
    pub projects: &'static str,
    pub custom_sections: &'static str,
    pub reset: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorStrings {
    pub full_name: &'static str,
    pub job_title: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub photo_url: &'static str,
    pub network: &'static str,
    pub add_link: &'static str,
    pub company: &'static str,
    pub position: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub description: &'static str,
    pub add_experience: &'static str,
    pub institution: &'static str,
    pub degree: &'static str,
    pub grad_date: &'static str,
    pub gpa: &'static str,
    pub add_education: &'static str,
    pub skill_name: &'static str,
    pub add_skill: &'static str,
    pub language: &'static str,
    pub proficiency: &'static str,
    pub add_lang: &'static str,
    pub project_name: &'static str,
    pub project_url: &'static str,
    pub add_project: &'static str,
    pub section_title: &'static str,
    pub content: &'static str,
    pub add_custom_section: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStrings {
    pub import_success: &'static str,
    pub import_error: &'static str,
    pub reset_confirmation: &'static str,
}

pub fn translations(locale: Locale) -> &'static Translations {
    match locale {
        Locale::En => &EN,
        Locale::Ar => &AR,
    }
}

/// Display labels for [`Proficiency::ALL`], index for index.
pub fn proficiency_labels(locale: Locale) -> &'static [&'static str; 5] {
    match locale {
        Locale::En => &["Beginner", "Intermediate", "Advanced", "Fluent", "Native"],
        Locale::Ar => &["مبتدئ", "متوسط", "متقدم", "بطلاقة", "لغة أم"],
    }
}

pub fn proficiency_label(locale: Locale, proficiency: Proficiency) -> &'static str {
    let labels = proficiency_labels(locale);
    match proficiency {
        Proficiency::Beginner => labels[0],
        Proficiency::Intermediate => labels[1],
        Proficiency::Advanced => labels[2],
        Proficiency::Fluent => labels[3],
        Proficiency::Native => labels[4],
    }
}

static EN: Translations = Translations {
    header: HeaderStrings {
        title: "CV Builder",
        import: "Import",
        export: "Export JSON",
        export_pdf: "Export PDF",
    },
    sidebar: SidebarStrings {
        design: "Design",
        template: "Template",
        color_scheme: "Color Scheme",
        font_family: "Font Family",
        skill_style: "Skill Style",
        divider_style: "Divider Style",
        layout: "Layout",
        personal_info: "Personal Info",
        social_links: "Social Links",
        summary: "Summary",
        experience: "Experience",
        education: "Education",
        skills: "Skills",
        languages: "Languages",
        projects: "Projects",
        custom_sections: "Custom Sections",
        reset: "Reset to Default",
    },
    editors: EditorStrings {
        full_name: "Full Name",
        job_title: "Job Title",
        email: "Email",
        phone: "Phone",
        photo_url: "Photo URL",
        network: "Network",
        add_link: "Add Link",
        company: "Company",
        position: "Position",
        start_date: "Start Date",
        end_date: "End Date",
        description: "Description",
        add_experience: "Add Experience",
        institution: "Institution",
        degree: "Degree",
        grad_date: "Graduation Date",
        gpa: "GPA",
        add_education: "Add Education",
        skill_name: "Skill",
        add_skill: "Add Skill",
        language: "Language",
        proficiency: "Proficiency",
        add_lang: "Add Language",
        project_name: "Project Name",
        project_url: "Project URL",
        add_project: "Add Project",
        section_title: "Section Title",
        content: "Content",
        add_custom_section: "Add Custom Section",
    },
    alerts: AlertStrings {
        import_success: "CV data imported successfully!",
        import_error: "Failed to import CV data. Please check the file format.",
        reset_confirmation: "Are you sure you want to reset all data? This cannot be undone.",
    },
};

static AR: Translations = Translations {
    header: HeaderStrings {
        title: "منشئ السيرة الذاتية",
        import: "استيراد",
        export: "تصدير JSON",
        export_pdf: "تصدير PDF",
    },
    sidebar: SidebarStrings {
        design: "التصميم",
        template: "القالب",
        color_scheme: "نظام الألوان",
        font_family: "نوع الخط",
        skill_style: "نمط المهارات",
        divider_style: "نمط الفاصل",
        layout: "التخطيط",
        personal_info: "المعلومات الشخصية",
        social_links: "روابط التواصل",
        summary: "الملخص",
        experience: "الخبرة",
        education: "التعليم",
        skills: "المهارات",
        languages: "اللغات",
        projects: "المشاريع",
        custom_sections: "أقسام مخصصة",
        reset: "إعادة التعيين",
    },
    editors: EditorStrings {
        full_name: "الاسم الكامل",
        job_title: "المسمى الوظيفي",
        email: "البريد الإلكتروني",
        phone: "الهاتف",
        photo_url: "رابط الصورة",
        network: "الشبكة",
        add_link: "إضافة رابط",
        company: "الشركة",
        position: "المنصب",
        start_date: "تاريخ البدء",
        end_date: "تاريخ الانتهاء",
        description: "الوصف",
        add_experience: "إضافة خبرة",
        institution: "المؤسسة",
        degree: "الدرجة",
        grad_date: "تاريخ التخرج",
        gpa: "المعدل",
        add_education: "إضافة تعليم",
        skill_name: "المهارة",
        add_skill: "إضافة مهارة",
        language: "اللغة",
        proficiency: "مستوى الإتقان",
        add_lang: "إضافة لغة",
        project_name: "اسم المشروع",
        project_url: "رابط المشروع",
        add_project: "إضافة مشروع",
        section_title: "عنوان القسم",
        content: "المحتوى",
        add_custom_section: "إضافة قسم مخصص",
    },
    alerts: AlertStrings {
        import_success: "تم استيراد بيانات السيرة الذاتية بنجاح!",
        import_error: "فشل استيراد البيانات. يرجى التحقق من تنسيق الملف.",
        reset_confirmation: "هل أنت متأكد من إعادة تعيين جميع البيانات؟ لا يمكن التراجع عن ذلك.",
    },
};
