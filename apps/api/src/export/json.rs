//! File names for exported artifacts.

/// Name offered for the JSON download.
pub const EXPORT_FILE_NAME: &str = "cv-data.json";

/// `<name>_CV.pdf`, with whitespace runs turned into `_` and anything else
/// that is not alphanumeric dropped. An empty result gives `CV.pdf`.
pub fn suggested_capture_file_name(person_name: &str) -> String {
    let stem = person_name
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "CV.pdf".to_string()
    } else {
        format!("{stem}_CV.pdf")
    }
}
