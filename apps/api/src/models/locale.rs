use serde::{Deserialize, Serialize};

/// Interface language. Selects translations and which built-in document a
/// reset restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Reads a persisted two-letter code. Anything but `ar` is English.
    pub fn from_code(code: &str) -> Locale {
        match code.trim() {
            "ar" => Locale::Ar,
            _ => Locale::En,
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Ar)
    }
}
