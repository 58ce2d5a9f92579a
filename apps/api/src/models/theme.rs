//! Visual configuration, independent of résumé content.
//!
//! Every enum here deserializes leniently: a value this build does not know
//! reads back as the variant's named default instead of failing the whole
//! theme.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// 24-bit RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
        match hex.len() {
            6 => Some(Rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
                Some(Rgb(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).ok_or_else(|| de::Error::custom(format!("invalid color '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub background: Rgb,
    pub text: Rgb,
    pub header_text: Rgb,
}

impl Default for ColorPalette {
    fn default() -> Self {
        THEME_PRESETS[0].colors.clone()
    }
}

/// A named palette offered by the design panel.
#[derive(Debug, Clone, Serialize)]
pub struct ThemePreset {
    pub name: &'static str,
    pub colors: ColorPalette,
}

pub const THEME_PRESETS: [ThemePreset; 5] = [
    ThemePreset {
        name: "Default Blue",
        colors: ColorPalette {
            primary: Rgb(0x25, 0x63, 0xeb),
            secondary: Rgb(0x4f, 0x46, 0xe5),
            background: Rgb(0xff, 0xff, 0xff),
            text: Rgb(0x37, 0x41, 0x51),
            header_text: Rgb(0xff, 0xff, 0xff),
        },
    },
    ThemePreset {
        name: "Forest Green",
        colors: ColorPalette {
            primary: Rgb(0x16, 0x65, 0x34),
            secondary: Rgb(0x15, 0x80, 0x3d),
            background: Rgb(0xff, 0xff, 0xff),
            text: Rgb(0x37, 0x41, 0x51),
            header_text: Rgb(0xff, 0xff, 0xff),
        },
    },
    ThemePreset {
        name: "Modern Slate",
        colors: ColorPalette {
            primary: Rgb(0x47, 0x55, 0x69),
            secondary: Rgb(0x64, 0x74, 0x8b),
            background: Rgb(0xf8, 0xfa, 0xfc),
            text: Rgb(0x1e, 0x29, 0x3b),
            header_text: Rgb(0xff, 0xff, 0xff),
        },
    },
    ThemePreset {
        name: "Crimson Red",
        colors: ColorPalette {
            primary: Rgb(0xdc, 0x26, 0x26),
            secondary: Rgb(0xb9, 0x1c, 0x1c),
            background: Rgb(0xff, 0xff, 0xff),
            text: Rgb(0x37, 0x41, 0x51),
            header_text: Rgb(0xff, 0xff, 0xff),
        },
    },
    ThemePreset {
        name: "Professional Graphite",
        colors: ColorPalette {
            primary: Rgb(0x33, 0x41, 0x55),
            secondary: Rgb(0x1e, 0x29, 0x3b),
            background: Rgb(0xff, 0xff, 0xff),
            text: Rgb(0x11, 0x18, 0x27),
            header_text: Rgb(0xf1, 0xf5, 0xf9),
        },
    },
];

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Declares a string-backed enum with a fallback variant for unknown input.
macro_rules! lenient_enum {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident => $fallback_wire:literal,
        { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $fallback,
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$fallback => $fallback_wire,
                    $($name::$variant => $wire),+
                }
            }

            pub fn parse(s: &str) -> Option<$name> {
                [$name::$fallback, $($name::$variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::parse(&s).unwrap_or_else(|| {
                    tracing::warn!(
                        "Unknown {} '{}', falling back to '{}'",
                        stringify!($name),
                        s,
                        $name::default().as_str()
                    );
                    $name::default()
                }))
            }
        }
    };
}

lenient_enum! {
    /// One of the four layout strategies.
    TemplateKind, fallback = Modern => "modern",
    { Classic => "classic", Creative => "creative", Compact => "compact" }
}

lenient_enum! {
    /// How a skill's level is drawn.
    SkillDisplayStyle, fallback = Bar => "bar",
    { Dots => "dots", Tags => "tags" }
}

lenient_enum! {
    /// Rule drawn between consecutive sections.
    DividerStyle, fallback = Solid => "solid",
    { Dashed => "dashed", None => "none" }
}

lenient_enum! {
    /// Typeface family of the rendered résumé.
    FontFamily, fallback = Inter => "inter",
    { Lora => "lora", Roboto => "roboto", SourceSansPro => "source-sans-pro" }
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Modern,
        TemplateKind::Classic,
        TemplateKind::Creative,
        TemplateKind::Compact,
    ];
}

impl FontFamily {
    pub fn display_name(&self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::Lora => "Lora",
            FontFamily::Roboto => "Roboto",
            FontFamily::SourceSansPro => "Source Sans Pro",
        }
    }

    pub const ALL: [FontFamily; 4] = [
        FontFamily::Inter,
        FontFamily::Lora,
        FontFamily::Roboto,
        FontFamily::SourceSansPro,
    ];
}

// ────────────────────────────────────────────────────────────────────────────
// Theme
// ────────────────────────────────────────────────────────────────────────────

/// Display settings. Missing keys take their default, so a theme saved by an
/// older editor still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub color: ColorPalette,
    pub font: FontFamily,
    pub template: TemplateKind,
    pub skill_display_style: SkillDisplayStyle,
    pub section_divider_style: DividerStyle,
}
