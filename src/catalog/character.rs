use serde::{Deserialize, Serialize};

/// Stable, 1-based character identifier. Doubles as the chat route parameter
/// and as `index + 1` into the catalog.
pub type CharacterId = i64;

/// Named accent colour for a character's card, header and reply bubbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Sky,
    Rose,
    Amber,
    Violet,
    Purple,
    Emerald,
    Slate,
}

impl Accent {
    pub fn as_str(self) -> &'static str {
        match self {
            Accent::Sky => "sky",
            Accent::Rose => "rose",
            Accent::Amber => "amber",
            Accent::Violet => "violet",
            Accent::Purple => "purple",
            Accent::Emerald => "emerald",
            Accent::Slate => "slate",
        }
    }
}

/// A persona from the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub accent: Accent,

    // Biography; each field is optional so partial catalog entries still load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl Character {
    /// One-line summary used on collapsed cards and in `rolechat characters`.
    pub fn tagline(&self) -> String {
        match (&self.occupation, &self.location) {
            (Some(occupation), Some(location)) => format!("{occupation}, {location}"),
            (Some(occupation), None) => occupation.clone(),
            (None, Some(location)) => location.clone(),
            (None, None) => String::new(),
        }
    }

    /// Initials drawn in place of the avatar image.
    pub fn initials(&self) -> String {
        self.name
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter_map(|part| part.chars().next())
            .filter(|c| c.is_alphabetic())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
