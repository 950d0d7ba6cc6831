//! Biography string sent alongside every turn.
//!
//! The field list is fixed and typed: the order below is the order the
//! inference endpoint sees, independent of how a catalog file lays out its
//! keys.

use super::character::Character;

/// Biography fields in transmission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiographyField {
    Name,
    Age,
    Nationality,
    Location,
    Occupation,
    FamilyBackground,
    Scenario,
}

impl BiographyField {
    pub const ORDER: [BiographyField; 7] = [
        BiographyField::Name,
        BiographyField::Age,
        BiographyField::Nationality,
        BiographyField::Location,
        BiographyField::Occupation,
        BiographyField::FamilyBackground,
        BiographyField::Scenario,
    ];

    /// camelCase key the label is derived from.
    pub fn key(self) -> &'static str {
        match self {
            BiographyField::Name => "name",
            BiographyField::Age => "age",
            BiographyField::Nationality => "nationality",
            BiographyField::Location => "location",
            BiographyField::Occupation => "occupation",
            BiographyField::FamilyBackground => "familyBackground",
            BiographyField::Scenario => "scenario",
        }
    }

    pub fn label(self) -> String {
        camel_case_to_title_case(self.key())
    }

    /// Entries followed by a blank line in the rendered biography.
    fn ends_paragraph(self) -> bool {
        matches!(
            self,
            BiographyField::Occupation | BiographyField::FamilyBackground
        )
    }

    fn value(self, character: &Character) -> Option<String> {
        match self {
            BiographyField::Name => Some(character.name.clone()),
            BiographyField::Age => character.age.map(|age| age.to_string()),
            BiographyField::Nationality => character.nationality.clone(),
            BiographyField::Location => character.location.clone(),
            BiographyField::Occupation => character.occupation.clone(),
            BiographyField::FamilyBackground => character.family_background.clone(),
            BiographyField::Scenario => character.scenario.clone(),
        }
    }
}

/// `familyBackground` -> `Family Background`, `name` -> `Name`.
///
/// Inserts a space wherever a lowercase letter is directly followed by an
/// uppercase one, then capitalizes the first character. Other characters
/// pass through untouched.
pub fn camel_case_to_title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;

    for (i, ch) in key.chars().enumerate() {
        if prev_lower && ch.is_ascii_uppercase() {
            out.push(' ');
        }
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        prev_lower = ch.is_ascii_lowercase();
    }

    out
}

/// Render the biography as `Label: value` lines in [`BiographyField::ORDER`].
/// Missing optional fields are skipped.
pub fn format_biography(character: &Character) -> String {
    BiographyField::ORDER
        .iter()
        .filter_map(|field| {
            field.value(character).map(|value| {
                if field.ends_paragraph() {
                    format!("{}: {}\n", field.label(), value)
                } else {
                    format!("{}: {}", field.label(), value)
                }
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}
