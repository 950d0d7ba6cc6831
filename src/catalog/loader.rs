use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::character::Character;
use crate::core::config::data::path_display;

/// Errors that can occur when loading a catalog file
#[derive(Debug)]
pub enum CatalogLoadError {
    /// File could not be read
    Read { path: PathBuf, source: std::io::Error },
    /// TOML parsing failed
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Catalog contents failed validation
    ValidationFailed(Vec<String>),
}

impl fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogLoadError::Read { path, source } => {
                write!(f, "Failed to read catalog at {}: {}", path_display(path), source)
            }
            CatalogLoadError::Parse { path, source } => {
                write!(f, "Failed to parse catalog at {}: {}", path_display(path), source)
            }
            CatalogLoadError::ValidationFailed(errors) => {
                writeln!(f, "Catalog validation failed:")?;
                for error in errors {
                    writeln!(f, "  • {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogLoadError::Read { source, .. } => Some(source),
            CatalogLoadError::Parse { source, .. } => Some(source),
            CatalogLoadError::ValidationFailed(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    characters: Vec<Character>,
}

/// Parse catalog TOML (a list of `[[characters]]` tables) and validate it.
pub fn parse_catalog(contents: &str, path: &Path) -> Result<Vec<Character>, CatalogLoadError> {
    let file: CatalogFile = toml::from_str(contents).map_err(|source| CatalogLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let errors = validate_characters(&file.characters);
    if !errors.is_empty() {
        return Err(CatalogLoadError::ValidationFailed(errors));
    }

    Ok(file.characters)
}

pub fn load_catalog_file(path: &Path) -> Result<Vec<Character>, CatalogLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&contents, path)
}

/// Ids must run `1..=len` in file order so a route id maps to `index + 1`.
fn validate_characters(characters: &[Character]) -> Vec<String> {
    let mut errors = Vec::new();

    if characters.is_empty() {
        errors.push("catalog contains no characters".to_string());
    }

    for (index, character) in characters.iter().enumerate() {
        let expected = index as i64 + 1;
        if character.id != expected {
            errors.push(format!(
                "entry {} ('{}') has id {}, expected {}",
                index + 1,
                character.name,
                character.id,
                expected
            ));
        }
        if character.name.trim().is_empty() {
            errors.push(format!("entry {} has an empty name", index + 1));
        }
    }

    errors
}
