//! Read-only character catalog shared by the catalog and chat screens.
//!
//! The catalog is built once at startup (from the built-in personas or a
//! TOML file) and handed to both screens explicitly. Cloning is cheap.

pub mod biography;
pub mod builtin;
pub mod character;
pub mod loader;

use std::path::Path;
use std::sync::Arc;

pub use biography::{camel_case_to_title_case, format_biography, BiographyField};
pub use character::{Accent, Character, CharacterId};
pub use loader::CatalogLoadError;

/// Why a route identifier did not resolve to a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The route carried no identifier.
    Missing,
    /// The identifier is below 1 or above the catalog length.
    OutOfRange { id: CharacterId, len: usize },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Missing => write!(f, "no character id given"),
            ResolveError::OutOfRange { id, len } => {
                write!(f, "character id {id} is outside the catalog (1..={len})")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

#[derive(Debug, Clone)]
pub struct Catalog {
    characters: Arc<[Character]>,
}

impl Catalog {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters: characters.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(builtin::builtin_characters())
    }

    /// Load from `path` when given, otherwise fall back to the built-in personas.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogLoadError> {
        match path {
            Some(path) => {
                let characters = loader::load_catalog_file(path)?;
                tracing::info!(count = characters.len(), path = %path.display(), "loaded catalog");
                Ok(Self::new(characters))
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        if id < 1 {
            return None;
        }
        self.characters.get((id - 1) as usize)
    }

    /// Map a route identifier to its character, rejecting absent ids and ids
    /// outside `1..=len`.
    pub fn resolve(&self, id: Option<CharacterId>) -> Result<&Character, ResolveError> {
        let id = id.ok_or(ResolveError::Missing)?;
        self.get(id).ok_or(ResolveError::OutOfRange {
            id,
            len: self.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_id_resolves_to_its_character() {
        let catalog = Catalog::builtin();
        for id in 1..=catalog.len() as i64 {
            let character = catalog.resolve(Some(id)).unwrap();
            assert_eq!(character.id, id);
        }
    }

    #[test]
    fn ids_outside_bounds_fail() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve(None), Err(ResolveError::Missing));
        for id in [0, -1, 4, 999] {
            assert_eq!(
                catalog.resolve(Some(id)),
                Err(ResolveError::OutOfRange { id, len: 3 })
            );
        }
    }

    #[test]
    fn load_without_path_uses_builtin() {
        let catalog = Catalog::load(None).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.characters()[1].name, "Sarah Chen-Williams");
    }
}
