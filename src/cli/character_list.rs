use crate::catalog::{Catalog, Character};

pub fn list_characters(catalog: &Catalog) {
    println!("Available characters:\n");

    if catalog.is_empty() {
        println!("  No characters in the catalog.");
        return;
    }

    for character in catalog.characters() {
        println!("  • {}", character_line(character));
    }
    println!("\n💡 Start a roleplay with:");
    println!("   rolechat chat -c <id>");
}

pub(crate) fn character_line(character: &Character) -> String {
    format!(
        "{}. {} ({})",
        character.id,
        character.name,
        character.tagline()
    )
}
