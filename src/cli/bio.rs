use std::error::Error;

use crate::catalog::{format_biography, Catalog, CharacterId};

/// Print the biography exactly as it is sent as `userStory`.
pub fn print_bio(catalog: &Catalog, id: CharacterId) -> Result<(), Box<dyn Error>> {
    match catalog.resolve(Some(id)) {
        Ok(character) => {
            println!("{}", character.name);
            println!();
            println!("{}", format_biography(character));
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}
