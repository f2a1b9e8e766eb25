//! Character sheet inspection binary.
//!
//! Loads a character document (and optionally an item catalog and rules),
//! recomputes its derived state, then prints the sheet, its diagnostics and a
//! state digest.
//!
//! # Examples
//!
//! ```bash
//! SHEET_CHARACTER=crates/game/content/data/characters/aria.ron \
//! SHEET_CATALOG=crates/game/content/data/items/basic.ron \
//!     cargo run -p sheet-client
//! ```

mod config;
mod logging;
mod report;

use anyhow::Result;
use sheet_content::{CatalogLoader, CharacterLoader, RulesLoader};
use sheet_core::{Character, Item, RulesConfig};

use crate::config::{OutputFormat, SheetConfig};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = SheetConfig::from_env()?;
    let mut character = load(&config)?;

    let report = if config.rebuild {
        character.rebuild()?
    } else {
        character.recompute()?
    };
    tracing::info!(
        character = %character.name,
        passes = report.passes,
        diagnostics = report.diagnostics.len(),
        "recomputed"
    );

    let output = match config.output {
        OutputFormat::Text => report::render(&character),
        OutputFormat::Json => serde_json::to_string_pretty(&report::JsonSheet::new(&character))?,
    };
    println!("{output}");
    Ok(())
}

fn load(config: &SheetConfig) -> Result<Character> {
    let rules = match &config.rules {
        Some(path) => RulesLoader::load(path)?,
        None => RulesConfig::default(),
    };
    let mut character = CharacterLoader::load_with_rules(&config.character, rules)?;

    if let Some(path) = &config.catalog {
        let items = CatalogLoader::load(path)?;
        let added = merge_catalog(&mut character, items);
        tracing::debug!(added, "merged catalog into inventory");
    }
    Ok(character)
}

/// Add catalog items the inventory does not already hold.
fn merge_catalog(character: &mut Character, items: Vec<Item>) -> usize {
    let inventory = &mut character.sources.inventory;
    let before = inventory.len();
    for item in items {
        if !inventory.iter().any(|held| held.id == item.id) {
            inventory.push(item);
        }
    }
    inventory.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::{CharacterBuild, ItemKind};

    #[test]
    fn catalog_never_replaces_held_items() {
        let held = Item::new("rope", "Old rope", ItemKind::Gear);
        let mut character = Character::new("Aria", CharacterBuild::default(), RulesConfig::default());
        character.sources.inventory.push(held.clone());

        let added = merge_catalog(
            &mut character,
            vec![
                Item::new("rope", "New rope", ItemKind::Gear),
                Item::new("lantern", "Lantern", ItemKind::Gear),
            ],
        );

        assert_eq!(added, 1);
        assert_eq!(character.sources.inventory[0], held);
        assert_eq!(character.sources.inventory.len(), 2);
    }
}
