//! Character document loader.
//!
//! Documents are RON or JSON, chosen by file extension. A document without a
//! baseline is valid; the first recompute builds one.

use std::path::Path;

use sheet_core::{Character, RulesConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for character documents.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character document, attaching default rules.
    pub fn load(path: &Path) -> LoadResult<Character> {
        Self::load_with_rules(path, RulesConfig::default())
    }

    /// Load a character document and attach `rules` to it.
    pub fn load_with_rules(path: &Path, rules: RulesConfig) -> LoadResult<Character> {
        let content = read_file(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let mut character: Character = match extension.as_deref() {
            Some("ron") => ron::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse character RON: {}", e))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse character JSON: {}", e))?,
            _ => anyhow::bail!(
                "Unsupported character document {}: expected .ron or .json",
                path.display()
            ),
        };
        character.set_rules(rules);

        tracing::debug!(
            path = %path.display(),
            character = %character.name,
            built = character.baseline.is_some(),
            "loaded character document"
        );
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::data_path;
    use sheet_core::schema::{BasicSkill, CombatFeature, ConditionId, Pool};
    use sheet_core::{Meter, Slot};
    use tempfile::TempDir;

    #[test]
    fn bundled_character_recomputes() {
        let mut character =
            CharacterLoader::load(&data_path("characters/aria.ron")).expect("character");
        assert!(character.baseline.is_none());
        assert_eq!(
            character.sources.equipment.get(Slot::OffHand).map(|id| id.0.as_str()),
            Some("buckler")
        );

        let report = character.recompute().expect("recompute");
        let system = &character.system;

        assert!(report.diagnostics.is_empty());
        assert_eq!(system.skill(BasicSkill::Deflection).map(|s| s.value), Some(3));
        assert_eq!(system.skill(BasicSkill::Awareness).map(|s| s.value), Some(1));
        assert_eq!(system.feature(CombatFeature::Guard), 1);
        assert!(system.grants.is_immune(&ConditionId::new("poisoned")));
        assert_eq!(system.meter(Pool::Health), Some(&Meter::new(14, 14)));
        assert_eq!(system.pain.calculated, 3);
        assert_eq!(system.encumbrance.load, 1);
    }

    #[test]
    fn json_documents_load() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("bram.json");
        std::fs::write(
            &path,
            r#"{
                "name": "Bram",
                "build": { "attributes": { "physique": 1 }, "size": "large" },
                "sources": { "conditions": [{ "id": "prone" }] }
            }"#,
        )
        .expect("write");

        let mut character = CharacterLoader::load(&path).expect("character");
        character.recompute().expect("recompute");

        assert_eq!(character.system.meter(Pool::Health), Some(&Meter::new(14, 14)));
        assert_eq!(
            character
                .system
                .movement
                .get(sheet_core::schema::MovementMode::Walk),
            1
        );
    }

    #[test]
    fn attached_rules_are_used() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("cas.json");
        std::fs::write(&path, r#"{ "name": "Cas" }"#).expect("write");

        let mut rules = RulesConfig::default();
        rules.movement.base_walk = 7;
        let mut character = CharacterLoader::load_with_rules(&path, rules).expect("character");
        character.recompute().expect("recompute");

        assert_eq!(
            character
                .system
                .movement
                .get(sheet_core::schema::MovementMode::Walk),
            7
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("aria.yaml");
        std::fs::write(&path, "name: Aria").expect("write");

        let err = CharacterLoader::load(&path).expect_err("extension");
        assert!(err.to_string().contains("expected .ron or .json"));
    }
}
