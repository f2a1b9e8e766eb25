//! Rules configuration loader.

use std::path::Path;

use sheet_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rules from a TOML file. Omitted sections keep their defaults.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        let rules: RulesConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::data_path;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("rules.toml");
        std::fs::write(
            &path,
            "[movement]\nprone_walk = 2\n\n[engine]\nmax_follow_up_passes = 1\n",
        )
        .expect("write");

        let rules = RulesLoader::load(&path).expect("rules");
        assert_eq!(rules.movement.prone_walk, 2);
        assert_eq!(rules.movement.base_walk, 5);
        assert_eq!(rules.engine.max_follow_up_passes, 1);
        assert_eq!(rules.skills, RulesConfig::default().skills);
    }

    #[test]
    fn bundled_rules_match_defaults() {
        let rules = RulesLoader::load(&data_path("rules.toml")).expect("rules");
        assert_eq!(rules, RulesConfig::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "[movement\n").expect("write");

        let err = RulesLoader::load(&path).expect_err("malformed");
        assert!(err.to_string().contains("rules TOML"));
    }
}
