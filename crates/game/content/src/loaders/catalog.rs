//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sheet_core::Item;

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for item catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load an item catalog from a RON file.
    ///
    /// Item ids must be unique within a catalog.
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        if let Some(dup) = catalog.items.iter().find(|item| !seen.insert(&item.id)) {
            anyhow::bail!("Duplicate item id `{}` in {}", dup.id, path.display());
        }

        tracing::debug!(path = %path.display(), items = catalog.items.len(), "loaded item catalog");
        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::data_path;
    use sheet_core::ItemKind;
    use sheet_core::state::ShieldWeight;
    use tempfile::TempDir;

    #[test]
    fn loads_bundled_catalog() {
        let items = CatalogLoader::load(&data_path("items/basic.ron")).expect("catalog");

        let buckler = items
            .iter()
            .find(|item| item.id.0 == "buckler")
            .expect("buckler");
        assert_eq!(
            buckler.kind,
            ItemKind::Shield {
                weight: ShieldWeight::Light
            }
        );
        assert!(buckler.code.is_some());
        assert!(items.iter().any(|item| item.kind == ItemKind::Training));
    }

    #[test]
    fn bundled_codes_parse_clean() {
        let items = CatalogLoader::load(&data_path("items/basic.ron")).expect("catalog");

        let rejected: Vec<_> = items
            .iter()
            .filter_map(|item| Some((item, item.code.as_deref()?)))
            .filter(|(_, code)| !sheet_core::try_parse(code).is_ok_and(|parsed| parsed.is_clean()))
            .map(|(item, _)| item.id.0.as_str())
            .collect();
        assert!(rejected.is_empty(), "bundled items with rejected tokens: {rejected:?}");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("dup.ron");
        std::fs::write(
            &path,
            r#"(items: [
                (id: "rope", name: "Rope"),
                (id: "rope", name: "Other rope"),
            ])"#,
        )
        .expect("write");

        let err = CatalogLoader::load(&path).expect_err("duplicate");
        assert!(err.to_string().contains("rope"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        assert!(CatalogLoader::load(&dir.path().join("absent.ron")).is_err());
    }
}
