//! Content loaders for reading sheet data from files.

pub mod catalog;
pub mod character;
pub mod rules;

pub use catalog::{CatalogLoader, ItemCatalog};
pub use character::CharacterLoader;
pub use rules::RulesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Bundled sample data, for tests.
#[cfg(test)]
pub(crate) fn data_path(relative: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(relative)
}
