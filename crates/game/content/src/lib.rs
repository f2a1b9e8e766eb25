//! Data-driven content and loaders for character sheets.
//!
//! This crate reads authored files into sheet-core types:
//! - Item catalogs (RON)
//! - Character documents (RON or JSON)
//! - Rules configuration (TOML)
//!
//! All loaders use sheet-core types directly with serde for deserialization.

pub mod loaders;

pub use loaders::{CatalogLoader, CharacterLoader, ItemCatalog, LoadResult, RulesLoader};
