//! Content loaders for reading rule tables from files.
//!
//! Every file is parsed into the authored form of its family
//! ([`ability_core::RuleCatalogSpec`] fields); validation happens once, when
//! the tables are assembled into a [`ability_core::RuleCatalog`].

pub mod factory;
pub mod rules;

pub use factory::ContentFactory;
pub use rules::{
    CASTING_FILE, CATEGORIES_FILE, CHARACTERISTICS_FILE, CastingTables, ENHANCEMENTS_FILE,
    LIMITS_FILE, RulesLoader,
};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses TOML content; `source` names the file in error messages.
pub(crate) fn parse_toml<T: DeserializeOwned>(content: &str, source: &str) -> LoadResult<T> {
    toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", source, e))
}
