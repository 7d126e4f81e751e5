//! Content factory for building rule catalogs from a data directory.

use std::path::{Path, PathBuf};

use ability_core::{Category, CharacteristicRule, EnhancementRule, RuleCatalog, RuleLimits};

use crate::loaders::{
    CASTING_FILE, CATEGORIES_FILE, CHARACTERISTICS_FILE, CastingTables, ENHANCEMENTS_FILE,
    LIMITS_FILE, LoadResult, RulesLoader,
};

/// Content factory that loads rule tables from a data directory.
///
/// Unlike [`RulesLoader::load_dir`], the per-family methods require their
/// file to exist.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the full catalog, falling back to built-in tables per family.
    pub fn load_catalog(&self) -> LoadResult<RuleCatalog> {
        RulesLoader::load_dir(&self.data_dir)
    }

    /// Load base slot ceilings from `limits.toml`.
    pub fn load_limits(&self) -> LoadResult<RuleLimits> {
        RulesLoader::load_limits(&self.data_dir.join(LIMITS_FILE))
    }

    /// Load casting options from `casting.toml`.
    pub fn load_casting(&self) -> LoadResult<CastingTables> {
        RulesLoader::load_casting(&self.data_dir.join(CASTING_FILE))
    }

    /// Load categories from `categories.toml`.
    pub fn load_categories(&self) -> LoadResult<Vec<Category>> {
        RulesLoader::load_categories(&self.data_dir.join(CATEGORIES_FILE))
    }

    /// Load characteristics from `characteristics.toml`.
    pub fn load_characteristics(&self) -> LoadResult<Vec<CharacteristicRule>> {
        RulesLoader::load_characteristics(&self.data_dir.join(CHARACTERISTICS_FILE))
    }

    /// Load enhancements from `enhancements.toml`.
    pub fn load_enhancements(&self) -> LoadResult<Vec<EnhancementRule>> {
        RulesLoader::load_enhancements(&self.data_dir.join(ENHANCEMENTS_FILE))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
