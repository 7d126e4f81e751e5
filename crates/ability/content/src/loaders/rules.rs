//! Rule table loader.

use std::path::{Path, PathBuf};

use ability_core::{
    CastingOption, Category, CharacteristicRule, EnhancementRule, RuleCatalog, RuleCatalogSpec,
    RuleLimits,
};
use serde::Deserialize;

use crate::builtin::builtin_spec;
use crate::loaders::{LoadResult, parse_toml, read_file};

pub const LIMITS_FILE: &str = "limits.toml";
pub const CASTING_FILE: &str = "casting.toml";
pub const CATEGORIES_FILE: &str = "categories.toml";
pub const CHARACTERISTICS_FILE: &str = "characteristics.toml";
pub const ENHANCEMENTS_FILE: &str = "enhancements.toml";

/// Contents of `casting.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CastingTables {
    pub casting_times: Vec<CastingOption>,
    pub casting_costs: Vec<CastingOption>,
}

#[derive(Deserialize)]
struct CategoryFile {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct CharacteristicFile {
    #[serde(default)]
    characteristics: Vec<CharacteristicRule>,
}

#[derive(Deserialize)]
struct EnhancementFile {
    #[serde(default)]
    enhancements: Vec<EnhancementRule>,
}

/// Loader for rule tables from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Loads a campaign rules directory into a validated catalog.
    ///
    /// Each family file is optional; a missing file keeps the built-in
    /// table of that family. A present file replaces the whole family, so
    /// `casting.toml` must list both casting times and casting costs.
    ///
    /// # Directory Structure
    ///
    /// ```text
    /// rules_dir/
    /// ├── limits.toml
    /// ├── casting.toml
    /// ├── categories.toml
    /// ├── characteristics.toml
    /// └── enhancements.toml
    /// ```
    pub fn load_dir(dir: &Path) -> LoadResult<RuleCatalog> {
        if !dir.is_dir() {
            anyhow::bail!("Rules directory not found: {}", dir.display());
        }

        let builtin = builtin_spec()?;

        let limits = match family_file(dir, LIMITS_FILE) {
            Some(path) => Self::load_limits(&path)?,
            None => builtin.limits,
        };
        let casting = match family_file(dir, CASTING_FILE) {
            Some(path) => Self::load_casting(&path)?,
            None => CastingTables {
                casting_times: builtin.casting_times,
                casting_costs: builtin.casting_costs,
            },
        };
        let categories = match family_file(dir, CATEGORIES_FILE) {
            Some(path) => Self::load_categories(&path)?,
            None => builtin.categories,
        };
        let characteristics = match family_file(dir, CHARACTERISTICS_FILE) {
            Some(path) => Self::load_characteristics(&path)?,
            None => builtin.characteristics,
        };
        let enhancements = match family_file(dir, ENHANCEMENTS_FILE) {
            Some(path) => Self::load_enhancements(&path)?,
            None => builtin.enhancements,
        };

        let spec = RuleCatalogSpec {
            limits,
            casting_times: casting.casting_times,
            casting_costs: casting.casting_costs,
            categories,
            characteristics,
            enhancements,
        };

        let catalog = RuleCatalog::from_spec(spec).map_err(|e| {
            anyhow::anyhow!(
                "Invalid rule tables in {}: {} [{}]",
                dir.display(),
                e,
                e.error_code()
            )
        })?;

        tracing::info!(
            dir = %dir.display(),
            fingerprint = %catalog.fingerprint(),
            "rule catalog loaded"
        );

        Ok(catalog)
    }

    /// Load base slot ceilings from `limits.toml`.
    pub fn load_limits(path: &Path) -> LoadResult<RuleLimits> {
        Self::parse_limits(&read_file(path)?, &path.display().to_string())
    }

    /// Load casting times and costs from `casting.toml`.
    pub fn load_casting(path: &Path) -> LoadResult<CastingTables> {
        Self::parse_casting(&read_file(path)?, &path.display().to_string())
    }

    /// Load category rules from `categories.toml`.
    pub fn load_categories(path: &Path) -> LoadResult<Vec<Category>> {
        Self::parse_categories(&read_file(path)?, &path.display().to_string())
    }

    /// Load characteristic rules from `characteristics.toml`.
    pub fn load_characteristics(path: &Path) -> LoadResult<Vec<CharacteristicRule>> {
        Self::parse_characteristics(&read_file(path)?, &path.display().to_string())
    }

    /// Load enhancement rules from `enhancements.toml`.
    pub fn load_enhancements(path: &Path) -> LoadResult<Vec<EnhancementRule>> {
        Self::parse_enhancements(&read_file(path)?, &path.display().to_string())
    }

    pub(crate) fn parse_limits(content: &str, source: &str) -> LoadResult<RuleLimits> {
        parse_toml(content, source)
    }

    pub(crate) fn parse_casting(content: &str, source: &str) -> LoadResult<CastingTables> {
        parse_toml(content, source)
    }

    pub(crate) fn parse_categories(content: &str, source: &str) -> LoadResult<Vec<Category>> {
        parse_toml::<CategoryFile>(content, source).map(|file| file.categories)
    }

    pub(crate) fn parse_characteristics(
        content: &str,
        source: &str,
    ) -> LoadResult<Vec<CharacteristicRule>> {
        parse_toml::<CharacteristicFile>(content, source).map(|file| file.characteristics)
    }

    pub(crate) fn parse_enhancements(
        content: &str,
        source: &str,
    ) -> LoadResult<Vec<EnhancementRule>> {
        parse_toml::<EnhancementFile>(content, source).map(|file| file.enhancements)
    }
}

/// Path of a family file inside `dir`, if the campaign provides one.
fn family_file(dir: &Path, file: &str) -> Option<PathBuf> {
    let path = dir.join(file);
    if path.is_file() {
        Some(path)
    } else {
        tracing::debug!(file, "using built-in table");
        None
    }
}
