//! Rule tables embedded in the crate.
//!
//! These are the defaults shipped with the sheet. Campaign directories loaded
//! through [`RulesLoader::load_dir`] fall back to them family by family.

use ability_core::{RuleCatalog, RuleCatalogSpec};

use crate::loaders::{LoadResult, RulesLoader};

const LIMITS_TOML: &str = include_str!("../data/limits.toml");
const CASTING_TOML: &str = include_str!("../data/casting.toml");
const CATEGORIES_TOML: &str = include_str!("../data/categories.toml");
const CHARACTERISTICS_TOML: &str = include_str!("../data/characteristics.toml");
const ENHANCEMENTS_TOML: &str = include_str!("../data/enhancements.toml");

/// Parses the embedded tables without validating them.
pub fn builtin_spec() -> LoadResult<RuleCatalogSpec> {
    let casting = RulesLoader::parse_casting(CASTING_TOML, "builtin casting.toml")?;

    Ok(RuleCatalogSpec {
        limits: RulesLoader::parse_limits(LIMITS_TOML, "builtin limits.toml")?,
        casting_times: casting.casting_times,
        casting_costs: casting.casting_costs,
        categories: RulesLoader::parse_categories(CATEGORIES_TOML, "builtin categories.toml")?,
        characteristics: RulesLoader::parse_characteristics(
            CHARACTERISTICS_TOML,
            "builtin characteristics.toml",
        )?,
        enhancements: RulesLoader::parse_enhancements(
            ENHANCEMENTS_TOML,
            "builtin enhancements.toml",
        )?,
    })
}

/// The default rule catalog.
pub fn builtin_catalog() -> LoadResult<RuleCatalog> {
    RuleCatalog::from_spec(builtin_spec()?)
        .map_err(|e| anyhow::anyhow!("Invalid builtin rule tables: {} [{}]", e, e.error_code()))
}
