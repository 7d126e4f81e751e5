//! Deterministic ability rules shared by character sheets and tools.
//!
//! `ability-core` prices and validates player-authored abilities against a
//! campaign's [`RuleCatalog`]. Raw documents flow through
//! [`normalize_ability_data`] (shape only) and [`sanitize_ability_data`]
//! (catalog references and ranges) before [`calculate_ability_cost`] totals
//! them. Every entry point is a pure function of its inputs; the catalog is
//! passed explicitly and never cached.
pub mod ability;
pub mod calculate;
pub mod catalog;
pub mod error;
pub mod modifiers;
pub mod options;
pub mod rank;
pub mod rules;

#[cfg(test)]
mod testing;

#[cfg(feature = "serde")]
pub use ability::{normalize_ability_data, sanitize_raw};
pub use ability::{
    AREA_CHARACTERISTIC, AbilityData, AreaType, CategoryEntry, CharacteristicEntry,
    DAMAGE_CHARACTERISTIC, DamageType, EnhancementEntry, MAX_ADVANCES, Restrictions,
    sanitize_ability_data,
};
#[cfg(feature = "serde")]
pub use calculate::calculate_raw;
pub use calculate::{
    AbilityContext, AbilityCost, CostBreakdown, SlotLimits, calculate_ability_cost,
    effective_levels,
};
#[cfg(feature = "serde")]
pub use catalog::CatalogFingerprint;
pub use catalog::{
    RuleCatalog, RuleCatalogBuilder, RuleCatalogSpec, RuleEntry, RuleFamily, RuleTable,
};
pub use error::CatalogError;
pub use modifiers::{
    AbilityModifier, LevelBounds, category_limit, characteristic_limit, collect_ability_modifiers,
};
pub use options::{
    AbilityOptions, CharacteristicOption, LevelOption, Localize, SelectOption,
    build_ability_options, category_label, characteristic_label, enhancement_label,
};
pub use rank::{Rank, is_over_ranking_characteristic_level, required_rank};
pub use rules::{
    CastingOption, Category, CharacteristicLevel, CharacteristicRule, CostRule, CostStep,
    EnhancementModifiers, EnhancementRule, MAX_LEVEL, RuleLimits, resolve_characteristic_cost,
    resolve_cost,
};
