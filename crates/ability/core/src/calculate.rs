//! Ability cost calculation.
//!
//! Composes sanitization, modifier aggregation and cost resolution:
//!
//! ```text
//! total = categories + casting time + characteristics
//!       + enhancements + restrictions + cost modifier
//! ```
//!
//! The casting *cost* option is informational and never priced. Slot limits
//! are reported, not enforced.

use crate::ability::{AbilityData, sanitize_ability_data};
use crate::catalog::RuleCatalog;
use crate::modifiers::{
    AbilityModifier, category_limit, characteristic_limit, collect_ability_modifiers,
};
use crate::rank::{Rank, is_over_ranking_characteristic_level};
use crate::rules::{resolve_characteristic_cost, resolve_cost};

/// Actor-side inputs to a cost calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbilityContext {
    /// Absent means "no rank gating".
    pub actor_rank: Option<Rank>,
}

impl AbilityContext {
    pub const fn new(actor_rank: Option<Rank>) -> Self {
        Self { actor_rank }
    }

    /// Context from the host's raw rank string; unparsable ranks are ignored.
    pub fn from_rank_str(rank: &str) -> Self {
        Self::new(Rank::parse(rank))
    }
}

/// Cost components of an ability.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct CostBreakdown {
    pub categories: f64,
    pub casting_time: f64,
    pub characteristics: f64,
    pub enhancements: f64,
    /// Reserved; restrictions only grant levels today.
    pub restrictions: f64,
    /// Flat delta from enhancement modifiers.
    pub modifiers: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.categories
            + self.casting_time
            + self.characteristics
            + self.enhancements
            + self.restrictions
            + self.modifiers
    }
}

/// Slot ceilings after enhancement deltas. `None` means unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SlotLimits {
    pub categories: Option<u32>,
    pub characteristics: Option<u32>,
}

/// Result of [`calculate_ability_cost`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct AbilityCost {
    /// The sanitized ability; this is what must be persisted.
    pub ability: AbilityData,
    pub total_cost: f64,
    pub breakdown: CostBreakdown,
    pub limits: SlotLimits,
    /// Characteristic indices whose effective level exceeds the actor's rank.
    pub over_ranked: Vec<usize>,
}

/// Sanitizes `data` and prices it.
pub fn calculate_ability_cost(
    catalog: &RuleCatalog,
    data: AbilityData,
    context: &AbilityContext,
) -> AbilityCost {
    let ability = sanitize_ability_data(catalog, data);
    let modifiers = collect_ability_modifiers(catalog, &ability.enhancements);
    let levels = effective_levels(catalog, &ability, &modifiers);

    let characteristics: f64 = ability
        .characteristics
        .iter()
        .zip(&levels)
        .map(|(entry, &level)| {
            resolve_characteristic_cost(catalog.characteristic(&entry.id), level)
        })
        .sum();

    let breakdown = CostBreakdown {
        categories: ability.categories.iter().map(|entry| entry.cost).sum(),
        casting_time: resolve_cost(
            catalog
                .casting_time(&ability.casting_time)
                .and_then(|option| option.cost.as_ref()),
            1,
        ),
        characteristics,
        enhancements: ability
            .enhancements
            .iter()
            .map(|entry| {
                resolve_cost(
                    catalog
                        .enhancement(&entry.id)
                        .and_then(|rule| rule.cost.as_ref()),
                    1,
                )
            })
            .sum(),
        restrictions: 0.0,
        modifiers: modifiers.cost_modifier,
    };

    let over_ranked = ability
        .characteristics
        .iter()
        .zip(&levels)
        .enumerate()
        .filter(|(_, (entry, level))| {
            is_over_ranking_characteristic_level(catalog, &entry.id, **level, context.actor_rank)
        })
        .map(|(index, _)| index)
        .collect();

    let limits = SlotLimits {
        categories: category_limit(catalog, &modifiers),
        characteristics: characteristic_limit(catalog, &modifiers),
    };

    tracing::debug!(
        total = breakdown.total(),
        categories = breakdown.categories,
        casting_time = breakdown.casting_time,
        characteristics = breakdown.characteristics,
        enhancements = breakdown.enhancements,
        modifiers = breakdown.modifiers,
        "ability cost calculated"
    );

    AbilityCost {
        ability,
        total_cost: breakdown.total(),
        breakdown,
        limits,
        over_ranked,
    }
}

/// Normalizes raw JSON, then sanitizes and prices it.
#[cfg(feature = "serde")]
pub fn calculate_raw(
    catalog: &RuleCatalog,
    raw: &serde_json::Value,
    context: &AbilityContext,
) -> AbilityCost {
    calculate_ability_cost(catalog, crate::ability::normalize_ability_data(raw), context)
}

/// Level each characteristic is priced at.
///
/// The stored level is clamped into the effective range; the advances
/// target additionally receives `advances` levels, clamped again.
pub fn effective_levels(
    catalog: &RuleCatalog,
    ability: &AbilityData,
    modifiers: &AbilityModifier,
) -> Vec<i32> {
    let advances = i32::from(ability.restrictions.advances);

    ability
        .characteristics
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let bounds = modifiers.characteristic_bounds(catalog.characteristic(&entry.id));
            let level = bounds.clamp(entry.level);
            if ability.restrictions.advances_target == Some(index) {
                bounds.clamp(level.saturating_add(advances))
            } else {
                level
            }
        })
        .collect()
}
