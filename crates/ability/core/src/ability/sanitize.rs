//! Re-validation of [`AbilityData`] against a rule catalog.
//!
//! Every step re-derives from the catalog instead of trusting prior output,
//! which makes sanitization idempotent for a fixed catalog. After a campaign
//! edits its rules, stored abilities must be sanitized again.

use crate::catalog::RuleCatalog;
use crate::modifiers::{AbilityModifier, collect_ability_modifiers};
use crate::rules::resolve_cost;

use super::{AbilityData, CategoryEntry, CharacteristicEntry, EnhancementEntry, Restrictions};

/// Validates every reference in `data` and clamps levels and advances.
///
/// 1. unknown casting time/cost ids fall back to the catalog's first entry
/// 2. unknown category ids are blanked; non-finite costs are re-derived from
///    the rule; costs are floored at 0
/// 3. characteristic levels are clamped into the range produced by the
///    selected enhancements' overrides; unknown ids are blanked with `[0, 0]`
/// 4. the advances target must index a characteristic, and advances are
///    re-clamped against that characteristic's effective max
/// 5. unknown enhancement ids are blanked
pub fn sanitize_ability_data(catalog: &RuleCatalog, data: AbilityData) -> AbilityData {
    let AbilityData {
        casting_time,
        casting_cost,
        categories,
        characteristics,
        enhancements,
        restrictions,
    } = data;

    // Overrides come from the normalized list; unknown ids contribute nothing
    let modifiers = collect_ability_modifiers(catalog, &enhancements);

    let characteristics: Vec<CharacteristicEntry> = characteristics
        .into_iter()
        .map(|entry| sanitize_characteristic(catalog, &modifiers, entry))
        .collect();

    let restrictions = sanitize_restrictions(catalog, &modifiers, &characteristics, restrictions);

    AbilityData {
        casting_time: known_or_default(
            casting_time,
            |id| catalog.casting_time(id).is_some(),
            catalog.default_casting_time(),
        ),
        casting_cost: known_or_default(
            casting_cost,
            |id| catalog.casting_cost(id).is_some(),
            catalog.default_casting_cost(),
        ),
        categories: categories
            .into_iter()
            .map(|entry| sanitize_category(catalog, entry))
            .collect(),
        characteristics,
        enhancements: enhancements
            .into_iter()
            .map(|entry| sanitize_enhancement(catalog, entry))
            .collect(),
        restrictions,
    }
}

/// Normalizes raw JSON and sanitizes the result.
#[cfg(feature = "serde")]
pub fn sanitize_raw(catalog: &RuleCatalog, raw: &serde_json::Value) -> AbilityData {
    sanitize_ability_data(catalog, super::normalize_ability_data(raw))
}

fn known_or_default(id: String, known: impl Fn(&str) -> bool, fallback: &str) -> String {
    if known(&id) {
        id
    } else {
        if !id.is_empty() {
            tracing::debug!(%id, %fallback, "unknown casting option replaced by default");
        }
        fallback.to_owned()
    }
}

fn sanitize_category(catalog: &RuleCatalog, mut entry: CategoryEntry) -> CategoryEntry {
    let rule = catalog.category(&entry.category);

    if rule.is_none() && !entry.category.is_empty() {
        tracing::debug!(category = %entry.category, "clearing unknown category");
        entry.category.clear();
    }

    if !entry.cost.is_finite() {
        entry.cost = resolve_cost(rule.map(|rule| &rule.cost), 1);
    }
    // f64::max also maps a NaN rule value to 0
    entry.cost = entry.cost.max(0.0);

    entry
}

fn sanitize_characteristic(
    catalog: &RuleCatalog,
    modifiers: &AbilityModifier,
    mut entry: CharacteristicEntry,
) -> CharacteristicEntry {
    let rule = catalog.characteristic(&entry.id);

    if rule.is_none() && !entry.id.is_empty() {
        tracing::debug!(characteristic = %entry.id, "clearing unknown characteristic");
        entry.id.clear();
    }

    entry.level = modifiers.characteristic_bounds(rule).clamp(entry.level);
    entry
}

fn sanitize_restrictions(
    catalog: &RuleCatalog,
    modifiers: &AbilityModifier,
    characteristics: &[CharacteristicEntry],
    mut restrictions: Restrictions,
) -> Restrictions {
    let target = restrictions
        .advances_target
        .and_then(|index| characteristics.get(index));

    match target {
        Some(entry) => {
            let bounds = modifiers.characteristic_bounds(catalog.characteristic(&entry.id));
            let headroom = bounds.max.saturating_sub(entry.level).max(0);
            let allowed = u8::try_from(headroom).unwrap_or(u8::MAX);
            restrictions.advances = restrictions.advances.min(allowed);
        }
        None => {
            if let Some(index) = restrictions.advances_target {
                tracing::debug!(index, "clearing out-of-range advances target");
            }
            restrictions.advances_target = None;
            restrictions.advances = 0;
        }
    }

    restrictions
}

fn sanitize_enhancement(catalog: &RuleCatalog, mut entry: EnhancementEntry) -> EnhancementEntry {
    if !entry.id.is_empty() && catalog.enhancement(&entry.id).is_none() {
        tracing::debug!(enhancement = %entry.id, "clearing unknown enhancement");
        entry.id.clear();
    }
    entry
}
