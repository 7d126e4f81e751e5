//! Enhancement modifier aggregation.
//!
//! Selected enhancements are folded into a single [`AbilityModifier`]:
//!
//! - slot deltas and the flat cost delta are summed
//! - characteristic min/max overrides are merged key-wise, and on a key
//!   collision the enhancement that comes later in the ability wins
//!
//! Entry order therefore only matters for override collisions.

use std::collections::BTreeMap;

use crate::ability::EnhancementEntry;
use crate::catalog::RuleCatalog;
use crate::rules::{CharacteristicRule, EnhancementModifiers};

/// Combined effect of every selected enhancement.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct AbilityModifier {
    pub category_slots: i32,
    pub characteristic_slots: i32,
    pub cost_modifier: f64,
    pub characteristic_max_overrides: BTreeMap<String, i32>,
    pub characteristic_min_overrides: BTreeMap<String, i32>,
}

impl AbilityModifier {
    /// All-zero modifier with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one enhancement's modifiers into this accumulator.
    ///
    /// Override entries of `modifiers` replace existing entries with the
    /// same characteristic id.
    pub fn merge(mut self, modifiers: &EnhancementModifiers) -> Self {
        self.category_slots = self.category_slots.saturating_add(modifiers.category_slots);
        self.characteristic_slots = self
            .characteristic_slots
            .saturating_add(modifiers.characteristic_slots);
        self.cost_modifier += modifiers.cost_modifier;

        for (id, max) in &modifiers.characteristic_max_overrides {
            self.characteristic_max_overrides.insert(id.clone(), *max);
        }
        for (id, min) in &modifiers.characteristic_min_overrides {
            self.characteristic_min_overrides.insert(id.clone(), *min);
        }

        self
    }

    /// Effective level range of a characteristic under these modifiers.
    ///
    /// Unknown characteristics (`None`) get `[0, 0]`.
    pub fn characteristic_bounds(&self, rule: Option<&CharacteristicRule>) -> LevelBounds {
        let Some(rule) = rule else {
            return LevelBounds::UNKNOWN;
        };

        let min = self
            .characteristic_min_overrides
            .get(&rule.id)
            .copied()
            .unwrap_or(rule.min);
        let max = self
            .characteristic_max_overrides
            .get(&rule.id)
            .copied()
            .unwrap_or(rule.max);

        LevelBounds::new(min, max)
    }
}

/// Inclusive level range with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelBounds {
    pub min: i32,
    pub max: i32,
}

impl LevelBounds {
    pub const UNKNOWN: Self = Self { min: 0, max: 0 };

    /// Builds a range, raising `max` to `min` if overrides inverted it.
    pub const fn new(min: i32, max: i32) -> Self {
        let max = if max < min { min } else { max };
        Self { min, max }
    }

    pub fn clamp(&self, level: i32) -> i32 {
        level.clamp(self.min, self.max)
    }

    pub fn contains(&self, level: i32) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

/// Folds the modifiers of every known enhancement in `entries`.
///
/// Entries with an unknown id or without modifiers are skipped.
pub fn collect_ability_modifiers(
    catalog: &RuleCatalog,
    entries: &[EnhancementEntry],
) -> AbilityModifier {
    entries
        .iter()
        .filter_map(|entry| catalog.enhancement(&entry.id)?.modifiers.as_ref())
        .fold(AbilityModifier::new(), AbilityModifier::merge)
}

/// Category slot ceiling: base limit plus slot delta, floored at 0.
///
/// An unlimited base (`None`) stays unlimited.
pub fn category_limit(catalog: &RuleCatalog, modifiers: &AbilityModifier) -> Option<u32> {
    apply_slot_delta(catalog.limits().category_limit, modifiers.category_slots)
}

/// Characteristic slot ceiling: base limit plus slot delta, floored at 0.
///
/// An unlimited base (`None`) stays unlimited.
pub fn characteristic_limit(catalog: &RuleCatalog, modifiers: &AbilityModifier) -> Option<u32> {
    apply_slot_delta(
        catalog.limits().characteristic_limit,
        modifiers.characteristic_slots,
    )
}

fn apply_slot_delta(base: Option<u32>, delta: i32) -> Option<u32> {
    base.map(|base| {
        let limit = (i64::from(base) + i64::from(delta)).max(0);
        u32::try_from(limit).unwrap_or(u32::MAX)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CostRule, EnhancementRule, RuleLimits};
    use crate::testing::catalog_with;

    fn entries(ids: &[&str]) -> Vec<EnhancementEntry> {
        ids.iter().map(|id| EnhancementEntry::new(*id)).collect()
    }

    fn overrides(pairs: &[(&str, i32)]) -> BTreeMap<String, i32> {
        pairs.iter().map(|(id, v)| ((*id).to_owned(), *v)).collect()
    }

    fn catalog() -> RuleCatalog {
        catalog_with(|builder| {
            builder
                .limits(RuleLimits::new(Some(2), Some(3)))
                .enhancement(
                    EnhancementRule::new("versatil").with_modifiers(EnhancementModifiers {
                        characteristic_slots: 1,
                        ..Default::default()
                    }),
                )
                .enhancement(
                    EnhancementRule::new("amplo").with_modifiers(EnhancementModifiers {
                        category_slots: 2,
                        cost_modifier: 1.5,
                        characteristic_max_overrides: overrides(&[("alvos", 7)]),
                        ..Default::default()
                    }),
                )
                .enhancement(
                    EnhancementRule::new("estreito").with_modifiers(EnhancementModifiers {
                        category_slots: -5,
                        cost_modifier: -0.5,
                        characteristic_max_overrides: overrides(&[("alvos", 3)]),
                        characteristic_min_overrides: overrides(&[("alvos", 2)]),
                        ..Default::default()
                    }),
                )
                .enhancement(EnhancementRule::new("inerte").with_cost(CostRule::flat(2.0)))
        })
    }

    #[test]
    fn empty_selection_is_all_zero() {
        let catalog = catalog();
        let modifiers = collect_ability_modifiers(&catalog, &[]);

        assert_eq!(modifiers, AbilityModifier::default());
        assert_eq!(category_limit(&catalog, &modifiers), Some(2));
        assert_eq!(characteristic_limit(&catalog, &modifiers), Some(3));
    }

    #[test]
    fn characteristic_slot_raises_limit_by_one() {
        let catalog = catalog();
        let modifiers = collect_ability_modifiers(&catalog, &entries(&["versatil"]));

        assert_eq!(characteristic_limit(&catalog, &modifiers), Some(4));
        assert_eq!(category_limit(&catalog, &modifiers), Some(2));
    }

    #[test]
    fn additive_fields_sum_and_limits_floor_at_zero() {
        let catalog = catalog();
        let modifiers = collect_ability_modifiers(&catalog, &entries(&["amplo", "estreito"]));

        assert_eq!(modifiers.category_slots, -3);
        assert_eq!(modifiers.cost_modifier, 1.0);
        assert_eq!(category_limit(&catalog, &modifiers), Some(0));
    }

    #[test]
    fn later_override_wins_on_collision() {
        let catalog = catalog();

        let forward = collect_ability_modifiers(&catalog, &entries(&["amplo", "estreito"]));
        assert_eq!(forward.characteristic_max_overrides.get("alvos"), Some(&3));

        let reverse = collect_ability_modifiers(&catalog, &entries(&["estreito", "amplo"]));
        assert_eq!(reverse.characteristic_max_overrides.get("alvos"), Some(&7));
        // Non-colliding keys survive either order
        assert_eq!(reverse.characteristic_min_overrides.get("alvos"), Some(&2));
    }

    #[test]
    fn unknown_and_modifierless_entries_are_skipped() {
        let catalog = catalog();
        let modifiers = collect_ability_modifiers(&catalog, &entries(&["inerte", "sumido", ""]));
        assert_eq!(modifiers, AbilityModifier::default());
    }

    #[test]
    fn unlimited_base_ignores_slot_delta() {
        let catalog = catalog_with(|builder| builder.limits(RuleLimits::UNLIMITED));
        let modifiers = AbilityModifier::new().merge(&EnhancementModifiers {
            category_slots: 3,
            characteristic_slots: -3,
            ..Default::default()
        });

        assert_eq!(category_limit(&catalog, &modifiers), None);
        assert_eq!(characteristic_limit(&catalog, &modifiers), None);
    }

    #[test]
    fn bounds_apply_overrides_and_stay_ordered() {
        let rule = CharacteristicRule::new("alvos", 1, 5, CostRule::flat(1.0));

        let none = AbilityModifier::new();
        assert_eq!(none.characteristic_bounds(Some(&rule)), LevelBounds::new(1, 5));
        assert_eq!(none.characteristic_bounds(None), LevelBounds::UNKNOWN);

        let inverted = AbilityModifier::new().merge(&EnhancementModifiers {
            characteristic_min_overrides: overrides(&[("alvos", 6)]),
            ..Default::default()
        });
        let bounds = inverted.characteristic_bounds(Some(&rule));
        assert_eq!(bounds, LevelBounds { min: 6, max: 6 });
        assert_eq!(bounds.clamp(1), 6);
    }
}
