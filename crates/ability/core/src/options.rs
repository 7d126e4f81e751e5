//! Localized option lists for ability editors.
//!
//! Thin wrappers over the [`RuleCatalog`]: they only look up rules and
//! localize label keys. Rules without a label key are shown by id.

use strum::IntoEnumIterator;

use crate::ability::{AREA_CHARACTERISTIC, AreaType, DAMAGE_CHARACTERISTIC, DamageType};
use crate::catalog::{RuleCatalog, RuleEntry, RuleTable};
use crate::rank::Rank;

/// Key prefix of damage type labels (`<prefix>.<type>`).
pub const DAMAGE_TYPE_KEY_PREFIX: &str = "ABILITY.DamageType";

/// Key prefix of area type labels (`<prefix>.<type>`).
pub const AREA_TYPE_KEY_PREFIX: &str = "ABILITY.AreaType";

/// Translates localization keys into display strings.
pub trait Localize {
    fn localize(&self, key: &str) -> String;
}

impl<F> Localize for F
where
    F: Fn(&str) -> String,
{
    fn localize(&self, key: &str) -> String {
        self(key)
    }
}

/// One `<option>` of a select input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A characteristic with its selectable levels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct CharacteristicOption {
    pub value: String,
    pub label: String,
    pub min: i32,
    pub max: i32,
    pub levels: Vec<LevelOption>,
    /// Entries of this characteristic show the damage type select.
    pub uses_damage_type: bool,
    /// Entries of this characteristic show the area type select.
    pub uses_area_type: bool,
}

/// One level of a characteristic; `rank` is the minimum actor rank.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelOption {
    pub level: i32,
    pub label: String,
    pub rank: Option<Rank>,
}

/// Every option list an ability editor needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct AbilityOptions {
    pub casting_times: Vec<SelectOption>,
    pub casting_costs: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub characteristics: Vec<CharacteristicOption>,
    pub enhancements: Vec<SelectOption>,
    pub damage_types: Vec<SelectOption>,
    pub area_types: Vec<SelectOption>,
}

/// Builds localized option lists in catalog order.
pub fn build_ability_options(catalog: &RuleCatalog, l10n: &impl Localize) -> AbilityOptions {
    AbilityOptions {
        casting_times: select_options(catalog.casting_times(), l10n),
        casting_costs: select_options(catalog.casting_costs(), l10n),
        categories: select_options(catalog.categories(), l10n),
        characteristics: catalog
            .characteristics()
            .iter()
            .map(|rule| CharacteristicOption {
                value: rule.id.clone(),
                label: label_of(rule, l10n),
                min: rule.min,
                max: rule.max,
                levels: (rule.min..=rule.max)
                    .map(|level| {
                        let meta = rule.level(level);
                        LevelOption {
                            level,
                            label: meta
                                .and_then(|meta| meta.label_key.as_deref())
                                .map_or_else(|| level.to_string(), |key| l10n.localize(key)),
                            rank: meta.and_then(|meta| meta.rank),
                        }
                    })
                    .collect(),
                uses_damage_type: rule.id == DAMAGE_CHARACTERISTIC,
                uses_area_type: rule.id == AREA_CHARACTERISTIC,
            })
            .collect(),
        enhancements: select_options(catalog.enhancements(), l10n),
        damage_types: DamageType::iter()
            .map(|kind| enum_option(kind.as_ref(), DAMAGE_TYPE_KEY_PREFIX, l10n))
            .collect(),
        area_types: AreaType::iter()
            .map(|kind| enum_option(kind.as_ref(), AREA_TYPE_KEY_PREFIX, l10n))
            .collect(),
    }
}

/// Localized label of a category, or `None` for unknown ids.
pub fn category_label(catalog: &RuleCatalog, id: &str, l10n: &impl Localize) -> Option<String> {
    catalog.category(id).map(|rule| label_of(rule, l10n))
}

/// Localized label of a characteristic, or `None` for unknown ids.
pub fn characteristic_label(
    catalog: &RuleCatalog,
    id: &str,
    l10n: &impl Localize,
) -> Option<String> {
    catalog.characteristic(id).map(|rule| label_of(rule, l10n))
}

/// Localized label of an enhancement, or `None` for unknown ids.
pub fn enhancement_label(catalog: &RuleCatalog, id: &str, l10n: &impl Localize) -> Option<String> {
    catalog.enhancement(id).map(|rule| label_of(rule, l10n))
}

fn select_options<T: RuleEntry>(table: &RuleTable<T>, l10n: &impl Localize) -> Vec<SelectOption> {
    table
        .iter()
        .map(|rule| SelectOption {
            value: rule.id().to_owned(),
            label: label_of(rule, l10n),
        })
        .collect()
}

fn label_of(rule: &impl RuleEntry, l10n: &impl Localize) -> String {
    match rule.label_key() {
        "" => rule.id().to_owned(),
        key => l10n.localize(key),
    }
}

fn enum_option(value: &str, prefix: &str, l10n: &impl Localize) -> SelectOption {
    SelectOption {
        value: value.to_owned(),
        label: l10n.localize(&format!("{prefix}.{value}")),
    }
}
