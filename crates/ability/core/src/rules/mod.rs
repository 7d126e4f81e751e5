//! Rule definitions authored by the campaign owner.
//!
//! These are the entries of a [`RuleCatalog`](crate::catalog::RuleCatalog):
//! casting options, categories, characteristics, and enhancements. Every rule
//! is plain data; the only behavior attached here is cost resolution in
//! [`cost`].

pub mod cost;

pub use cost::{resolve_characteristic_cost, resolve_cost};

use std::collections::BTreeMap;

use crate::rank::Rank;

/// Highest level a characteristic may reach, enhancement overrides included.
///
/// Catalogs authoring a higher `max` or override are rejected.
pub const MAX_LEVEL: i32 = 999;

// ============================================================================
// Cost Rules
// ============================================================================

/// Formula mapping a level to a point cost.
///
/// Levels are coerced to `max(1, level)` before any variant is evaluated.
///
/// ```
/// # use ability_core::CostRule;
/// let rule = CostRule::Table { values: vec![0.0, 6.0, 15.0, 27.0, 39.0] };
/// assert_eq!(rule.resolve(3), 15.0);
/// assert_eq!(rule.resolve(10), 39.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum CostRule {
    /// Constant cost regardless of level.
    Flat { value: f64 },

    /// `base + step * (level - 1)`
    Linear { base: f64, step: f64 },

    /// `base * factor ^ (level - 1)`
    Exponential { base: f64, factor: f64 },

    /// First step whose `upto >= level` wins, otherwise the last step.
    ///
    /// Steps are expected in ascending `upto` order.
    Step { steps: Vec<CostStep> },

    /// Lookup by `level - 1`, clamped to the bounds of `values`.
    Table { values: Vec<f64> },

    /// A rule whose `type` tag this build does not know. Always costs 0.
    #[cfg_attr(feature = "serde", serde(other))]
    Unrecognized,
}

impl CostRule {
    /// Creates a flat cost rule.
    pub const fn flat(value: f64) -> Self {
        CostRule::Flat { value }
    }

    /// Creates a table cost rule.
    pub fn table(values: impl Into<Vec<f64>>) -> Self {
        CostRule::Table {
            values: values.into(),
        }
    }

    /// Returns true for table/step rules authored without any entries.
    ///
    /// Such rules resolve to 0 but are rejected when a catalog is built.
    pub fn is_degenerate(&self) -> bool {
        match self {
            CostRule::Step { steps } => steps.is_empty(),
            CostRule::Table { values } => values.is_empty(),
            _ => false,
        }
    }
}

/// One threshold of a [`CostRule::Step`] rule.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostStep {
    pub upto: i32,
    pub value: f64,
}

impl CostStep {
    pub const fn new(upto: i32, value: f64) -> Self {
        Self { upto, value }
    }
}

// ============================================================================
// Rule Families
// ============================================================================

/// A casting time or casting cost option.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastingOption {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<CostRule>,
}

impl CastingOption {
    pub fn new(id: impl Into<String>, cost: Option<CostRule>) -> Self {
        Self {
            id: id.into(),
            label_key: String::new(),
            cost,
        }
    }
}

/// A reusable spell school. Categories are not leveled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tooltip_key: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag_key: Option<String>,
    pub cost: CostRule,
}

impl Category {
    pub fn new(id: impl Into<String>, cost: CostRule) -> Self {
        Self {
            id: id.into(),
            label_key: String::new(),
            tooltip_key: None,
            tag_key: None,
            cost,
        }
    }

    /// Cost of selecting this category (always resolved at level 1).
    pub fn base_cost(&self) -> f64 {
        self.cost.resolve(1)
    }
}

/// Per-level metadata of a characteristic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacteristicLevel {
    pub level: i32,
    /// Minimum actor rank required to pick this level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: Option<Rank>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_key: Option<String>,
}

impl CharacteristicLevel {
    pub const fn new(level: i32, rank: Option<Rank>) -> Self {
        Self {
            level,
            rank,
            label_key: None,
        }
    }
}

/// A leveled dial of an ability (targets, range, area, duration, ...).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacteristicRule {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_key: String,
    pub min: i32,
    pub max: i32,
    pub cost: CostRule,
    /// Charge for every level from `min` through the selected level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cumulative_cost: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub levels: Vec<CharacteristicLevel>,
}

impl CharacteristicRule {
    pub fn new(id: impl Into<String>, min: i32, max: i32, cost: CostRule) -> Self {
        Self {
            id: id.into(),
            label_key: String::new(),
            min,
            max,
            cost,
            cumulative_cost: false,
            levels: Vec::new(),
        }
    }

    pub fn cumulative(mut self) -> Self {
        self.cumulative_cost = true;
        self
    }

    pub fn with_levels(mut self, levels: impl IntoIterator<Item = CharacteristicLevel>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    /// Metadata authored for `level`, if any.
    pub fn level(&self, level: i32) -> Option<&CharacteristicLevel> {
        self.levels.iter().find(|entry| entry.level == level)
    }
}

/// Limit and range changes granted by an enhancement.
///
/// All fields default to zero/empty so data files only list what differs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnhancementModifiers {
    pub category_slots: i32,
    pub characteristic_slots: i32,
    pub cost_modifier: f64,
    pub characteristic_max_overrides: BTreeMap<String, i32>,
    pub characteristic_min_overrides: BTreeMap<String, i32>,
}

/// An add-on that costs points and/or changes limits and ranges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnhancementRule {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<CostRule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Option<EnhancementModifiers>,
}

impl EnhancementRule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label_key: String::new(),
            cost: None,
            modifiers: None,
        }
    }

    pub fn with_cost(mut self, cost: CostRule) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_modifiers(mut self, modifiers: EnhancementModifiers) -> Self {
        self.modifiers = Some(modifiers);
        self
    }
}

/// Base slot ceilings of an ability. `None` means unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RuleLimits {
    pub category_limit: Option<u32>,
    pub characteristic_limit: Option<u32>,
}

impl RuleLimits {
    pub const UNLIMITED: Self = Self {
        category_limit: None,
        characteristic_limit: None,
    };

    pub const fn new(category_limit: Option<u32>, characteristic_limit: Option<u32>) -> Self {
        Self {
            category_limit,
            characteristic_limit,
        }
    }
}
