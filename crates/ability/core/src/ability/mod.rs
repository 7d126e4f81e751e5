//! Ability data as edited by players and persisted by the host.
//!
//! [`AbilityData`] is always rebuilt from raw input: [`normalize`] coerces any
//! JSON value into this shape, and [`sanitize`] re-validates it against a
//! [`RuleCatalog`](crate::RuleCatalog). Nothing here holds state between
//! calls.

#[cfg(feature = "serde")]
pub mod normalize;
pub mod sanitize;

#[cfg(feature = "serde")]
pub use normalize::normalize_ability_data;
#[cfg(feature = "serde")]
pub use sanitize::sanitize_raw;
pub use sanitize::sanitize_ability_data;

/// Upper bound of [`Restrictions::advances`].
pub const MAX_ADVANCES: u8 = 99;

/// Characteristic id whose entries carry a meaningful [`DamageType`].
pub const DAMAGE_CHARACTERISTIC: &str = "destruicao";

/// Characteristic id whose entries carry a meaningful [`AreaType`].
pub const AREA_CHARACTERISTIC: &str = "area";

/// Canonical ability shape.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct AbilityData {
    pub casting_time: String,
    pub casting_cost: String,
    pub categories: Vec<CategoryEntry>,
    pub characteristics: Vec<CharacteristicEntry>,
    pub enhancements: Vec<EnhancementEntry>,
    pub restrictions: Restrictions,
}

/// A category selected on an ability.
///
/// `id`, `uuid`, `name`, `img` and `description` are carried for the host
/// document and never interpreted here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CategoryEntry {
    pub id: String,
    pub uuid: String,
    pub name: String,
    pub img: String,
    /// Category rule id (blank when unknown).
    pub category: String,
    /// Stored point cost; NaN until sanitized.
    pub cost: f64,
    pub description: String,
}

impl Default for CategoryEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            uuid: String::new(),
            name: String::new(),
            img: String::new(),
            category: String::new(),
            cost: f64::NAN,
            description: String::new(),
        }
    }
}

impl CategoryEntry {
    /// Entry referencing a category rule, with an unset cost.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

/// A characteristic selected on an ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct CharacteristicEntry {
    /// Characteristic rule id (blank when unknown).
    pub id: String,
    pub level: i32,
    /// Only meaningful for [`DAMAGE_CHARACTERISTIC`].
    pub damage_type: DamageType,
    /// Only meaningful for [`AREA_CHARACTERISTIC`].
    pub area_type: AreaType,
}

impl Default for CharacteristicEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            level: 1,
            damage_type: DamageType::default(),
            area_type: AreaType::default(),
        }
    }
}

impl CharacteristicEntry {
    pub fn new(id: impl Into<String>, level: i32) -> Self {
        Self {
            id: id.into(),
            level,
            ..Self::default()
        }
    }
}

/// An enhancement selected on an ability.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnhancementEntry {
    /// Enhancement rule id (blank when unknown).
    pub id: String,
}

impl EnhancementEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Restrictions grant extra levels to one characteristic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Restrictions {
    pub description: String,
    /// Extra levels, `0..=MAX_ADVANCES`.
    pub advances: u8,
    /// Index into [`AbilityData::characteristics`].
    pub advances_target: Option<usize>,
}

/// Damage flavor of a `destruicao` characteristic.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DamageType {
    #[default]
    Physical,
    Elemental,
    Mental,
    Deteriorating,
}

/// Shape of an `area` characteristic.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AreaType {
    #[default]
    Emanacao,
    Feixe,
    Explosao,
    Line,
}
