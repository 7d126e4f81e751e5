//! Rule catalog.
//!
//! The catalog is the immutable set of rule tables an ability is validated
//! and priced against. It is built once (usually by `ability-content` from
//! data files) and then passed by reference into every engine call, so tests
//! and campaigns can swap rule sets freely.
//!
//! Entries keep their authored order: the first casting time and casting
//! cost act as fallbacks for unknown ids, and option lists are presented in
//! the same order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::CatalogError;
use crate::rules::{
    CastingOption, Category, CharacteristicRule, CostRule, EnhancementRule, MAX_LEVEL,
    RuleLimits,
};

/// The five rule families held by a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RuleFamily {
    CastingTime,
    CastingCost,
    Category,
    Characteristic,
    Enhancement,
}

/// Common accessors for rules stored in a [`RuleTable`].
pub trait RuleEntry {
    fn id(&self) -> &str;

    /// Localization key of the rule's display label (may be empty).
    fn label_key(&self) -> &str;

    /// The cost rule that must be non-degenerate, if the rule has one.
    fn cost_rule(&self) -> Option<&CostRule>;
}

impl RuleEntry for CastingOption {
    fn id(&self) -> &str {
        &self.id
    }

    fn label_key(&self) -> &str {
        &self.label_key
    }

    fn cost_rule(&self) -> Option<&CostRule> {
        self.cost.as_ref()
    }
}

impl RuleEntry for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn label_key(&self) -> &str {
        &self.label_key
    }

    fn cost_rule(&self) -> Option<&CostRule> {
        Some(&self.cost)
    }
}

impl RuleEntry for CharacteristicRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn label_key(&self) -> &str {
        &self.label_key
    }

    fn cost_rule(&self) -> Option<&CostRule> {
        Some(&self.cost)
    }
}

impl RuleEntry for EnhancementRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn label_key(&self) -> &str {
        &self.label_key
    }

    fn cost_rule(&self) -> Option<&CostRule> {
        self.cost.as_ref()
    }
}

// ============================================================================
// Rule Table
// ============================================================================

/// Ordered rules of one family with an id index.
#[derive(Clone, Debug)]
pub struct RuleTable<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: RuleEntry> RuleTable<T> {
    fn new(family: RuleFamily, entries: Vec<T>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            let id = entry.id();
            if id.is_empty() {
                return Err(CatalogError::EmptyId { family, position });
            }
            if entry.cost_rule().is_some_and(CostRule::is_degenerate) {
                return Err(CatalogError::EmptyCostRule {
                    family,
                    id: id.to_owned(),
                });
            }
            match index.entry(id.to_owned()) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateId {
                        family,
                        id: id.to_owned(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }

        Ok(Self { entries, index })
    }

    /// Looks up a rule by id. The empty id never matches.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// First rule in authored order.
    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T: RuleEntry> IntoIterator for &'a RuleTable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Unvalidated rule tables, as authored in data files.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RuleCatalogSpec {
    pub limits: RuleLimits,
    pub casting_times: Vec<CastingOption>,
    pub casting_costs: Vec<CastingOption>,
    pub categories: Vec<Category>,
    pub characteristics: Vec<CharacteristicRule>,
    pub enhancements: Vec<EnhancementRule>,
}

/// Validated, immutable rule tables.
#[derive(Clone, Debug)]
pub struct RuleCatalog {
    limits: RuleLimits,
    casting_times: RuleTable<CastingOption>,
    casting_costs: RuleTable<CastingOption>,
    categories: RuleTable<Category>,
    characteristics: RuleTable<CharacteristicRule>,
    enhancements: RuleTable<EnhancementRule>,
}

impl RuleCatalog {
    pub fn builder() -> RuleCatalogBuilder {
        RuleCatalogBuilder::default()
    }

    /// Validates authored tables and builds the lookup indices.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyTable`] if there is no casting time or casting cost
    /// - [`CatalogError::EmptyId`] / [`CatalogError::DuplicateId`] for bad ids
    /// - [`CatalogError::InvertedRange`] for a characteristic with `min > max`
    /// - [`CatalogError::LevelOutOfRange`] for a max or override above
    ///   [`MAX_LEVEL`]
    /// - [`CatalogError::EmptyCostRule`] for a table/step rule without entries
    pub fn from_spec(spec: RuleCatalogSpec) -> Result<Self, CatalogError> {
        if spec.casting_times.is_empty() {
            return Err(CatalogError::EmptyTable(RuleFamily::CastingTime));
        }
        if spec.casting_costs.is_empty() {
            return Err(CatalogError::EmptyTable(RuleFamily::CastingCost));
        }
        if let Some(rule) = spec.characteristics.iter().find(|rule| rule.min > rule.max) {
            return Err(CatalogError::InvertedRange {
                id: rule.id.clone(),
                min: rule.min,
                max: rule.max,
            });
        }
        if let Some(rule) = spec.characteristics.iter().find(|rule| rule.max > MAX_LEVEL) {
            return Err(CatalogError::LevelOutOfRange {
                family: RuleFamily::Characteristic,
                id: rule.id.clone(),
                level: rule.max,
            });
        }
        for rule in &spec.enhancements {
            let Some(modifiers) = &rule.modifiers else {
                continue;
            };
            let overrides = modifiers
                .characteristic_max_overrides
                .values()
                .chain(modifiers.characteristic_min_overrides.values());
            if let Some(&level) = overrides.filter(|&&level| level > MAX_LEVEL).max() {
                return Err(CatalogError::LevelOutOfRange {
                    family: RuleFamily::Enhancement,
                    id: rule.id.clone(),
                    level,
                });
            }
        }

        let catalog = Self {
            limits: spec.limits,
            casting_times: RuleTable::new(RuleFamily::CastingTime, spec.casting_times)?,
            casting_costs: RuleTable::new(RuleFamily::CastingCost, spec.casting_costs)?,
            categories: RuleTable::new(RuleFamily::Category, spec.categories)?,
            characteristics: RuleTable::new(RuleFamily::Characteristic, spec.characteristics)?,
            enhancements: RuleTable::new(RuleFamily::Enhancement, spec.enhancements)?,
        };

        tracing::debug!(
            casting_times = catalog.casting_times.len(),
            casting_costs = catalog.casting_costs.len(),
            categories = catalog.categories.len(),
            characteristics = catalog.characteristics.len(),
            enhancements = catalog.enhancements.len(),
            "rule catalog built"
        );

        Ok(catalog)
    }

    /// Copies the tables back into their authored form.
    pub fn to_spec(&self) -> RuleCatalogSpec {
        RuleCatalogSpec {
            limits: self.limits,
            casting_times: self.casting_times.as_slice().to_vec(),
            casting_costs: self.casting_costs.as_slice().to_vec(),
            categories: self.categories.as_slice().to_vec(),
            characteristics: self.characteristics.as_slice().to_vec(),
            enhancements: self.enhancements.as_slice().to_vec(),
        }
    }

    pub fn limits(&self) -> RuleLimits {
        self.limits
    }

    pub fn casting_times(&self) -> &RuleTable<CastingOption> {
        &self.casting_times
    }

    pub fn casting_costs(&self) -> &RuleTable<CastingOption> {
        &self.casting_costs
    }

    pub fn categories(&self) -> &RuleTable<Category> {
        &self.categories
    }

    pub fn characteristics(&self) -> &RuleTable<CharacteristicRule> {
        &self.characteristics
    }

    pub fn enhancements(&self) -> &RuleTable<EnhancementRule> {
        &self.enhancements
    }

    pub fn casting_time(&self, id: &str) -> Option<&CastingOption> {
        self.casting_times.get(id)
    }

    pub fn casting_cost(&self, id: &str) -> Option<&CastingOption> {
        self.casting_costs.get(id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn characteristic(&self, id: &str) -> Option<&CharacteristicRule> {
        self.characteristics.get(id)
    }

    pub fn enhancement(&self, id: &str) -> Option<&EnhancementRule> {
        self.enhancements.get(id)
    }

    /// Id every unknown casting time falls back to.
    pub fn default_casting_time(&self) -> &str {
        self.casting_times.first().map_or("", |option| option.id.as_str())
    }

    /// Id every unknown casting cost falls back to.
    pub fn default_casting_cost(&self) -> &str {
        self.casting_costs.first().map_or("", |option| option.id.as_str())
    }

    /// Digest of the catalog content.
    ///
    /// Abilities sanitized against one fingerprint must be re-sanitized when
    /// the fingerprint changes.
    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> CatalogFingerprint {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        // serde_json output is deterministic: tables are ordered vectors and
        // override maps are BTreeMaps
        if let Ok(bytes) = serde_json::to_vec(&self.to_spec()) {
            hasher.update(&bytes);
        }

        CatalogFingerprint(hasher.finalize().into())
    }
}

/// SHA-256 digest of a catalog's tables.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CatalogFingerprint([u8; 32]);

#[cfg(feature = "serde")]
impl CatalogFingerprint {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl core::fmt::Display for CatalogFingerprint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Fluent construction of a [`RuleCatalog`], mostly for tests and tools.
#[derive(Clone, Debug, Default)]
pub struct RuleCatalogBuilder {
    spec: RuleCatalogSpec,
}

impl RuleCatalogBuilder {
    pub fn limits(mut self, limits: RuleLimits) -> Self {
        self.spec.limits = limits;
        self
    }

    pub fn casting_time(mut self, option: CastingOption) -> Self {
        self.spec.casting_times.push(option);
        self
    }

    pub fn casting_cost(mut self, option: CastingOption) -> Self {
        self.spec.casting_costs.push(option);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.spec.categories.push(category);
        self
    }

    pub fn characteristic(mut self, rule: CharacteristicRule) -> Self {
        self.spec.characteristics.push(rule);
        self
    }

    pub fn enhancement(mut self, rule: EnhancementRule) -> Self {
        self.spec.enhancements.push(rule);
        self
    }

    pub fn build(self) -> Result<RuleCatalog, CatalogError> {
        RuleCatalog::from_spec(self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> RuleCatalogBuilder {
        RuleCatalog::builder()
            .casting_time(CastingOption::new("1-action", Some(CostRule::flat(0.0))))
            .casting_time(CastingOption::new("2-actions", Some(CostRule::flat(0.0))))
            .casting_cost(CastingOption::new("default", None))
    }

    #[test]
    fn lookups_and_fallbacks() {
        let catalog = minimal()
            .category(Category::new("criacao", CostRule::flat(1.0)))
            .build()
            .expect("valid catalog");

        assert!(catalog.category("criacao").is_some());
        assert!(catalog.category("nonexistent").is_none());
        assert!(catalog.category("").is_none());
        assert_eq!(catalog.default_casting_time(), "1-action");
        assert_eq!(catalog.default_casting_cost(), "default");
        assert_eq!(catalog.casting_times().len(), 2);
    }

    #[test]
    fn rejects_missing_fallback_tables() {
        let err = RuleCatalog::builder()
            .casting_cost(CastingOption::new("default", None))
            .build()
            .unwrap_err();
        assert_eq!(err, CatalogError::EmptyTable(RuleFamily::CastingTime));
        assert_eq!(err.error_code(), "CATALOG_EMPTY_TABLE");
    }

    #[test]
    fn rejects_duplicate_and_empty_ids() {
        let err = minimal()
            .category(Category::new("criacao", CostRule::flat(1.0)))
            .category(Category::new("criacao", CostRule::flat(2.0)))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                family: RuleFamily::Category,
                id: "criacao".into()
            }
        );
        assert_eq!(err.to_string(), "duplicate category id 'criacao'");

        let err = minimal()
            .enhancement(EnhancementRule::new(""))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::EmptyId {
                family: RuleFamily::Enhancement,
                position: 0
            }
        );
    }

    #[test]
    fn rejects_inverted_ranges_and_empty_cost_rules() {
        let err = minimal()
            .characteristic(CharacteristicRule::new("alvos", 5, 1, CostRule::flat(1.0)))
            .build()
            .unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_INVERTED_RANGE");

        let err = minimal()
            .characteristic(CharacteristicRule::new(
                "alvos",
                1,
                5,
                CostRule::table(Vec::<f64>::new()),
            ))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::EmptyCostRule {
                family: RuleFamily::Characteristic,
                id: "alvos".into()
            }
        );
    }

    #[test]
    fn rejects_levels_above_ceiling() {
        let err = minimal()
            .characteristic(CharacteristicRule::new(
                "duracao",
                1,
                MAX_LEVEL + 1,
                CostRule::flat(1.0),
            ))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::LevelOutOfRange {
                family: RuleFamily::Characteristic,
                id: "duracao".into(),
                level: MAX_LEVEL + 1
            }
        );
        assert_eq!(err.error_code(), "CATALOG_LEVEL_OUT_OF_RANGE");

        let mut modifiers = crate::rules::EnhancementModifiers::default();
        modifiers
            .characteristic_max_overrides
            .insert("duracao".into(), 1000);
        let err = minimal()
            .characteristic(CharacteristicRule::new("duracao", 1, 5, CostRule::flat(1.0)))
            .enhancement(EnhancementRule::new("eterno").with_modifiers(modifiers))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "enhancement 'eterno' sets level 1000 above the maximum of 999"
        );

        let mut modifiers = crate::rules::EnhancementModifiers::default();
        modifiers
            .characteristic_max_overrides
            .insert("duracao".into(), MAX_LEVEL);
        assert!(
            minimal()
                .characteristic(CharacteristicRule::new("duracao", 1, 5, CostRule::flat(1.0)))
                .enhancement(EnhancementRule::new("eterno").with_modifiers(modifiers))
                .build()
                .is_ok()
        );
    }

    #[test]
    fn spec_round_trips_through_catalog() {
        let catalog = minimal()
            .category(Category::new("criacao", CostRule::flat(1.0)))
            .build()
            .expect("valid catalog");

        let rebuilt = RuleCatalog::from_spec(catalog.to_spec()).expect("valid catalog");
        assert_eq!(rebuilt.to_spec(), catalog.to_spec());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn fingerprint_tracks_content() {
        let base = minimal().build().expect("valid catalog");
        let same = minimal().build().expect("valid catalog");
        let edited = minimal()
            .category(Category::new("criacao", CostRule::flat(1.0)))
            .build()
            .expect("valid catalog");

        assert_eq!(base.fingerprint(), same.fingerprint());
        assert_ne!(base.fingerprint(), edited.fingerprint());
        assert_eq!(base.fingerprint().to_string().len(), 64);
    }
}
