//! Tolerant coercion of raw JSON into [`AbilityData`].
//!
//! This stage only fixes the *shape*: every missing or mistyped field gets a
//! typed default, and nothing is checked against the rule catalog. It never
//! fails, because stored documents may be stale or hand-edited.
//!
//! | Field | Accepted | Default |
//! |-------|----------|---------|
//! | strings | strings, numbers, booleans | `""` |
//! | category `cost` | numbers, numeric strings | NaN |
//! | characteristic `level` | finite numbers/numeric strings (floored) | `1` |
//! | `damageType` / `areaType` | known names, any case | `physical` / `emanacao` |
//! | enhancements | `{ "id": .. }` objects or bare id strings | - |
//! | `advances` | numbers (floored, clamped to `0..=99`) | `0` |
//! | `advancesTarget` | non-negative integers | `null` |

use serde_json::{Map, Value};

use super::{
    AbilityData, AreaType, CategoryEntry, CharacteristicEntry, DamageType, EnhancementEntry,
    MAX_ADVANCES, Restrictions,
};

/// Coerces any JSON value into an [`AbilityData`].
pub fn normalize_ability_data(raw: &Value) -> AbilityData {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    AbilityData {
        casting_time: string_field(object, "castingTime"),
        casting_cost: string_field(object, "castingCost"),
        categories: array_field(object, "categories")
            .map(normalize_category)
            .collect(),
        characteristics: array_field(object, "characteristics")
            .map(normalize_characteristic)
            .collect(),
        enhancements: array_field(object, "enhancements")
            .map(normalize_enhancement)
            .collect(),
        restrictions: normalize_restrictions(object.get("restrictions")),
    }
}

fn normalize_category(raw: &Value) -> CategoryEntry {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    CategoryEntry {
        id: string_field(object, "id"),
        uuid: string_field(object, "uuid"),
        name: string_field(object, "name"),
        img: string_field(object, "img"),
        category: string_field(object, "category"),
        cost: number_value(object.get("cost")).unwrap_or(f64::NAN),
        description: string_field(object, "description"),
    }
}

fn normalize_characteristic(raw: &Value) -> CharacteristicEntry {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    let level = number_value(object.get("level"))
        .filter(|level| level.is_finite())
        .map_or(1, floor_to_i32);

    CharacteristicEntry {
        id: string_field(object, "id"),
        level,
        damage_type: string_field(object, "damageType")
            .trim()
            .parse::<DamageType>()
            .unwrap_or_default(),
        area_type: string_field(object, "areaType")
            .trim()
            .parse::<AreaType>()
            .unwrap_or_default(),
    }
}

fn normalize_enhancement(raw: &Value) -> EnhancementEntry {
    match raw {
        Value::Object(object) => EnhancementEntry::new(string_field(object, "id")),
        other => EnhancementEntry::new(coerce_string(other)),
    }
}

fn normalize_restrictions(raw: Option<&Value>) -> Restrictions {
    let empty = Map::new();
    let object = raw.and_then(Value::as_object).unwrap_or(&empty);

    let advances = number_value(object.get("advances"))
        .filter(|advances| advances.is_finite())
        .map_or(0, |advances| {
            advances.floor().clamp(0.0, f64::from(MAX_ADVANCES)) as u8
        });

    let advances_target = number_value(object.get("advancesTarget"))
        .filter(|index| index.is_finite() && *index >= 0.0 && index.fract() == 0.0)
        .map(|index| index as usize);

    Restrictions {
        description: string_field(object, "description"),
        advances,
        advances_target,
    }
}

// ============================================================================
// Field helpers
// ============================================================================

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object.get(key).map(coerce_string).unwrap_or_default()
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

fn array_field<'a>(object: &'a Map<String, Value>, key: &str) -> std::slice::Iter<'a, Value> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .unwrap_or_default()
        .iter()
}

/// Numbers and numeric strings; anything else is `None`.
fn number_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn floor_to_i32(value: f64) -> i32 {
    value.floor().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

// ============================================================================
// Deserialize
// ============================================================================

/// Deserializing an ability goes through the normalizer, so it accepts any
/// JSON document and never fails on content.
impl<'de> serde::Deserialize<'de> for AbilityData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Ok(normalize_ability_data(&raw))
    }
}
