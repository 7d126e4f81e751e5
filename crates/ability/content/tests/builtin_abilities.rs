//! Pricing scenarios against the built-in rule tables.

use ability_content::builtin_catalog;
use ability_core::{
    AbilityContext, AbilityData, CategoryEntry, CharacteristicEntry, EnhancementEntry, Rank,
    Restrictions, RuleCatalog, calculate_ability_cost, calculate_raw,
    is_over_ranking_characteristic_level, sanitize_ability_data,
};
use serde_json::json;

fn catalog() -> RuleCatalog {
    builtin_catalog().expect("builtin tables must load")
}

fn no_rank() -> AbilityContext {
    AbilityContext::default()
}

#[test]
fn single_category_and_targets() {
    let ability = AbilityData {
        casting_time: "1-action".into(),
        categories: vec![CategoryEntry::new("criacao")],
        characteristics: vec![CharacteristicEntry::new("alvos", 3)],
        ..AbilityData::default()
    };

    let cost = calculate_ability_cost(&catalog(), ability, &no_rank());

    assert_eq!(cost.breakdown.categories, 1.0);
    assert_eq!(cost.breakdown.casting_time, 0.0);
    assert_eq!(cost.breakdown.characteristics, 15.0);
    assert_eq!(cost.total_cost, 16.0);
    // NaN category cost was re-derived from the rule
    assert_eq!(cost.ability.categories[0].cost, 1.0);
    assert_eq!(cost.limits.categories, Some(2));
    assert_eq!(cost.limits.characteristics, Some(4));
}

#[test]
fn every_component_contributes() {
    let ability = AbilityData {
        casting_time: "ritual".into(),
        casting_cost: "free".into(),
        categories: vec![
            CategoryEntry::new("criacao"),
            CategoryEntry::new("destruicao"),
        ],
        characteristics: vec![
            CharacteristicEntry::new("distancia", 13),
            CharacteristicEntry::new("duracao", 3),
        ],
        enhancements: vec![
            EnhancementEntry::new("alcance-extremo"),
            EnhancementEntry::new("eficiente"),
        ],
        restrictions: Restrictions {
            description: "apenas sob a lua".into(),
            advances: 2,
            advances_target: Some(0),
        },
    };

    let cost = calculate_ability_cost(&catalog(), ability, &no_rank());

    assert_eq!(cost.breakdown.categories, 3.0);
    // distancia priced at 15 (past the last step), duracao at 0 + 2 + 4
    assert_eq!(cost.breakdown.characteristics, 9.0 + 6.0);
    assert_eq!(cost.breakdown.enhancements, 6.0);
    assert_eq!(cost.breakdown.modifiers, -2.0);
    assert_eq!(cost.total_cost, 22.0);
    assert_eq!(cost.total_cost, cost.breakdown.total());
    // the casting cost option is recorded but never priced
    assert_eq!(cost.ability.casting_cost, "free");
}

#[test]
fn formula_rules_resolve_per_level() {
    let ability = AbilityData {
        characteristics: vec![
            CharacteristicEntry::new("destruicao", 3),
            CharacteristicEntry::new("area", 4),
        ],
        ..AbilityData::default()
    };

    let cost = calculate_ability_cost(&catalog(), ability, &no_rank());
    assert_eq!(cost.breakdown.characteristics, 4.5 + 12.0);
}

#[test]
fn slot_enhancements_raise_limits_by_one() {
    let catalog = catalog();
    let base = calculate_ability_cost(&catalog, AbilityData::default(), &no_rank());

    let ability = AbilityData {
        enhancements: vec![
            EnhancementEntry::new("versatil"),
            EnhancementEntry::new("multifacetado"),
        ],
        ..AbilityData::default()
    };
    let cost = calculate_ability_cost(&catalog, ability, &no_rank());

    assert_eq!(
        cost.limits.characteristics,
        base.limits.characteristics.map(|l| l + 1)
    );
    assert_eq!(cost.limits.categories, base.limits.categories.map(|l| l + 1));
    assert_eq!(cost.breakdown.enhancements, 9.0);
}

#[test]
fn distance_eleven_requires_rank_a() {
    let catalog = catalog();

    assert!(is_over_ranking_characteristic_level(
        &catalog,
        "distancia",
        11,
        Rank::parse("C")
    ));
    assert!(!is_over_ranking_characteristic_level(
        &catalog,
        "distancia",
        11,
        Rank::parse("S")
    ));
    assert!(!is_over_ranking_characteristic_level(
        &catalog,
        "distancia",
        11,
        Rank::parse("Z")
    ));
}

#[test]
fn over_ranked_levels_are_reported_not_repriced() {
    let catalog = catalog();
    let ability = AbilityData {
        characteristics: vec![
            CharacteristicEntry::new("distancia", 11),
            CharacteristicEntry::new("area", 5),
            CharacteristicEntry::new("alvos", 2),
        ],
        ..AbilityData::default()
    };

    let rank_c = AbilityContext::from_rank_str("c");
    let gated = calculate_ability_cost(&catalog, ability.clone(), &rank_c);
    let open = calculate_ability_cost(&catalog, ability, &no_rank());

    assert_eq!(gated.over_ranked, vec![0, 1]);
    assert!(open.over_ranked.is_empty());
    assert_eq!(gated.total_cost, open.total_cost);
    assert_eq!(gated.ability, open.ability);
}

#[test]
fn stale_references_are_cleared() {
    let cost = calculate_raw(
        &catalog(),
        &json!({
            "castingTime": "teleporte",
            "categories": [{ "category": "nonexistent", "cost": null }],
            "characteristics": [{ "id": "voo", "level": 4 }],
            "enhancements": ["sumido"]
        }),
        &no_rank(),
    );

    assert_eq!(cost.ability.casting_time, "1-action");
    assert_eq!(cost.ability.casting_cost, "default");
    assert_eq!(cost.ability.categories[0].category, "");
    assert_eq!(cost.ability.categories[0].cost, 0.0);
    assert_eq!(cost.ability.characteristics[0].id, "");
    assert_eq!(cost.ability.characteristics[0].level, 0);
    assert_eq!(cost.ability.enhancements[0].id, "");
    assert_eq!(cost.total_cost, 0.0);
}

#[test]
fn sanitized_abilities_are_stable() {
    let catalog = catalog();
    let raw = json!({
        "castingTime": "reaction",
        "categories": [{ "category": "controle", "cost": "-3" }, { "category": "protecao" }],
        "characteristics": [
            { "id": "alvos", "level": 1 },
            { "id": "distancia", "level": 40 },
            { "id": "destruicao", "level": "7", "damageType": "MENTAL" }
        ],
        "enhancements": [{ "id": "multidao" }, { "id": "alcance-extremo" }],
        "restrictions": { "advances": 9, "advancesTarget": 1 }
    });

    let once: AbilityData = serde_json::from_value(raw).unwrap();
    let once = sanitize_ability_data(&catalog, once);
    let twice = sanitize_ability_data(&catalog, once.clone());
    assert_eq!(once, twice);

    // min override from multidao, max override from alcance-extremo
    assert_eq!(once.characteristics[0].level, 3);
    assert_eq!(once.characteristics[1].level, 15);
    assert_eq!(once.restrictions.advances, 0);

    // persisting and reloading the sanitized form changes nothing
    let stored = serde_json::to_value(&once).unwrap();
    let reloaded: AbilityData = serde_json::from_value(stored).unwrap();
    assert_eq!(sanitize_ability_data(&catalog, reloaded), once);
}

#[test]
fn cost_serializes_with_camel_case_keys() {
    let cost = calculate_raw(
        &catalog(),
        &json!({ "categories": [{ "category": "criacao" }] }),
        &no_rank(),
    );
    let value = serde_json::to_value(&cost).unwrap();

    assert_eq!(value["totalCost"], json!(1.0));
    assert_eq!(value["breakdown"]["castingTime"], json!(0.0));
    assert_eq!(value["ability"]["castingTime"], json!("1-action"));
    assert_eq!(value["overRanked"], json!([]));
}
