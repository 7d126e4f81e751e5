//! Loading campaign rule directories.

use std::fs;
use std::path::Path;

use ability_content::{
    CATEGORIES_FILE, CHARACTERISTICS_FILE, ContentFactory, LIMITS_FILE, RulesLoader,
    builtin_catalog,
};
use ability_core::{Rank, is_over_ranking_characteristic_level, required_rank};

fn write(dir: &Path, file: &str, content: &str) {
    fs::write(dir.join(file), content).unwrap();
}

#[test]
fn empty_directory_matches_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();

    let loaded = RulesLoader::load_dir(dir.path()).unwrap();
    let builtin = builtin_catalog().unwrap();

    assert_eq!(loaded.to_spec(), builtin.to_spec());
    assert_eq!(loaded.fingerprint(), builtin.fingerprint());
}

#[test]
fn present_files_replace_their_family_only() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        CATEGORIES_FILE,
        r#"
        [[categories]]
        id = "sonho"
        label_key = "CAMPAIGN.Sonho"
        cost = { type = "linear", base = 2, step = 1 }
        "#,
    );
    write(dir.path(), LIMITS_FILE, "characteristic_limit = 6\n");

    let catalog = RulesLoader::load_dir(dir.path()).unwrap();

    assert_eq!(catalog.categories().len(), 1);
    assert_eq!(catalog.category("sonho").map(|c| c.base_cost()), Some(2.0));
    assert!(catalog.category("criacao").is_none());
    // limits.toml replaces the whole limits table
    assert_eq!(catalog.limits().category_limit, None);
    assert_eq!(catalog.limits().characteristic_limit, Some(6));
    assert!(catalog.characteristic("alvos").is_some());
    assert_ne!(
        catalog.fingerprint(),
        builtin_catalog().unwrap().fingerprint()
    );
}

#[test]
fn invalid_tables_report_the_error_code() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        CHARACTERISTICS_FILE,
        r#"
        [[characteristics]]
        id = "alvos"
        min = 1
        max = 5
        cost = { type = "flat", value = 1 }

        [[characteristics]]
        id = "alvos"
        min = 1
        max = 3
        cost = { type = "flat", value = 2 }
        "#,
    );

    let err = RulesLoader::load_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("CATALOG_DUPLICATE_ID"), "{err}");
}

#[test]
fn level_ranks_are_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        CHARACTERISTICS_FILE,
        r#"
        [[characteristics]]
        id = "distancia"
        min = 1
        max = 12
        cost = { type = "flat", value = 2 }
        levels = [{ level = 9, rank = "b" }, { level = 11, rank = "a" }]
        "#,
    );

    let catalog = RulesLoader::load_dir(dir.path()).unwrap();

    assert_eq!(required_rank(&catalog, "distancia", 9), Some(Rank::B));
    assert!(is_over_ranking_characteristic_level(
        &catalog,
        "distancia",
        11,
        Rank::parse("C")
    ));
}

#[test]
fn malformed_files_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), CATEGORIES_FILE, "[[categories]]\nid = 3\n");

    let err = RulesLoader::load_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains(CATEGORIES_FILE), "{err}");
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("campaign");

    assert!(RulesLoader::load_dir(&missing).is_err());
}

#[test]
fn factory_loads_single_families() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), LIMITS_FILE, "category_limit = 1\n");

    let factory = ContentFactory::new(dir.path());
    let limits = factory.load_limits().unwrap();

    assert_eq!(limits.category_limit, Some(1));
    assert!(factory.load_enhancements().is_err());
    assert_eq!(factory.load_catalog().unwrap().limits(), limits);
}
