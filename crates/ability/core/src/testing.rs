//! Catalog fixtures shared by unit tests.

use crate::catalog::{RuleCatalog, RuleCatalogBuilder};
use crate::rules::{CastingOption, CostRule};

/// Builds a catalog on top of a `1-action` casting time (flat 0) and a
/// `default` casting cost, so fallbacks are always available.
pub(crate) fn catalog_with(
    configure: impl FnOnce(RuleCatalogBuilder) -> RuleCatalogBuilder,
) -> RuleCatalog {
    let base = RuleCatalog::builder()
        .casting_time(CastingOption::new("1-action", Some(CostRule::flat(0.0))))
        .casting_cost(CastingOption::new("default", None));

    configure(base).build().expect("test catalog must be valid")
}
