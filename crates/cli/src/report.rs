//! JSON reports printed by the CLI.

use ability_core::{
    AbilityContext, AbilityCost, AbilityData, Rank, RuleCatalog, calculate_raw, sanitize_raw,
};
use serde::Serialize;

/// Output of a full cost calculation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    #[serde(flatten)]
    pub cost: AbilityCost,
    pub catalog_fingerprint: String,
}

/// Output of `--sanitize-only`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeReport {
    pub ability: AbilityData,
    pub catalog_fingerprint: String,
}

/// Prices a raw ability document.
///
/// An unparsable `rank` disables rank gating instead of failing.
pub fn cost_report(
    catalog: &RuleCatalog,
    raw: &serde_json::Value,
    rank: Option<&str>,
) -> CostReport {
    let context = match rank {
        Some(rank) => {
            let parsed = Rank::parse(rank);
            if parsed.is_none() {
                tracing::warn!(rank, "ignoring unknown actor rank");
            }
            AbilityContext::new(parsed)
        }
        None => AbilityContext::default(),
    };

    let cost = calculate_raw(catalog, raw, &context);
    tracing::info!(
        total = cost.total_cost,
        over_ranked = cost.over_ranked.len(),
        "ability priced"
    );

    CostReport {
        cost,
        catalog_fingerprint: catalog.fingerprint().to_string(),
    }
}

/// Sanitizes a raw ability document without pricing it.
pub fn sanitize_report(catalog: &RuleCatalog, raw: &serde_json::Value) -> SanitizeReport {
    SanitizeReport {
        ability: sanitize_raw(catalog, raw),
        catalog_fingerprint: catalog.fingerprint().to_string(),
    }
}
