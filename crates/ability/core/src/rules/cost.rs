//! Cost resolution.
//!
//! Evaluates [`CostRule`] formulas at a level, and the cumulative variant used
//! by characteristics that charge for every level up to the selected one.

use super::{CharacteristicRule, CostRule, MAX_LEVEL};

impl CostRule {
    /// Evaluate this rule at `level` (coerced to at least 1).
    pub fn resolve(&self, level: i32) -> f64 {
        let level = level.max(1);

        match self {
            CostRule::Flat { value } => *value,

            CostRule::Linear { base, step } => base + step * f64::from(level - 1),

            CostRule::Exponential { base, factor } => base * factor.powi(level - 1),

            CostRule::Step { steps } => steps
                .iter()
                .find(|step| step.upto >= level)
                .or_else(|| steps.last())
                .map_or(0.0, |step| step.value),

            CostRule::Table { values } => {
                let index = usize::try_from(level - 1)
                    .unwrap_or(0)
                    .min(values.len().saturating_sub(1));
                values.get(index).copied().unwrap_or(0.0)
            }

            CostRule::Unrecognized => 0.0,
        }
    }
}

/// Resolve an optional rule at `level`. Missing rules cost 0.
pub fn resolve_cost(rule: Option<&CostRule>, level: i32) -> f64 {
    rule.map_or(0.0, |rule| rule.resolve(level))
}

/// Cost of a characteristic at `level`.
///
/// Cumulative characteristics sum the rule at every level from
/// `max(1, rule.min)` through `level`; a level below that start costs 0.
/// The sum stops at [`MAX_LEVEL`].
pub fn resolve_characteristic_cost(rule: Option<&CharacteristicRule>, level: i32) -> f64 {
    let Some(rule) = rule else {
        return 0.0;
    };

    if !rule.cumulative_cost {
        return rule.cost.resolve(level);
    }

    (rule.min.max(1)..=level.min(MAX_LEVEL))
        .map(|step_level| rule.cost.resolve(step_level))
        .sum()
}
