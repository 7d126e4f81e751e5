//! Actor ranks and characteristic rank gates.
//!
//! Characteristics may require a minimum actor rank for some levels. The gate
//! is advisory: it never changes sanitization or cost, and unknown ranks fail
//! open.

use crate::catalog::RuleCatalog;

/// Actor power tier, ordered `D < C < B < A < S`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[strum(ascii_case_insensitive)]
pub enum Rank {
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// Position in the rank ordering (`D` = 0).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses a rank, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

/// Rule files may spell ranks in any case, like [`Rank::parse`].
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        const VARIANTS: &[&str] = &["D", "C", "B", "A", "S"];

        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Rank::parse(&raw).ok_or_else(|| serde::de::Error::unknown_variant(raw.trim(), VARIANTS))
    }
}

/// Minimum rank authored for `level` of characteristic `id`.
pub fn required_rank(catalog: &RuleCatalog, id: &str, level: i32) -> Option<Rank> {
    catalog
        .characteristics()
        .get(id)?
        .level(level)
        .and_then(|entry| entry.rank)
}

/// Returns true iff the actor rank and the required rank are both known and
/// the actor ranks strictly below the requirement.
pub fn is_over_ranking_characteristic_level(
    catalog: &RuleCatalog,
    id: &str,
    level: i32,
    actor_rank: Option<Rank>,
) -> bool {
    match (actor_rank, required_rank(catalog, id, level)) {
        (Some(actor), Some(required)) => actor.index() < required.index(),
        _ => false,
    }
}
