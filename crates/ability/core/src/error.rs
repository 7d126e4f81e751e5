//! Errors raised while building a rule catalog.
//!
//! Ability data never produces errors: malformed or stale input is normalized
//! to safe defaults. The only failure surface of this crate is catalog
//! construction, where authored tables are validated once at load time.

use crate::catalog::RuleFamily;
use crate::rules::MAX_LEVEL;

/// Invalid rule table content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A rule was authored without an id.
    #[error("{family} entry #{position} has an empty id")]
    EmptyId { family: RuleFamily, position: usize },

    /// Two rules of the same family share an id.
    #[error("duplicate {family} id '{id}'")]
    DuplicateId { family: RuleFamily, id: String },

    /// A family whose first entry is used as a fallback has no entries.
    #[error("{0} table must contain at least one entry")]
    EmptyTable(RuleFamily),

    /// A characteristic allows no level at all.
    #[error("characteristic '{id}' has min {min} greater than max {max}")]
    InvertedRange { id: String, min: i32, max: i32 },

    /// A characteristic max or an enhancement override exceeds [`MAX_LEVEL`].
    #[error(
        "{family} '{id}' sets level {level} above the maximum of {ceiling}",
        ceiling = MAX_LEVEL
    )]
    LevelOutOfRange {
        family: RuleFamily,
        id: String,
        level: i32,
    },

    /// A table or step cost rule has no entries.
    #[error("{family} '{id}' has a cost rule without values")]
    EmptyCostRule { family: RuleFamily, id: String },
}

impl CatalogError {
    /// Stable identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyId { .. } => "CATALOG_EMPTY_ID",
            Self::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            Self::EmptyTable(_) => "CATALOG_EMPTY_TABLE",
            Self::InvertedRange { .. } => "CATALOG_INVERTED_RANGE",
            Self::LevelOutOfRange { .. } => "CATALOG_LEVEL_OUT_OF_RANGE",
            Self::EmptyCostRule { .. } => "CATALOG_EMPTY_COST_RULE",
        }
    }
}
