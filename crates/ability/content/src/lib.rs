//! Rule tables and loaders for the ability engine.
//!
//! Catalogs are authored as TOML, one file per rule family:
//! - `limits.toml` (base slot ceilings)
//! - `casting.toml` (casting times and casting costs)
//! - `categories.toml`, `characteristics.toml`, `enhancements.toml`
//!
//! The default tables are embedded in the crate ([`builtin_catalog`]) and a
//! campaign directory may replace any subset of them ([`RulesLoader`]).

pub mod builtin;
pub mod loaders;

pub use builtin::{builtin_catalog, builtin_spec};
pub use loaders::{
    CASTING_FILE, CATEGORIES_FILE, CHARACTERISTICS_FILE, CastingTables, ContentFactory,
    ENHANCEMENTS_FILE, LIMITS_FILE, LoadResult, RulesLoader,
};
