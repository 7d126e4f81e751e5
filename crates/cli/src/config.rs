//! Environment-driven settings of the CLI.

use std::env;
use std::path::PathBuf;

use tracing::Level;

/// Logging configuration.
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Directory of the optional log file; stderr only when unset.
    pub log_dir: Option<PathBuf>,
    /// Level used when `RUST_LOG` is unset or invalid.
    pub default_level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_level: Level::INFO,
        }
    }
}

impl LogConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ABILITY_LOG_DIR` - Also write logs to `<dir>/ability-cost.log`
    /// - `ABILITY_LOG_LEVEL` - Fallback level when `RUST_LOG` is unset (default: info)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("ABILITY_LOG_DIR").filter(|dir| !dir.is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = read_env::<Level>("ABILITY_LOG_LEVEL") {
            config.default_level = level;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
