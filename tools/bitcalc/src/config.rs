//! bitcalc configuration
//!
//! Layered with figment, lowest priority first:
//! built-in defaults, YAML file, `BITCALC_*` environment variables.
//! Command-line flags are applied on top by the caller.

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use voltage_bits::Precision;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "bitcalc.yaml";

/// Environment variable prefix (e.g. `BITCALC_DECIMAL_PLACES=4`)
pub const ENV_PREFIX: &str = "BITCALC_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitcalcConfig {
    /// Display precision for decoded values: places or "shortest"
    pub decimal_places: Precision,

    /// Log filter (e.g. "warn", "debug", "bitcalc=debug")
    pub log_level: String,

    /// Colored terminal output
    pub color: bool,

    /// REPL history entries kept in memory
    pub history_size: usize,
}

impl Default for BitcalcConfig {
    fn default() -> Self {
        Self {
            decimal_places: Precision::default(),
            log_level: "warn".to_string(),
            color: true,
            history_size: 100,
        }
    }
}

impl BitcalcConfig {
    /// Load configuration; an explicit path must exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
        }

        Self::figment(path)
            .extract()
            .context("Invalid bitcalc configuration")
    }

    fn figment(path: Option<&Path>) -> Figment {
        // Only the working directory itself; parent directories are not searched
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file_exact(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
