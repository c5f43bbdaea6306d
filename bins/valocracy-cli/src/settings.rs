//! Decay configuration loaded from an optional settings file and the environment.
//!
//! Sources, lowest precedence first:
//! 1. the TOML file passed with `--config` (skipped when absent),
//! 2. `VALOCRACY_CURVATURE` / `VALOCRACY_VACATION_PERIOD` environment variables,
//! 3. command-line overrides applied by the caller.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use valocracy_ledger::DecayConfig;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "VALOCRACY";

/// Load the decay configuration from `path` (if any) and the environment.
///
/// Missing keys keep their [`DecayConfig::default`] value, which the ledger
/// rejects on first use.
pub fn load(path: Option<&Path>) -> Result<DecayConfig> {
    load_from(path, None)
}

/// As [`load`], reading `VALOCRACY_*` variables from `env` instead of the
/// process environment when it is given.
pub fn load_from(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<DecayConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(env),
    );

    let settings = builder
        .build()
        .context("failed to read decay configuration")?;
    settings
        .try_deserialize()
        .context("invalid decay configuration")
}
