//! CLI subcommand handlers

pub mod compile;
pub mod config;
pub mod play;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};

use chatcast::TimingConfig;

/// Load timing overrides from `--config`, or the defaults.
pub fn load_timing_config(path: Option<&Path>) -> Result<TimingConfig> {
    match path {
        Some(path) => TimingConfig::load(path)
            .with_context(|| format!("Failed to load timing config from {}", path.display())),
        None => Ok(TimingConfig::default()),
    }
}
