//! Config subcommand handler

use anyhow::Result;

use chatcast::TimingConfig;

/// Show the active timing constants as TOML.
///
/// This is the same configuration object the engine compiles with, so
/// whatever this prints is exactly what playback will use.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &TimingConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    print!("{toml_str}");
    Ok(())
}
