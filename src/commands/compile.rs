//! Compile subcommand handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use chatcast::{ChatScript, Timeline, TimingConfig};

/// Compile a script and emit the timeline JSON.
#[cfg(not(tarpaulin_include))]
pub fn handle(script_path: &Path, output: Option<&Path>, config: &TimingConfig) -> Result<()> {
    let script = ChatScript::load(script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;
    let cast = script.cast();
    let timeline = Timeline::compile(&script.items, &cast, config);

    tracing::debug!(
        events = timeline.events.len(),
        duration = timeline.total_duration,
        "compiled timeline"
    );

    let json = serde_json::to_string_pretty(&timeline)?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write timeline to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
