//! Render subcommand handler
//!
//! Drives the stepped executor once per frame, the way the video-capture
//! pipeline does, and emits a frame log: which frame each message
//! appeared on and where the overlay toggled. The external encoder pairs
//! this log with the compiled timestamps to mux audio at identical
//! offsets.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use chatcast::{
    CharacterMeta, ChatScript, DialogueItem, RenderSink, SteppedExecutor, Timeline, TimelineEvent,
    TimingConfig,
};

#[derive(Debug, Serialize)]
struct FrameLog {
    fps: u32,
    frame_count: u64,
    total_duration: f64,
    timeline: Timeline,
    appearances: Vec<Appearance>,
    overlay_changes: Vec<OverlayChange>,
}

#[derive(Debug, Serialize)]
struct Appearance {
    event_index: usize,
    frame: u64,
}

#[derive(Debug, Serialize)]
struct OverlayChange {
    frame: u64,
    active: bool,
}

/// Sink that records which frame each transition landed on.
#[derive(Default)]
struct FrameLogSink {
    frame: u64,
    appearances: Vec<Appearance>,
    overlay_changes: Vec<OverlayChange>,
}

impl RenderSink for FrameLogSink {
    fn on_message_appear(
        &mut self,
        event: &TimelineEvent,
        _item: &DialogueItem,
        _meta: &CharacterMeta,
        _consecutive: bool,
    ) {
        self.appearances.push(Appearance {
            event_index: event.index,
            frame: self.frame,
        });
    }
    fn on_typing_show(&mut self, _meta: &CharacterMeta) {}
    fn on_typing_hide(&mut self) {}
    fn on_overlay_show(&mut self, _text: Option<&str>) {
        self.overlay_changes.push(OverlayChange {
            frame: self.frame,
            active: true,
        });
    }
    fn on_overlay_hide(&mut self) {
        self.overlay_changes.push(OverlayChange {
            frame: self.frame,
            active: false,
        });
    }
}

/// Step the whole timeline at `fps` and emit the frame log.
#[cfg(not(tarpaulin_include))]
pub fn handle(script_path: &Path, fps: u32, output: Option<&Path>, config: &TimingConfig) -> Result<()> {
    anyhow::ensure!(fps > 0, "fps must be positive");

    let script = ChatScript::load(script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;
    let cast = script.cast();
    let timeline = Timeline::compile(&script.items, &cast, config);

    let frame_count = (timeline.total_duration * f64::from(fps)).ceil() as u64 + 1;
    let mut executor = SteppedExecutor::new(&timeline, &script.items, &cast);
    let mut sink = FrameLogSink::default();

    for frame in 0..frame_count {
        sink.frame = frame;
        let t = frame as f64 / f64::from(fps);
        executor.update(t, &mut sink);
    }

    tracing::debug!(
        frames = frame_count,
        appearances = sink.appearances.len(),
        "stepped render walk complete"
    );

    let log = FrameLog {
        fps,
        frame_count,
        total_duration: timeline.total_duration,
        timeline,
        appearances: sink.appearances,
        overlay_changes: sink.overlay_changes,
    };
    let json = serde_json::to_string_pretty(&log)?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write frame log to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
