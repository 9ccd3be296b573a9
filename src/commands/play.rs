//! Play subcommand handler
//!
//! Drives the realtime executor against a plain line-oriented terminal
//! sink. This is a debugging preview of the schedule, not the styled
//! messaging UI - the real rendering surface lives in the host app.

use std::path::Path;

use anyhow::{ensure, Context, Result};

use chatcast::playback::NullIntroAudio;
use chatcast::{
    AudioCue, AudioSink, CancelToken, CharacterMeta, ChatScript, DialogueItem, EventKind,
    PlayOptions, PlaybackResult, RealtimeExecutor, RenderSink, Timeline, TimelineEvent,
    TimingConfig,
};

/// Prints each playback event as it happens.
struct TerminalSink;

impl RenderSink for TerminalSink {
    fn on_message_appear(
        &mut self,
        event: &TimelineEvent,
        item: &DialogueItem,
        meta: &CharacterMeta,
        consecutive: bool,
    ) {
        match event.kind {
            EventKind::Divider => {
                let label = item.message_text();
                if label.is_empty() {
                    println!("  ----");
                } else {
                    println!("  ---- {label} ----");
                }
            }
            EventKind::Message if consecutive => {
                println!("          {}", item.message_text());
            }
            EventKind::Message => {
                let body = if item.is_sticker() {
                    format!("[sticker: {}]", item.image_path.as_deref().unwrap_or("?"))
                } else {
                    item.message_text().to_string()
                };
                println!("{:>8}: {body}", meta.display_name);
            }
        }
    }

    fn on_typing_show(&mut self, meta: &CharacterMeta) {
        println!("{:>8}  ...", meta.display_name);
    }

    fn on_typing_hide(&mut self) {}

    fn on_overlay_show(&mut self, text: Option<&str>) {
        println!("  ==== {} ====", text.unwrap_or(""));
    }

    fn on_overlay_hide(&mut self) {}

    fn on_title_show(&mut self, title: &str) {
        println!("  ** {title} **");
    }

    fn on_title_hide(&mut self) {}
}

impl AudioSink for TerminalSink {
    fn on_cue(&mut self, cue: AudioCue) {
        tracing::debug!(?cue, "audio cue");
    }
}

/// Play a script live; Ctrl-C cancels cleanly.
#[cfg(not(tarpaulin_include))]
pub fn handle(script_path: &Path, start_at: usize, speed: f64, config: &TimingConfig) -> Result<()> {
    ensure!(
        speed.is_finite() && speed > 0.0,
        "speed must be a positive number, got {speed}"
    );
    let script = ChatScript::load(script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;
    let cast = script.cast();
    let timeline = Timeline::compile(&script.items, &cast, config);

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())
            .context("Failed to install Ctrl-C handler")?;
    }

    let mut executor = RealtimeExecutor::new(&timeline, &script.items, &cast, config, cancel);
    let mut sink = TerminalSink;
    let mut audio = TerminalSink;
    let mut intro_audio = NullIntroAudio;
    let options = PlayOptions { start_at, speed };

    match executor.run(script.intro.as_ref(), options, &mut sink, &mut audio, &mut intro_audio) {
        PlaybackResult::Completed => {
            println!("  (done, {:.2}s)", timeline.total_duration);
        }
        PlaybackResult::Cancelled => {
            println!("  (stopped)");
        }
    }
    Ok(())
}
