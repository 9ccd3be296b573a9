//! Intro title-card sequencer
//!
//! Runs once before the main timeline's origin. Horror/drama themes show
//! a silent card with a fade; other themes either narrate an uploaded
//! audio asset (bounded by a timeout so a broken asset can never stall
//! the timeline) or hold the card for a fixed beat. The sequencer is
//! terminal: re-invoking a completed instance is a no-op, and the
//! swoosh/BGM cues are additionally guarded by the dispatcher.

use crate::playback::audio::AudioCueDispatcher;
use crate::playback::sink::{AudioSink, RenderSink};
use crate::playback::state::CancelToken;
use crate::playback::cooperative_wait;
use crate::script::IntroSpec;
use crate::timing::TimingConfig;

/// Poll step, in logical seconds, while waiting on narrated audio.
const AUDIO_POLL_STEP: f64 = 0.05;

/// Host-side intro audio playback.
///
/// `start` returns false when the asset cannot be loaded or played; the
/// sequencer then falls back to the timeout rather than blocking.
pub trait IntroAudio {
    fn start(&mut self, path: &str) -> bool;
    fn finished(&mut self) -> bool;
}

/// Audio backend for hosts without a narration channel (headless
/// renders, tests). Reports instant completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullIntroAudio;

impl IntroAudio for NullIntroAudio {
    fn start(&mut self, _path: &str) -> bool {
        true
    }
    fn finished(&mut self) -> bool {
        true
    }
}

/// State machine for the title-card phase. One instance per session.
#[derive(Debug, Default)]
pub struct IntroSequencer {
    completed: bool,
}

impl IntroSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Run the intro phase, then signal the handoff to the main
    /// timeline.
    ///
    /// `skip` bypasses the card entirely (a seek resuming past the
    /// intro); the BGM-start signal still fires immediately, as it does
    /// when no intro is configured. Returns false only on cancellation,
    /// in which case no further sink mutations were issued.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        intro: Option<&IntroSpec>,
        skip: bool,
        speed: f64,
        config: &TimingConfig,
        sink: &mut dyn RenderSink,
        audio_sink: &mut dyn AudioSink,
        dispatcher: &mut AudioCueDispatcher,
        intro_audio: &mut dyn IntroAudio,
        cancel: &CancelToken,
    ) -> bool {
        if self.completed {
            return true;
        }
        if cancel.is_cancelled() {
            return false;
        }

        let intro = match intro {
            Some(spec) if !skip => spec,
            _ => {
                dispatcher.bgm_start(audio_sink);
                self.completed = true;
                return true;
            }
        };

        sink.on_title_show(&intro.title_text);

        let silent_card = intro.theme.is_silent_card();
        let held = if silent_card {
            // Horror/drama never narrate, even when an asset exists.
            cooperative_wait(config.intro_card_short, speed, cancel)
        } else if let Some(path) = intro.audio_path.as_deref() {
            self.wait_for_narration(path, speed, config, intro_audio, cancel)
        } else {
            cooperative_wait(config.intro_card_long, speed, cancel)
        };
        if !held {
            return false;
        }

        dispatcher.intro_swoosh(audio_sink);
        if silent_card && !cooperative_wait(config.intro_fade, speed, cancel) {
            return false;
        }
        if cancel.is_cancelled() {
            return false;
        }
        sink.on_title_hide();
        dispatcher.bgm_start(audio_sink);
        self.completed = true;
        true
    }

    /// Wait for the narrated asset to finish, bounded by the configured
    /// timeout. Load failure degrades to the timeout path.
    fn wait_for_narration(
        &self,
        path: &str,
        speed: f64,
        config: &TimingConfig,
        intro_audio: &mut dyn IntroAudio,
        cancel: &CancelToken,
    ) -> bool {
        let started = intro_audio.start(path);
        if !started {
            tracing::warn!(path, "intro audio failed to start, falling back to timeout");
        }
        let mut elapsed = 0.0;
        while elapsed < config.intro_audio_timeout {
            if started && intro_audio.finished() {
                return true;
            }
            if !cooperative_wait(AUDIO_POLL_STEP, speed, cancel) {
                return false;
            }
            elapsed += AUDIO_POLL_STEP;
        }
        true
    }
}
