//! Wall-clock playback driver
//!
//! Interprets a compiled timeline with real cooperative waits, driving a
//! rendering sink for the interactive preview. Single-threaded: every
//! sink mutation happens between waits, and the cancellation token is
//! checked before each wait and mutation so a torn-down preview never
//! receives a stale update.

use std::time::Duration;

use crate::cast::{CastDirectory, Side};
use crate::playback::audio::AudioCueDispatcher;
use crate::playback::{cooperative_wait, MIN_SPEED};
use crate::playback::intro::{IntroAudio, IntroSequencer};
use crate::playback::sink::{AudioSink, RenderSink};
use crate::playback::state::{CancelToken, PlaybackState};
use crate::script::{DialogueItem, IntroSpec};
use crate::timeline::{EventKind, Timeline};
use crate::timing::TimingConfig;

/// Yield between instant-mode firings so a seek over a long script does
/// not starve the host's event loop.
const INSTANT_YIELD: Duration = Duration::from_millis(10);

/// How a realtime session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    Completed,
    /// Cancelled mid-playback; not an error, just an early stop.
    Cancelled,
}

/// Options for one realtime session.
#[derive(Debug, Clone, Copy)]
pub struct PlayOptions {
    /// Events before this index fire instantly with no waits or audio
    /// (seek restore). A non-zero value also bypasses the intro.
    pub start_at: usize,
    /// Wall-clock speed multiplier; logical timestamps are unaffected.
    pub speed: f64,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            start_at: 0,
            speed: 1.0,
        }
    }
}

/// Interactive preview driver over one compiled timeline.
pub struct RealtimeExecutor<'a> {
    timeline: &'a Timeline,
    items: &'a [DialogueItem],
    cast: &'a CastDirectory,
    config: &'a TimingConfig,
    cancel: CancelToken,
    state: PlaybackState,
    speed: f64,
}

impl<'a> RealtimeExecutor<'a> {
    pub fn new(
        timeline: &'a Timeline,
        items: &'a [DialogueItem],
        cast: &'a CastDirectory,
        config: &'a TimingConfig,
        cancel: CancelToken,
    ) -> Self {
        Self {
            timeline,
            items,
            cast,
            config,
            cancel,
            state: PlaybackState::new(),
            speed: 1.0,
        }
    }

    /// Play the intro (unless seeking past it) and then every event in
    /// order.
    pub fn run(
        &mut self,
        intro: Option<&IntroSpec>,
        options: PlayOptions,
        sink: &mut dyn RenderSink,
        audio_sink: &mut dyn AudioSink,
        intro_audio: &mut dyn IntroAudio,
    ) -> PlaybackResult {
        if options.speed.is_nan() || options.speed < MIN_SPEED {
            tracing::warn!(speed = options.speed, "flooring degenerate playback speed");
        }
        self.speed = options.speed.max(MIN_SPEED);
        let mut dispatcher = AudioCueDispatcher::new();
        let mut sequencer = IntroSequencer::new();
        let skip_intro = options.start_at > 0;
        if !sequencer.run(
            intro,
            skip_intro,
            self.speed,
            self.config,
            sink,
            audio_sink,
            &mut dispatcher,
            intro_audio,
            &self.cancel,
        ) {
            return PlaybackResult::Cancelled;
        }

        for event_idx in 0..self.timeline.events.len() {
            if self.cancel.is_cancelled() {
                return PlaybackResult::Cancelled;
            }
            let event = &self.timeline.events[event_idx];
            let item = &self.items[event.index];
            let meta = self.cast.resolve(&item.sender);

            if event.index < options.start_at {
                // Instant mode: restore visible state with a minimal
                // yield, no waits, no audio.
                sink.on_message_appear(event, item, &meta, event.consecutive);
                self.state.mark_fired(event.index);
                std::thread::sleep(INSTANT_YIELD);
                continue;
            }

            let reaction = event.typing_start - event.reaction_start;
            let typing = event.appear_time - event.typing_start;

            let delivered = match event.kind {
                EventKind::Divider => self.play_divider(event_idx, reaction, sink),
                EventKind::Message if meta.side == Side::Left => {
                    self.play_left(event_idx, reaction, typing, sink)
                }
                EventKind::Message => self.play_right(event_idx, reaction + typing, sink),
            };
            if !delivered {
                return PlaybackResult::Cancelled;
            }

            if event.kind == EventKind::Message {
                dispatcher.message_pop(event.index, audio_sink);
            }
        }

        PlaybackResult::Completed
    }

    /// Token shared with the host so it can cancel from a signal handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Session state as of the last sink mutation: which events have
    /// fired and whether the indicator or overlay is currently up. After
    /// a cancelled run this tells the host what is left on screen.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    fn wait(&self, seconds: f64, speed: f64) -> bool {
        cooperative_wait(seconds, speed, &self.cancel)
    }

    /// Left-side sender: the viewer watches the other party type.
    fn play_left(
        &mut self,
        event_idx: usize,
        reaction: f64,
        typing: f64,
        sink: &mut dyn RenderSink,
    ) -> bool {
        let speed = self.speed;
        let event = &self.timeline.events[event_idx];
        let item = &self.items[event.index];
        let meta = self.cast.resolve(&item.sender);

        if !self.wait(reaction, speed) {
            return false;
        }
        sink.on_typing_show(&meta);
        self.state.typing_visible = true;
        if !self.wait(typing * self.config.typing_ratio, speed) {
            return false;
        }
        sink.on_typing_hide();
        self.state.typing_visible = false;
        if !self.wait(typing * (1.0 - self.config.typing_ratio), speed) {
            return false;
        }
        sink.on_message_appear(event, item, &meta, event.consecutive);
        self.state.mark_fired(event.index);
        true
    }

    /// Right-side sender: no indicator for one's own messages.
    fn play_right(&mut self, event_idx: usize, total: f64, sink: &mut dyn RenderSink) -> bool {
        let speed = self.speed;
        if !self.wait(total, speed) {
            return false;
        }
        let event = &self.timeline.events[event_idx];
        let item = &self.items[event.index];
        let meta = self.cast.resolve(&item.sender);
        sink.on_message_appear(event, item, &meta, event.consecutive);
        self.state.mark_fired(event.index);
        true
    }

    /// Scene break: overlay for the display window, then the fade, then
    /// the divider's in-list marker.
    fn play_divider(&mut self, event_idx: usize, reaction: f64, sink: &mut dyn RenderSink) -> bool {
        let speed = self.speed;
        if !self.wait(reaction, speed) {
            return false;
        }
        let event = &self.timeline.events[event_idx];
        let item = &self.items[event.index];
        let text = Some(item.message_text()).filter(|t| !t.is_empty());
        sink.on_overlay_show(text);
        self.state.overlay_active = true;
        if !self.wait(self.config.divider_display, speed) {
            return false;
        }
        sink.on_overlay_hide();
        self.state.overlay_active = false;
        if !self.wait(self.config.divider_fade, speed) {
            return false;
        }
        let meta = self.cast.resolve(&item.sender);
        sink.on_message_appear(event, item, &meta, false);
        self.state.mark_fired(event.index);
        true
    }
}
