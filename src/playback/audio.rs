//! At-most-once audio cue dispatch
//!
//! Wraps an [`AudioSink`] with per-session bookkeeping so re-entrant
//! paths (a re-rendered intro, a replayed event) can request a cue
//! unconditionally and still fire it exactly once.

use std::collections::BTreeSet;

use crate::playback::sink::{AudioCue, AudioSink};

/// One dispatcher per playback session.
#[derive(Debug, Default)]
pub struct AudioCueDispatcher {
    pops_fired: BTreeSet<usize>,
    swoosh_fired: bool,
    bgm_fired: bool,
}

impl AudioCueDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message pop at an event's appear time.
    pub fn message_pop(&mut self, index: usize, sink: &mut dyn AudioSink) {
        if self.pops_fired.insert(index) {
            sink.on_cue(AudioCue::MessagePop(index));
        }
    }

    /// Swoosh at the conclusion of the intro phase.
    pub fn intro_swoosh(&mut self, sink: &mut dyn AudioSink) {
        if !self.swoosh_fired {
            self.swoosh_fired = true;
            sink.on_cue(AudioCue::IntroSwoosh);
        }
    }

    /// BGM-start signal, fired once per session whether or not an intro
    /// ran.
    pub fn bgm_start(&mut self, sink: &mut dyn AudioSink) {
        if !self.bgm_fired {
            self.bgm_fired = true;
            sink.on_cue(AudioCue::BgmStart);
        }
    }
}
