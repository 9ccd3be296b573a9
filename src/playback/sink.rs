//! Rendering and audio callback surfaces
//!
//! The engine never touches a DOM, a terminal, or a speaker directly; it
//! drives whatever implements these traits. None of the methods return
//! errors - the engine guarantees no failure propagates into the host
//! surface, so a sink that can fail must degrade internally.

use crate::cast::CharacterMeta;
use crate::script::DialogueItem;
use crate::timeline::TimelineEvent;

/// Callbacks the host rendering surface implements.
///
/// Within one session, `on_message_appear` fires in strictly increasing
/// event-index order; both executors only advance forward through the
/// compiled list.
pub trait RenderSink {
    /// A message (or a divider's in-list marker) becomes visible.
    ///
    /// `consecutive` is true when this message directly follows another
    /// from the same sender with no divider in between.
    fn on_message_appear(
        &mut self,
        event: &TimelineEvent,
        item: &DialogueItem,
        meta: &CharacterMeta,
        consecutive: bool,
    );

    fn on_typing_show(&mut self, meta: &CharacterMeta);

    fn on_typing_hide(&mut self);

    /// A scene-break overlay becomes visible, with an optional label.
    fn on_overlay_show(&mut self, text: Option<&str>);

    fn on_overlay_hide(&mut self);

    /// Intro title card appears. Default is a no-op for hosts that skip
    /// the intro phase entirely.
    fn on_title_show(&mut self, _title: &str) {}

    fn on_title_hide(&mut self) {}
}

/// One-shot audio/signal side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Short pop at a message's appear time. Carries the event index.
    MessagePop(usize),
    /// Swoosh at the conclusion of the intro phase.
    IntroSwoosh,
    /// Cross-boundary signal telling the host to start background music.
    BgmStart,
}

/// Receiver for audio cues.
///
/// The realtime executor plays cues as they happen; the stepped executor
/// never calls this - the external muxer aligns audio to the compiled
/// timestamps instead.
pub trait AudioSink {
    fn on_cue(&mut self, cue: AudioCue);
}

/// Sink that drops everything. Useful for headless duration probes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn on_message_appear(
        &mut self,
        _event: &TimelineEvent,
        _item: &DialogueItem,
        _meta: &CharacterMeta,
        _consecutive: bool,
    ) {
    }
    fn on_typing_show(&mut self, _meta: &CharacterMeta) {}
    fn on_typing_hide(&mut self) {}
    fn on_overlay_show(&mut self, _text: Option<&str>) {}
    fn on_overlay_hide(&mut self) {}
}

impl AudioSink for NullSink {
    fn on_cue(&mut self, _cue: AudioCue) {}
}
