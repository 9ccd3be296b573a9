//! Externally-clocked playback driver
//!
//! The capture pipeline calls [`SteppedExecutor::update`] once per
//! rendered frame with the frame's timestamp. The executor is stateless
//! with respect to time: it recomputes the overlay projection and fires
//! any not-yet-fired events at or before `t`, exactly once each. Calls
//! are cheap and bounded - this sits on the frame-capture hot path.
//!
//! No audio is played here; the external muxer aligns its audio track to
//! the same compiled timestamps.

use crate::cast::CastDirectory;
use crate::playback::sink::RenderSink;
use crate::playback::state::PlaybackState;
use crate::script::DialogueItem;
use crate::timeline::Timeline;

/// Frame-clock driver over one compiled timeline.
pub struct SteppedExecutor<'a> {
    timeline: &'a Timeline,
    items: &'a [DialogueItem],
    cast: &'a CastDirectory,
    state: PlaybackState,
    /// Scan cursor over the event list; only ever moves forward, so a
    /// full playback is O(events) total across all `update` calls.
    next_event: usize,
}

impl<'a> SteppedExecutor<'a> {
    pub fn new(timeline: &'a Timeline, items: &'a [DialogueItem], cast: &'a CastDirectory) -> Self {
        Self {
            timeline,
            items,
            cast,
            state: PlaybackState::new(),
            next_event: 0,
        }
    }

    /// Advance visible state to logical time `t`.
    ///
    /// Idempotent: repeated or backward `t` values never un-fire or
    /// double-fire an event. The overlay is applied unconditionally on
    /// every call - setting it is cheap and always correct.
    pub fn update(&mut self, t: f64, sink: &mut dyn RenderSink) {
        let overlay = self.timeline.overlay_state(self.items, t);
        if overlay.active != self.state.overlay_active {
            if overlay.active {
                sink.on_overlay_show(overlay.text);
            } else {
                sink.on_overlay_hide();
            }
            self.state.overlay_active = overlay.active;
        }

        while let Some(event) = self.timeline.events.get(self.next_event) {
            if event.appear_time > t {
                break;
            }
            if self.state.mark_fired(event.index) {
                let item = &self.items[event.index];
                let meta = self.cast.resolve(&item.sender);
                sink.on_message_appear(event, item, &meta, event.consecutive);
            }
            self.next_event += 1;
        }
    }

    /// Indices delivered so far, in order.
    pub fn fired(&self) -> impl Iterator<Item = usize> + '_ {
        self.state.fired.iter().copied()
    }

    /// True once every event has been delivered.
    pub fn finished(&self) -> bool {
        self.next_event >= self.timeline.events.len()
    }
}
