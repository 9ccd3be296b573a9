//! Timeline compilation
//!
//! Folds the timing calculator over an ordered dialogue sequence into a
//! list of absolute-timestamped events. The compiled timeline is the one
//! artifact both playback drivers interpret: it is immutable once built,
//! so the live preview and the frame-stepped capture cannot drift apart.

mod overlay;

pub use overlay::OverlayState;

use serde::{Deserialize, Serialize};

use crate::cast::{CastDirectory, Side};
use crate::script::DialogueItem;
use crate::timing::{self, TimingConfig};

/// What kind of visual a timeline event produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Message,
    Divider,
}

/// One compiled event. All times are absolute seconds from the timeline
/// origin (the end of the intro phase).
///
/// Invariants, by construction: `reaction_start` of event 0 is 0 and of
/// event i is `appear_time` of event i-1; `typing_start = reaction_start
/// + reaction_delay`; `appear_time = typing_start + typing_duration`.
/// `appear_time` is therefore non-decreasing across the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Position of the source item in the dialogue sequence.
    pub index: usize,
    pub kind: EventKind,
    pub reaction_start: f64,
    pub typing_start: f64,
    pub appear_time: f64,
    /// Same sender as the previous message with no divider in between;
    /// lets the renderer group bubbles and suppress repeated avatars.
    pub consecutive: bool,
}

impl TimelineEvent {
    /// For dividers, the overlay is visible over `[typing_start, appear_time)`.
    pub fn overlay_window(&self) -> Option<(f64, f64)> {
        match self.kind {
            EventKind::Divider => Some((self.typing_start, self.appear_time)),
            EventKind::Message => None,
        }
    }
}

/// A compiled, replayable schedule for one dialogue sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    /// Last event's `appear_time` plus the trailing buffer.
    pub total_duration: f64,
}

impl Timeline {
    /// Compile an ordered dialogue sequence into absolute timestamps.
    ///
    /// `cast` supplies chat sides: the first item's typing duration
    /// depends on whether its sender renders left or right.
    pub fn compile(items: &[DialogueItem], cast: &CastDirectory, config: &TimingConfig) -> Self {
        let mut events = Vec::with_capacity(items.len());
        let mut cursor = 0.0_f64;
        // Burst-mode lookback; a divider resets it so bursts never span
        // a scene break.
        let mut last_sender: Option<String> = None;

        for (index, item) in items.iter().enumerate() {
            let is_first = index == 0;
            let reaction_start = cursor;

            let (typing_start, appear_time, kind, consecutive) = if item.is_divider() {
                // The reaction delay still applies: it is the reading
                // pause for whatever message the viewer just saw.
                let reaction = if is_first { 0.0 } else { config.default_reaction };
                let typing_start = reaction_start + reaction;
                let appear_time = typing_start + config.divider_display + config.divider_fade;
                last_sender = None;
                (typing_start, appear_time, EventKind::Divider, false)
            } else {
                let is_left = cast.side_of(&item.sender) == Side::Left;
                let timing = timing::compute(
                    item,
                    last_sender.as_deref(),
                    is_first,
                    is_left,
                    config,
                );
                let consecutive = last_sender.as_deref() == Some(item.sender.as_str());
                last_sender = Some(item.sender.clone());
                let typing_start = reaction_start + timing.reaction_delay;
                let appear_time = typing_start + timing.typing_duration;
                (typing_start, appear_time, EventKind::Message, consecutive)
            };

            cursor = appear_time;
            events.push(TimelineEvent {
                index,
                kind,
                reaction_start,
                typing_start,
                appear_time,
                consecutive,
            });
        }

        let total_duration = events
            .last()
            .map(|event| event.appear_time + config.trailing_buffer)
            .unwrap_or(0.0);

        Self {
            events,
            total_duration,
        }
    }

    /// Overlay projection at logical time `t`. See [`overlay`].
    pub fn overlay_state<'a>(&'a self, items: &'a [DialogueItem], t: f64) -> OverlayState<'a> {
        overlay::overlay_state(self, items, t)
    }
}
