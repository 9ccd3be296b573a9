//! Time-divider overlay projection
//!
//! A pure function of `(timeline, t)`: no state, no side effects, safe to
//! call with repeated or non-monotonic times. The stepped capture driver
//! calls this once per rendered frame.

use crate::script::DialogueItem;
use crate::timeline::Timeline;

/// Whether a scene-break overlay is visible at some instant, and with
/// what label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState<'a> {
    pub active: bool,
    pub text: Option<&'a str>,
}

impl OverlayState<'_> {
    pub const INACTIVE: OverlayState<'static> = OverlayState {
        active: false,
        text: None,
    };
}

/// Project the overlay state at logical time `t`.
///
/// A divider's overlay is visible over `[typing_start, appear_time)`;
/// authoring guarantees divider windows never overlap, so the first hit
/// wins.
pub fn overlay_state<'a>(
    timeline: &'a Timeline,
    items: &'a [DialogueItem],
    t: f64,
) -> OverlayState<'a> {
    for event in &timeline.events {
        if let Some((start, end)) = event.overlay_window() {
            if t >= start && t < end {
                let text = items
                    .get(event.index)
                    .map(|item| item.message_text())
                    .filter(|text| !text.is_empty());
                return OverlayState { active: true, text };
            }
        }
    }
    OverlayState::INACTIVE
}
