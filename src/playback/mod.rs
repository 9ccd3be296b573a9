//! Playback drivers for compiled timelines
//!
//! Two interchangeable executors interpret the same immutable timeline:
//!
//! - `realtime`: cooperative wall-clock waits for the interactive preview;
//!   cancellable mid-playback.
//! - `stepped`: an idempotent `update(t)` driven by an external frame
//!   clock, used for frame-accurate video capture.
//!
//! Compile once, interpret twice: because both drivers read identical
//! timestamps, the preview and the exported video show the same state at
//! the same instant.
//!
//! Supporting pieces:
//! - `sink`: the callback surface the host rendering layer implements
//! - `state`: per-session mutable state and the cancellation token
//! - `audio`: at-most-once audio cue bookkeeping
//! - `intro`: the title-card phase preceding the main timeline

pub mod audio;
pub mod intro;
pub mod realtime;
pub mod sink;
pub mod state;
pub mod stepped;

pub use audio::AudioCueDispatcher;
pub use intro::{IntroAudio, IntroSequencer, NullIntroAudio};
pub use realtime::{PlayOptions, PlaybackResult, RealtimeExecutor};
pub use sink::{AudioCue, AudioSink, RenderSink};
pub use state::{CancelToken, PlaybackState};
pub use stepped::SteppedExecutor;

use std::time::{Duration, Instant};

/// Poll interval for cancellation checks during waits.
const WAIT_SLICE: Duration = Duration::from_millis(10);

/// Floor for wall-clock speed multipliers. A zero, negative, or NaN
/// speed would otherwise scale a wait into an unrepresentable
/// `Duration` and panic.
pub(crate) const MIN_SPEED: f64 = 0.01;

/// Block for `seconds` of logical time, scaled by `speed`, checking the
/// cancellation token every slice.
///
/// Returns false if the wait was cancelled. A zero or negative duration
/// still performs one cancellation check so a cancelled session never
/// issues another sink mutation. Speeds below [`MIN_SPEED`] (including
/// zero and NaN) are floored so the scaled wait stays representable.
pub(crate) fn cooperative_wait(seconds: f64, speed: f64, cancel: &CancelToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    if seconds <= 0.0 {
        return true;
    }
    // f64::max ignores a NaN operand, so this also covers NaN.
    let scaled = seconds / speed.max(MIN_SPEED);
    let deadline = Instant::now() + Duration::from_secs_f64(scaled);
    loop {
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        if cancel.is_cancelled() {
            return false;
        }
        std::thread::sleep(WAIT_SLICE.min(deadline - now));
    }
}
