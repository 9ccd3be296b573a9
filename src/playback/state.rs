//! Per-session playback state and cancellation
//!
//! Each playback session (one preview, one background render) owns its
//! own `PlaybackState`; nothing here is shared across sessions, which is
//! what lets a preview and a capture run side by side without interfering.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation token.
///
/// Checked before every wait and sink mutation in the realtime executor,
/// so a torn-down preview surface never receives stale updates. Clones
/// share the same flag; cancellation is sticky.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Mutable state for one playback session.
///
/// `fired` only ever grows; an index is never un-fired, which is what
/// makes the stepped driver idempotent under repeated or backward clock
/// values.
#[derive(Debug, Default)]
pub struct PlaybackState {
    /// Event indices whose message-appear has been delivered.
    pub fired: BTreeSet<usize>,
    pub typing_visible: bool,
    pub overlay_active: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a delivery; returns false if the index had already fired.
    pub fn mark_fired(&mut self, index: usize) -> bool {
        self.fired.insert(index)
    }
}
