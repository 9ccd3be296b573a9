//! Message timing calculation
//!
//! Maps a dialogue item plus its conversational context into a
//! `(reaction_delay, typing_duration)` pair. Everything here is pure: the
//! same item and context always produce the same timings, which is what
//! keeps the live preview and the offline capture bit-identical.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::script::{DialogueItem, TypingSpeed};

/// Errors that can occur while loading a timing override file.
#[derive(Debug, thiserror::Error)]
pub enum TimingConfigError {
    #[error("Failed to read timing config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse timing config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The single shared source of truth for every timing constant.
///
/// Both the dashboard editor and the playback engine fetch their numbers
/// from here. An earlier revision duplicated the base delay ad hoc in the
/// dialogue-creation path (as 1.0s); the value below is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed cost of composing any text message, in seconds.
    pub base_delay: f64,
    /// Additional cost per character of message text.
    pub delay_per_char: f64,
    /// Reading/noticing pause before a new speaker starts typing.
    pub default_reaction: f64,
    /// Reduced pause when the same speaker sends consecutive messages.
    pub burst_reaction: f64,
    pub fast_multiplier: f64,
    pub normal_multiplier: f64,
    pub slow_multiplier: f64,
    /// Character count above which the long-message bonus applies.
    pub long_msg_threshold: usize,
    pub long_msg_bonus: f64,
    /// Clamp floor for computed typing durations.
    pub min_delay: f64,
    /// Clamp ceiling for computed typing durations.
    pub max_delay: f64,
    /// Fraction of the typing duration during which the indicator shows.
    pub typing_ratio: f64,
    /// Fixed typing duration for sticker/attachment items.
    pub sticker_delay: f64,
    /// How long a time-divider overlay stays fully visible.
    pub divider_display: f64,
    /// Fade-out tail after the divider display window.
    pub divider_fade: f64,
    /// Typing duration for the very first item when the sender is on the
    /// left (other party) - a brief indicator is still shown.
    pub first_item_left: f64,
    /// Typing duration for the very first item when the sender is on the
    /// right (self) - no indicator, just a beat.
    pub first_item_right: f64,
    /// Silence appended after the last event so captures do not cut hard.
    pub trailing_buffer: f64,
    /// Ceiling on how long the intro waits for a narrated audio asset.
    pub intro_audio_timeout: f64,
    /// Title-card hold for the horror/drama silent intro.
    pub intro_card_short: f64,
    /// Fade-out tail for the horror/drama intro card.
    pub intro_fade: f64,
    /// Title-card hold when no intro audio asset is configured.
    pub intro_card_long: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_delay: 0.8,
            delay_per_char: 0.05,
            default_reaction: 0.6,
            burst_reaction: 0.4,
            fast_multiplier: 0.7,
            normal_multiplier: 1.0,
            slow_multiplier: 1.4,
            long_msg_threshold: 50,
            long_msg_bonus: 1.2,
            min_delay: 1.2,
            max_delay: 7.0,
            typing_ratio: 0.8,
            sticker_delay: 0.8,
            divider_display: 2.0,
            divider_fade: 0.5,
            first_item_left: 1.0,
            first_item_right: 0.5,
            trailing_buffer: 1.0,
            intro_audio_timeout: 5.0,
            intro_card_short: 1.5,
            intro_fade: 0.5,
            intro_card_long: 2.0,
        }
    }
}

impl TimingConfig {
    /// Load overrides from a TOML file, with defaults for absent keys.
    pub fn load(path: &Path) -> Result<Self, TimingConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: TimingConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    fn speed_multiplier(&self, speed: TypingSpeed) -> f64 {
        match speed {
            TypingSpeed::Fast => self.fast_multiplier,
            TypingSpeed::Normal => self.normal_multiplier,
            TypingSpeed::Slow => self.slow_multiplier,
        }
    }
}

/// Computed timings for one dialogue item. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingResult {
    /// Pause before the sender starts "typing", in seconds.
    pub reaction_delay: f64,
    /// Simulated time spent composing, in seconds.
    pub typing_duration: f64,
}

/// Compute the timing pair for one dialogue item.
///
/// `prev_sender` is the last non-divider sender seen before this item
/// (`None` at the start of the timeline or right after a divider), which
/// drives burst-mode detection. `is_first` marks the very first item of
/// the whole timeline; `is_left` tells whether that first sender renders
/// on the left (other party) side.
///
/// Divider items never reach this function; the compiler handles them.
pub fn compute(
    item: &DialogueItem,
    prev_sender: Option<&str>,
    is_first: bool,
    is_left: bool,
    config: &TimingConfig,
) -> TimingResult {
    let explicit_typing = sanitize_override(item.explicit_delay, "explicit_delay");
    let explicit_reaction =
        sanitize_override(item.explicit_reaction_delay, "explicit_reaction_delay");

    let typing_duration = match explicit_typing {
        Some(value) => value,
        None if is_first => {
            // The intro transition already gave the viewer a reading
            // pause; a left-side character still flashes an indicator.
            if is_left {
                config.first_item_left
            } else {
                config.first_item_right
            }
        }
        None if item.is_sticker() => config.sticker_delay,
        None => {
            let len = item.message_text().chars().count();
            let mut raw = (config.base_delay + len as f64 * config.delay_per_char)
                * config.speed_multiplier(item.typing_speed);
            if len > config.long_msg_threshold {
                raw *= config.long_msg_bonus;
            }
            raw.clamp(config.min_delay, config.max_delay)
        }
    };

    let reaction_delay = match explicit_reaction {
        Some(value) => value,
        None if is_first => 0.0,
        None if prev_sender == Some(item.sender.as_str()) => config.burst_reaction,
        None => config.default_reaction,
    };

    TimingResult {
        reaction_delay,
        typing_duration,
    }
}

/// Drop negative or non-finite manual overrides instead of propagating
/// them into waits.
fn sanitize_override(value: Option<f64>, field: &str) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Some(v),
        Some(v) => {
            tracing::warn!(field, value = v, "ignoring invalid timing override");
            None
        }
        None => None,
    }
}
