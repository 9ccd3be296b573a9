//! Dialogue script data model
//!
//! A script is the immutable input to the timeline engine: an intro spec
//! plus an ordered list of dialogue items. Scripts are produced by the
//! editor/persistence layer and consumed here as plain data; this module
//! only normalizes and validates what it is handed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::cast::{CastDirectory, CharacterMeta};

/// Sentinel sender id marking a full-screen scene-break overlay.
pub const TIME_DIVIDER_SENDER: &str = "time_divider";

/// Errors that can occur while loading a script file.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read script file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse script JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Script contains no dialogue items")]
    Empty,
}

/// Authored typing pace for a dialogue item.
///
/// Unknown values in input files deserialize to `Normal` rather than
/// failing the whole script (a deleted speed preset must not break
/// playback of an old project).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl<'de> Deserialize<'de> for TypingSpeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "slow" => TypingSpeed::Slow,
            "fast" => TypingSpeed::Fast,
            "normal" => TypingSpeed::Normal,
            other => {
                tracing::debug!(speed = other, "unknown typing speed, using normal");
                TypingSpeed::Normal
            }
        })
    }
}

/// A single dialogue record as authored in the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueItem {
    /// Character id, or [`TIME_DIVIDER_SENDER`] for a scene break.
    pub sender: String,
    /// Message text. `None` for pure stickers and dividers without labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Attachment/sticker image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Manual override for the typing duration, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_delay: Option<f64>,
    /// Manual override for the reaction delay, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_reaction_delay: Option<f64>,
    #[serde(default)]
    pub typing_speed: TypingSpeed,
    /// Sequence position; unique and gapless per the persistence layer.
    pub order: u32,
}

impl DialogueItem {
    /// True for the scene-break sentinel.
    pub fn is_divider(&self) -> bool {
        self.sender == TIME_DIVIDER_SENDER
    }

    /// True when the item carries a sticker/attachment. The image
    /// dominates: any text alongside it does not change how the item is
    /// timed or rendered.
    pub fn is_sticker(&self) -> bool {
        self.image_path.is_some()
    }

    /// Message text with the missing-message case flattened to empty.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Visual theme of the intro title card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Default,
    Horror,
    Drama,
    #[serde(other)]
    Other,
}

impl ThemeKind {
    /// Horror and drama share the silent card-plus-fade intro branch.
    pub fn is_silent_card(self) -> bool {
        matches!(self, ThemeKind::Horror | ThemeKind::Drama)
    }
}

/// Title-card phase shown before the first dialogue event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroSpec {
    pub title_text: String,
    /// Narrated intro audio asset, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
    #[serde(default)]
    pub theme: ThemeKind,
}

/// A complete renderable conversation: intro, cast, and ordered
/// dialogue, as exported by the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatScript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<IntroSpec>,
    /// Character metadata bundled with the export. Senders missing from
    /// this list resolve to a placeholder at playback time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<CharacterMeta>,
    pub items: Vec<DialogueItem>,
}

impl ChatScript {
    /// Load a script from a JSON file.
    ///
    /// Items are re-sorted by `order` as a normalization step; the
    /// persistence layer guarantees order but hand-edited files may not.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse a script from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, ScriptError> {
        let mut script: ChatScript = serde_json::from_str(raw)?;
        if script.items.is_empty() {
            return Err(ScriptError::Empty);
        }
        script.items.sort_by_key(|item| item.order);
        Ok(script)
    }

    /// Lookup table for the bundled characters.
    pub fn cast(&self) -> CastDirectory {
        CastDirectory::new(self.characters.clone())
    }
}
