//! Character metadata resolution
//!
//! Maps sender ids to display metadata (name, avatar, chat side). A sender
//! id that no longer resolves - typically a deleted custom character -
//! degrades to a deterministic placeholder so an old project still plays.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which side of the chat a character's bubbles render on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The other party; shows a typing indicator before messages appear.
    #[default]
    Left,
    /// The viewer's own messages; no indicator.
    Right,
}

/// Display metadata for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterMeta {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    #[serde(default)]
    pub side: Side,
}

/// Lookup table of characters for one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastDirectory {
    characters: HashMap<String, CharacterMeta>,
}

impl CastDirectory {
    pub fn new(characters: Vec<CharacterMeta>) -> Self {
        Self {
            characters: characters
                .into_iter()
                .map(|meta| (meta.id.clone(), meta))
                .collect(),
        }
    }

    /// Resolve a sender id, substituting a placeholder for unknown ids.
    pub fn resolve(&self, sender: &str) -> CharacterMeta {
        match self.characters.get(sender) {
            Some(meta) => meta.clone(),
            None => {
                tracing::debug!(sender, "unresolvable sender id, using placeholder");
                CharacterMeta {
                    id: sender.to_string(),
                    display_name: "Unknown".to_string(),
                    avatar_path: None,
                    side: Side::Left,
                }
            }
        }
    }

    /// Side a sender renders on; unknown senders default to the left.
    pub fn side_of(&self, sender: &str) -> Side {
        self.characters
            .get(sender)
            .map(|meta| meta.side)
            .unwrap_or(Side::Left)
    }
}
