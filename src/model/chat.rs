use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The conversation history between the player and one character.
/// Created lazily on the first message, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatThread {
    pub character_name: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn new(character_name: impl Into<String>) -> Self {
        Self {
            character_name: character_name.into(),
            messages: Vec::new(),
        }
    }

    pub fn push_player(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            from_player: true,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    pub fn push_character(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            from_player: false,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from_player: bool,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
