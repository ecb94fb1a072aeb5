use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

use crate::engine::error::EngineError;
use crate::engine::event_bus::EventBus;
use crate::engine::provider::PromptMessage;
use crate::model::chat::ChatThread;
use crate::model::event::GameEvent;
use crate::model::game_state::GameState;
use crate::model::options::GameOptions;
use crate::model::save::SaveGame;

/// Owns the mutable session record: the game state, the per-character
/// conversation threads and the provider message history.
pub struct StateStore {
    pub id: String,
    pub data: GameState,
    pub chats: Vec<ChatThread>,
    pub history: Vec<PromptMessage>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();

        Self {
            id,
            data: GameState::default(),
            chats: Vec::new(),
            history: Vec::new(),
        }
    }

    /// The thread for one character, created on first use.
    pub fn thread_mut(&mut self, character_name: &str) -> &mut ChatThread {
        if let Some(index) = self
            .chats
            .iter()
            .position(|chat| chat.character_name == character_name)
        {
            return &mut self.chats[index];
        }

        self.chats.push(ChatThread::new(character_name));
        let last = self.chats.len() - 1;
        &mut self.chats[last]
    }

    pub fn thread(&self, character_name: &str) -> Option<&ChatThread> {
        self.chats.iter().find(|chat| chat.character_name == character_name)
    }

    /// Flat structural snapshot of the whole session.
    pub fn export(&self, options: &GameOptions, tokens: u64) -> SaveGame {
        SaveGame {
            id: self.id.clone(),
            tokens,
            options: options.clone(),
            data: self.data.clone(),
            chats: self.chats.clone(),
            history: self.history.clone(),
        }
    }

    /// Replace the in-memory session with the record's fields, wholesale.
    /// No validation, no partial merge. Returns the saved options and token
    /// tally for the caller to restore into its own collaborators.
    pub fn import(&mut self, save: SaveGame, bus: &mut EventBus) -> (GameOptions, u64) {
        self.id = save.id;
        self.data = save.data;
        self.chats = save.chats;
        self.history = save.history;
        bus.emit(&GameEvent::Import);
        (save.options, save.tokens)
    }

    /// Manually set one of the known top-level state fields. Unknown keys
    /// fail with `PathNotFound` instead of mutating arbitrary nested state.
    pub fn set_field(&mut self, key: &str, value: Value) -> Result<(), EngineError> {
        let data = &mut self.data;
        match key {
            "health" => data.health = as_number(key, &value)?,
            "armor" => data.armor = as_number(key, &value)?,
            "money" => data.money = as_number(key, &value)?,
            "experience" => data.experience = as_number(key, &value)?,
            "reputation" => data.reputation = as_number(key, &value)?,
            "weight_capacity" => data.weight_capacity = as_number(key, &value)?,
            "scene" => data.scene = as_string(key, &value)?,
            "scene_emoji" => data.scene_emoji = as_string(key, &value)?,
            "location" => data.location = as_string(key, &value)?,
            "location_description" => data.location_description = as_string(key, &value)?,
            "weather" => data.weather = as_string(key, &value)?,
            "weather_emoji" => data.weather_emoji = as_string(key, &value)?,
            "weather_description" => data.weather_description = as_string(key, &value)?,
            "rumor" => data.rumor = as_string(key, &value)?,
            "appearance" => data.appearance = as_string(key, &value)?,
            "health_description" => data.health_description = as_string(key, &value)?,
            "reputation_description" => data.reputation_description = as_string(key, &value)?,
            "money_name" => data.money_name = as_string(key, &value)?,
            "weight_unit" => data.weight_unit = as_string(key, &value)?,
            _ => return Err(EngineError::PathNotFound(key.to_string())),
        }
        Ok(())
    }
}

fn as_number(key: &str, value: &Value) -> Result<i64, EngineError> {
    value
        .as_i64()
        .ok_or_else(|| EngineError::PathNotFound(format!("{key}: expected a number")))
}

fn as_string(key: &str, value: &Value) -> Result<String, EngineError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| EngineError::PathNotFound(format!("{key}: expected a string")))
}
