use serde::{Deserialize, Serialize};

use crate::engine::provider::PromptMessage;
use crate::model::chat::ChatThread;
use crate::model::game_state::GameState;
use crate::model::options::GameOptions;

/// Flat structural snapshot of a session. Import replaces everything
/// wholesale; there is no versioning and no partial merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    pub id: String,
    pub tokens: u64,
    pub options: GameOptions,
    pub data: GameState,
    pub chats: Vec<ChatThread>,
    pub history: Vec<PromptMessage>,
}
