use serde::{Deserialize, Serialize};

use crate::model::chat::ChatThread;
use crate::model::game_state::{Character, InventoryItem, Quest};

/// Lifecycle events emitted while a turn is resolved.
/// Delivery order matches the applier's step order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    Gain { attribute: String, amount: i64 },
    Loss { attribute: String, amount: i64 },
    Death,
    ArmorDestroyed,
    FinancialRuin,
    InventoryAdded { item: InventoryItem },
    InventoryRemoved { item: InventoryItem },
    CharacterAdded { character: Character },
    CharacterRemoved { character: Character },
    QuestAdded { quest: Quest },
    QuestRemoved { quest: Quest },
    Chat { thread: ChatThread, dialog: String, character: Option<Character> },
    Action { action: String },
    SessionCreated,
    Import,
}

/// Discriminant used to register listeners for one kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Gain,
    Loss,
    Death,
    ArmorDestroyed,
    FinancialRuin,
    InventoryAdded,
    InventoryRemoved,
    CharacterAdded,
    CharacterRemoved,
    QuestAdded,
    QuestRemoved,
    Chat,
    Action,
    SessionCreated,
    Import,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Gain { .. } => EventKind::Gain,
            GameEvent::Loss { .. } => EventKind::Loss,
            GameEvent::Death => EventKind::Death,
            GameEvent::ArmorDestroyed => EventKind::ArmorDestroyed,
            GameEvent::FinancialRuin => EventKind::FinancialRuin,
            GameEvent::InventoryAdded { .. } => EventKind::InventoryAdded,
            GameEvent::InventoryRemoved { .. } => EventKind::InventoryRemoved,
            GameEvent::CharacterAdded { .. } => EventKind::CharacterAdded,
            GameEvent::CharacterRemoved { .. } => EventKind::CharacterRemoved,
            GameEvent::QuestAdded { .. } => EventKind::QuestAdded,
            GameEvent::QuestRemoved { .. } => EventKind::QuestRemoved,
            GameEvent::Chat { .. } => EventKind::Chat,
            GameEvent::Action { .. } => EventKind::Action,
            GameEvent::SessionCreated => EventKind::SessionCreated,
            GameEvent::Import => EventKind::Import,
        }
    }
}
