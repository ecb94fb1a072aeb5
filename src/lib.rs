//! # aige
//!
//! A turn-based narrative session engine. Scene text, characters, items
//! and quests are produced by an external generative provider; the engine
//! turns each player action or conversation turn into one provider round
//! trip, interprets the structured delta that comes back, and merges it
//! into persistent state while holding its numeric invariants and
//! emitting lifecycle events in a fixed order.
//!
//! The host drives the loop: build a [`StateStore`], an [`EventBus`] and a
//! provider (usually [`OpenAiClient`]), create a session, then feed player
//! input through [`ActionResolver`] and [`ChatResolver`]. Resolver calls
//! must be serialized per session; nothing here is thread-safe by design.

pub mod engine;
pub mod model;

pub use engine::action::ActionResolver;
pub use engine::chat::ChatResolver;
pub use engine::create::create_session;
pub use engine::effects::{apply, ApplyReport};
pub use engine::error::EngineError;
pub use engine::event_bus::EventBus;
pub use engine::llm_client::OpenAiClient;
pub use engine::provider::{GenerativeProvider, Payload, PromptMessage, Role, ToolKind};
pub use engine::store::StateStore;
pub use model::chat::{ChatMessage, ChatThread};
pub use model::delta::{ChatReply, Delta, ReputationNote, WorldSeed};
pub use model::event::{EventKind, GameEvent};
pub use model::game_state::{Ability, Character, GameState, InventoryItem, Quest, QuestReward};
pub use model::options::{GameOptions, Prompts};
pub use model::save::SaveGame;
