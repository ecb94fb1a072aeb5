use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;
use crate::model::delta::{ChatReply, Delta, ReputationNote, WorldSeed};

/// One message of provider conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Named response schemas offered to the provider for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Create,
    Update,
    Chat,
    Reputation,
    Name,
    Class,
    Summarize,
}

/// One structured reply, discriminated by the schema the provider chose.
/// `Narration` is the free-text fallback when no tool was invoked.
#[derive(Debug, Clone)]
pub enum Payload {
    Create(Box<WorldSeed>),
    Update(Box<Delta>),
    Chat(Box<ChatReply>),
    Reputation(ReputationNote),
    Text(String),
    Narration(String),
}

/// The external generative content provider.
///
/// Given a toolset and a message history, returns exactly one payload
/// conforming to one of the offered schemas, or free text when the reply
/// carries no tool call, or fails. The core never retries a failed call.
pub trait GenerativeProvider {
    fn generate(
        &self,
        toolset: &[ToolKind],
        force: Option<ToolKind>,
        messages: &[PromptMessage],
    ) -> Result<Payload, EngineError>;

    /// Running total of provider tokens consumed by this client.
    fn tokens(&self) -> u64 {
        0
    }

    /// Restore the token tally when importing a saved session.
    fn set_tokens(&self, _tokens: u64) {}
}
