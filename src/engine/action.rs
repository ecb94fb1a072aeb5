use tracing::debug;

use crate::engine::effects;
use crate::engine::error::EngineError;
use crate::engine::event_bus::EventBus;
use crate::engine::prompt;
use crate::engine::provider::{GenerativeProvider, Payload, PromptMessage, ToolKind};
use crate::engine::store::StateStore;
use crate::model::delta::{ChatReply, Delta};
use crate::model::event::GameEvent;
use crate::model::options::GameOptions;

/// Words that suggest the player is addressing a character, in which case
/// the provider is also offered the chat schema and may answer in either
/// shape.
const CHAT_KEYWORDS: &[&str] = &[
    "talk", "chat", "ask", "tell", "speak", "interact", "converse", "dialog", "dialogue",
];

/// Resolves one free-form action turn: one main provider round trip,
/// normalization of chat-shaped replies, then effect application.
pub struct ActionResolver<'a> {
    provider: &'a dyn GenerativeProvider,
    options: &'a GameOptions,
}

impl<'a> ActionResolver<'a> {
    pub fn new(provider: &'a dyn GenerativeProvider, options: &'a GameOptions) -> Self {
        Self { provider, options }
    }

    pub fn resolve(
        &self,
        action: &str,
        store: &mut StateStore,
        bus: &mut EventBus,
    ) -> Result<(), EngineError> {
        // Condense prior text so the context summary stays small.
        let last_action = store
            .history
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_else(|| "N/A".to_string());
        let last_action = self.summarize(&last_action)?;
        let last_scene = self.summarize(&store.data.scene)?;

        let context = prompt::action_context(self.options, &store.data, &last_action, &last_scene);
        let message = PromptMessage::user(format!("{action}; {context}"));

        let mut toolset = vec![ToolKind::Update];
        let lowered = action.to_lowercase();
        if CHAT_KEYWORDS.iter().any(|word| lowered.contains(word)) {
            toolset.push(ToolKind::Chat);
        }

        let payload = self
            .provider
            .generate(&toolset, None, std::slice::from_ref(&message))?;
        store.history.push(message);

        let delta = match payload {
            Payload::Update(delta) => *delta,
            Payload::Chat(reply) => self.absorb_chat_reply(&reply, store, bus),
            // A reply with no tool call is still a scene.
            Payload::Narration(text) => Delta {
                scene: Some(text),
                scene_emoji: Some("🤖".to_string()),
                ..Delta::default()
            },
            _ => return Err(EngineError::ProviderEmptyResponse),
        };

        let report = effects::apply(&mut store.data, &delta, self.options, self.provider)?;
        bus.emit_all(&report.events);
        if report.fatal {
            return Err(EngineError::PlayerDeath);
        }

        bus.emit(&GameEvent::Action { action: action.to_string() });
        Ok(())
    }

    /// A chat-shaped answer to an action: append the dialog to the
    /// character's thread, announce it, then lift the nested effects to
    /// the top level so the applier sees an ordinary delta.
    fn absorb_chat_reply(
        &self,
        reply: &ChatReply,
        store: &mut StateStore,
        bus: &mut EventBus,
    ) -> Delta {
        debug!(character = %reply.name, "action resolved as dialogue");

        let character = store
            .data
            .characters
            .iter()
            .find(|character| character.name == reply.name)
            .cloned();

        let thread = store.thread_mut(&reply.name);
        thread.push_character(&reply.dialog);
        let thread = thread.clone();

        bus.emit(&GameEvent::Chat {
            thread,
            dialog: reply.dialog.clone(),
            character,
        });

        reply.promote()
    }

    fn summarize(&self, text: &str) -> Result<String, EngineError> {
        let text = if text.is_empty() { "N/A" } else { text };
        let message = PromptMessage::user(format!("{}: {}", self.options.prompts.summarize, text));

        match self.provider.generate(
            &[ToolKind::Summarize],
            Some(ToolKind::Summarize),
            std::slice::from_ref(&message),
        )? {
            Payload::Text(summary) | Payload::Narration(summary) => Ok(summary),
            _ => Err(EngineError::ProviderEmptyResponse),
        }
    }
}
