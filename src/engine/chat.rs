use crate::engine::effects;
use crate::engine::error::EngineError;
use crate::engine::event_bus::EventBus;
use crate::engine::prompt;
use crate::engine::provider::{GenerativeProvider, Payload, PromptMessage, ToolKind};
use crate::engine::store::StateStore;
use crate::model::event::GameEvent;
use crate::model::options::GameOptions;

/// Resolves one directed conversation turn with a single character. The
/// provider is forced into the chat schema and sees the entire prior
/// thread, in order; there is no truncation, so very long threads will
/// eventually exceed the provider's context window upstream.
pub struct ChatResolver<'a> {
    provider: &'a dyn GenerativeProvider,
    options: &'a GameOptions,
}

impl<'a> ChatResolver<'a> {
    pub fn new(provider: &'a dyn GenerativeProvider, options: &'a GameOptions) -> Self {
        Self { provider, options }
    }

    /// Send `dialog` to the named character and return their reply.
    pub fn converse(
        &self,
        character_name: &str,
        dialog: &str,
        store: &mut StateStore,
        bus: &mut EventBus,
    ) -> Result<String, EngineError> {
        let character = store
            .data
            .characters
            .iter()
            .find(|character| character.name == character_name)
            .cloned()
            .ok_or_else(|| EngineError::PathNotFound(format!("characters.{character_name}")))?;

        let thread_so_far = {
            let thread = store.thread_mut(character_name);
            thread.push_player(dialog);
            thread.messages.clone()
        };

        let mut messages = vec![PromptMessage::user(prompt::roleplay_prompt(
            self.options,
            &store.data,
            &character,
        ))];
        for entry in &thread_so_far {
            messages.push(if entry.from_player {
                PromptMessage::user(entry.content.clone())
            } else {
                PromptMessage::assistant(entry.content.clone())
            });
        }

        let payload = self
            .provider
            .generate(&[ToolKind::Chat], Some(ToolKind::Chat), &messages)?;
        let reply = match payload {
            Payload::Chat(reply) => reply,
            _ => return Err(EngineError::ProviderEmptyResponse),
        };

        let thread = store.thread_mut(character_name);
        thread.push_character(&reply.dialog);
        let thread = thread.clone();

        bus.emit(&GameEvent::Chat {
            thread,
            dialog: reply.dialog.clone(),
            character: Some(character),
        });

        if let Some(effects) = &reply.effects {
            let report = effects::apply(&mut store.data, effects, self.options, self.provider)?;
            bus.emit_all(&report.events);
            if report.fatal {
                return Err(EngineError::PlayerDeath);
            }
        }

        Ok(reply.dialog)
    }
}
