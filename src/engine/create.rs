use rand::seq::SliceRandom;
use tracing::debug;

use crate::engine::error::EngineError;
use crate::engine::event_bus::EventBus;
use crate::engine::provider::{GenerativeProvider, Payload, PromptMessage, ToolKind};
use crate::engine::store::StateStore;
use crate::model::event::GameEvent;
use crate::model::options::{GameOptions, UNIVERSES};

/// Generate the opening world state for a new session.
///
/// Unset options are filled in first: a random universe from the built-in
/// list, then the player's name and class via single-purpose provider
/// calls. One create-toolset round trip then seeds the game state over
/// the defaults.
pub fn create_session(
    options: &mut GameOptions,
    provider: &dyn GenerativeProvider,
    store: &mut StateStore,
    bus: &mut EventBus,
) -> Result<(), EngineError> {
    if options.universe.is_none() {
        let universe = UNIVERSES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("High Fantasy");
        options.universe = Some(universe.to_string());
    }

    if options.player_name.is_none() {
        let message = PromptMessage::user(format!(
            "{}; universe: {}, language: {}",
            options.prompts.name,
            options.universe(),
            options.language
        ));
        options.player_name = Some(generate_text(provider, ToolKind::Name, message)?);
    }

    if options.player_class.is_none() {
        let message = PromptMessage::user(format!(
            "{}; universe: {}, player: {}, language: {}",
            options.prompts.class,
            options.universe(),
            options.player_name(),
            options.language
        ));
        options.player_class = Some(generate_text(provider, ToolKind::Class, message)?);
    }

    debug!(
        universe = %options.universe(),
        player = %options.player_name(),
        "creating session"
    );

    let message = PromptMessage::user(format!(
        "{}; universe: {}, name: {}, class: {}, language: {}",
        options.prompts.create,
        options.universe(),
        options.player_name(),
        options.player_class(),
        options.language
    ));
    let payload = provider.generate(
        &[ToolKind::Create],
        Some(ToolKind::Create),
        std::slice::from_ref(&message),
    )?;
    let seed = match payload {
        Payload::Create(seed) => seed,
        _ => return Err(EngineError::ProviderEmptyResponse),
    };

    seed.absorb_into(&mut store.data);
    bus.emit(&GameEvent::SessionCreated);
    Ok(())
}

fn generate_text(
    provider: &dyn GenerativeProvider,
    kind: ToolKind,
    message: PromptMessage,
) -> Result<String, EngineError> {
    match provider.generate(&[kind], Some(kind), std::slice::from_ref(&message))? {
        Payload::Text(text) | Payload::Narration(text) => Ok(text),
        _ => Err(EngineError::ProviderEmptyResponse),
    }
}
