use tracing::debug;

use crate::engine::error::EngineError;
use crate::engine::provider::{GenerativeProvider, Payload, PromptMessage, ToolKind};
use crate::model::delta::Delta;
use crate::model::event::GameEvent;
use crate::model::game_state::GameState;
use crate::model::options::GameOptions;

/// Outcome of one delta application: the lifecycle events to emit, in
/// order, and whether the turn ended with the player dead.
pub struct ApplyReport {
    pub events: Vec<GameEvent>,
    pub fatal: bool,
}

/// Merge one delta into the game state.
///
/// Steps always run in the same fixed order; absent delta fields are
/// no-ops. When the player ends up dead the descriptive merge and the
/// gain/loss events are skipped, but every mutation made up to that
/// point stays in place. The only provider round trip is the reputation
/// description refresh, triggered by a reputation delta.
pub fn apply(
    state: &mut GameState,
    delta: &Delta,
    options: &GameOptions,
    provider: &dyn GenerativeProvider,
) -> Result<ApplyReport, EngineError> {
    let mut events = Vec::new();

    // 1. Numeric deltas.
    if let Some(amount) = delta.health_delta {
        state.health += amount;
    }
    if let Some(amount) = delta.armor_delta {
        state.armor += amount;
    }
    if let Some(amount) = delta.money_delta {
        state.money += amount;
    }
    if let Some(amount) = delta.experience_delta {
        state.experience += amount;
    }

    // 2. Resources never go below zero.
    state.health = state.health.max(0);
    state.armor = state.armor.max(0);
    state.money = state.money.max(0);

    // 3. Zero-resource events, evaluated independently against the
    // post-clamp values. A turn that carries no numeric delta at all
    // stays silent; any numeric delta re-announces every exhausted
    // resource, not just the one it touched.
    let any_numeric_delta = delta.health_delta.is_some()
        || delta.armor_delta.is_some()
        || delta.money_delta.is_some()
        || delta.experience_delta.is_some()
        || delta.reputation_delta.is_some();
    if any_numeric_delta {
        if state.health == 0 {
            events.push(GameEvent::Death);
        }
        if state.armor == 0 {
            events.push(GameEvent::ArmorDestroyed);
        }
        if state.money == 0 {
            events.push(GameEvent::FinancialRuin);
        }
    }

    // 4. Reputation, with a fresh first-person description.
    if let Some(amount) = delta.reputation_delta {
        state.reputation += amount;
        if let Some(description) = describe_reputation(state, options, provider)? {
            state.reputation_description = description;
        }
    }

    // 5. Inventory. Adds are unconditional; duplicate names are allowed.
    if let Some(item) = &delta.inventory_added {
        state.inventory.push(item.clone());
        events.push(GameEvent::InventoryAdded { item: item.clone() });
    }
    if let Some(name) = &delta.inventory_removed {
        if let Some(index) = state.inventory.iter().position(|item| &item.name == name) {
            let item = state.inventory.remove(index);
            events.push(GameEvent::InventoryRemoved { item });
        }
    }

    // 6. Characters. The player is never stored in the character list.
    if let Some(character) = &delta.character_added {
        if character.name == options.player_name() {
            debug!(name = %character.name, "dropped character matching the player");
        } else {
            state.characters.push(character.clone());
            events.push(GameEvent::CharacterAdded { character: character.clone() });
        }
    }
    if let Some(name) = &delta.character_removed {
        if let Some(index) = state.characters.iter().position(|c| &c.name == name) {
            let character = state.characters.remove(index);
            events.push(GameEvent::CharacterRemoved { character });
        }
    }

    // 7. Quests. Rewards settle before the quest leaves the list, and the
    // removal event comes after both.
    if let Some(quest) = &delta.quest_added {
        state.quests.push(quest.clone());
        events.push(GameEvent::QuestAdded { quest: quest.clone() });
    }
    if let Some(name) = &delta.quest_removed {
        if let Some(index) = state.quests.iter().position(|quest| &quest.name == name) {
            let quest = state.quests.remove(index);
            state.experience += quest.reward.experience;
            state.money += quest.reward.money;
            state.reputation += quest.reward.reputation;
            state.inventory.extend(quest.reward.inventory.iter().cloned());
            events.push(GameEvent::QuestRemoved { quest });
        }
    }

    // 8. A dead player ends the turn here: no gain/loss events, no
    // descriptive merge, stale scene text and all.
    if state.health <= 0 {
        return Ok(ApplyReport { events, fatal: true });
    }

    // 9. Gain/loss per non-zero numeric delta, in attribute order.
    for (attribute, amount) in [
        ("health", delta.health_delta),
        ("armor", delta.armor_delta),
        ("money", delta.money_delta),
        ("experience", delta.experience_delta),
        ("reputation", delta.reputation_delta),
    ] {
        match amount {
            Some(amount) if amount > 0 => {
                events.push(GameEvent::Gain { attribute: attribute.to_string(), amount });
            }
            Some(amount) if amount < 0 => {
                events.push(GameEvent::Loss { attribute: attribute.to_string(), amount });
            }
            _ => {}
        }
    }

    // 10. Descriptive overwrites, last write wins.
    merge_descriptions(state, delta);

    Ok(ApplyReport { events, fatal: false })
}

fn describe_reputation(
    state: &GameState,
    options: &GameOptions,
    provider: &dyn GenerativeProvider,
) -> Result<Option<String>, EngineError> {
    let messages = [
        PromptMessage::user(format!(
            "Universe: {}, Player: {}",
            options.universe(),
            options.player_name()
        )),
        PromptMessage::user(format!(
            "Get player perspective of reputation description; new reputation: {}",
            state.reputation
        )),
    ];

    match provider.generate(&[ToolKind::Reputation], Some(ToolKind::Reputation), &messages)? {
        Payload::Reputation(note) => Ok(note.into_description()),
        _ => Err(EngineError::ProviderEmptyResponse),
    }
}

fn merge_descriptions(state: &mut GameState, delta: &Delta) {
    if let Some(scene) = &delta.scene {
        state.scene = scene.clone();
    }
    if let Some(emoji) = &delta.scene_emoji {
        state.scene_emoji = emoji.clone();
    }
    if let Some(actions) = &delta.actions {
        state.actions = actions.clone();
    }
    if let Some(rumor) = &delta.rumor {
        state.rumor = rumor.clone();
    }
    if let Some(location) = &delta.location {
        state.location = location.clone();
    }
    if let Some(description) = &delta.location_description {
        state.location_description = description.clone();
    }
    if let Some(appearance) = &delta.appearance {
        state.appearance = appearance.clone();
    }
    if let Some(weather) = &delta.weather {
        state.weather = weather.clone();
    }
    if let Some(emoji) = &delta.weather_emoji {
        state.weather_emoji = emoji.clone();
    }
    if let Some(description) = &delta.weather_description {
        state.weather_description = description.clone();
    }
    if let Some(description) = &delta.health_description {
        state.health_description = description.clone();
    }
    if let Some(description) = &delta.reputation_description {
        state.reputation_description = description.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::ScriptedProvider;
    use crate::model::delta::ReputationNote;
    use crate::model::game_state::{Character, InventoryItem, Quest, QuestReward};

    fn healthy_state() -> GameState {
        GameState {
            health: 100,
            armor: 50,
            money: 20,
            ..GameState::default()
        }
    }

    #[test]
    fn resources_never_drop_below_zero() {
        let mut state = healthy_state();
        let provider = ScriptedProvider::empty();
        let delta = Delta {
            armor_delta: Some(-500),
            money_delta: Some(-500),
            ..Delta::default()
        };

        let report = apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();
        assert_eq!(state.armor, 0);
        assert_eq!(state.money, 0);
        assert!(!report.fatal);
    }

    #[test]
    fn exhausted_resources_are_reannounced_by_any_numeric_delta() {
        let mut state = healthy_state();
        state.health = 50;
        state.armor = 0;
        state.money = 0;

        let delta = Delta { health_delta: Some(-5), ..Delta::default() };
        let provider = ScriptedProvider::empty();
        let report = apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();

        assert_eq!(state.health, 45);
        assert!(!report.fatal);
        assert!(report.events.iter().any(|e| matches!(e, GameEvent::ArmorDestroyed)));
        assert!(report.events.iter().any(|e| matches!(e, GameEvent::FinancialRuin)));
        assert!(!report.events.iter().any(|e| matches!(e, GameEvent::Death)));
        assert!(matches!(
            report.events.last(),
            Some(GameEvent::Loss { attribute, amount: -5 }) if attribute == "health"
        ));
    }

    #[test]
    fn empty_delta_changes_nothing_and_queues_nothing() {
        let mut state = healthy_state();
        state.scene = "The old docks".into();
        let before = serde_json::to_value(&state).unwrap();

        let delta = Delta {
            scene: Some("The old docks".into()),
            ..Delta::default()
        };
        let provider = ScriptedProvider::empty();
        let report = apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();

        assert!(report.events.is_empty());
        assert!(!report.fatal);
        assert_eq!(serde_json::to_value(&state).unwrap(), before);
    }

    #[test]
    fn quest_settles_before_removal_and_removal_before_event() {
        let mut state = healthy_state();
        state.money = 0;
        state.quests.push(Quest {
            name: "Q".into(),
            reward: QuestReward {
                money: 5,
                experience: 10,
                reputation: 1,
                inventory: vec![InventoryItem { name: "Coin".into(), ..Default::default() }],
            },
            ..Default::default()
        });

        let delta = Delta { quest_removed: Some("Q".into()), ..Delta::default() };
        let provider = ScriptedProvider::empty();
        let report = apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();

        assert_eq!(state.money, 5);
        assert_eq!(state.experience, 10);
        assert_eq!(state.reputation, 1);
        assert!(state.inventory.iter().any(|item| item.name == "Coin"));
        assert!(state.quests.is_empty());
        assert!(matches!(report.events.as_slice(), [GameEvent::QuestRemoved { quest }] if quest.name == "Q"));
    }

    #[test]
    fn the_player_is_never_added_as_a_character() {
        let mut state = healthy_state();
        let options = GameOptions {
            player_name: Some("Punk".into()),
            ..GameOptions::default()
        };

        let delta = Delta {
            character_added: Some(Character { name: "Punk".into(), ..Default::default() }),
            ..Delta::default()
        };
        let provider = ScriptedProvider::empty();
        let report = apply(&mut state, &delta, &options, &provider).unwrap();

        assert!(state.characters.is_empty());
        assert!(report.events.is_empty());
    }

    #[test]
    fn death_suppresses_the_descriptive_merge_and_gain_loss_events() {
        let mut state = healthy_state();
        state.health = 15;
        state.scene = "Old scene".into();

        let delta = Delta {
            health_delta: Some(-20),
            scene: Some("New scene".into()),
            inventory_added: Some(InventoryItem { name: "Sword".into(), ..Default::default() }),
            ..Delta::default()
        };
        let provider = ScriptedProvider::empty();
        let report = apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();

        assert!(report.fatal);
        assert_eq!(state.health, 0);
        assert_eq!(state.scene, "Old scene");
        assert!(state.inventory.iter().any(|item| item.name == "Sword"));
        assert!(report.events.iter().any(|e| matches!(e, GameEvent::Death)));
        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Gain { .. } | GameEvent::Loss { .. })));
    }

    #[test]
    fn reputation_delta_triggers_a_description_refresh() {
        let mut state = healthy_state();
        let provider = ScriptedProvider::new(vec![Payload::Reputation(ReputationNote {
            short_description: Some("Feared in the lower wards".into()),
            long_description: Some("Everyone crosses the street".into()),
        })]);

        let delta = Delta { reputation_delta: Some(-3), ..Delta::default() };
        let report = apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();

        assert_eq!(state.reputation, -3);
        assert_eq!(state.reputation_description, "Feared in the lower wards");
        assert!(matches!(
            report.events.as_slice(),
            [GameEvent::Loss { attribute, amount: -3 }] if attribute == "reputation"
        ));
    }

    #[test]
    fn duplicate_item_names_are_tolerated_on_add() {
        let mut state = healthy_state();
        state.inventory.push(InventoryItem { name: "Ration".into(), ..Default::default() });

        let delta = Delta {
            inventory_added: Some(InventoryItem { name: "Ration".into(), ..Default::default() }),
            ..Delta::default()
        };
        let provider = ScriptedProvider::empty();
        apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();

        assert_eq!(state.inventory.len(), 2);
    }

    #[test]
    fn removing_a_missing_item_queues_no_event() {
        let mut state = healthy_state();
        let delta = Delta { inventory_removed: Some("Ghost".into()), ..Delta::default() };
        let provider = ScriptedProvider::empty();
        let report = apply(&mut state, &delta, &GameOptions::default(), &provider).unwrap();
        assert!(report.events.is_empty());
    }
}
