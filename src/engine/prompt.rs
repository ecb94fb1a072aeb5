//! Prompt assembly for the resolvers. These functions only format text;
//! no parsing, no networking, no engine logic.

use crate::model::game_state::{Character, GameState, Quest};
use crate::model::options::GameOptions;

/// Context summary appended to a free-form action: current stats, the
/// names of everything the player carries, knows and pursues, and the
/// condensed last action / last scene.
pub fn action_context(
    options: &GameOptions,
    state: &GameState,
    last_action: &str,
    last_scene: &str,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("language: {}\n", options.language));
    prompt.push_str(&format!("universe: {}\n", options.universe()));
    prompt.push_str(&format!("name: {}\n", options.player_name()));
    prompt.push_str(&format!("class: {}\n", options.player_class()));
    prompt.push_str(&format!("health: {}\n", state.health));
    prompt.push_str(&format!("armor: {}\n", state.armor));
    prompt.push_str(&format!("money: {}\n", state.money));
    prompt.push_str(&format!("experience: {}\n", state.experience));
    prompt.push_str(&format!("reputation: {}\n", state.reputation));

    let inventory: Vec<&str> = state.inventory.iter().map(|item| item.name.as_str()).collect();
    prompt.push_str(&format!("inventory: {}\n", inventory.join(", ")));

    let characters: Vec<&str> = state.characters.iter().map(|c| c.name.as_str()).collect();
    prompt.push_str(&format!("characters: {}\n", characters.join(", ")));

    let quests: Vec<String> = state
        .quests
        .iter()
        .map(|quest| quest_summary(quest, &state.money_name))
        .collect();
    prompt.push_str(&format!("quests: {}\n", quests.join(" | ")));

    prompt.push_str(&format!("last action: {last_action}\n"));
    prompt.push_str(&format!("last scene: {last_scene}\n"));

    prompt
}

/// One quest condensed to its name and reward digest.
fn quest_summary(quest: &Quest, money_name: &str) -> String {
    let reward_items: Vec<String> = quest
        .reward
        .inventory
        .iter()
        .map(|item| format!("{} ({}, {} {})", item.name, item.kind, item.value, money_name))
        .collect();

    format!(
        "{}: {} experience, {} {}, {} reputation, {}",
        quest.name,
        quest.reward.experience,
        quest.reward.money,
        money_name,
        quest.reward.reputation,
        reward_items.join(" | ")
    )
}

/// Role-play framing for a directed conversation: the world as the
/// character knows it, their full stat block, and the player as the
/// character sees them.
pub fn roleplay_prompt(options: &GameOptions, state: &GameState, character: &Character) -> String {
    let mut prompt = String::new();

    prompt.push_str("Game Info:\n");
    prompt.push_str(&format!("Universe: {}\n", options.universe()));
    prompt.push_str(&format!(
        "Location: {} ({})\n",
        state.location, state.location_description
    ));
    prompt.push_str(&format!(
        "Weather: {} ({})\n",
        state.weather, state.weather_description
    ));
    prompt.push_str(&format!("Rumor: {}\n", state.rumor));

    let characters: Vec<&str> = state.characters.iter().map(|c| c.name.as_str()).collect();
    prompt.push_str(&format!(
        "Characters: {}\n",
        if characters.is_empty() { "None".to_string() } else { characters.join(", ") }
    ));
    prompt.push_str(&format!("Scene (from player perspective): {}\n\n", state.scene));

    prompt.push_str(&format!(
        "I am the character, {}, with these stats:\n",
        character.name
    ));
    prompt.push_str(&format!("Health: {}\n", character.health));
    prompt.push_str(&format!("Armor: {}\n", character.armor));
    prompt.push_str(&format!("Money: {}\n", character.money));
    prompt.push_str(&format!("Reputation: {}\n", character.reputation));

    let inventory: Vec<&str> = character.inventory.iter().map(|item| item.name.as_str()).collect();
    prompt.push_str(&format!(
        "Inventory: {}\n",
        if inventory.is_empty() { "None".to_string() } else { inventory.join(", ") }
    ));

    let abilities: Vec<String> = character
        .abilities
        .iter()
        .map(|ability| format!("{} ({})", ability.name, ability.description))
        .collect();
    prompt.push_str(&format!(
        "Abilities: {}\n",
        if abilities.is_empty() { "None".to_string() } else { abilities.join(" | ") }
    ));
    prompt.push_str(&format!(
        "I am {} to the player\n",
        if character.hostile { "hostile" } else { "friendly" }
    ));
    prompt.push_str(&format!(
        "I am {}\n\n",
        if character.alive { "alive" } else { "dead" }
    ));

    prompt.push_str(&format!(
        "I am speaking to the player, {}, class of {}, with these stats:\n",
        options.player_name(),
        options.player_class()
    ));
    prompt.push_str(&format!("Armor: {}%\n", state.armor));
    prompt.push_str(&format!("Money: {}\n", state.money));
    prompt.push_str(&format!("Health (from player perspective): {}\n", state.health));
    prompt.push_str(&format!(
        "Reputation (from player perspective): {} ({})\n",
        state.reputation, state.reputation_description
    ));
    prompt.push_str(&format!(
        "Appearance (from player perspective): {}\n\n",
        state.appearance
    ));

    prompt.push_str(&format!(
        "I can't forget, I'm {} speaking to {} - I must not break character!\n",
        character.name,
        options.player_name()
    ));

    prompt
}
