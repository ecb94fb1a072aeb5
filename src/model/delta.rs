use serde::{Deserialize, Serialize};

use crate::model::game_state::{Ability, Character, GameState, InventoryItem, Quest};

/// One turn's worth of changes, as returned by the update toolset.
/// Every field is optional; absent fields are no-ops for the applier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delta {
    pub health_delta: Option<i64>,
    pub armor_delta: Option<i64>,
    pub money_delta: Option<i64>,
    pub experience_delta: Option<i64>,
    pub reputation_delta: Option<i64>,

    pub inventory_added: Option<InventoryItem>,
    pub inventory_removed: Option<String>,
    pub character_added: Option<Character>,
    pub character_removed: Option<String>,
    pub quest_added: Option<Quest>,
    pub quest_removed: Option<String>,

    pub scene: Option<String>,
    pub scene_emoji: Option<String>,
    pub actions: Option<Vec<String>>,
    pub rumor: Option<String>,
    pub location: Option<String>,
    pub location_description: Option<String>,
    pub appearance: Option<String>,
    pub weather: Option<String>,
    pub weather_emoji: Option<String>,
    pub weather_description: Option<String>,
    pub health_description: Option<String>,
    pub reputation_description: Option<String>,
}

/// Reply from the chat toolset: the character's line plus optional
/// game effects in the same shape as an update delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub name: String,
    pub dialog: String,
    pub effects: Option<Delta>,
}

impl ChatReply {
    /// Promote the nested effects to a top-level delta so the applier can
    /// treat a chat-shaped turn uniformly with an update turn.
    pub fn promote(&self) -> Delta {
        self.effects.clone().unwrap_or_default()
    }
}

/// Payload of the create toolset: a full world seed merged over the
/// session defaults at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSeed {
    pub health: Option<i64>,
    pub armor: Option<i64>,
    pub money: Option<i64>,
    pub experience: Option<i64>,
    pub reputation: Option<i64>,
    pub money_name: Option<String>,
    pub weight_unit: Option<String>,
    pub weight_capacity: Option<i64>,
    pub health_description: Option<String>,
    pub reputation_description: Option<String>,
    pub scene: Option<String>,
    pub scene_emoji: Option<String>,
    pub actions: Option<Vec<String>>,
    pub rumor: Option<String>,
    pub location: Option<String>,
    pub location_description: Option<String>,
    pub appearance: Option<String>,
    pub weather: Option<String>,
    pub weather_emoji: Option<String>,
    pub weather_description: Option<String>,
    pub inventory: Option<Vec<InventoryItem>>,
    pub abilities: Option<Vec<Ability>>,
    pub characters: Option<Vec<Character>>,
    pub quests: Option<Vec<Quest>>,
}

impl WorldSeed {
    /// Merge the seed over the session defaults, keeping defaults for
    /// anything the provider left out.
    pub fn absorb_into(self, state: &mut GameState) {
        if let Some(health) = self.health {
            state.health = health;
        }
        if let Some(armor) = self.armor {
            state.armor = armor;
        }
        if let Some(money) = self.money {
            state.money = money;
        }
        if let Some(experience) = self.experience {
            state.experience = experience;
        }
        if let Some(reputation) = self.reputation {
            state.reputation = reputation;
        }
        if let Some(money_name) = self.money_name {
            state.money_name = money_name;
        }
        if let Some(weight_unit) = self.weight_unit {
            state.weight_unit = weight_unit;
        }
        if let Some(weight_capacity) = self.weight_capacity {
            state.weight_capacity = weight_capacity;
        }
        if let Some(description) = self.health_description {
            state.health_description = description;
        }
        if let Some(description) = self.reputation_description {
            state.reputation_description = description;
        }
        if let Some(scene) = self.scene {
            state.scene = scene;
        }
        if let Some(emoji) = self.scene_emoji {
            state.scene_emoji = emoji;
        }
        if let Some(actions) = self.actions {
            state.actions = actions;
        }
        if let Some(rumor) = self.rumor {
            state.rumor = rumor;
        }
        if let Some(location) = self.location {
            state.location = location;
        }
        if let Some(description) = self.location_description {
            state.location_description = description;
        }
        if let Some(appearance) = self.appearance {
            state.appearance = appearance;
        }
        if let Some(weather) = self.weather {
            state.weather = weather;
        }
        if let Some(emoji) = self.weather_emoji {
            state.weather_emoji = emoji;
        }
        if let Some(description) = self.weather_description {
            state.weather_description = description;
        }
        if let Some(inventory) = self.inventory {
            state.inventory = inventory;
        }
        if let Some(abilities) = self.abilities {
            state.abilities = abilities;
        }
        if let Some(characters) = self.characters {
            state.characters = characters;
        }
        if let Some(quests) = self.quests {
            state.quests = quests;
        }
    }
}

/// Payload of the reputation toolset. The short, first-person form is
/// preferred when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReputationNote {
    pub short_description: Option<String>,
    pub long_description: Option<String>,
}

impl ReputationNote {
    pub fn into_description(self) -> Option<String> {
        self.short_description.or(self.long_description)
    }
}
