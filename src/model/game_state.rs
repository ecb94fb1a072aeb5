use serde::{Deserialize, Serialize};

/// The persistent record of one narrative session.
/// Only the effect applier mutates this outside of import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub health: i64,
    pub armor: i64,
    pub money: i64,
    pub experience: i64,
    pub reputation: i64,

    pub health_description: String,
    pub reputation_description: String,
    pub money_name: String,
    pub weight_unit: String,
    pub weight_capacity: i64,

    #[serde(default)]
    pub scene: String,
    #[serde(default)]
    pub scene_emoji: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub location_description: String,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub weather_emoji: String,
    #[serde(default)]
    pub weather_description: String,
    #[serde(default)]
    pub rumor: String,
    #[serde(default)]
    pub appearance: String,

    /// Suggested next actions, refreshed by every update payload.
    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            health: 0,
            armor: 0,
            money: 0,
            experience: 0,
            reputation: 0,
            health_description: "Healthy".to_string(),
            reputation_description: "Neutral".to_string(),
            money_name: "Credits".to_string(),
            weight_unit: "lbs".to_string(),
            weight_capacity: 100,
            scene: String::new(),
            scene_emoji: String::new(),
            location: String::new(),
            location_description: String::new(),
            weather: String::new(),
            weather_emoji: String::new(),
            weather_description: String::new(),
            rumor: String::new(),
            appearance: String::new(),
            actions: Vec::new(),
            inventory: Vec::new(),
            abilities: Vec::new(),
            characters: Vec::new(),
            quests: Vec::new(),
        }
    }
}

impl GameState {
    /// Player level derived from accumulated experience.
    pub fn level(&self) -> u32 {
        (0.1 * (self.experience.max(0) as f64).sqrt()).round() as u32 + 1
    }

    /// Total weight of everything in the inventory.
    pub fn weight_carried(&self) -> f64 {
        self.inventory.iter().map(|item| item.weight).sum()
    }

    pub fn overburdened(&self) -> bool {
        self.weight_carried() > self.weight_capacity as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub rarity: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub consumable: bool,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A non-player character. The player is never stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub health: i64,
    #[serde(default)]
    pub health_description: String,
    #[serde(default)]
    pub armor: i64,
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub reputation: i64,
    #[serde(default)]
    pub reputation_description: String,
    #[serde(default = "default_true")]
    pub alive: bool,
    #[serde(default)]
    pub hostile: bool,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub reward: QuestReward,
}

/// Settled into player totals before the quest leaves the list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestReward {
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub experience: i64,
    #[serde(default)]
    pub reputation: i64,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
}
