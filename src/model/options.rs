use serde::{Deserialize, Serialize};

/// Session options. Unset fields are filled in during session creation,
/// either from the built-in universe list or by single-purpose provider calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOptions {
    pub universe: Option<String>,
    pub player_name: Option<String>,
    pub player_class: Option<String>,
    pub language: String,
    #[serde(default)]
    pub prompts: Prompts,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            universe: None,
            player_name: None,
            player_class: None,
            language: "en".to_string(),
            prompts: Prompts::default(),
        }
    }
}

impl GameOptions {
    pub fn universe(&self) -> &str {
        self.universe.as_deref().unwrap_or("")
    }

    pub fn player_name(&self) -> &str {
        self.player_name.as_deref().unwrap_or("")
    }

    pub fn player_class(&self) -> &str {
        self.player_class.as_deref().unwrap_or("")
    }
}

/// Instruction strings prepended to the single-purpose provider calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompts {
    pub create: String,
    pub name: String,
    pub class: String,
    pub summarize: String,
    pub quest: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            create: "Create game".to_string(),
            name: "Get name".to_string(),
            class: "Get class".to_string(),
            summarize: "Summarize this".to_string(),
            quest: "Set the scene and actions to match the next step of this quest".to_string(),
        }
    }
}

/// Fallback universes used when the caller does not pick one.
pub const UNIVERSES: &[&str] = &[
    "Cyberpunk",
    "High Fantasy",
    "Space Opera",
    "Post-Apocalyptic Wasteland",
    "Steampunk",
    "Noir Detective",
    "Wild West",
    "Lovecraftian Horror",
    "Pirate Age",
    "Feudal Japan",
    "Norse Mythology",
    "Solarpunk",
    "Victorian Gothic",
    "Dieselpunk",
    "Age of Sail",
    "Roaring Twenties",
    "Arthurian Legend",
    "Galactic Empire",
    "Sword and Sorcery",
    "Urban Fantasy",
];
