//! Response schema configuration for the generative provider.
//!
//! Each [`ToolKind`] maps to one function-call schema constraining the shape
//! of the provider's reply, and [`decode`] turns the raw arguments of an
//! invoked tool back into a typed [`Payload`]. Parsing fails fast here so
//! nothing downstream has to poke at untyped JSON.

use serde_json::{json, Value};

use crate::engine::error::EngineError;
use crate::engine::provider::{Payload, ToolKind};
use crate::model::delta::{ChatReply, Delta, ReputationNote, WorldSeed};

impl ToolKind {
    pub fn function_name(&self) -> &'static str {
        match self {
            ToolKind::Create => "create_game",
            ToolKind::Update => "update_game",
            ToolKind::Chat => "chat",
            ToolKind::Reputation => "describe_reputation",
            ToolKind::Name => "set_name",
            ToolKind::Class => "set_class",
            ToolKind::Summarize => "summarize",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        match name {
            "create_game" => Some(ToolKind::Create),
            "update_game" => Some(ToolKind::Update),
            "chat" => Some(ToolKind::Chat),
            "describe_reputation" => Some(ToolKind::Reputation),
            "set_name" => Some(ToolKind::Name),
            "set_class" => Some(ToolKind::Class),
            "summarize" => Some(ToolKind::Summarize),
            _ => None,
        }
    }
}

/// Decode the arguments of an invoked tool into a typed payload.
pub fn decode(kind: ToolKind, args: Value) -> Result<Payload, EngineError> {
    let parse_error = |source| EngineError::ProviderArgumentParse {
        tool: kind.function_name().to_string(),
        source,
    };

    match kind {
        ToolKind::Create => {
            let seed: WorldSeed = serde_json::from_value(args).map_err(parse_error)?;
            Ok(Payload::Create(Box::new(seed)))
        }
        ToolKind::Update => {
            let delta: Delta = serde_json::from_value(args).map_err(parse_error)?;
            Ok(Payload::Update(Box::new(delta)))
        }
        ToolKind::Chat => {
            let reply: ChatReply = serde_json::from_value(args).map_err(parse_error)?;
            Ok(Payload::Chat(Box::new(reply)))
        }
        ToolKind::Reputation => {
            let note: ReputationNote = serde_json::from_value(args).map_err(parse_error)?;
            Ok(Payload::Reputation(note))
        }
        ToolKind::Name => extract_string(kind, args, "name").map(Payload::Text),
        ToolKind::Class => extract_string(kind, args, "class").map(Payload::Text),
        ToolKind::Summarize => extract_string(kind, args, "summary").map(Payload::Text),
    }
}

fn extract_string(kind: ToolKind, args: Value, field: &str) -> Result<String, EngineError> {
    use serde::de::Error as _;

    match args.get(field).and_then(Value::as_str) {
        Some(text) => Ok(text.to_string()),
        None => Err(EngineError::ProviderArgumentParse {
            tool: kind.function_name().to_string(),
            source: serde_json::Error::custom(format!("missing string field '{field}'")),
        }),
    }
}

/// Full function-call schema for one tool, in the provider's wire format.
pub fn schema(kind: ToolKind) -> Value {
    match kind {
        ToolKind::Create => json!({
            "type": "function",
            "function": {
                "name": "create_game",
                "description": "Creates a new game; use the language parameter to determine the language of your responses",
                "parameters": {
                    "type": "object",
                    "required": [
                        "location", "location_description", "appearance", "scene", "scene_emoji",
                        "rumor", "health", "health_description", "armor", "money", "money_name",
                        "weight_capacity", "weight_unit", "experience", "reputation",
                        "reputation_description", "weather", "weather_emoji", "weather_description",
                        "actions", "inventory", "abilities", "characters", "quests"
                    ],
                    "properties": create_properties(),
                }
            }
        }),
        ToolKind::Update => json!({
            "type": "function",
            "function": {
                "name": "update_game",
                "description": "Commits a user action; returning the new scene and other updated game data",
                "parameters": {
                    "type": "object",
                    "required": ["scene", "scene_emoji", "actions", "rumor"],
                    "properties": update_properties(),
                }
            }
        }),
        ToolKind::Chat => json!({
            "type": "function",
            "function": {
                "name": "chat",
                "description": "Chat with a character, possibly affecting the game",
                "parameters": {
                    "type": "object",
                    "required": ["name", "dialog"],
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "The name of the character you are role-playing; must not be the player"
                        },
                        "dialog": {
                            "type": "string",
                            "description": "The dialog of your character"
                        },
                        "effects": {
                            "type": "object",
                            "description": "Effects of the conversation on the player",
                            "properties": update_properties(),
                        }
                    }
                }
            }
        }),
        ToolKind::Reputation => json!({
            "type": "function",
            "function": {
                "name": "describe_reputation",
                "description": "Describe the updated player reputation (negative reputation is bad, positive reputation is good)",
                "parameters": {
                    "type": "object",
                    "required": ["short_description"],
                    "properties": {
                        "long_description": {
                            "type": "string",
                            "description": "How other characters view the player"
                        },
                        "short_description": {
                            "type": "string",
                            "description": "A short first-person description of the reputation of the player"
                        }
                    }
                }
            }
        }),
        ToolKind::Name => json!({
            "type": "function",
            "function": {
                "name": "set_name",
                "description": "Set a random player name from the provided universe",
                "parameters": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string", "description": "The chosen name" }
                    }
                }
            }
        }),
        ToolKind::Class => json!({
            "type": "function",
            "function": {
                "name": "set_class",
                "description": "Set a player class fitting the universe and player name",
                "parameters": {
                    "type": "object",
                    "required": ["class"],
                    "properties": {
                        "class": { "type": "string", "description": "The chosen class" }
                    }
                }
            }
        }),
        ToolKind::Summarize => json!({
            "type": "function",
            "function": {
                "name": "summarize",
                "description": "Summarize the provided object using the least amount of tokens possible",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "summary": { "type": "string", "description": "The summary" }
                    }
                }
            }
        }),
    }
}

fn actions_schema() -> Value {
    json!({
        "type": "array",
        "description": "Suggested actions that the player can take",
        "minItems": 3,
        "maxItems": 6,
        "uniqueItems": true,
        "items": { "type": "string" }
    })
}

fn weather_schema() -> Value {
    json!({
        "type": "string",
        "description": "The weather of the location",
        "enum": [
            "clear", "cloudy", "rainy", "snowy", "stormy", "windy", "toxic", "radioactive",
            "volcanic", "sunny", "foggy", "hazy", "icy", "dusty", "sandy", "smoky", "humid",
            "dry", "hot", "cold", "blizzard", "hurricane", "tornado", "hail", "sleet",
            "drizzle", "drought", "flood", "monsoon"
        ]
    })
}

fn abilities_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "The name of the ability" },
                "description": { "type": "string", "description": "The description of the ability" }
            }
        }
    })
}

fn item_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "The name of the item" },
            "description": { "type": "string", "description": "The description of the item" },
            "value": { "type": "number", "description": "The value of the item" },
            "weight": { "type": "number", "description": "The weight of the item" },
            "rarity": { "type": "number", "description": "The rarity of the item" },
            "type": { "type": "string", "description": "The type of the item" },
            "consumable": { "type": "boolean", "description": "Whether or not the item is consumable" },
            "emoji": { "type": "string", "description": "The emoji of the item" }
        }
    })
}

fn quest_schema() -> Value {
    json!({
        "type": "object",
        "required": ["emoji", "name", "description", "completed", "reward"],
        "properties": {
            "emoji": { "type": "string", "description": "The emoji of the quest" },
            "name": { "type": "string", "description": "The name of the quest" },
            "description": { "type": "string", "description": "The description of the quest" },
            "completed": { "type": "boolean", "description": "Whether or not the quest is completed" },
            "reward": {
                "type": "object",
                "description": "The reward of the quest",
                "properties": {
                    "inventory": { "type": "array", "items": item_schema() },
                    "money": { "type": "number", "description": "The money of the reward" },
                    "experience": { "type": "number", "description": "The experience of the reward" },
                    "reputation": { "type": "number", "description": "The reputation of the reward" }
                }
            }
        }
    })
}

fn character_schema() -> Value {
    json!({
        "type": "object",
        "description": "A character; must not be the player",
        "properties": {
            "name": { "type": "string", "description": "The name of the character" },
            "description": { "type": "string", "description": "The description of the character" },
            "appearance": { "type": "string", "description": "The appearance of the character" },
            "emoji": { "type": "string", "description": "The emoji of the character" },
            "health": { "type": "number", "description": "The health of the character" },
            "health_description": { "type": "string", "description": "The description of the health of the character" },
            "armor": { "type": "number", "description": "The armor percentage of the character (0-100)" },
            "money": { "type": "number", "description": "The money of the character" },
            "alive": { "type": "boolean", "description": "Whether or not the character is alive" },
            "hostile": { "type": "boolean", "description": "Whether or not the character is hostile with the player" },
            "reputation": { "type": "number", "description": "The reputation of the character; 0 is neutral, negative is bad" },
            "reputation_description": { "type": "string", "description": "The description of the reputation of the character" },
            "inventory": { "type": "array", "items": item_schema() },
            "abilities": abilities_schema()
        }
    })
}

fn update_properties() -> Value {
    json!({
        "scene": {
            "type": "string",
            "description": "The new scene description after the action is committed; must be different from the last scene"
        },
        "scene_emoji": { "type": "string", "description": "An emoji that represents the new scene" },
        "actions": actions_schema(),
        "rumor": { "type": "string", "description": "A rumor that the player has heard" },
        "health_delta": {
            "type": "number",
            "description": "The change in health of the player (if armor is > 0, armor is damaged instead)"
        },
        "health_description": {
            "type": "string",
            "description": "The description of the new health of the player (first-person perspective)"
        },
        "armor_delta": {
            "type": "number",
            "description": "The change in armor of the player (if armor is 0, health is damaged instead)"
        },
        "money_delta": { "type": "number", "description": "The change in money of the player" },
        "experience_delta": { "type": "number", "description": "The change in experience of the player" },
        "reputation_delta": { "type": "number", "description": "The change in reputation of the player" },
        "reputation_description": {
            "type": "string",
            "description": "The description of the new reputation of the player; > 0 is good, < 0 is bad"
        },
        "inventory_added": item_schema(),
        "inventory_removed": { "type": "string", "description": "The item removed from the inventory (if any)" },
        "quest_added": quest_schema(),
        "quest_removed": {
            "type": "string",
            "description": "The name of the quest removed (if any), if complete give rewards"
        },
        "character_added": character_schema(),
        "character_removed": { "type": "string", "description": "The character removed (if any)" },
        "location": { "type": "string", "description": "The new location of the player (if changed)" },
        "location_description": { "type": "string", "description": "The description of the new location (if changed)" },
        "appearance": { "type": "string", "description": "The new appearance of the player (if changed)" },
        "weather": weather_schema(),
        "weather_emoji": { "type": "string", "description": "An emoji that represents the new weather (if changed)" },
        "weather_description": { "type": "string", "description": "The description of the new weather (if changed)" }
    })
}

fn create_properties() -> Value {
    json!({
        "actions": actions_schema(),
        "characters": { "type": "array", "items": character_schema() },
        "quests": { "type": "array", "items": quest_schema() },
        "inventory": { "type": "array", "items": item_schema() },
        "abilities": abilities_schema(),
        "location": { "type": "string", "description": "The location of the game" },
        "location_description": { "type": "string", "description": "The description of the location" },
        "appearance": { "type": "string", "description": "The appearance of the player" },
        "scene": {
            "type": "string",
            "description": "The vivid and immersive description of the current scene; this is the main text that the player sees"
        },
        "scene_emoji": { "type": "string", "description": "An emoji that represents the scene" },
        "rumor": { "type": "string", "description": "A rumor that the player has heard" },
        "health": { "type": "number", "description": "The health of the player" },
        "health_description": { "type": "string", "description": "The description of the health of the player (first-person perspective)" },
        "armor": { "type": "number", "description": "The armor of the player" },
        "money": { "type": "number", "description": "The money of the player" },
        "money_name": { "type": "string", "description": "The name of the money in this universe" },
        "weight_capacity": { "type": "number", "description": "The amount of weight the player can carry" },
        "weight_unit": { "type": "string", "description": "The unit of weight in this universe" },
        "experience": { "type": "number", "description": "The experience of the player" },
        "reputation": { "type": "number", "description": "The reputation of the player; 0 is neutral, negative is bad, positive is good" },
        "reputation_description": { "type": "string", "description": "The description of the reputation of the player (first-person perspective)" },
        "weather": weather_schema(),
        "weather_emoji": { "type": "string", "description": "The emoji of the weather" },
        "weather_description": { "type": "string", "description": "The description of the weather" }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_update_arguments() {
        let payload = decode(
            ToolKind::Update,
            json!({ "scene": "A dark alley", "health_delta": -5 }),
        )
        .unwrap();
        match payload {
            Payload::Update(delta) => {
                assert_eq!(delta.scene.as_deref(), Some("A dark alley"));
                assert_eq!(delta.health_delta, Some(-5));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn decode_create_keeps_the_player_abilities() {
        let payload = decode(
            ToolKind::Create,
            json!({
                "scene": "A frontier outpost",
                "abilities": [
                    { "name": "Lockpicking", "description": "Opens most mechanical locks" },
                    { "name": "Barter" }
                ]
            }),
        )
        .unwrap();
        let seed = match payload {
            Payload::Create(seed) => seed,
            other => panic!("unexpected payload: {other:?}"),
        };

        let mut state = crate::model::game_state::GameState::default();
        seed.absorb_into(&mut state);

        assert_eq!(state.abilities.len(), 2);
        assert_eq!(state.abilities[0].name, "Lockpicking");
        assert_eq!(state.abilities[1].description, "");
    }

    #[test]
    fn decode_rejects_malformed_arguments() {
        let err = decode(ToolKind::Update, json!({ "health_delta": "a lot" })).unwrap_err();
        assert!(matches!(err, EngineError::ProviderArgumentParse { .. }));
    }

    #[test]
    fn decode_summarize_extracts_the_summary() {
        let payload = decode(ToolKind::Summarize, json!({ "summary": "short" })).unwrap();
        match payload {
            Payload::Text(text) => assert_eq!(text, "short"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn function_names_round_trip() {
        for kind in [
            ToolKind::Create,
            ToolKind::Update,
            ToolKind::Chat,
            ToolKind::Reputation,
            ToolKind::Name,
            ToolKind::Class,
            ToolKind::Summarize,
        ] {
            assert_eq!(ToolKind::from_function_name(kind.function_name()), Some(kind));
        }
    }
}
