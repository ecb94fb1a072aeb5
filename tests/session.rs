//! Full session round trips driven by a scripted provider.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use aige::{
    create_session, ActionResolver, ChatReply, ChatResolver, Character, Delta, EngineError,
    EventBus, EventKind, GameEvent, GameOptions, GenerativeProvider, InventoryItem, Payload,
    PromptMessage, Quest, QuestReward, StateStore, ToolKind, WorldSeed,
};

struct ScriptedProvider {
    script: RefCell<VecDeque<Payload>>,
    tokens: std::cell::Cell<u64>,
}

impl ScriptedProvider {
    fn new(script: Vec<Payload>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            tokens: std::cell::Cell::new(0),
        }
    }
}

impl GenerativeProvider for ScriptedProvider {
    fn generate(
        &self,
        _toolset: &[ToolKind],
        _force: Option<ToolKind>,
        _messages: &[PromptMessage],
    ) -> Result<Payload, EngineError> {
        self.tokens.set(self.tokens.get() + 10);
        self.script
            .borrow_mut()
            .pop_front()
            .ok_or(EngineError::ProviderEmptyResponse)
    }

    fn tokens(&self) -> u64 {
        self.tokens.get()
    }

    fn set_tokens(&self, tokens: u64) {
        self.tokens.set(tokens);
    }
}

fn summaries() -> Vec<Payload> {
    vec![
        Payload::Text("did something".into()),
        Payload::Text("somewhere".into()),
    ]
}

#[test]
fn a_created_session_survives_an_action_turn() -> anyhow::Result<()> {
    let mut script = vec![
        Payload::Text("Punk".into()),
        Payload::Text("Hacker".into()),
        Payload::Create(Box::new(WorldSeed {
            health: Some(100),
            armor: Some(20),
            money: Some(30),
            scene: Some("A neon market".into()),
            ..WorldSeed::default()
        })),
    ];
    script.extend(summaries());
    script.push(Payload::Update(Box::new(Delta {
        scene: Some("A back alley".into()),
        money_delta: Some(-10),
        experience_delta: Some(5),
        ..Delta::default()
    })));

    let provider = ScriptedProvider::new(script);
    let mut options = GameOptions {
        universe: Some("Cyberpunk".into()),
        ..GameOptions::default()
    };
    let mut store = StateStore::new();
    let mut bus = EventBus::new();

    create_session(&mut options, &provider, &mut store, &mut bus)?;
    assert_eq!(store.data.scene, "A neon market");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    bus.on(EventKind::Loss, move |event| {
        if let GameEvent::Loss { attribute, amount } = event {
            log.borrow_mut().push((attribute.clone(), *amount));
        }
    });
    let log = Rc::clone(&seen);
    bus.on(EventKind::Gain, move |event| {
        if let GameEvent::Gain { attribute, amount } = event {
            log.borrow_mut().push((attribute.clone(), *amount));
        }
    });

    ActionResolver::new(&provider, &options).resolve("slip into the alley", &mut store, &mut bus)?;

    assert_eq!(store.data.scene, "A back alley");
    assert_eq!(store.data.money, 20);
    assert_eq!(store.data.experience, 5);
    assert_eq!(
        *seen.borrow(),
        vec![("money".to_string(), -10), ("experience".to_string(), 5)]
    );
    Ok(())
}

#[test]
fn quest_completion_pays_out_before_removal() -> anyhow::Result<()> {
    let mut script = summaries();
    script.push(Payload::Update(Box::new(Delta {
        quest_removed: Some("Heist".into()),
        ..Delta::default()
    })));
    let provider = ScriptedProvider::new(script);
    let options = GameOptions::default();
    let mut bus = EventBus::new();

    let mut store = StateStore::new();
    store.data.health = 100;
    store.data.money = 0;
    store.data.quests.push(Quest {
        name: "Heist".into(),
        reward: QuestReward {
            money: 500,
            experience: 50,
            reputation: 2,
            inventory: vec![InventoryItem { name: "Datachip".into(), ..Default::default() }],
        },
        ..Default::default()
    });

    let observed = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&observed);
    bus.on(EventKind::QuestRemoved, move |event| {
        if let GameEvent::QuestRemoved { quest } = event {
            *slot.borrow_mut() = Some(quest.name.clone());
        }
    });

    ActionResolver::new(&provider, &options).resolve("fence the loot", &mut store, &mut bus)?;

    assert_eq!(store.data.money, 500);
    assert_eq!(store.data.experience, 50);
    assert_eq!(store.data.reputation, 2);
    assert!(store.data.inventory.iter().any(|i| i.name == "Datachip"));
    assert!(store.data.quests.is_empty());
    assert_eq!(observed.borrow().as_deref(), Some("Heist"));
    Ok(())
}

#[test]
fn dialogue_threads_stay_separate_and_export_round_trips() -> anyhow::Result<()> {
    let provider = ScriptedProvider::new(vec![
        Payload::Chat(Box::new(ChatReply {
            name: "Ayla".into(),
            dialog: "Well met.".into(),
            effects: None,
        })),
        Payload::Chat(Box::new(ChatReply {
            name: "Brom".into(),
            dialog: "Hmph.".into(),
            effects: None,
        })),
    ]);
    let options = GameOptions::default();
    let mut bus = EventBus::new();

    let mut store = StateStore::new();
    store.data.health = 100;
    for name in ["Ayla", "Brom"] {
        store.data.characters.push(Character { name: name.into(), ..Default::default() });
    }

    let resolver = ChatResolver::new(&provider, &options);
    resolver.converse("Ayla", "Hello there", &mut store, &mut bus)?;
    resolver.converse("Brom", "And you", &mut store, &mut bus)?;

    assert_eq!(store.chats.len(), 2);
    assert_eq!(store.thread("Ayla").unwrap().messages.len(), 2);
    assert_eq!(store.thread("Brom").unwrap().messages.len(), 2);

    let save = store.export(&options, provider.tokens());

    let restored_provider = ScriptedProvider::new(Vec::new());
    let mut restored = StateStore::new();
    let (restored_options, tokens) = restored.import(save, &mut bus);
    restored_provider.set_tokens(tokens);

    assert_eq!(restored.id, store.id);
    assert_eq!(restored.chats.len(), 2);
    assert_eq!(restored_options.language, options.language);
    assert_eq!(restored_provider.tokens(), 20);
    Ok(())
}

#[test]
fn dying_mid_turn_keeps_earlier_mutations() {
    let mut script = summaries();
    script.push(Payload::Update(Box::new(Delta {
        health_delta: Some(-200),
        inventory_added: Some(InventoryItem { name: "Cursed Idol".into(), ..Default::default() }),
        scene: Some("The tomb".into()),
        ..Delta::default()
    })));
    let provider = ScriptedProvider::new(script);
    let options = GameOptions::default();
    let mut bus = EventBus::new();

    let mut store = StateStore::new();
    store.data.health = 50;
    store.data.scene = "The antechamber".into();

    let died = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&died);
    bus.on(EventKind::Death, move |_| *flag.borrow_mut() = true);

    let err = ActionResolver::new(&provider, &options)
        .resolve("grab the idol", &mut store, &mut bus)
        .unwrap_err();

    assert!(matches!(err, EngineError::PlayerDeath));
    assert!(*died.borrow());
    assert_eq!(store.data.health, 0);
    assert_eq!(store.data.scene, "The antechamber");
    assert!(store.data.inventory.iter().any(|i| i.name == "Cursed Idol"));
}
