use std::collections::HashMap;

use crate::model::event::{EventKind, GameEvent};

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Synchronous, ordered publish/subscribe registry.
///
/// `emit` dispatches to every listener registered for the event's kind, in
/// registration order, before returning. Listeners must not invoke a
/// resolver against the same session; re-entrant resolution is out of
/// contract and is not guarded here.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.entry(kind).or_default().push(Box::new(listener));
    }

    pub fn emit(&mut self, event: &GameEvent) {
        if let Some(listeners) = self.listeners.get_mut(&event.kind()) {
            for listener in listeners.iter_mut() {
                listener(event);
            }
        }
    }

    pub fn emit_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn dispatches_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            bus.on(EventKind::Death, move |_| seen.borrow_mut().push(tag));
        }

        bus.emit(&GameEvent::Death);
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn only_the_registered_kind_fires() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();

        let hits = Rc::clone(&count);
        bus.on(EventKind::Gain, move |_| *hits.borrow_mut() += 1);

        bus.emit(&GameEvent::Loss { attribute: "money".into(), amount: -3 });
        assert_eq!(*count.borrow(), 0);

        bus.emit(&GameEvent::Gain { attribute: "money".into(), amount: 3 });
        assert_eq!(*count.borrow(), 1);
    }
}
