use std::cell::RefCell;
use std::rc::Rc;

use swipedeck::{Card, Deck, DeckEvent, ListenerId, PhysicsEngine};

/// Records every event a deck fires, in order.
#[derive(Debug)]
pub struct EventLog<C> {
    events: Rc<RefCell<Vec<DeckEvent<C>>>>,
    listener: ListenerId,
}

impl<C: Card> EventLog<C> {
    pub fn attach<E: PhysicsEngine + 'static>(deck: &mut Deck<C, E>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let listener = deck.add_listener(move |event| sink.borrow_mut().push(event.clone()));
        Self { events, listener }
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    pub fn events(&self) -> Vec<DeckEvent<C>> {
        self.events.borrow().clone()
    }

    /// Event names in firing order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(DeckEvent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.name() == name)
            .count()
    }

    /// Cards of the events called `name`, in firing order.
    pub fn cards(&self, name: &str) -> Vec<C> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.name() == name)
            .map(|event| event.card().clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
