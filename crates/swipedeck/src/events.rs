//! Notifications fired by a deck.

use std::fmt;

use swipedeck_geometry::{Point, Vector};

use crate::direction::Direction;

#[derive(Clone, Debug, PartialEq)]
pub enum DeckEvent<C> {
    DragStart {
        card: C,
        location: Point,
    },
    Dragging {
        card: C,
        location: Point,
        translation: Vector,
    },
    DragEnd {
        card: C,
        location: Point,
    },
    /// A card was swiped away, by gesture or programmatically.
    Swipe {
        card: C,
        direction: Direction,
        vector: Vector,
    },
    /// A drag was released without swiping; the card snaps back.
    DragCancel {
        card: C,
    },
    Tap {
        card: C,
        location: Point,
    },
    /// A card stopped being tracked by the deck.
    Disappear {
        card: C,
    },
}

impl<C> DeckEvent<C> {
    pub fn card(&self) -> &C {
        match self {
            DeckEvent::DragStart { card, .. }
            | DeckEvent::Dragging { card, .. }
            | DeckEvent::DragEnd { card, .. }
            | DeckEvent::Swipe { card, .. }
            | DeckEvent::DragCancel { card }
            | DeckEvent::Tap { card, .. }
            | DeckEvent::Disappear { card } => card,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeckEvent::DragStart { .. } => "drag_start",
            DeckEvent::Dragging { .. } => "dragging",
            DeckEvent::DragEnd { .. } => "drag_end",
            DeckEvent::Swipe { .. } => "swipe",
            DeckEvent::DragCancel { .. } => "drag_cancel",
            DeckEvent::Tap { .. } => "tap",
            DeckEvent::Disappear { .. } => "disappear",
        }
    }
}

/// Handle returned by [`Deck::add_listener`](crate::Deck::add_listener).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<C> = Box<dyn FnMut(&DeckEvent<C>)>;

pub(crate) struct Listeners<C> {
    entries: Vec<(ListenerId, Listener<C>)>,
    next_id: u64,
}

impl<C> Listeners<C> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, listener: impl FnMut(&DeckEvent<C>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        before != self.entries.len()
    }

    pub(crate) fn emit(&mut self, event: DeckEvent<C>) {
        for (_, listener) in self.entries.iter_mut() {
            listener(&event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<C> fmt::Debug for Listeners<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
