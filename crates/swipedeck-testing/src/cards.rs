use std::cell::Cell;
use std::rc::Rc;

use swipedeck::{Card, Size};

/// A card identified by number, with a fixed integral size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestCard {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl TestCard {
    pub const DEFAULT_WIDTH: u32 = 200;
    pub const DEFAULT_HEIGHT: u32 = 300;

    pub fn new(id: u32) -> Self {
        Self::sized(id, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }

    pub fn sized(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

impl Card for TestCard {
    fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Hands out numbered cards and counts how many were pulled.
///
/// Sources created from one factory share its counter, so a test can keep the
/// factory and install the source on a deck.
#[derive(Clone, Debug, Default)]
pub struct CardFactory {
    next_id: Rc<Cell<u32>>,
    pulled: Rc<Cell<usize>>,
}

impl CardFactory {
    /// Numbering starts at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first_id: u32) -> Self {
        Self {
            next_id: Rc::new(Cell::new(first_id)),
            pulled: Rc::new(Cell::new(0)),
        }
    }

    pub fn next_card(&self) -> TestCard {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.pulled.set(self.pulled.get() + 1);
        TestCard::new(id)
    }

    /// Number of cards handed out so far.
    pub fn pulled(&self) -> usize {
        self.pulled.get()
    }

    /// A source that never runs dry.
    pub fn endless(&self) -> impl FnMut() -> Option<TestCard> + 'static {
        let factory = self.clone();
        move || Some(factory.next_card())
    }

    /// A source that yields `count` cards and then nothing.
    pub fn limited(&self, count: usize) -> impl FnMut() -> Option<TestCard> + 'static {
        let factory = self.clone();
        let mut remaining = count;
        move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            Some(factory.next_card())
        }
    }
}

/// A source replaying `cards` in order.
pub fn scripted(cards: Vec<TestCard>) -> impl FnMut() -> Option<TestCard> + 'static {
    let mut cards = cards.into_iter();
    move || cards.next()
}
