use std::time::Duration;

use swipedeck::{ConfigError, Deck, DeckConfig, Point, PointerId, Size, Vector};
use swipedeck_core::{Clock, ManualClock};

use crate::cards::{CardFactory, TestCard};
use crate::recorder::EventLog;

/// Frame interval the robot advances the deck by.
pub const FRAME: Duration = Duration::from_millis(16);

/// Headless harness that owns a deck, a manual clock and an event log, and
/// drives the deck the way a host would: pointer events stamped with the
/// clock's time and one `advance` per frame.
pub struct DeckRobot {
    deck: Deck<TestCard>,
    clock: ManualClock,
    factory: CardFactory,
    log: EventLog<TestCard>,
    next_pointer: PointerId,
    pressed: Option<(TestCard, PointerId)>,
}

impl DeckRobot {
    /// A deck of `bounds` fed by an endless card source.
    pub fn launch(bounds: Size) -> Self {
        let mut robot = Self::empty(bounds);
        let source = robot.factory.endless();
        robot.deck.set_next_view(source);
        robot
    }

    pub fn launch_with_config(bounds: Size, config: DeckConfig) -> Result<Self, ConfigError> {
        let mut robot = Self::empty(bounds);
        robot.deck.set_config(config)?;
        let source = robot.factory.endless();
        robot.deck.set_next_view(source);
        Ok(robot)
    }

    /// A deck without a card source.
    pub fn empty(bounds: Size) -> Self {
        let mut deck = Deck::new(bounds);
        let log = EventLog::attach(&mut deck);
        let clock = ManualClock::new();
        deck.advance(clock.now_nanos());
        Self {
            deck,
            clock,
            factory: CardFactory::new(),
            log,
            next_pointer: 1,
            pressed: None,
        }
    }

    pub fn deck(&self) -> &Deck<TestCard> {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck<TestCard> {
        &mut self.deck
    }

    pub fn factory(&self) -> &CardFactory {
        &self.factory
    }

    pub fn events(&self) -> &EventLog<TestCard> {
        &self.log
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Advances the clock by one frame and lets the deck catch up.
    pub fn step(&mut self) {
        let now = self.clock.advance_nanos(FRAME.as_nanos() as u64);
        self.deck.advance(now);
    }

    pub fn run_for(&mut self, duration: Duration) {
        let frames = duration.as_nanos().div_ceil(FRAME.as_nanos());
        for _ in 0..frames {
            self.step();
        }
    }

    /// Steps until no thrown card is left on screen or `max_frames` ran out.
    /// Returns whether the deck settled.
    pub fn pump_until_reclaimed(&mut self, max_frames: usize) -> bool {
        for _ in 0..max_frames {
            if self.deck.departing_cards().is_empty() {
                return true;
            }
            self.step();
        }
        self.deck.departing_cards().is_empty()
    }

    /// Center of the top card's frame.
    pub fn top_center(&self) -> Option<Point> {
        let top = self.deck.top_card()?;
        self.deck.card_frame(&top).map(|frame| frame.center())
    }

    /// Presses a fresh pointer on `card` at `location`.
    pub fn press(&mut self, card: &TestCard, location: Point) -> bool {
        let pointer = self.next_pointer;
        self.next_pointer += 1;
        let taken = self
            .deck
            .pointer_down(card, pointer, location, self.clock.now_millis());
        if taken {
            self.pressed = Some((card.clone(), pointer));
        }
        log::trace!("robot pressed {:?} with pointer {pointer}: {taken}", card);
        taken
    }

    pub fn move_to(&mut self, location: Point) -> bool {
        let Some((card, pointer)) = self.pressed.clone() else {
            return false;
        };
        self.deck
            .pointer_move(&card, pointer, location, self.clock.now_millis())
    }

    pub fn release(&mut self, location: Point) -> bool {
        let Some((card, pointer)) = self.pressed.take() else {
            return false;
        };
        self.deck
            .pointer_up(&card, pointer, location, self.clock.now_millis())
    }

    pub fn cancel(&mut self) -> bool {
        let Some((card, pointer)) = self.pressed.take() else {
            return false;
        };
        self.deck.pointer_cancel(&card, pointer)
    }

    /// Presses and releases on the center of `card` within one frame.
    pub fn tap(&mut self, card: &TestCard) -> bool {
        let Some(center) = self.deck.card_frame(card).map(|frame| frame.center()) else {
            return false;
        };
        self.press(card, center) && self.release(center)
    }

    /// Grabs `card` at its center, moves it by `delta` over `moves` frames and
    /// lets go without pausing, so the release carries the drag's speed.
    pub fn drag(&mut self, card: &TestCard, delta: Vector, moves: u32) -> bool {
        let Some(start) = self.deck.card_frame(card).map(|frame| frame.center()) else {
            return false;
        };
        if !self.press(card, start) {
            return false;
        }
        let moves = moves.max(1);
        for index in 1..=moves {
            self.step();
            self.move_to(start + delta * (index as f32 / moves as f32));
        }
        self.release(start + delta)
    }
}
