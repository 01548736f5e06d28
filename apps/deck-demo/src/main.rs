use std::thread;
use std::time::Duration;

use swipedeck::prelude::*;
use swipedeck_core::{Clock, SystemClock};

const BOUNDS: Size = Size::new(360.0, 640.0);
const FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Photo {
    id: u32,
}

impl Card for Photo {
    fn size(&self) -> Size {
        Size::new(300.0, 420.0)
    }
}

/// Deck plus the wall clock its events are stamped with.
struct Host {
    deck: Deck<Photo>,
    clock: SystemClock,
    pointer: PointerId,
}

impl Host {
    fn frame(&mut self) {
        thread::sleep(FRAME);
        self.deck.advance(self.clock.now_nanos());
    }

    fn idle(&mut self, duration: Duration) {
        let frames = duration.as_millis() / FRAME.as_millis();
        for _ in 0..frames {
            self.frame();
        }
    }

    fn drag_top(&mut self, delta: Vector, moves: u32) {
        let Some(card) = self.deck.top_card() else {
            log::warn!("nothing left to drag");
            return;
        };
        let start = BOUNDS.center();
        self.pointer += 1;
        let pointer = self.pointer;
        self.deck
            .pointer_down(&card, pointer, start, self.clock.now_millis());
        for index in 1..=moves {
            self.frame();
            let location = start + delta * (index as f32 / moves as f32);
            self.deck
                .pointer_move(&card, pointer, location, self.clock.now_millis());
        }
        self.deck
            .pointer_up(&card, pointer, start + delta, self.clock.now_millis());
    }

    fn tap_top(&mut self) {
        let Some(card) = self.deck.top_card() else {
            return;
        };
        self.pointer += 1;
        let now = self.clock.now_millis();
        self.deck.pointer_down(&card, self.pointer, BOUNDS.center(), now);
        self.deck.pointer_up(&card, self.pointer, BOUNDS.center(), now);
    }

    fn report(&self) {
        let active: Vec<u32> = self.deck.active_cards().iter().map(|card| card.id).collect();
        let history: Vec<u32> = self.deck.history().iter().map(|card| card.id).collect();
        log::info!("active (top first) {:?}, history {:?}", active, history);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== SwipeDeck headless demo ===");
    println!("Set RUST_LOG=trace to follow the deck's internals.");
    println!();

    let config = DeckConfig::default()
        .with_allowed_direction(Direction::ALL)
        .with_history_capacity(5);
    let mut deck: Deck<Photo> = match Deck::with_config(BOUNDS, config) {
        Ok(deck) => deck,
        Err(err) => {
            log::error!("invalid deck configuration: {err}");
            return;
        }
    };
    deck.add_listener(|event| match event {
        DeckEvent::Swipe {
            card,
            direction,
            vector,
        } => log::info!(
            "swiped #{} {} at {:.0} px/s",
            card.id,
            direction,
            vector.magnitude()
        ),
        DeckEvent::Dragging { .. } => {}
        other => log::info!("{} #{}", other.name(), other.card().id),
    });

    let mut next_id = 0;
    deck.set_next_view(move || {
        next_id += 1;
        (next_id <= 12).then_some(Photo { id: next_id })
    });
    deck.set_previous_view(|| Some(Photo { id: 0 }));

    let clock = SystemClock::new();
    deck.advance(clock.now_nanos());
    let mut host = Host {
        deck,
        clock,
        pointer: 0,
    };
    host.report();

    host.tap_top();
    host.drag_top(Vector::new(200.0, 0.0), 6);
    host.idle(Duration::from_millis(500));
    host.drag_top(Vector::new(-40.0, 0.0), 20);
    host.idle(Duration::from_millis(800));
    host.deck.swipe_top(Direction::UP);
    host.deck.swipe_top(Direction::DOWN);
    host.idle(Duration::from_millis(700));
    host.report();

    host.deck.rewind();
    host.idle(Duration::from_millis(500));
    host.report();

    host.deck.teardown();
    host.report();
}
