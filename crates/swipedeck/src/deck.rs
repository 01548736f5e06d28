//! The deck controller: tracked cards, refill, rewind, pointer routing and
//! reclaiming of cards that left the screen.

use std::fmt;
use std::rc::Rc;

use swipedeck_core::collections::map::HashMap;
use swipedeck_core::{run_due, Scheduler, TaskId};
use swipedeck_geometry::{Point, Rect, Size, Vector};
use swipedeck_physics::{PhysicsEngine, SpringWorld};

use crate::card::{Card, Movement};
use crate::config::{ConfigError, DeckConfig};
use crate::direction::Direction;
use crate::events::{DeckEvent, ListenerId, Listeners};
use crate::gesture::{GestureRelease, GestureStep, GestureTracker, PointerId};
use crate::handlers::{CardTransform, DeckHandlers, SwipeCriteria};
use crate::history::History;
use crate::view_manager::{Engines, Release, ViewManager, ViewState};

/// Pull-based card provider. Returning `None` means "nothing right now".
pub type CardSource<C> = Box<dyn FnMut() -> Option<C>>;

struct TrackedCard<C> {
    manager: ViewManager<C>,
    interactive: bool,
    hidden: bool,
    transform: Option<CardTransform>,
    gesture: Option<GestureTracker>,
}

impl<C> TrackedCard<C> {
    fn new(manager: ViewManager<C>) -> Self {
        Self {
            manager,
            interactive: true,
            hidden: false,
            transform: None,
            gesture: None,
        }
    }
}

/// A stack of swipeable cards.
///
/// Cards are kept in storage order: index 0 is the bottom of the visual
/// stack, the last index is the top. The *active* cards are the tracked cards
/// that are not being thrown away, topmost first.
///
/// The deck is headless. The host forwards pointer events with
/// [`pointer_down`](Self::pointer_down) and friends, calls
/// [`advance`](Self::advance) once per frame, and reads frames and transforms
/// back for rendering.
pub struct Deck<C: Card, E: PhysicsEngine + 'static = SpringWorld> {
    bounds: Size,
    /// Explicit reclaim area; the container rect when unset.
    visible_bounds: Option<Rect>,
    config: DeckConfig,
    handlers: DeckHandlers<C>,
    next_view: Option<CardSource<C>>,
    previous_view: Option<CardSource<C>>,
    order: Vec<C>,
    tracked: HashMap<C, TrackedCard<C>>,
    history: History<C>,
    engines: Engines<E>,
    scheduler: Scheduler<Deck<C, E>>,
    reclaim_task: Option<TaskId>,
    listeners: Listeners<C>,
    last_frame_nanos: Option<u64>,
}

impl<C: Card> Deck<C, SpringWorld> {
    /// Creates an empty deck filling a container of `bounds` with the
    /// default configuration.
    pub fn new(bounds: Size) -> Self {
        Self::with_engines(bounds, SpringWorld::new(), SpringWorld::new())
    }

    pub fn with_config(bounds: Size, config: DeckConfig) -> Result<Self, ConfigError> {
        let mut deck = Self::new(bounds);
        deck.set_config(config)?;
        Ok(deck)
    }
}

impl<C: Card, E: PhysicsEngine + 'static> Deck<C, E> {
    pub fn with_engines(bounds: Size, animator: E, push_animator: E) -> Self {
        let config = DeckConfig::default();
        Self {
            bounds,
            visible_bounds: None,
            history: History::with_capacity(config.history_capacity),
            config,
            handlers: DeckHandlers::default(),
            next_view: None,
            previous_view: None,
            order: Vec::new(),
            tracked: HashMap::default(),
            engines: Engines::new(animator, push_animator),
            scheduler: Scheduler::new(),
            reclaim_task: None,
            listeners: Listeners::new(),
            last_frame_nanos: None,
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Direct access to the configuration. Values are read by the operations
    /// that use them; nothing is validated here.
    pub fn config_mut(&mut self) -> &mut DeckConfig {
        &mut self.config
    }

    /// Installs a validated configuration and restyles the active cards. On
    /// error the previous configuration stays in place.
    pub fn set_config(&mut self, config: DeckConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.history.set_capacity(config.history_capacity);
        self.config = config;
        self.update_views();
        Ok(())
    }

    pub fn handlers(&self) -> &DeckHandlers<C> {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut DeckHandlers<C> {
        &mut self.handlers
    }

    /// Installs the card source and fills the active window from it.
    pub fn set_next_view(&mut self, source: impl FnMut() -> Option<C> + 'static) {
        self.next_view = Some(Box::new(source));
        self.load_views();
    }

    /// Installs the fallback source [`rewind`](Self::rewind) uses once the
    /// history is empty.
    pub fn set_previous_view(&mut self, source: impl FnMut() -> Option<C> + 'static) {
        self.previous_view = Some(Box::new(source));
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&DeckEvent<C>) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Resizes the container. Resting cards spring to the new center.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        let home = bounds.center();
        let damping = self.config.snap_damping;
        for entry in self.tracked.values_mut() {
            if entry.manager.state() == ViewState::Idle {
                entry.manager.snap_to_center(&mut self.engines, home, damping);
            }
        }
        self.update_views();
    }

    pub fn visible_bounds(&self) -> Rect {
        self.visible_bounds
            .unwrap_or_else(|| Rect::from_size(self.bounds))
    }

    /// Area a thrown card must leave before it is reclaimed. Until set, the
    /// container rect is used and follows [`set_bounds`](Self::set_bounds).
    pub fn set_visible_bounds(&mut self, visible_bounds: Rect) {
        self.visible_bounds = Some(visible_bounds);
    }

    /// Goes back to reclaiming against the container rect.
    pub fn clear_visible_bounds(&mut self) {
        self.visible_bounds = None;
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Tracked cards that are not leaving, topmost first.
    pub fn active_cards(&self) -> Vec<C> {
        self.order
            .iter()
            .rev()
            .filter(|card| {
                self.tracked
                    .get(*card)
                    .is_some_and(|entry| !entry.manager.is_swiping_away())
            })
            .cloned()
            .collect()
    }

    /// Cards thrown away but still on screen, in storage order.
    pub fn departing_cards(&self) -> Vec<C> {
        self.order
            .iter()
            .filter(|card| {
                self.tracked
                    .get(*card)
                    .is_some_and(|entry| entry.manager.is_swiping_away())
            })
            .cloned()
            .collect()
    }

    /// Every tracked card in storage order, bottom first.
    pub fn all_cards(&self) -> &[C] {
        &self.order
    }

    pub fn top_card(&self) -> Option<C> {
        self.order
            .iter()
            .rev()
            .find(|card| {
                self.tracked
                    .get(*card)
                    .is_some_and(|entry| !entry.manager.is_swiping_away())
            })
            .cloned()
    }

    pub fn history(&self) -> &History<C> {
        &self.history
    }

    pub fn is_tracked(&self, card: &C) -> bool {
        self.tracked.contains_key(card)
    }

    pub fn card_state(&self, card: &C) -> Option<ViewState> {
        self.tracked.get(card).map(|entry| entry.manager.state())
    }

    /// Current frame of a tracked card in container coordinates.
    pub fn card_frame(&self, card: &C) -> Option<Rect> {
        self.tracked.get(card)?.manager.frame(&self.engines)
    }

    /// Presentation last chosen for the card by the animate hook.
    pub fn card_transform(&self, card: &C) -> Option<CardTransform> {
        self.tracked.get(card)?.transform
    }

    pub fn is_interactive(&self, card: &C) -> bool {
        self.tracked
            .get(card)
            .is_some_and(|entry| entry.interactive)
    }

    pub fn is_hidden(&self, card: &C) -> bool {
        self.tracked.get(card).is_some_and(|entry| entry.hidden)
    }

    pub fn engines(&self) -> &Engines<E> {
        &self.engines
    }

    pub fn is_reclaim_scheduled(&self) -> bool {
        self.reclaim_task
            .is_some_and(|task| self.scheduler.is_scheduled(task))
    }

    // ---------------------------------------------------------------------
    // Stack operations
    // ---------------------------------------------------------------------

    /// Pulls cards from the source until the active window is full or the
    /// source runs dry. New cards go to the bottom.
    pub fn load_views(&mut self) {
        let missing = self
            .config
            .active_window
            .saturating_sub(self.active_count());
        for _ in 0..missing {
            let Some(source) = self.next_view.as_mut() else {
                break;
            };
            let Some(card) = source() else {
                log::trace!("card source exhausted");
                break;
            };
            self.track(card, 0);
        }
        self.update_views();
    }

    /// Restyles the active cards: interactivity, visibility within the
    /// window, and the animate hook's transform for each visible card.
    /// Skipped while the top card is being dragged.
    pub fn update_views(&mut self) {
        for entry in self.tracked.values_mut() {
            if entry.manager.is_swiping_away() {
                entry.interactive = false;
            }
        }

        let active = self.active_cards();
        let Some(top) = active.first() else {
            return;
        };
        if self
            .tracked
            .get(top)
            .is_some_and(|entry| entry.manager.is_dragging())
        {
            log::trace!("skipping restyle while {:?} is dragged", top);
            return;
        }

        let window = self.config.active_window;
        let only_top = self.config.only_top_interactive;
        let animate = Rc::clone(&self.handlers.animate_view);
        for (index, card) in active.iter().enumerate() {
            let Some(entry) = self.tracked.get_mut(card) else {
                continue;
            };
            entry.interactive = !only_top || index == 0;
            entry.hidden = index >= window;
            if !entry.hidden {
                entry.transform = Some(animate(card, index, &active, self.bounds));
            }
        }
    }

    /// Throws the top card in `direction`, as interpreted by the
    /// interpret-direction hook. No-op on an empty deck.
    pub fn swipe_top(&mut self, direction: Direction) {
        let active = self.active_cards();
        let Some(top) = active.first() else {
            log::debug!("swipe {direction} requested on an empty deck");
            return;
        };
        let Some(frame) = self.card_frame(top) else {
            return;
        };
        let interpret = Rc::clone(&self.handlers.interpret_direction);
        let (point, vector) = interpret(top, frame.center(), direction, &active);
        self.swipe_top_from(point, vector);
    }

    /// Throws the top card from `point` along `vector` (px/s).
    pub fn swipe_top_from(&mut self, point: Point, vector: Vector) {
        let Some(top) = self.top_card() else {
            log::debug!("swipe requested on an empty deck");
            return;
        };
        if !point.is_finite() || !vector.is_finite() || vector.is_zero() {
            log::debug!("ignoring swipe of {:?} along {:?}", top, vector);
            return;
        }
        let Some(entry) = self.tracked.get_mut(&top) else {
            return;
        };
        entry.gesture = None;
        if entry.manager.force_swipe(&mut self.engines, point, vector) {
            self.complete_swipe(top, vector);
        }
    }

    /// Tracks `card` at storage `index` (clamped). A card that is already
    /// tracked stays where it is and springs back to the center instead.
    pub fn insert(&mut self, card: C, index: usize) {
        self.track(card, index);
        self.update_views();
    }

    /// Stops tracking `card`, releasing its physics, and fires `Disappear`.
    pub fn remove(&mut self, card: &C) {
        let Some(entry) = self.tracked.get_mut(card) else {
            log::debug!("remove of untracked card {:?}", card);
            return;
        };
        entry.manager.teardown(&mut self.engines);
        self.tracked.remove(card);
        self.order.retain(|tracked| tracked != card);
        self.listeners.emit(DeckEvent::Disappear { card: card.clone() });
    }

    /// Removes every tracked card immediately, without animation.
    pub fn discard_all(&mut self) {
        let cards = self.order.clone();
        for card in &cards {
            self.remove(card);
        }
        if let Some(task) = self.reclaim_task.take() {
            self.scheduler.cancel(task);
        }
    }

    /// Brings back the most recently swiped card, or one from the previous
    /// source when the history is empty, on top of the stack. When the window
    /// is full the bottom active card makes room.
    pub fn rewind(&mut self) {
        let card = match self.history.pop() {
            Some(card) => Some(card),
            None => self.previous_view.as_mut().and_then(|source| source()),
        };
        let Some(card) = card else {
            log::trace!("nothing to rewind");
            return;
        };

        let window = self.config.active_window;
        let active = self.active_cards();
        if window > 0 && active.len() >= window {
            if let Some(bottom) = active.last().filter(|bottom| **bottom != card) {
                log::trace!("rewind makes room by removing {:?}", bottom);
                self.remove(bottom);
            }
        }

        if self.tracked.contains_key(&card) {
            self.order.retain(|tracked| *tracked != card);
            self.order.push(card.clone());
        }
        let top = self.order.len();
        self.track(card, top);
        self.update_views();
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Starts a press on `card`. Returns whether the deck took the pointer.
    ///
    /// Untracked, non-interactive, hidden and leaving cards ignore presses, as
    /// does a card already held by another pointer.
    pub fn pointer_down(
        &mut self,
        card: &C,
        pointer: PointerId,
        location: Point,
        time_ms: i64,
    ) -> bool {
        let Some(entry) = self.tracked.get_mut(card) else {
            log::trace!("pointer {pointer} down on untracked card {:?}", card);
            return false;
        };
        if !entry.interactive || entry.hidden || entry.manager.is_swiping_away() {
            log::trace!("{:?} does not accept pointer input", card);
            return false;
        }
        if let Some(gesture) = &entry.gesture {
            log::trace!(
                "ignoring pointer {pointer}: {:?} is held by pointer {}",
                card,
                gesture.pointer()
            );
            return false;
        }
        entry.gesture = Some(GestureTracker::press(pointer, location, time_ms));
        true
    }

    pub fn pointer_move(
        &mut self,
        card: &C,
        pointer: PointerId,
        location: Point,
        time_ms: i64,
    ) -> bool {
        let Some(entry) = self.tracked.get_mut(card) else {
            return false;
        };
        let Some(gesture) = entry
            .gesture
            .as_mut()
            .filter(|gesture| gesture.pointer() == pointer)
        else {
            return false;
        };

        match gesture.track(location, time_ms) {
            GestureStep::Pending => true,
            GestureStep::Started { origin } => {
                if !entry.manager.begin_drag(&mut self.engines, origin) {
                    entry.gesture = None;
                    return false;
                }
                let translation = entry
                    .manager
                    .update_drag(&mut self.engines, location)
                    .unwrap_or_default();
                self.listeners.emit(DeckEvent::DragStart {
                    card: card.clone(),
                    location: origin,
                });
                self.listeners.emit(DeckEvent::Dragging {
                    card: card.clone(),
                    location,
                    translation,
                });
                true
            }
            GestureStep::Moved => {
                let Some(translation) = entry.manager.update_drag(&mut self.engines, location)
                else {
                    return false;
                };
                self.listeners.emit(DeckEvent::Dragging {
                    card: card.clone(),
                    location,
                    translation,
                });
                true
            }
        }
    }

    /// Ends a press. A press that never left the drag slop is a tap; a drag
    /// is handed to the swipe predicate.
    pub fn pointer_up(
        &mut self,
        card: &C,
        pointer: PointerId,
        location: Point,
        time_ms: i64,
    ) -> bool {
        let Some(gesture) = self.take_gesture(card, pointer) else {
            return false;
        };
        match gesture.release(location, time_ms) {
            GestureRelease::Tap { location } => {
                self.listeners.emit(DeckEvent::Tap {
                    card: card.clone(),
                    location,
                });
            }
            GestureRelease::Drag(movement) => self.finish_drag(card, movement),
        }
        true
    }

    /// Aborts a press. A cancelled drag is settled like a release at its last
    /// location.
    pub fn pointer_cancel(&mut self, card: &C, pointer: PointerId) -> bool {
        let Some(gesture) = self.take_gesture(card, pointer) else {
            return false;
        };
        if let Some(movement) = gesture.cancel() {
            self.finish_drag(card, movement);
        }
        true
    }

    // ---------------------------------------------------------------------
    // Frames
    // ---------------------------------------------------------------------

    /// Steps both physics engines to `frame_time_nanos` and runs due
    /// reclaim polls. The first call only establishes the time base.
    pub fn advance(&mut self, frame_time_nanos: u64) {
        if let Some(last) = self.last_frame_nanos {
            let elapsed = frame_time_nanos.saturating_sub(last);
            if elapsed > 0 {
                self.engines.step(elapsed as f32 / 1_000_000_000.0);
            }
        }
        self.last_frame_nanos = Some(
            self.last_frame_nanos
                .map_or(frame_time_nanos, |last| last.max(frame_time_nanos)),
        );
        run_due(self, frame_time_nanos, Self::scheduler_of);
    }

    /// Cancels polling and discards every card.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.reclaim_task = None;
        self.discard_all();
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn scheduler_of(deck: &mut Self) -> &mut Scheduler<Self> {
        &mut deck.scheduler
    }

    fn active_count(&self) -> usize {
        self.tracked
            .values()
            .filter(|entry| !entry.manager.is_swiping_away())
            .count()
    }

    fn has_departing(&self) -> bool {
        self.tracked
            .values()
            .any(|entry| entry.manager.is_swiping_away())
    }

    fn track(&mut self, card: C, index: usize) {
        let home = self.bounds.center();
        let damping = self.config.snap_damping;
        if let Some(entry) = self.tracked.get_mut(&card) {
            log::debug!("{:?} is already tracked; re-centering", card);
            entry.gesture = None;
            entry.manager.recall(&mut self.engines, home, damping);
            return;
        }
        let mut manager = ViewManager::new(card.clone(), &mut self.engines, home);
        manager.snap_to_center(&mut self.engines, home, damping);
        let index = index.min(self.order.len());
        self.order.insert(index, card.clone());
        self.tracked.insert(card, TrackedCard::new(manager));
    }

    fn take_gesture(&mut self, card: &C, pointer: PointerId) -> Option<GestureTracker> {
        let entry = self.tracked.get_mut(card)?;
        if entry.gesture.as_ref()?.pointer() != pointer {
            return None;
        }
        entry.gesture.take()
    }

    fn finish_drag(&mut self, card: &C, movement: Movement) {
        let should_swipe = Rc::clone(&self.handlers.should_swipe);
        let release = Release {
            should_swipe: &*should_swipe,
            criteria: SwipeCriteria::new(&self.config, self.bounds),
            home: self.bounds.center(),
            snap_damping: self.config.snap_damping,
        };
        let Some(entry) = self.tracked.get_mut(card) else {
            return;
        };
        if !entry.manager.is_dragging() {
            return;
        }

        let accepted = entry.manager.end_drag(&mut self.engines, &movement, &release);
        match entry.manager.state() {
            ViewState::SwipingAway { exit_vector, .. } if accepted => {
                self.complete_swipe(card.clone(), exit_vector);
            }
            _ => {
                self.listeners
                    .emit(DeckEvent::DragCancel { card: card.clone() });
            }
        }
        self.listeners.emit(DeckEvent::DragEnd {
            card: card.clone(),
            location: movement.location,
        });
        if !accepted {
            self.update_views();
        }
    }

    fn complete_swipe(&mut self, card: C, vector: Vector) {
        self.history.set_capacity(self.config.history_capacity);
        if let Some(evicted) = self.history.push(card.clone()) {
            log::trace!("history full; forgetting {:?}", evicted);
        }
        self.schedule_reclaim();
        self.listeners.emit(DeckEvent::Swipe {
            card,
            direction: Direction::classify(vector),
            vector,
        });
        self.load_views();
    }

    /// One poll serves every leaving card; it stops once none is left.
    fn schedule_reclaim(&mut self) {
        if self.is_reclaim_scheduled() {
            return;
        }
        let task = self.scheduler.schedule_repeating(
            self.config.reclaim_interval,
            Self::reclaim_departed,
            |deck: &Self| !deck.has_departing(),
        );
        self.reclaim_task = Some(task);
    }

    fn reclaim_departed(&mut self) {
        let visible = self.visible_bounds();
        let gone: Vec<C> = self
            .order
            .iter()
            .filter(|card| {
                self.tracked.get(*card).is_some_and(|entry| {
                    entry.manager.is_swiping_away()
                        && !entry
                            .manager
                            .frame(&self.engines)
                            .is_some_and(|frame| frame.intersects(&visible))
                })
            })
            .cloned()
            .collect();
        for card in &gone {
            log::debug!("reclaiming {:?}", card);
            self.remove(card);
        }
    }
}

impl<C: Card, E: PhysicsEngine + 'static> fmt::Debug for Deck<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("bounds", &self.bounds)
            .field("config", &self.config)
            .field("cards", &self.order)
            .field("history", &self.history)
            .field("scheduler", &self.scheduler)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;
