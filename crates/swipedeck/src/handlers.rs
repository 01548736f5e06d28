//! Caller-overridable hooks: per-index presentation, programmatic swipe
//! interpretation and the swipe accept predicate.
//!
//! Each hook is an independent function-typed field of [`DeckHandlers`], so a
//! caller replaces only what it needs.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use swipedeck_geometry::{Point, Size, Vector};

use crate::card::Movement;
use crate::config::DeckConfig;
use crate::direction::Direction;

/// Where and how a card should be presented, as decided by the animate hook.
/// Renderers animate the card towards it over `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub center: Point,
    /// Clockwise rotation in radians.
    pub rotation: f32,
    /// Rotation pivot relative to `center`.
    pub pivot: Vector,
    pub duration: Duration,
}

impl CardTransform {
    pub fn centered(center: Point) -> Self {
        Self {
            center,
            rotation: 0.0,
            pivot: Vector::ZERO,
            duration: Duration::ZERO,
        }
    }
}

/// Inputs of the accept predicate besides the card and its movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeCriteria {
    /// Size of the deck's container.
    pub bounds: Size,
    pub allowed_direction: Direction,
    pub min_translation_fraction: f32,
    pub min_velocity: f32,
}

impl SwipeCriteria {
    pub fn new(config: &DeckConfig, bounds: Size) -> Self {
        Self {
            bounds,
            allowed_direction: config.allowed_direction,
            min_translation_fraction: config.min_translation_fraction,
            min_velocity: config.min_velocity,
        }
    }
}

/// `(card, index, active cards topmost first, container size)`.
pub type AnimateViewHandler<C> = Rc<dyn Fn(&C, usize, &[C], Size) -> CardTransform>;

/// `(top card, its current center, requested direction, active cards)` to
/// `(exit location, exit vector)`.
pub type InterpretDirectionHandler<C> = Rc<dyn Fn(&C, Point, Direction, &[C]) -> (Point, Vector)>;

pub type ShouldSwipeHandler<C> = Rc<dyn Fn(&C, &Movement, &SwipeCriteria) -> bool>;

pub struct DeckHandlers<C> {
    pub animate_view: AnimateViewHandler<C>,
    pub interpret_direction: InterpretDirectionHandler<C>,
    pub should_swipe: ShouldSwipeHandler<C>,
}

impl<C> DeckHandlers<C> {
    pub fn with_animate_view(
        mut self,
        animate_view: impl Fn(&C, usize, &[C], Size) -> CardTransform + 'static,
    ) -> Self {
        self.animate_view = Rc::new(animate_view);
        self
    }

    pub fn with_interpret_direction(
        mut self,
        interpret_direction: impl Fn(&C, Point, Direction, &[C]) -> (Point, Vector) + 'static,
    ) -> Self {
        self.interpret_direction = Rc::new(interpret_direction);
        self
    }

    pub fn with_should_swipe(
        mut self,
        should_swipe: impl Fn(&C, &Movement, &SwipeCriteria) -> bool + 'static,
    ) -> Self {
        self.should_swipe = Rc::new(should_swipe);
        self
    }
}

impl<C: 'static> Default for DeckHandlers<C> {
    fn default() -> Self {
        Self {
            animate_view: Rc::new(default_animate_view::<C>),
            interpret_direction: Rc::new(default_interpret_direction::<C>),
            should_swipe: Rc::new(default_should_swipe::<C>),
        }
    }
}

impl<C> Clone for DeckHandlers<C> {
    fn clone(&self) -> Self {
        Self {
            animate_view: Rc::clone(&self.animate_view),
            interpret_direction: Rc::clone(&self.interpret_direction),
            should_swipe: Rc::clone(&self.should_swipe),
        }
    }
}

impl<C> fmt::Debug for DeckHandlers<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckHandlers").finish_non_exhaustive()
    }
}

/// Fan tilt of the second and third card, in degrees.
const FAN_DEGREES: f32 = 1.0;
const FAN_DURATION: Duration = Duration::from_millis(400);
/// Pivot sits this fraction of the container height below the center.
const FAN_PIVOT_FRACTION: f32 = 0.3;

/// Centers every card and fans the second and third one out slightly.
pub fn default_animate_view<C>(_card: &C, index: usize, _cards: &[C], bounds: Size) -> CardTransform {
    let rotation = match index {
        1 => FAN_DEGREES,
        2 => -FAN_DEGREES,
        _ => 0.0,
    };
    CardTransform {
        center: bounds.center(),
        rotation: rotation.to_radians(),
        pivot: Vector::new(0.0, bounds.height * FAN_PIVOT_FRACTION),
        duration: FAN_DURATION,
    }
}

/// Throw speed of programmatic swipes, px/s.
pub const PROGRAMMATIC_SWIPE_VELOCITY: f32 = 1000.0;

/// Throws from slightly above the card's center, straight along `direction`.
/// Composite or empty directions produce a zero vector.
pub fn default_interpret_direction<C>(
    _top: &C,
    center: Point,
    direction: Direction,
    _cards: &[C],
) -> (Point, Vector) {
    let location = Point::new(center.x, center.y * 0.7);
    let speed = PROGRAMMATIC_SWIPE_VELOCITY;
    let vector = match direction {
        Direction::LEFT => Vector::new(-speed, 0.0),
        Direction::RIGHT => Vector::new(speed, 0.0),
        Direction::UP => Vector::new(0.0, -speed),
        Direction::DOWN => Vector::new(0.0, speed),
        _ => Vector::ZERO,
    };
    (location, vector)
}

/// Accepts a release when its direction is allowed, translation and velocity
/// agree in sign on both axes, and either the travel or the speed clears its
/// threshold.
pub fn default_should_swipe<C>(_card: &C, movement: &Movement, criteria: &SwipeCriteria) -> bool {
    let translation = movement.translation;
    let velocity = movement.velocity;

    let direction_allowed =
        Direction::classify(translation).intersects(criteria.allowed_direction);
    let same_sign = translation.same_quadrant(&velocity);
    let travelled_far =
        translation.dx.abs() > criteria.min_translation_fraction * criteria.bounds.width
            || translation.dy.abs() > criteria.min_translation_fraction * criteria.bounds.height;
    let fast_enough = velocity.magnitude() > criteria.min_velocity;

    direction_allowed && same_sign && (travelled_far || fast_enough)
}

#[cfg(test)]
#[path = "tests/handlers_tests.rs"]
mod tests;
