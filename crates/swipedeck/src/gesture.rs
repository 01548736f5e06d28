//! Single-pointer drag recognition for one card.

use swipedeck_geometry::{Point, Vector};

use crate::card::Movement;
use crate::velocity::PointerVelocityTracker;

/// Identifies a pointer (a finger, a mouse, a stylus) across its events.
pub type PointerId = u64;

/// Distance in logical pixels a pointer must travel before a press becomes a
/// drag.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Result of feeding a move to a [`GestureTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GestureStep {
    /// Still within the drag slop.
    Pending,
    /// The slop was crossed by this move. The drag is anchored at `origin`.
    Started { origin: Point },
    Moved,
}

/// Result of a pointer release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GestureRelease {
    Tap { location: Point },
    Drag(Movement),
}

/// Tracks the one pointer that owns a card's gesture from press to release.
#[derive(Clone, Debug)]
pub(crate) struct GestureTracker {
    pointer: PointerId,
    origin: Point,
    last: Point,
    last_time_ms: i64,
    dragging: bool,
    velocity: PointerVelocityTracker,
}

impl GestureTracker {
    pub(crate) fn press(pointer: PointerId, location: Point, time_ms: i64) -> Self {
        let mut velocity = PointerVelocityTracker::new();
        velocity.add_location(time_ms, location);
        Self {
            pointer,
            origin: location,
            last: location,
            last_time_ms: time_ms,
            dragging: false,
            velocity,
        }
    }

    pub(crate) fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub(crate) fn translation(&self) -> Vector {
        self.last.offset_from(self.origin)
    }

    pub(crate) fn track(&mut self, location: Point, time_ms: i64) -> GestureStep {
        self.record(location, time_ms);
        if self.dragging {
            return GestureStep::Moved;
        }
        if self.translation().magnitude() > DRAG_THRESHOLD {
            self.dragging = true;
            return GestureStep::Started {
                origin: self.origin,
            };
        }
        GestureStep::Pending
    }

    pub(crate) fn release(mut self, location: Point, time_ms: i64) -> GestureRelease {
        self.record(location, time_ms);
        if !self.dragging {
            return GestureRelease::Tap { location };
        }
        GestureRelease::Drag(self.movement())
    }

    /// A cancelled drag ends like a release at the last known location. A
    /// cancelled press ends with nothing.
    pub(crate) fn cancel(self) -> Option<Movement> {
        self.dragging.then(|| self.movement())
    }

    fn movement(&self) -> Movement {
        Movement::new(self.last, self.translation(), self.velocity.velocity())
    }

    fn record(&mut self, location: Point, time_ms: i64) {
        // Out-of-order timestamps would make the estimate meaningless.
        let time_ms = time_ms.max(self.last_time_ms);
        self.last = location;
        self.last_time_ms = time_ms;
        self.velocity.add_location(time_ms, location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_press_is_a_tap() {
        let mut tracker = GestureTracker::press(1, Point::new(100.0, 100.0), 0);
        assert_eq!(
            tracker.track(Point::new(104.0, 103.0), 16),
            GestureStep::Pending
        );
        assert_eq!(
            tracker.release(Point::new(104.0, 103.0), 32),
            GestureRelease::Tap {
                location: Point::new(104.0, 103.0)
            }
        );
    }

    #[test]
    fn crossing_the_slop_starts_at_the_press_location() {
        let mut tracker = GestureTracker::press(1, Point::new(100.0, 100.0), 0);
        assert_eq!(
            tracker.track(Point::new(112.0, 100.0), 16),
            GestureStep::Started {
                origin: Point::new(100.0, 100.0)
            }
        );
        assert_eq!(tracker.track(Point::new(130.0, 100.0), 32), GestureStep::Moved);
        assert_eq!(tracker.translation(), Vector::new(30.0, 0.0));
    }

    #[test]
    fn release_reports_translation_and_velocity() {
        let mut tracker = GestureTracker::press(7, Point::new(0.0, 0.0), 0);
        for step in 1..=5 {
            tracker.track(Point::new(step as f32 * 20.0, 0.0), step * 10);
        }
        let GestureRelease::Drag(movement) = tracker.release(Point::new(120.0, 0.0), 60) else {
            panic!("expected a drag release");
        };
        assert_eq!(movement.translation, Vector::new(120.0, 0.0));
        assert!(movement.velocity.dx > 1_000.0, "{:?}", movement.velocity);
        assert_eq!(movement.velocity.dy, 0.0);
    }

    #[test]
    fn cancelled_press_yields_nothing() {
        let tracker = GestureTracker::press(1, Point::new(10.0, 10.0), 0);
        assert_eq!(tracker.cancel(), None);
    }
}
