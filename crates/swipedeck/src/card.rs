use std::fmt::Debug;
use std::hash::Hash;

use swipedeck_geometry::{Point, Size, Vector};

/// A caller-owned card handle.
///
/// Cards are compared by identity: two handles are the same card when they
/// are equal, whatever they display. Cheap to clone (typically an `Rc` or an
/// id).
pub trait Card: Clone + Eq + Hash + Debug + 'static {
    /// Size of the card's frame in container coordinates.
    fn size(&self) -> Size;
}

/// Snapshot of a drag gesture when it ends.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Movement {
    /// Pointer location in container coordinates.
    pub location: Point,
    /// Offset of the pointer from where the drag started.
    pub translation: Vector,
    /// Pointer velocity in px/s.
    pub velocity: Vector,
}

impl Movement {
    pub fn new(location: Point, translation: Vector, velocity: Vector) -> Self {
        Self {
            location,
            translation,
            velocity,
        }
    }
}
