//! Pure math/data for SwipeDeck
//!
//! Geometry primitives shared by the physics engine adapter and the deck
//! controller. All values are in logical pixels of the deck's container.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size, Vector};
}
