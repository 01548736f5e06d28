//! Swipeable card stack core.
//!
//! A [`Deck`] keeps a window of cards pulled from a caller-supplied source,
//! turns pointer drags into swipe-away or snap-back decisions, throws swiped
//! cards off screen through a physics engine and reclaims them once they left
//! the visible bounds. Swiped cards are remembered in a bounded [`History`] so
//! they can be rewound.
//!
//! The crate draws nothing. Renderers read [`Deck::card_frame`] and
//! [`Deck::card_transform`] after every [`Deck::advance`].

mod card;
mod config;
mod deck;
mod direction;
mod events;
mod gesture;
mod handlers;
mod history;
pub mod velocity;
mod view_manager;

pub use card::{Card, Movement};
pub use config::{ConfigError, DeckConfig};
pub use deck::{CardSource, Deck};
pub use direction::Direction;
pub use events::{DeckEvent, ListenerId};
pub use gesture::{PointerId, DRAG_THRESHOLD};
pub use handlers::{
    default_animate_view, default_interpret_direction, default_should_swipe,
    AnimateViewHandler, CardTransform, DeckHandlers, InterpretDirectionHandler,
    ShouldSwipeHandler, SwipeCriteria, PROGRAMMATIC_SWIPE_VELOCITY,
};
pub use history::History;
pub use view_manager::{exit_vector, Engines, Release, ViewManager, ViewState, ANCHOR_SIZE};

pub use swipedeck_geometry::{Point, Rect, Size, Vector};
pub use swipedeck_physics::{PhysicsEngine, SpringWorld};

pub mod prelude {
    pub use crate::{
        Card, CardTransform, Deck, DeckConfig, DeckEvent, Direction, Movement, PointerId,
        ViewState,
    };
    pub use swipedeck_geometry::prelude::*;
}
