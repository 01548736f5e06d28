//! Physics engine adapter for SwipeDeck.
//!
//! Cards are moved by three kinds of behavior applied to bodies in a shared
//! simulation: snaps (spring to a point), attachments (rigid or damped ties to
//! a point or another body) and pushes (impulses). [`PhysicsEngine`] is the
//! seam a host can implement over its own simulation; [`SpringWorld`] is the
//! default implementation.

mod engine;
mod spring;
mod world;

pub use engine::{
    AttachTarget, AttachmentSpec, Behavior, BehaviorId, BodyId, PhysicsEngine, PushMode,
};
pub use spring::{SpringSpec, SNAP_STIFFNESS};
pub use world::SpringWorld;
