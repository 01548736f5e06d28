//! Physics engine adapter.
//!
//! The deck drives cards through three primitives: a spring that snaps a body
//! to a point, an attachment that ties a body to a point or to another body,
//! and a push that imparts velocity. Any engine offering these can back a deck;
//! [`SpringWorld`](crate::SpringWorld) is the built-in one.

use swipedeck_geometry::{Point, Rect, Size, Vector};

/// Handle to a body owned by an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Handle to a behavior owned by an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BehaviorId(pub u32);

/// What an attachment holds its body to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttachTarget {
    /// A fixed point in container coordinates. Movable through
    /// [`PhysicsEngine::set_attachment_anchor`].
    Point(Point),
    /// A point `offset` from another body's center.
    Body { body: BodyId, offset: Vector },
}

/// Attachment tuning. A frequency of zero makes the attachment rigid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttachmentSpec {
    pub length: f32,
    pub damping: f32,
    pub frequency: f32,
}

impl AttachmentSpec {
    /// Zero-length attachment that pins the body to its target.
    pub const RIGID: AttachmentSpec = AttachmentSpec {
        length: 0.0,
        damping: 0.0,
        frequency: 0.0,
    };

    pub fn damped(frequency: f32, damping: f32) -> Self {
        Self {
            length: 0.0,
            damping,
            frequency,
        }
    }

    pub fn is_rigid(&self) -> bool {
        self.frequency <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushMode {
    /// Adds the push vector to the body's velocity once, on the next step.
    Instantaneous,
    /// Accelerates the body by the push vector every second it stays attached.
    Continuous,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    Snap {
        body: BodyId,
        point: Point,
        damping: f32,
    },
    Attachment {
        body: BodyId,
        /// Attachment point on `body`, relative to its center.
        offset: Vector,
        target: AttachTarget,
        spec: AttachmentSpec,
    },
    Push {
        body: BodyId,
        vector: Vector,
        mode: PushMode,
    },
}

impl Behavior {
    /// Body the behavior acts on.
    pub fn body(&self) -> BodyId {
        match *self {
            Behavior::Snap { body, .. }
            | Behavior::Attachment { body, .. }
            | Behavior::Push { body, .. } => body,
        }
    }

    /// Whether the behavior reads or writes `body`.
    pub fn references(&self, body: BodyId) -> bool {
        if self.body() == body {
            return true;
        }
        matches!(
            self,
            Behavior::Attachment {
                target: AttachTarget::Body { body: other, .. },
                ..
            } if *other == body
        )
    }
}

/// Attach/snap/push simulation shared by all cards of a deck.
///
/// Implementations are single-threaded; every call happens on the host's
/// event loop.
pub trait PhysicsEngine {
    fn create_body(&mut self, center: Point, size: Size) -> BodyId;

    /// Destroys a body together with every behavior that references it.
    fn destroy_body(&mut self, body: BodyId) -> bool;

    fn body_center(&self, body: BodyId) -> Option<Point>;

    fn body_size(&self, body: BodyId) -> Option<Size>;

    fn body_velocity(&self, body: BodyId) -> Option<Vector>;

    fn set_body_center(&mut self, body: BodyId, center: Point) -> bool;

    fn set_body_velocity(&mut self, body: BodyId, velocity: Vector) -> bool;

    fn body_frame(&self, body: BodyId) -> Option<Rect> {
        let center = self.body_center(body)?;
        let size = self.body_size(body)?;
        Some(Rect::from_center_size(center, size))
    }

    /// Adds a behavior. Returns `None` when a referenced body does not exist.
    fn add_behavior(&mut self, behavior: Behavior) -> Option<BehaviorId>;

    fn remove_behavior(&mut self, behavior: BehaviorId) -> bool;

    /// Moves the target point of a point attachment.
    fn set_attachment_anchor(&mut self, behavior: BehaviorId, point: Point) -> bool;

    /// Advances the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    fn body_count(&self) -> usize;

    fn behavior_count(&self) -> usize;

    /// Removes every behavior and body.
    fn clear(&mut self);
}
