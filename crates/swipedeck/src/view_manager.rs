//! Per-card state machine and the physics rigs it owns.
//!
//! A resting card lives in the primary engine, held at the container center by
//! a snap. Dragging ties the card rigidly to an invisible anchor body which in
//! turn follows the pointer through a damped attachment. A swiped card moves to
//! the push engine, rigidly attached to a proxy that receives a single push.

use smallvec::SmallVec;
use swipedeck_geometry::{Point, Rect, Size, Vector};
use swipedeck_physics::{
    AttachTarget, AttachmentSpec, Behavior, BehaviorId, BodyId, PhysicsEngine, PushMode,
};

use crate::card::{Card, Movement};
use crate::handlers::SwipeCriteria;

/// Size of the invisible drag anchor and throw proxy bodies.
pub const ANCHOR_SIZE: Size = Size::new(1.0, 1.0);

/// Frequency and damping of the attachment pulling the drag anchor towards the
/// pointer.
const DRAG_FOLLOW_FREQUENCY: f32 = 5.0;
const DRAG_FOLLOW_DAMPING: f32 = 1.0;

/// The two simulations a deck runs: one for resting and dragged cards, one for
/// cards thrown off screen.
#[derive(Debug, Default)]
pub struct Engines<E> {
    pub animator: E,
    pub push_animator: E,
}

impl<E: PhysicsEngine> Engines<E> {
    pub fn new(animator: E, push_animator: E) -> Self {
        Self {
            animator,
            push_animator,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.animator.step(dt);
        self.push_animator.step(dt);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewState {
    Idle,
    /// Dragged by a pointer that went down at `anchor`.
    Dragging { anchor: Point },
    /// Thrown from `exit_point` along `exit_vector`. Terminal until the card
    /// is reclaimed.
    SwipingAway { exit_point: Point, exit_vector: Vector },
}

/// Everything `end_drag` needs to settle a released card.
pub struct Release<'a, C> {
    pub should_swipe: &'a dyn Fn(&C, &Movement, &SwipeCriteria) -> bool,
    pub criteria: SwipeCriteria,
    /// Where a rejected card snaps back to.
    pub home: Point,
    pub snap_damping: f32,
}

#[derive(Debug)]
struct DragRig {
    anchor: BodyId,
    card_attachment: BehaviorId,
    anchor_attachment: BehaviorId,
}

#[derive(Debug)]
struct ThrowRig {
    proxy: BodyId,
    behaviors: SmallVec<[BehaviorId; 2]>,
}

/// Owns one card's body and behaviors across both engines.
#[derive(Debug)]
pub struct ViewManager<C> {
    card: C,
    state: ViewState,
    body: BodyId,
    snap: Option<BehaviorId>,
    drag: Option<DragRig>,
    throw: Option<ThrowRig>,
}

impl<C: Card> ViewManager<C> {
    /// Creates the card's body at `center` in the primary engine.
    pub fn new<E: PhysicsEngine>(card: C, engines: &mut Engines<E>, center: Point) -> Self {
        let body = engines.animator.create_body(center, card.size());
        log::trace!("created body {:?} for {:?}", body, card);
        Self {
            card,
            state: ViewState::Idle,
            body,
            snap: None,
            drag: None,
            throw: None,
        }
    }

    pub fn card(&self) -> &C {
        &self.card
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ViewState::Dragging { .. })
    }

    pub fn is_swiping_away(&self) -> bool {
        matches!(self.state, ViewState::SwipingAway { .. })
    }

    /// Current frame, read from whichever engine holds the card.
    pub fn frame<E: PhysicsEngine>(&self, engines: &Engines<E>) -> Option<Rect> {
        if self.throw.is_some() {
            engines.push_animator.body_frame(self.body)
        } else {
            engines.animator.body_frame(self.body)
        }
    }

    pub fn begin_drag<E: PhysicsEngine>(&mut self, engines: &mut Engines<E>, point: Point) -> bool {
        if self.state != ViewState::Idle {
            log::debug!("{:?} cannot start a drag while {:?}", self.card, self.state);
            return false;
        }
        let animator = &mut engines.animator;
        let Some(center) = animator.body_center(self.body) else {
            return false;
        };
        self.remove_snap(animator);

        let anchor = animator.create_body(point, ANCHOR_SIZE);
        let card_attachment = animator.add_behavior(Behavior::Attachment {
            body: self.body,
            offset: point.offset_from(center),
            target: AttachTarget::Body {
                body: anchor,
                offset: Vector::ZERO,
            },
            spec: AttachmentSpec::RIGID,
        });
        let anchor_attachment = animator.add_behavior(Behavior::Attachment {
            body: anchor,
            offset: Vector::ZERO,
            target: AttachTarget::Point(point),
            spec: AttachmentSpec::damped(DRAG_FOLLOW_FREQUENCY, DRAG_FOLLOW_DAMPING),
        });
        let (Some(card_attachment), Some(anchor_attachment)) = (card_attachment, anchor_attachment)
        else {
            animator.destroy_body(anchor);
            return false;
        };

        self.drag = Some(DragRig {
            anchor,
            card_attachment,
            anchor_attachment,
        });
        self.state = ViewState::Dragging { anchor: point };
        true
    }

    /// Moves the drag target to `point`. Returns the translation from where
    /// the drag began.
    pub fn update_drag<E: PhysicsEngine>(
        &mut self,
        engines: &mut Engines<E>,
        point: Point,
    ) -> Option<Vector> {
        let ViewState::Dragging { anchor } = self.state else {
            return None;
        };
        let rig = self.drag.as_ref()?;
        engines
            .animator
            .set_attachment_anchor(rig.anchor_attachment, point);
        Some(point.offset_from(anchor))
    }

    /// Settles a released drag: throws the card away when the predicate
    /// accepts the movement, otherwise snaps it back home.
    pub fn end_drag<E: PhysicsEngine>(
        &mut self,
        engines: &mut Engines<E>,
        movement: &Movement,
        release: &Release<'_, C>,
    ) -> bool {
        if !self.is_dragging() {
            return false;
        }
        let accepted = (release.should_swipe)(&self.card, movement, &release.criteria);
        if accepted {
            let exit_vector = exit_vector(movement, release.criteria.min_velocity);
            self.force_swipe(engines, movement.location, exit_vector);
        } else {
            self.snap_to_center(engines, release.home, release.snap_damping);
        }
        accepted
    }

    /// Throws the card from `point` along `vector`, whatever its current
    /// state short of already leaving.
    pub fn force_swipe<E: PhysicsEngine>(
        &mut self,
        engines: &mut Engines<E>,
        point: Point,
        vector: Vector,
    ) -> bool {
        if self.is_swiping_away() {
            return false;
        }
        let Some(frame) = engines.animator.body_frame(self.body) else {
            return false;
        };
        self.remove_drag(&mut engines.animator);
        self.remove_snap(&mut engines.animator);
        engines.animator.destroy_body(self.body);

        let push = &mut engines.push_animator;
        self.body = push.create_body(frame.center(), frame.size());
        let proxy = push.create_body(point, ANCHOR_SIZE);
        let mut behaviors = SmallVec::new();
        behaviors.extend(push.add_behavior(Behavior::Attachment {
            body: self.body,
            offset: point.offset_from(frame.center()),
            target: AttachTarget::Body {
                body: proxy,
                offset: Vector::ZERO,
            },
            spec: AttachmentSpec::RIGID,
        }));
        behaviors.extend(push.add_behavior(Behavior::Push {
            body: proxy,
            vector,
            mode: PushMode::Instantaneous,
        }));

        self.throw = Some(ThrowRig { proxy, behaviors });
        self.state = ViewState::SwipingAway {
            exit_point: point,
            exit_vector: vector,
        };
        log::trace!("{:?} thrown from {:?} along {:?}", self.card, point, vector);
        true
    }

    /// Drops any drag and springs the card to `center`. Leaving cards are not
    /// affected.
    pub fn snap_to_center<E: PhysicsEngine>(
        &mut self,
        engines: &mut Engines<E>,
        center: Point,
        damping: f32,
    ) -> bool {
        if self.is_swiping_away() {
            return false;
        }
        let animator = &mut engines.animator;
        self.remove_drag(animator);
        self.remove_snap(animator);
        self.snap = animator.add_behavior(Behavior::Snap {
            body: self.body,
            point: center,
            damping,
        });
        self.state = ViewState::Idle;
        self.snap.is_some()
    }

    /// Brings a leaving card back into the primary engine where it currently
    /// is and snaps it to `center`.
    pub fn recall<E: PhysicsEngine>(
        &mut self,
        engines: &mut Engines<E>,
        center: Point,
        damping: f32,
    ) -> bool {
        if !self.is_swiping_away() {
            return self.snap_to_center(engines, center, damping);
        }
        let frame = self.frame(engines);
        self.remove_throw(&mut engines.push_animator);
        engines.push_animator.destroy_body(self.body);

        let frame = frame.unwrap_or_else(|| Rect::from_center_size(center, self.card.size()));
        self.body = engines.animator.create_body(frame.center(), frame.size());
        self.state = ViewState::Idle;
        self.snap_to_center(engines, center, damping)
    }

    /// Removes every behavior, then every body, the manager owns.
    pub fn teardown<E: PhysicsEngine>(&mut self, engines: &mut Engines<E>) {
        self.remove_snap(&mut engines.animator);
        self.remove_drag(&mut engines.animator);
        if self.throw.is_some() {
            self.remove_throw(&mut engines.push_animator);
            engines.push_animator.destroy_body(self.body);
        } else {
            engines.animator.destroy_body(self.body);
        }
        log::trace!("tore down {:?}", self.card);
    }

    fn remove_snap<E: PhysicsEngine>(&mut self, animator: &mut E) {
        if let Some(snap) = self.snap.take() {
            animator.remove_behavior(snap);
        }
    }

    fn remove_drag<E: PhysicsEngine>(&mut self, animator: &mut E) {
        if let Some(rig) = self.drag.take() {
            animator.remove_behavior(rig.card_attachment);
            animator.remove_behavior(rig.anchor_attachment);
            animator.destroy_body(rig.anchor);
        }
    }

    fn remove_throw<E: PhysicsEngine>(&mut self, push_animator: &mut E) {
        if let Some(rig) = self.throw.take() {
            for behavior in rig.behaviors {
                push_animator.remove_behavior(behavior);
            }
            push_animator.destroy_body(rig.proxy);
        }
    }
}

/// Throw vector of an accepted release: along the drag, at least as fast as
/// `min_velocity`.
pub fn exit_vector(movement: &Movement, min_velocity: f32) -> Vector {
    let speed = movement.velocity.magnitude().max(min_velocity);
    match movement
        .translation
        .normalized()
        .or_else(|| movement.velocity.normalized())
    {
        Some(direction) => direction * speed,
        None => Vector::ZERO,
    }
}

#[cfg(test)]
#[path = "tests/view_manager_tests.rs"]
mod tests;
