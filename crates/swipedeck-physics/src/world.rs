//! Default physics engine: unit-mass bodies driven by springs, rigid
//! attachments and pushes.

use swipedeck_core::collections::map::HashMap;
use swipedeck_geometry::{Point, Size, Vector};

use crate::engine::{
    AttachTarget, AttachmentSpec, Behavior, BehaviorId, BodyId, PhysicsEngine, PushMode,
};
use crate::spring::SpringSpec;

/// Fixed substep for stability (~60fps).
const TIMESTEP: f32 = 0.016;

/// Upper bound on simulated time per `step` call; longer gaps (a suspended
/// host, a debugger pause) are clamped instead of replayed.
const MAX_STEP: f32 = 0.25;

#[derive(Clone, Copy, Debug)]
struct Body {
    center: Point,
    size: Size,
    velocity: Vector,
}

#[derive(Clone, Copy, Debug)]
struct BehaviorRecord {
    id: BehaviorId,
    behavior: Behavior,
    /// Instantaneous pushes fire once; settled snaps stop driving their body.
    spent: bool,
}

/// Small deterministic simulation used as the default deck engine.
#[derive(Debug, Default)]
pub struct SpringWorld {
    bodies: HashMap<BodyId, Body>,
    /// Insertion-ordered so steps are deterministic.
    behaviors: Vec<BehaviorRecord>,
    next_body: u32,
    next_behavior: u32,
}

impl SpringWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn behavior(&self, id: BehaviorId) -> Option<&Behavior> {
        self.behaviors
            .iter()
            .find(|record| record.id == id)
            .map(|record| &record.behavior)
    }

    /// Whether every snap has settled and no body is moving.
    pub fn is_at_rest(&self) -> bool {
        let moving = self
            .bodies
            .values()
            .any(|body| body.velocity.magnitude() > SpringSpec::default().velocity_threshold);
        let pending_push = self.behaviors.iter().any(|record| {
            !record.spent
                && matches!(
                    record.behavior,
                    Behavior::Push {
                        mode: PushMode::Instantaneous,
                        ..
                    }
                )
        });
        !moving && !pending_push
    }

    fn target_point(&self, target: AttachTarget) -> Option<(Point, Option<Vector>)> {
        match target {
            AttachTarget::Point(point) => Some((point, None)),
            AttachTarget::Body { body, offset } => {
                let body = self.bodies.get(&body)?;
                Some((body.center + offset, Some(body.velocity)))
            }
        }
    }

    fn substep(&mut self, dt: f32) {
        let mut accelerations: HashMap<BodyId, Vector> = HashMap::default();
        let mut pinned: Vec<BodyId> = Vec::new();

        for index in 0..self.behaviors.len() {
            let record = self.behaviors[index];
            if record.spent {
                continue;
            }
            match record.behavior {
                Behavior::Push { body, vector, mode } => {
                    let Some(state) = self.bodies.get_mut(&body) else {
                        continue;
                    };
                    match mode {
                        PushMode::Instantaneous => {
                            state.velocity += vector;
                            self.behaviors[index].spent = true;
                        }
                        PushMode::Continuous => {
                            *accelerations.entry(body).or_default() += vector;
                        }
                    }
                }
                Behavior::Snap {
                    body,
                    point,
                    damping,
                } => {
                    let Some(state) = self.bodies.get_mut(&body) else {
                        continue;
                    };
                    let spring = SpringSpec::snap(damping);
                    let displacement = state.center.offset_from(point);
                    if spring.is_at_rest(displacement, state.velocity) {
                        state.center = point;
                        state.velocity = Vector::ZERO;
                        self.behaviors[index].spent = true;
                        continue;
                    }
                    *accelerations.entry(body).or_default() +=
                        spring.acceleration(displacement, state.velocity);
                }
                Behavior::Attachment {
                    body,
                    offset,
                    target,
                    spec,
                } => {
                    if spec.is_rigid() {
                        pinned.push(body);
                        continue;
                    }
                    let Some((target_point, _)) = self.target_point(target) else {
                        continue;
                    };
                    let Some(state) = self.bodies.get(&body) else {
                        continue;
                    };
                    let spring = SpringSpec::from_frequency(spec.frequency, spec.damping);
                    let displacement = attachment_displacement(state.center + offset, target_point, spec);
                    *accelerations.entry(body).or_default() +=
                        spring.acceleration(displacement, state.velocity);
                }
            }
        }

        // Semi-implicit Euler for every body not pinned by a rigid attachment.
        for (id, body) in self.bodies.iter_mut() {
            if pinned.contains(id) {
                continue;
            }
            if let Some(acceleration) = accelerations.get(id) {
                body.velocity += *acceleration * dt;
            }
            body.center = body.center + body.velocity * dt;
        }

        self.resolve_rigid(dt, true);
        self.resolve_rigid(dt, false);
    }

    /// Pins rigidly attached bodies to their targets. Point targets resolve
    /// first so proxies move before the bodies hanging from them.
    fn resolve_rigid(&mut self, dt: f32, point_targets: bool) {
        for index in 0..self.behaviors.len() {
            let Behavior::Attachment {
                body,
                offset,
                target,
                spec,
            } = self.behaviors[index].behavior
            else {
                continue;
            };
            if !spec.is_rigid() || matches!(target, AttachTarget::Point(_)) != point_targets {
                continue;
            }
            let Some((target_point, target_velocity)) = self.target_point(target) else {
                continue;
            };
            let Some(state) = self.bodies.get_mut(&body) else {
                continue;
            };
            let center = target_point - offset;
            state.velocity = match target_velocity {
                Some(velocity) => velocity,
                None if dt > 0.0 => center.offset_from(state.center) * (1.0 / dt),
                None => Vector::ZERO,
            };
            state.center = center;
        }
    }

    fn allocate_behavior(&mut self) -> BehaviorId {
        let id = BehaviorId(self.next_behavior);
        self.next_behavior = self.next_behavior.wrapping_add(1);
        id
    }
}

fn attachment_displacement(attach_point: Point, target: Point, spec: AttachmentSpec) -> Vector {
    let delta = attach_point.offset_from(target);
    if spec.length <= 0.0 {
        return delta;
    }
    match delta.normalized() {
        Some(direction) => delta - direction * spec.length,
        None => Vector::ZERO,
    }
}

impl PhysicsEngine for SpringWorld {
    fn create_body(&mut self, center: Point, size: Size) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body = self.next_body.wrapping_add(1);
        self.bodies.insert(
            id,
            Body {
                center,
                size,
                velocity: Vector::ZERO,
            },
        );
        id
    }

    fn destroy_body(&mut self, body: BodyId) -> bool {
        let existed = self.bodies.remove(&body).is_some();
        if existed {
            self.behaviors
                .retain(|record| !record.behavior.references(body));
        }
        existed
    }

    fn body_center(&self, body: BodyId) -> Option<Point> {
        self.bodies.get(&body).map(|body| body.center)
    }

    fn body_size(&self, body: BodyId) -> Option<Size> {
        self.bodies.get(&body).map(|body| body.size)
    }

    fn body_velocity(&self, body: BodyId) -> Option<Vector> {
        self.bodies.get(&body).map(|body| body.velocity)
    }

    fn set_body_center(&mut self, body: BodyId, center: Point) -> bool {
        match self.bodies.get_mut(&body) {
            Some(body) => {
                body.center = center;
                true
            }
            None => false,
        }
    }

    fn set_body_velocity(&mut self, body: BodyId, velocity: Vector) -> bool {
        match self.bodies.get_mut(&body) {
            Some(body) => {
                body.velocity = velocity;
                true
            }
            None => false,
        }
    }

    fn add_behavior(&mut self, behavior: Behavior) -> Option<BehaviorId> {
        if !self.bodies.contains_key(&behavior.body()) {
            return None;
        }
        if let Behavior::Attachment {
            target: AttachTarget::Body { body, .. },
            ..
        } = behavior
        {
            if !self.bodies.contains_key(&body) {
                return None;
            }
        }
        let id = self.allocate_behavior();
        self.behaviors.push(BehaviorRecord {
            id,
            behavior,
            spent: false,
        });
        Some(id)
    }

    fn remove_behavior(&mut self, behavior: BehaviorId) -> bool {
        let before = self.behaviors.len();
        self.behaviors.retain(|record| record.id != behavior);
        before != self.behaviors.len()
    }

    fn set_attachment_anchor(&mut self, behavior: BehaviorId, point: Point) -> bool {
        let Some(record) = self.behaviors.iter_mut().find(|record| record.id == behavior) else {
            return false;
        };
        match &mut record.behavior {
            Behavior::Attachment {
                target: AttachTarget::Point(anchor),
                ..
            } => {
                *anchor = point;
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        let total = if dt > MAX_STEP {
            log::trace!("clamping physics step of {dt}s to {MAX_STEP}s");
            MAX_STEP
        } else {
            dt
        };
        let mut elapsed = 0.0f32;
        while elapsed < total {
            let step = TIMESTEP.min(total - elapsed);
            self.substep(step);
            elapsed += step;
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    fn clear(&mut self) {
        self.behaviors.clear();
        self.bodies.clear();
    }
}

#[cfg(test)]
#[path = "tests/world_tests.rs"]
mod tests;
