use super::*;

fn run(world: &mut SpringWorld, seconds: f32) {
    let mut elapsed = 0.0;
    while elapsed < seconds {
        world.step(1.0 / 60.0);
        elapsed += 1.0 / 60.0;
    }
}

#[test]
fn snap_converges_on_target_and_settles() {
    let mut world = SpringWorld::new();
    let card = world.create_body(Point::new(260.0, 90.0), Size::new(200.0, 300.0));
    let target = Point::new(150.0, 200.0);
    world
        .add_behavior(Behavior::Snap {
            body: card,
            point: target,
            damping: 0.75,
        })
        .expect("body exists");

    run(&mut world, 2.0);

    let center = world.body_center(card).expect("body exists");
    assert!(
        center.offset_from(target).magnitude() < 0.5,
        "snap should land on target, got {center:?}"
    );
    assert!(world.is_at_rest());
}

#[test]
fn instantaneous_push_applies_once() {
    let mut world = SpringWorld::new();
    let proxy = world.create_body(Point::ZERO, Size::new(1.0, 1.0));
    world
        .add_behavior(Behavior::Push {
            body: proxy,
            vector: Vector::new(1000.0, 0.0),
            mode: PushMode::Instantaneous,
        })
        .expect("body exists");

    world.step(0.016);
    world.step(0.016);
    world.step(0.016);

    let velocity = world.body_velocity(proxy).expect("body exists");
    assert_eq!(velocity, Vector::new(1000.0, 0.0));
    let center = world.body_center(proxy).expect("body exists");
    assert!((center.x - 48.0).abs() < 0.01, "moved {}", center.x);
}

#[test]
fn rigid_chain_follows_moving_anchor_point() {
    let mut world = SpringWorld::new();
    let card = world.create_body(Point::new(100.0, 100.0), Size::new(80.0, 80.0));
    let anchor = world.create_body(Point::new(120.0, 90.0), Size::new(1.0, 1.0));
    world
        .add_behavior(Behavior::Attachment {
            body: card,
            offset: Vector::new(20.0, -10.0),
            target: AttachTarget::Body {
                body: anchor,
                offset: Vector::ZERO,
            },
            spec: AttachmentSpec::RIGID,
        })
        .expect("bodies exist");
    let to_point = world
        .add_behavior(Behavior::Attachment {
            body: anchor,
            offset: Vector::ZERO,
            target: AttachTarget::Point(Point::new(120.0, 90.0)),
            spec: AttachmentSpec::RIGID,
        })
        .expect("body exists");

    assert!(world.set_attachment_anchor(to_point, Point::new(170.0, 90.0)));
    world.step(0.016);

    assert_eq!(world.body_center(anchor), Some(Point::new(170.0, 90.0)));
    assert_eq!(world.body_center(card), Some(Point::new(150.0, 100.0)));
}

#[test]
fn damped_attachment_pulls_body_towards_point() {
    let mut world = SpringWorld::new();
    let anchor = world.create_body(Point::new(0.0, 0.0), Size::new(1.0, 1.0));
    world
        .add_behavior(Behavior::Attachment {
            body: anchor,
            offset: Vector::ZERO,
            target: AttachTarget::Point(Point::new(100.0, 0.0)),
            spec: AttachmentSpec::damped(4.0, 1.0),
        })
        .expect("body exists");

    run(&mut world, 1.0);

    let center = world.body_center(anchor).expect("body exists");
    assert!((center.x - 100.0).abs() < 1.0, "got {center:?}");
}

#[test]
fn destroying_a_body_drops_behaviors_that_reference_it() {
    let mut world = SpringWorld::new();
    let card = world.create_body(Point::ZERO, Size::new(10.0, 10.0));
    let anchor = world.create_body(Point::ZERO, Size::new(1.0, 1.0));
    world
        .add_behavior(Behavior::Attachment {
            body: card,
            offset: Vector::ZERO,
            target: AttachTarget::Body {
                body: anchor,
                offset: Vector::ZERO,
            },
            spec: AttachmentSpec::RIGID,
        })
        .expect("bodies exist");
    world
        .add_behavior(Behavior::Push {
            body: anchor,
            vector: Vector::new(0.0, 10.0),
            mode: PushMode::Continuous,
        })
        .expect("body exists");
    assert_eq!(world.behavior_count(), 2);

    assert!(world.destroy_body(anchor));

    assert_eq!(world.behavior_count(), 0);
    assert_eq!(world.body_count(), 1);
    assert!(!world.destroy_body(anchor));
}

#[test]
fn behaviors_on_missing_bodies_are_rejected() {
    let mut world = SpringWorld::new();
    let card = world.create_body(Point::ZERO, Size::new(10.0, 10.0));
    let missing = BodyId(99);

    assert!(world
        .add_behavior(Behavior::Snap {
            body: missing,
            point: Point::ZERO,
            damping: 0.5,
        })
        .is_none());
    assert!(world
        .add_behavior(Behavior::Attachment {
            body: card,
            offset: Vector::ZERO,
            target: AttachTarget::Body {
                body: missing,
                offset: Vector::ZERO,
            },
            spec: AttachmentSpec::RIGID,
        })
        .is_none());
    assert_eq!(world.behavior_count(), 0);
}

#[test]
fn snap_spring_uses_requested_damping() {
    let spring = SpringSpec::snap(0.75);
    assert_eq!(spring.damping_ratio, 0.75);
    assert_eq!(spring.stiffness, crate::spring::SNAP_STIFFNESS);
    assert!(spring.damping_coefficient() > 0.0);
}
