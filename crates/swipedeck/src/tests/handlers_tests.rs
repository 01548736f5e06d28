use super::*;

fn criteria(allowed: Direction) -> SwipeCriteria {
    SwipeCriteria {
        bounds: Size::new(300.0, 400.0),
        allowed_direction: allowed,
        min_translation_fraction: 0.25,
        min_velocity: 750.0,
    }
}

fn release(translation: Vector, velocity: Vector) -> Movement {
    Movement::new(Point::new(150.0, 200.0) + translation, translation, velocity)
}

#[test]
fn far_and_fast_horizontal_release_is_accepted() {
    let movement = release(Vector::new(120.0, 0.0), Vector::new(900.0, 0.0));
    assert!(default_should_swipe(&(), &movement, &criteria(Direction::HORIZONTAL)));
}

#[test]
fn disallowed_direction_is_rejected_regardless_of_magnitude() {
    let movement = release(Vector::new(120.0, 0.0), Vector::new(900.0, 0.0));
    assert!(!default_should_swipe(&(), &movement, &criteria(Direction::VERTICAL)));

    let huge = release(Vector::new(2_000.0, 0.0), Vector::new(8_000.0, 0.0));
    assert!(!default_should_swipe(&(), &huge, &criteria(Direction::VERTICAL)));
}

#[test]
fn velocity_against_translation_is_rejected() {
    let movement = release(Vector::new(120.0, 0.0), Vector::new(-900.0, 0.0));
    assert!(!default_should_swipe(&(), &movement, &criteria(Direction::ALL)));

    // A stray vertical velocity component breaks the per-axis sign match.
    let movement = release(Vector::new(120.0, 0.0), Vector::new(900.0, 3.0));
    assert!(!default_should_swipe(&(), &movement, &criteria(Direction::ALL)));
}

#[test]
fn short_drag_passes_on_speed_alone() {
    let slow = release(Vector::new(30.0, 2.0), Vector::new(400.0, 10.0));
    assert!(!default_should_swipe(&(), &slow, &criteria(Direction::HORIZONTAL)));

    let flicked = release(Vector::new(30.0, 2.0), Vector::new(1_200.0, 10.0));
    assert!(default_should_swipe(&(), &flicked, &criteria(Direction::HORIZONTAL)));
}

#[test]
fn vertical_travel_is_measured_against_height() {
    // 0.25 * 400 = 100
    let short = release(Vector::new(0.0, -90.0), Vector::new(0.0, -100.0));
    assert!(!default_should_swipe(&(), &short, &criteria(Direction::UP)));

    let long = release(Vector::new(0.0, -110.0), Vector::new(0.0, -100.0));
    assert!(default_should_swipe(&(), &long, &criteria(Direction::UP)));
}

#[test]
fn default_animation_fans_second_and_third_card() {
    let bounds = Size::new(300.0, 400.0);
    let cards = [0u8, 1, 2, 3];
    let transforms: Vec<CardTransform> = cards
        .iter()
        .enumerate()
        .map(|(index, card)| default_animate_view(card, index, &cards, bounds))
        .collect();

    assert_eq!(transforms[0].rotation, 0.0);
    assert!(transforms[1].rotation > 0.0);
    assert_eq!(transforms[2].rotation, -transforms[1].rotation);
    assert_eq!(transforms[3].rotation, 0.0);
    for transform in &transforms {
        assert_eq!(transform.center, Point::new(150.0, 200.0));
        assert_eq!(transform.pivot.dx, 0.0);
        assert!((transform.pivot.dy - 120.0).abs() < 1e-3);
        assert_eq!(transform.duration, Duration::from_millis(400));
    }
}

#[test]
fn default_interpretation_throws_along_cardinals_only() {
    let center = Point::new(150.0, 200.0);
    let (location, vector) = default_interpret_direction(&(), center, Direction::LEFT, &[()]);
    assert_eq!(location, Point::new(150.0, 140.0));
    assert_eq!(vector, Vector::new(-PROGRAMMATIC_SWIPE_VELOCITY, 0.0));

    let (_, vector) = default_interpret_direction(&(), center, Direction::DOWN, &[()]);
    assert_eq!(vector, Vector::new(0.0, PROGRAMMATIC_SWIPE_VELOCITY));

    let (_, vector) = default_interpret_direction(&(), center, Direction::HORIZONTAL, &[()]);
    assert_eq!(vector, Vector::ZERO);
}

#[test]
fn handlers_are_independently_replaceable() {
    let handlers = DeckHandlers::<u32>::default().with_should_swipe(|card, _, _| *card == 7);
    let movement = Movement::default();
    let criteria = criteria(Direction::ALL);

    assert!((handlers.should_swipe)(&7, &movement, &criteria));
    assert!(!(handlers.should_swipe)(&8, &movement, &criteria));
    let transform = (handlers.animate_view)(&7, 1, &[7, 8], Size::new(100.0, 100.0));
    assert!(transform.rotation > 0.0);
}
