use super::*;

const SINGLES: [Direction; 5] = [
    Direction::NONE,
    Direction::LEFT,
    Direction::RIGHT,
    Direction::UP,
    Direction::DOWN,
];

#[test]
fn classify_zero_is_none() {
    assert_eq!(Direction::classify(Vector::ZERO), Direction::NONE);
    assert_eq!(
        Direction::classify(Vector::new(f32::NAN, 3.0)),
        Direction::NONE
    );
}

#[test]
fn classify_picks_dominant_axis_with_horizontal_ties() {
    assert_eq!(Direction::classify(Vector::new(120.0, 10.0)), Direction::RIGHT);
    assert_eq!(Direction::classify(Vector::new(-120.0, 10.0)), Direction::LEFT);
    assert_eq!(Direction::classify(Vector::new(5.0, -40.0)), Direction::UP);
    assert_eq!(Direction::classify(Vector::new(5.0, 40.0)), Direction::DOWN);
    assert_eq!(Direction::classify(Vector::new(30.0, 30.0)), Direction::RIGHT);
    assert_eq!(Direction::classify(Vector::new(-30.0, -30.0)), Direction::LEFT);
}

#[test]
fn classify_always_yields_a_single_direction() {
    let mut samples = Vec::new();
    for dx in [-500.0, -1.0, -0.0, 0.0, 0.5, 1.0, 250.0] {
        for dy in [-500.0, -1.0, 0.0, 0.5, 1.0, 250.0] {
            samples.push(Vector::new(dx, dy));
        }
    }
    for vector in samples {
        let direction = Direction::classify(vector);
        assert!(
            SINGLES.contains(&direction),
            "{vector:?} classified as composite {direction:?}"
        );
        assert!(direction.is_none() || direction.is_cardinal());
    }
}

#[test]
fn set_algebra_is_idempotent_commutative_and_associative() {
    let all_masks: Vec<Direction> = (0u8..16).map(Direction::from_bits).collect();
    for &a in &all_masks {
        assert_eq!(a | a, a);
        assert_eq!(a & a, a);
        for &b in &all_masks {
            assert_eq!(a | b, b | a);
            assert_eq!(a & b, b & a);
            for &c in &all_masks {
                assert_eq!((a | b) | c, a | (b | c));
                assert_eq!((a & b) & c, a & (b & c));
            }
        }
    }
}

#[test]
fn aggregates_are_unions_of_cardinals() {
    assert_eq!(Direction::HORIZONTAL, Direction::LEFT | Direction::RIGHT);
    assert_eq!(Direction::VERTICAL, Direction::UP | Direction::DOWN);
    assert_eq!(Direction::ALL, Direction::HORIZONTAL | Direction::VERTICAL);
    assert_eq!(Direction::HORIZONTAL & Direction::VERTICAL, Direction::NONE);
    assert!(Direction::HORIZONTAL.contains(Direction::LEFT));
    assert!(!Direction::HORIZONTAL.contains(Direction::UP));
    assert!(Direction::ALL.intersects(Direction::DOWN));
}

#[test]
fn display_names_known_masks() {
    assert_eq!(Direction::NONE.to_string(), "None");
    assert_eq!(Direction::DOWN.to_string(), "Down");
    assert_eq!(Direction::VERTICAL.to_string(), "Vertical");
    assert_eq!((Direction::LEFT | Direction::UP).to_string(), "Unknown");
}
