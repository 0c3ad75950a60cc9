//! Edge-router concrete scenarios (spec §8).

use dag_ascii::canvas::{Canvas, Direction, Position};
use dag_ascii::router::route_edge;

#[test]
fn single_edge_straight_down_preserves_endpoints() {
    let mut c = Canvas::create(3, 1, ' ');
    c.set(Position::new(0, 0), '.').unwrap();
    c.set(Position::new(2, 0), '.').unwrap();
    assert!(route_edge(&mut c, Position::new(0, 0), Direction::Straight, Position::new(2, 0), Direction::Straight));
    assert_eq!(c.render(), ".\n|\n.");
}

#[test]
fn diagonal_router_length_three_preserves_glyphs() {
    // Both ends prefer Left, but only the first row is a hard constraint —
    // each diagonal row shifts the deposited column by two, not one (see
    // src/router.rs), so two diagonal rows already cover the full four-column
    // drift and the search settles on Left, Left, Straight rather than three
    // slashes, which would overshoot.
    let mut c = Canvas::create(5, 5, ' ');
    c.set(Position::new(0, 4), '.').unwrap();
    c.set(Position::new(4, 0), '.').unwrap();
    assert!(route_edge(&mut c, Position::new(0, 4), Direction::Left, Position::new(4, 0), Direction::Left));
    let rendered = c.render();
    let lines: Vec<&str> = rendered.split('\n').collect();
    assert_eq!(lines[0].chars().nth(4), Some('.'));
    assert_eq!(lines[1].chars().nth(3), Some('/'));
    assert_eq!(lines[2].chars().nth(1), Some('/'));
    assert_eq!(lines[3].chars().nth(0), Some('|'));
    assert_eq!(lines[4].chars().nth(0), Some('.'));
}

#[test]
fn infeasible_direction_leaves_canvas_unchanged() {
    let mut c = Canvas::create(3, 2, ' ');
    c.set(Position::new(0, 1), '.').unwrap();
    c.set(Position::new(2, 0), '.').unwrap();
    let before = c.render();
    let ok = route_edge(&mut c, Position::new(0, 1), Direction::Right, Position::new(2, 0), Direction::Right);
    assert!(!ok);
    assert_eq!(c.render(), before);
}
