use std::collections::HashSet;

use proptest::prelude::*;
use spaceship_infinity::entities::{Point, Rect};
use spaceship_infinity::projectiles::ProjectileSet;

fn points(set: &ProjectileSet) -> Vec<Point> {
    set.iter().copied().collect()
}

// ── fire ──────────────────────────────────────────────────────────────────────

#[test]
fn fire_appends_in_order() {
    let mut set = ProjectileSet::new();
    assert!(set.fire(Point::new(2, 3)));
    assert!(set.fire(Point::new(5, 1)));
    assert_eq!(points(&set), vec![Point::new(2, 3), Point::new(5, 1)]);
}

#[test]
fn fire_rejects_duplicate() {
    let mut set = ProjectileSet::new();
    assert!(set.fire(Point::new(2, 3)));
    assert!(!set.fire(Point::new(2, 3)));
    assert_eq!(set.len(), 1);
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn advance_shifts_every_projectile() {
    let mut set = ProjectileSet::new();
    set.fire(Point::new(2, 3));
    set.fire(Point::new(7, 0));
    set.advance_right();
    assert_eq!(points(&set), vec![Point::new(3, 3), Point::new(8, 0)]);
    set.advance_left();
    set.advance_left();
    assert_eq!(points(&set), vec![Point::new(1, 3), Point::new(6, 0)]);
}

// ── prune ─────────────────────────────────────────────────────────────────────

#[test]
fn prune_drops_outside_and_keeps_order() {
    let mut set = ProjectileSet::new();
    for p in [
        Point::new(0, 0),
        Point::new(20, 1),
        Point::new(5, 5),
        Point::new(-1, 2),
        Point::new(19, 9),
        Point::new(3, 10),
    ] {
        set.fire(p);
    }
    set.prune(Rect::sized(20, 10));
    assert_eq!(
        points(&set),
        vec![Point::new(0, 0), Point::new(5, 5), Point::new(19, 9)]
    );
}

#[test]
fn prune_removes_invalidated_projectiles() {
    let mut set = ProjectileSet::new();
    set.fire(Point::new(4, 4));
    set.fire(Point::new(6, 4));
    if let Some(p) = set.iter_mut().next() {
        *p = Point::INVALID;
    }
    set.prune(Rect::sized(20, 10));
    assert_eq!(points(&set), vec![Point::new(6, 4)]);
}

#[test]
fn prune_keeps_inside_invalid_as_sentinel() {
    // A rectangle reaching into negative space still normalises invalid entries.
    let rect = Rect { x0: -5, y0: -5, x1: 5, y1: 5 };
    let mut set = ProjectileSet::new();
    set.fire(Point::new(-3, 2));
    set.prune(rect);
    assert_eq!(points(&set), vec![Point::INVALID]);
    set.prune(rect);
    assert_eq!(points(&set), vec![Point::INVALID]);
}

#[test]
fn live_skips_invalid() {
    let mut set = ProjectileSet::new();
    set.fire(Point::new(1, 1));
    set.fire(Point::INVALID);
    assert_eq!(set.live().collect::<Vec<_>>(), vec![Point::new(1, 1)]);
}

// ── Invariants over arbitrary operation sequences ─────────────────────────────

#[derive(Clone, Debug)]
enum Op {
    Fire(i32, i32),
    Right,
    Left,
    Prune,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..20i32, 0..10i32).prop_map(|(x, y)| Op::Fire(x, y)),
        Just(Op::Right),
        Just(Op::Left),
        Just(Op::Prune),
    ]
}

fn apply(set: &mut ProjectileSet, op: &Op) {
    match *op {
        Op::Fire(x, y) => {
            set.fire(Point::new(x, y));
        }
        Op::Right => set.advance_right(),
        Op::Left => set.advance_left(),
        Op::Prune => set.prune(Rect::sized(20, 10)),
    }
}

proptest! {
    #[test]
    fn live_projectiles_never_share_a_cell(ops in prop::collection::vec(op(), 0..80)) {
        let mut set = ProjectileSet::new();
        for op in &ops {
            apply(&mut set, op);
            let live: Vec<Point> = set.live().collect();
            let unique: HashSet<Point> = live.iter().copied().collect();
            prop_assert_eq!(live.len(), unique.len());
        }
    }

    #[test]
    fn prune_is_idempotent(ops in prop::collection::vec(op(), 0..80)) {
        let mut set = ProjectileSet::new();
        for op in &ops {
            apply(&mut set, op);
        }
        let rect = Rect::sized(20, 10);
        set.prune(rect);
        let once = set.clone();
        set.prune(rect);
        prop_assert_eq!(set, once);
    }
}
