use spaceship_infinity::entities::*;

// ── Secret resolution ─────────────────────────────────────────────────────────

#[test]
fn secret_resolves_by_quarter() {
    assert_eq!(Cell::Secret.resolve(0), Some(Cell::Ammo));
    assert_eq!(Cell::Secret.resolve(24), Some(Cell::Ammo));
    assert_eq!(Cell::Secret.resolve(25), Some(Cell::Bonus));
    assert_eq!(Cell::Secret.resolve(49), Some(Cell::Bonus));
    assert_eq!(Cell::Secret.resolve(50), Some(Cell::Malus));
    assert_eq!(Cell::Secret.resolve(74), Some(Cell::Malus));
    assert_eq!(Cell::Secret.resolve(75), Some(Cell::Empty));
    assert_eq!(Cell::Secret.resolve(99), Some(Cell::Empty));
}

#[test]
fn secret_outcomes_are_evenly_split() {
    let outcomes: Vec<Cell> = (0..100).filter_map(|r| Cell::Secret.resolve(r)).collect();
    for cell in [Cell::Ammo, Cell::Bonus, Cell::Malus, Cell::Empty] {
        assert_eq!(outcomes.iter().filter(|&&c| c == cell).count(), 25);
    }
}

#[test]
fn only_secret_resolves() {
    for cell in [
        Cell::Empty,
        Cell::Wall,
        Cell::Ammo,
        Cell::Bonus,
        Cell::Malus,
        Cell::Unknown,
    ] {
        assert_eq!(cell.resolve(0), None);
        assert_eq!(cell.resolve(99), None);
    }
}

// ── Generated specials ────────────────────────────────────────────────────────

#[test]
fn special_roll_uses_cumulative_thresholds() {
    assert_eq!(Cell::special_from_roll(0), Cell::Secret);
    assert_eq!(Cell::special_from_roll(29), Cell::Secret);
    assert_eq!(Cell::special_from_roll(30), Cell::Bonus);
    assert_eq!(Cell::special_from_roll(59), Cell::Bonus);
    assert_eq!(Cell::special_from_roll(60), Cell::Malus);
    assert_eq!(Cell::special_from_roll(79), Cell::Malus);
    assert_eq!(Cell::special_from_roll(80), Cell::Ammo);
    assert_eq!(Cell::special_from_roll(99), Cell::Ammo);
}

#[test]
fn pickups() {
    assert!(Cell::Ammo.is_pickup());
    assert!(Cell::Bonus.is_pickup());
    assert!(Cell::Malus.is_pickup());
    assert!(!Cell::Secret.is_pickup());
    assert!(!Cell::Wall.is_pickup());
    assert!(!Cell::Empty.is_pickup());
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[test]
fn invalid_point_is_not_valid() {
    assert!(!Point::INVALID.is_valid());
    assert!(!Point::new(-1, 3).is_valid());
    assert!(!Point::new(3, -1).is_valid());
    assert!(Point::new(0, 0).is_valid());
}

#[test]
fn rect_is_half_open() {
    let r = Rect::sized(20, 10);
    assert!(r.contains(Point::new(0, 0)));
    assert!(r.contains(Point::new(19, 9)));
    assert!(!r.contains(Point::new(20, 9)));
    assert!(!r.contains(Point::new(19, 10)));
    assert!(!r.contains(Point::INVALID));
}
