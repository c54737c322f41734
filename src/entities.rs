//! Game entity types: plain data plus the pure cell transitions.

// ── Cells ─────────────────────────────────────────────────────────────────────

/// Classification of one tile of the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// Impassable. Touching one ends the run.
    Wall,
    /// Raises the ammo capacity by one (up to [`MAX_AMMO`]).
    Ammo,
    /// Adds the configured bonus to the score.
    Bonus,
    /// Adds the configured malus to the score.
    Malus,
    /// Turns into Ammo, Bonus, Malus or Empty the first time the ship enters it.
    Secret,
    Unknown,
}

/// Ammo capacity never grows past this through pickups.
pub const MAX_AMMO: usize = 10;

impl Cell {
    /// One-shot resolution of a Secret cell from a roll in `0..100`.
    ///
    /// Returns `None` for anything that is not a Secret; a resolved cell
    /// never resolves again.
    pub fn resolve(self, roll: u32) -> Option<Cell> {
        if self != Cell::Secret {
            return None;
        }
        Some(match roll {
            0..=24 => Cell::Ammo,
            25..=49 => Cell::Bonus,
            50..=74 => Cell::Malus,
            _ => Cell::Empty,
        })
    }

    /// Special cell dropped into a freshly generated column, from a roll in `0..100`.
    pub fn special_from_roll(roll: u32) -> Cell {
        match roll {
            0..=29 => Cell::Secret,
            30..=59 => Cell::Bonus,
            60..=79 => Cell::Malus,
            _ => Cell::Ammo,
        }
    }

    /// Cells the ship collects (and clears) by flying over them.
    pub fn is_pickup(self) -> bool {
        matches!(self, Cell::Ammo | Cell::Bonus | Cell::Malus)
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer grid coordinate: `x` is the column index, `y` the row (0 = top).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Sentinel for a projectile that has hit something and awaits removal.
    pub const INVALID: Point = Point { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_valid(self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

/// Half-open rectangle: `x0 <= x < x1`, `y0 <= y < y1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    /// Rectangle anchored at the origin.
    pub fn sized(width: usize, height: usize) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width as i32,
            y1: height as i32,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// A key press as delivered by the frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key asks the ship to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Fire,
}
