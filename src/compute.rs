//! Simulation: one discrete turn at a time, plus input handling.
//!
//! All randomness comes through the injected `rng` so callers control
//! determinism (tests pass a seeded RNG).

use log::{debug, info, trace};
use rand::Rng;

use crate::entities::{Cell, Command, Direction, Key, Point, Rect, MAX_AMMO};
use crate::options::Options;
use crate::projectiles::ProjectileSet;
use crate::terrain::Terrain;

/// Each shot costs `FIRE_COST * n²` points, `n` being its rank among the
/// bullets in flight.
pub const FIRE_COST: i64 = 20;

/// Score awarded per second survived.
pub const POINTS_PER_SECOND: i64 = 10;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Seconds between two turns once `elapsed` seconds have passed.
pub fn turn_delay(difficulty: i32, elapsed: f64) -> f64 {
    match difficulty {
        i32::MIN..=0 => {
            if elapsed > 59.0 {
                0.3
            } else {
                1.0 - elapsed / 60.0
            }
        }
        1 => {
            if elapsed > 30.0 {
                0.25
            } else {
                1.0 - elapsed / 45.0
            }
        }
        _ => {
            if elapsed > 14.0 {
                0.15
            } else {
                1.0 - elapsed / 15.0
            }
        }
    }
}

/// Translate a key into a ship command.
///
/// From difficulty 2 on, only the vim letters (`h`, `j`, `k`, `l`) move the
/// ship; digits and arrows are ignored.
pub fn decode_key(key: Key, difficulty: i32) -> Option<Command> {
    let vim_only = difficulty >= 2;
    let (direction, vim) = match key {
        Key::Char(' ') => return Some(Command::Fire),
        Key::Char('k') => (Direction::Up, true),
        Key::Char('j') => (Direction::Down, true),
        Key::Char('h') => (Direction::Left, true),
        Key::Char('l') => (Direction::Right, true),
        Key::Char('8') | Key::Up => (Direction::Up, false),
        Key::Char('2') | Key::Down => (Direction::Down, false),
        Key::Char('4') | Key::Left => (Direction::Left, false),
        Key::Char('6') | Key::Right => (Direction::Right, false),
        Key::Char(_) => return None,
    };
    if vim_only && !vim {
        return None;
    }
    Some(Command::Move(direction))
}

// ── Game ─────────────────────────────────────────────────────────────────────

/// Everything a run owns.
#[derive(Clone, Debug)]
pub struct Game {
    pub options: Options,
    pub terrain: Terrain,
    pub ship: Point,
    pub bullets: ProjectileSet,
    /// Current ammo capacity: how many bullets may be in flight at once.
    pub bullet_max: usize,
    /// Running sum of pickups and firing costs.
    pub bonus: i64,
    /// Seconds since the run started, supplied by the frontend.
    pub elapsed_time: f64,
    /// Seconds between turns, supplied by the frontend.
    pub delay: f64,
    pub last_input: Option<Key>,
}

impl Game {
    /// Start a run: build the world and put the ship on the first open cell
    /// of column 1.
    pub fn new(options: Options, rng: &mut impl Rng) -> Self {
        let options = options.normalized();
        let terrain = Terrain::init(options.height, options.width, options.difficulty, rng);
        Self::with_terrain(options, terrain)
    }

    /// Start a run on an already built world.
    pub fn with_terrain(options: Options, terrain: Terrain) -> Self {
        let ship = terrain.start_point();
        let bullet_max = options.starting_ammo();
        info!(
            "new game: {}x{} difficulty {} ammo {} ship at ({}, {})",
            terrain.width(),
            terrain.height(),
            terrain.difficulty(),
            bullet_max,
            ship.x,
            ship.y
        );
        Self {
            options,
            terrain,
            ship,
            bullets: ProjectileSet::new(),
            bullet_max,
            bonus: 0,
            elapsed_time: 0.0,
            delay: f64::MIN_POSITIVE,
            last_input: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// The run is over as soon as the ship sits on a Wall.
    pub fn is_alive(&self) -> bool {
        self.terrain.cell_at(self.ship) != Cell::Wall
    }

    pub fn score(&self) -> i64 {
        self.bonus + self.elapsed_time.max(0.0).floor() as i64 * POINTS_PER_SECOND
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Delay the frontend should wait before the next turn.
    pub fn next_delay(&self) -> f64 {
        self.options
            .constant_delay
            .unwrap_or_else(|| turn_delay(self.options.difficulty, self.elapsed_time))
    }

    pub fn fired_bullets(&self) -> usize {
        self.bullets.len()
    }

    /// The playfield; projectiles outside it are discarded.
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.terrain.width(), self.terrain.height())
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    pub fn set_elapsed_time(&mut self, t: f64) {
        self.elapsed_time = t;
    }

    pub fn set_delay(&mut self, delay: f64) {
        self.delay = delay;
    }

    /// Advance the world by one turn.
    ///
    /// The steps run strictly in this order; each one sees the geometry the
    /// previous one produced.
    pub fn compute_turn(&mut self, rng: &mut impl Rng) {
        if !self.is_alive() {
            return;
        }
        self.check_special_cells(rng);
        self.check_bullets();
        self.terrain.scroll_right(rng);
        self.check_bullets();
        self.bullets.advance_right();
        self.check_bullets();
        self.terrain.fall();
        self.check_bullets();
        self.check_special_cells(rng);
        trace!(
            "turn: ship ({}, {}) bullets {} bonus {}",
            self.ship.x,
            self.ship.y,
            self.bullets.len(),
            self.bonus
        );
    }

    /// Apply one key press.
    pub fn process_input(&mut self, key: Key, rng: &mut impl Rng) {
        if !self.is_alive() {
            return;
        }
        match decode_key(key, self.options.difficulty) {
            Some(Command::Move(direction)) => self.move_ship(direction, rng),
            Some(Command::Fire) => self.fire(),
            None => {}
        }
        self.last_input = Some(key);
        self.check_special_cells(rng);
    }

    /// Destroy every live bullet sitting on a non-Empty cell, clearing the
    /// cell it hit, then prune.
    pub fn check_bullets(&mut self) {
        let bounds = self.bounds();
        self.bullets.prune(bounds);
        for p in self.bullets.iter_mut() {
            if !p.is_valid() {
                continue;
            }
            let Some(column) = self.terrain.column_mut(p.x) else {
                continue;
            };
            let hit = column.get(p.y);
            if hit != Cell::Empty {
                debug!("bullet hit {:?} at ({}, {})", hit, p.x, p.y);
                column.set(p.y as usize, Cell::Empty);
                *p = Point::INVALID;
            }
        }
        self.bullets.prune(bounds);
    }

    /// Resolve a Secret under the ship, then collect any pickup there.
    pub fn check_special_cells(&mut self, rng: &mut impl Rng) {
        let Some(column) = self.terrain.column_mut(self.ship.x) else {
            return;
        };
        let Ok(row) = usize::try_from(self.ship.y) else {
            return;
        };
        let mut cell = column.get(self.ship.y);

        let resolved = match cell {
            Cell::Secret => cell.resolve(rng.gen_range(0..100)),
            _ => None,
        };
        if let Some(resolved) = resolved {
            debug!("secret at ({}, {}) resolved to {:?}", self.ship.x, self.ship.y, resolved);
            column.set(row, resolved);
            cell = resolved;
        }

        if !cell.is_pickup() {
            return;
        }
        column.set(row, Cell::Empty);
        match cell {
            Cell::Ammo => {
                if self.bullet_max < MAX_AMMO {
                    self.bullet_max += 1;
                }
                debug!("ammo pickup, capacity now {}", self.bullet_max);
            }
            Cell::Bonus => {
                self.bonus += self.options.bonus;
                debug!("bonus pickup, bonus now {}", self.bonus);
            }
            Cell::Malus => {
                self.bonus += self.options.malus;
                debug!("malus pickup, bonus now {}", self.bonus);
            }
            _ => {}
        }
    }

    // ── Input helpers ────────────────────────────────────────────────────────

    /// Edge clamps scroll the world one column and shift the bullets with it,
    /// so bullets keep their world position.
    fn move_ship(&mut self, direction: Direction, rng: &mut impl Rng) {
        let Point { x, y } = self.ship;
        let height = self.terrain.height() as i32;
        let width = self.terrain.width() as i32;
        let open = |dx: i32, dy: i32| self.terrain.cell(x + dx, y + dy) != Cell::Wall;

        match direction {
            Direction::Up => {
                if y > 0 && open(0, -1) {
                    self.ship.y -= 1;
                }
            }
            Direction::Down => {
                if y < height - 1 && open(0, 1) {
                    self.ship.y += 1;
                }
            }
            Direction::Left => {
                if x >= 1 && open(-1, 0) {
                    self.ship.x -= 1;
                }
                // Only the deterministic tunnel can be flown backwards.
                if self.ship.x <= 0 && self.options.difficulty <= 0 {
                    self.terrain.scroll_left(rng);
                    self.ship.x += 1;
                    self.bullets.advance_right();
                    debug!("left edge reached, world scrolled back");
                }
            }
            Direction::Right => {
                if x < width && open(1, 0) {
                    self.ship.x += 1;
                }
                if self.ship.x >= width - 1 {
                    self.terrain.scroll_right(rng);
                    self.ship.x -= 1;
                    self.bullets.advance_left();
                    debug!("right edge reached, world scrolled forward");
                }
            }
        }
    }

    fn fire(&mut self) {
        let fired = self.bullets.len();
        if fired >= self.bullet_max {
            debug!("fire rejected: {} of {} bullets in flight", fired, self.bullet_max);
            return;
        }
        let target = Point::new(self.ship.x + 1, self.ship.y);
        if !self.bullets.fire(target) {
            debug!("fire rejected: bullet already at ({}, {})", target.x, target.y);
            return;
        }
        let rank = fired as i64 + 1;
        self.bonus -= FIRE_COST * rank * rank;
    }
}
