//! The visible world: a sliding window of procedurally generated columns.

use std::collections::VecDeque;
use std::f64::consts::PI;

use log::debug;
use rand::Rng;

use crate::column::Column;
use crate::entities::{Cell, Point};

/// Columns left wide open at the spawn side when the run starts.
pub const SAFE_COLUMNS: usize = 10;

/// Amplitude (in rows) of the trigonometric tunnel walls.
const TRIG_AMPLITUDE: f64 = 6.0;

/// Chance (in percent) that a randomized column uses the next harder regime.
const REGIME_BUMP_PERCENT: u32 = 2;

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Fixed-width window over an endless tunnel. Index 0 is the leftmost column.
#[derive(Clone, Debug)]
pub struct Terrain {
    columns: VecDeque<Column>,
    height: usize,
    width: usize,
    difficulty: i32,
    /// Generator cursors for the trigonometric walls. Moving them forward or
    /// backward keeps the tunnel continuous whichever way the window scrolls.
    gen_low: i32,
    gen_high: i32,
}

impl Terrain {
    /// Build a full window of `width` columns.
    ///
    /// With a non-zero difficulty the columns nearest the spawn point are left
    /// fully open so the run does not start inside a wall.
    pub fn init(height: usize, width: usize, difficulty: i32, rng: &mut impl Rng) -> Self {
        let mut terrain = Self {
            columns: VecDeque::with_capacity(width),
            height,
            width,
            difficulty,
            gen_low: 0,
            gen_high: 0,
        };

        // Generated right-to-left: each new column is pushed at the front.
        for k in 0..width {
            let index = width - 1 - k;
            let column = if difficulty != 0 && index < SAFE_COLUMNS {
                Column::new(height, 0, height as i32 - 1)
            } else {
                terrain.new_column(true, rng)
            };
            terrain.columns.push_front(column);
        }

        terrain
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    /// Cell at `(x, y)`; anything outside the window reads as Empty.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.column(x).map_or(Cell::Empty, |c| c.get(y))
    }

    pub fn cell_at(&self, p: Point) -> Cell {
        self.cell(p.x, p.y)
    }

    pub fn column(&self, x: i32) -> Option<&Column> {
        let x = usize::try_from(x).ok()?;
        self.columns.get(x)
    }

    pub fn column_mut(&mut self, x: i32) -> Option<&mut Column> {
        let x = usize::try_from(x).ok()?;
        self.columns.get_mut(x)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Where the ship starts: the first open row of column 1.
    pub fn start_point(&self) -> Point {
        let y = self
            .column(1)
            .and_then(|c| c.cells().iter().position(|&cell| cell == Cell::Empty))
            .unwrap_or(0);
        Point::new(1, y as i32)
    }

    // ── Scrolling ─────────────────────────────────────────────────────────────

    /// The world moves one column toward the ship: a new column enters on the
    /// right and the leftmost one is dropped.
    pub fn scroll_right(&mut self, rng: &mut impl Rng) {
        let column = self.new_column(false, rng);
        self.columns.push_back(column);
        self.columns.pop_front();
    }

    /// The world moves one column away from the ship: a new column enters on
    /// the left and the rightmost one is dropped.
    pub fn scroll_left(&mut self, rng: &mut impl Rng) {
        let column = self.new_column(true, rng);
        self.columns.push_front(column);
        self.columns.pop_back();
    }

    /// Apply one gravity step to every column.
    pub fn fall(&mut self) {
        for column in &mut self.columns {
            column.fall();
        }
    }

    // ── Generation ────────────────────────────────────────────────────────────

    fn new_column(&mut self, forward: bool, rng: &mut impl Rng) -> Column {
        if self.difficulty <= 0 {
            let step = if forward { 1 } else { -1 };
            self.gen_low += step;
            self.gen_high += step;
            return trig_column(self.gen_low, self.gen_high, self.height);
        }

        let mut column = random_column(self.height, self.difficulty, rng);
        let threshold = 10 - self.difficulty;
        if rng.gen_range(0..100i32) < threshold {
            let special = Cell::special_from_roll(rng.gen_range(0..100));
            let y = rng.gen_range(0..self.height);
            column.set(y, special);
            debug!("generated {:?} at row {}", special, y);
        }
        column
    }
}

// ── Column generators ─────────────────────────────────────────────────────────

/// Top edge of the open gap for the trigonometric tunnel (never above row 0).
pub fn trig_low(gen_low: i32) -> i32 {
    let gen = (f64::from(gen_low) / PI).sin() * TRIG_AMPLITUDE;
    gen.max(0.0) as i32
}

/// Bottom edge of the open gap for the trigonometric tunnel (never past `height`).
pub fn trig_high(gen_high: i32, height: usize) -> i32 {
    let height = height as f64;
    let gen = height - (f64::from(gen_high) / PI).cos() * TRIG_AMPLITUDE;
    gen.min(height) as i32
}

fn trig_column(gen_low: i32, gen_high: i32, height: usize) -> Column {
    Column::new(height, trig_low(gen_low), trig_high(gen_high, height))
}

fn random_column(height: usize, difficulty: i32, rng: &mut impl Rng) -> Column {
    let height = height as i32;
    let half = (height / 2).max(1);
    let bump = i32::from(rng.gen_range(0..100u32) < REGIME_BUMP_PERCENT);
    let regime = difficulty + bump;

    let (top, bottom) = if regime <= 1 {
        // Narrow gap hugging mid-height.
        let bias_limit = height / rng.gen_range(2..6i32);
        let bias = rng.gen_range(0..bias_limit.max(1));
        let bottom = half + rng.gen_range(0..half) - bias;
        let mut top = rng.gen_range(0..half) + bias;
        if top > bottom {
            top = bottom - 1;
        }
        (top.max(0), bottom)
    } else {
        // Two independent bounds, widened if they nearly touch.
        let mut top = rng.gen_range(0..height);
        if top > half {
            top -= rng.gen_range(0..half);
        }
        let mut bottom = rng.gen_range(top..height);
        if bottom - top <= 1 {
            bottom += rng.gen_range(0..half);
        }
        (top, bottom)
    };

    Column::new(height as usize, top, bottom)
}
