//! Bullets in flight.

use crate::entities::{Point, Rect};

/// Ordered set of projectile positions.
///
/// No two live projectiles share a coordinate. A projectile that hit
/// something is overwritten with [`Point::INVALID`] and dropped by the next
/// [`prune`](ProjectileSet::prune).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectileSet {
    points: Vec<Point>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including ones marked invalid and not yet pruned.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    /// Add a projectile at `p`. Returns `false` (and changes nothing) when one
    /// is already there. Capacity is the caller's business.
    pub fn fire(&mut self, p: Point) -> bool {
        if self.contains(p) {
            return false;
        }
        self.points.push(p);
        true
    }

    pub fn advance_right(&mut self) {
        self.shift(1);
    }

    pub fn advance_left(&mut self) {
        self.shift(-1);
    }

    fn shift(&mut self, dx: i32) {
        for p in &mut self.points {
            p.x += dx;
        }
    }

    /// Drop every projectile outside `rect` and normalise invalid ones that
    /// are still inside it. Survivors keep their relative order.
    pub fn prune(&mut self, rect: Rect) {
        self.points.retain(|&p| rect.contains(p));
        for p in &mut self.points {
            if !p.is_valid() {
                *p = Point::INVALID;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Point> {
        self.points.iter_mut()
    }

    /// Projectiles that have not hit anything yet.
    pub fn live(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied().filter(|p| p.is_valid())
    }
}
