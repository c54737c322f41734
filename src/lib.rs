//! Simulation core of a side-scrolling tunnel shooter.
//!
//! - `entities`: plain data (cells, points, keys)
//! - `column` / `terrain`: the procedurally generated world window
//! - `projectiles`: bullets in flight
//! - `compute`: the per-turn simulation and input handling
//! - `options`: run configuration

pub mod column;
pub mod compute;
pub mod entities;
pub mod options;
pub mod projectiles;
pub mod terrain;
