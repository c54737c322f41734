//! Run configuration, parsed from the command line or built in code.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use log::warn;

pub const MIN_HEIGHT: usize = 6;
pub const MAX_HEIGHT: usize = 99;
pub const MIN_WIDTH: usize = 15;
pub const MAX_WIDTH: usize = 99;

#[derive(Clone, Debug, PartialEq, Parser)]
#[command(name = "spaceship-infinity", version, about = "Fly an endless tunnel, shoot the rocks")]
pub struct Options {
    /// Height of the world in rows
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Width of the world in columns
    #[arg(long, default_value_t = 30)]
    pub width: usize,

    /// 0 or less: smooth deterministic tunnel; 1 and up: random, harder as it grows
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub difficulty: i32,

    /// Fixed number of seconds between turns
    #[arg(long)]
    pub constant_delay: Option<f64>,

    /// Starting ammo capacity (default: max(1, 5 - difficulty))
    #[arg(long)]
    pub ammo: Option<usize>,

    /// Points for a bonus pickup
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    pub bonus: i64,

    /// Points for a malus pickup
    #[arg(long, default_value_t = -1000, allow_negative_numbers = true)]
    pub malus: i64,

    /// Play in a still world: turns only advance when 's' is pressed
    #[arg(long)]
    pub still: bool,

    /// Show coordinates and timing information
    #[arg(long)]
    pub debug: bool,

    /// Use Unicode glyphs (false: plain ASCII)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub pretty: bool,

    /// Write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            height: 15,
            width: 30,
            difficulty: 1,
            constant_delay: None,
            ammo: None,
            bonus: 1000,
            malus: -1000,
            still: false,
            debug: false,
            pretty: true,
            log_file: None,
        }
    }
}

impl Options {
    /// Clamp the world size into its supported range.
    pub fn normalized(mut self) -> Self {
        let height = self.height.clamp(MIN_HEIGHT, MAX_HEIGHT);
        if height != self.height {
            warn!("height {} clamped to {}", self.height, height);
            self.height = height;
        }
        let width = self.width.clamp(MIN_WIDTH, MAX_WIDTH);
        if width != self.width {
            warn!("width {} clamped to {}", self.width, width);
            self.width = width;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(delay) = self.constant_delay {
            if !delay.is_finite() || delay <= 0.0 {
                bail!("constant delay must be a positive number of seconds, got {}", delay);
            }
        }
        if self.ammo == Some(0) {
            bail!("ammo must be at least 1");
        }
        Ok(())
    }

    /// Ammo capacity at the start of a run.
    pub fn starting_ammo(&self) -> usize {
        self.ammo
            .unwrap_or_else(|| (5 - i64::from(self.difficulty)).max(1) as usize)
    }
}
