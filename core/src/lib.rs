#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use history::*;
pub use movement::*;
pub use piece::*;
pub use types::*;

mod analysis;
mod cell;
mod engine;
mod error;
mod field;
mod generator;
mod grid;
mod history;
mod movement;
mod piece;
mod types;

/// Every board is eight columns wide.
pub const WIDTH: Coord = 8;

/// Smallest height that fits both armies without overlapping.
pub const MIN_HEIGHT: Coord = 4;

/// Snapshots kept for undo before the oldest ones are dropped.
pub const MAX_HISTORY: usize = 200;

/// Floor for the number of hazards requested at setup.
pub const MIN_HAZARDS: CellCount = 5;

/// Hazard level giving one hazard per eight cells.
pub const DEFAULT_HAZARD_LEVEL: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub height: Coord,
    pub hazard_level: u8,
    pub seed: u64,
}

impl GameConfig {
    pub const fn new_unchecked(height: Coord, hazard_level: u8, seed: u64) -> Self {
        Self {
            height,
            hazard_level,
            seed,
        }
    }

    pub fn new(height: Coord, hazard_level: u8) -> Self {
        let height = height.clamp(MIN_HEIGHT, Coord::MAX);
        Self::new_unchecked(height, hazard_level, 0)
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub const fn size(&self) -> Coord2 {
        (self.height, WIDTH)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.height, WIDTH)
    }

    /// `max(5, total * level / 16)`, never more than the board holds.
    pub fn hazard_target(&self) -> CellCount {
        let total = self.total_cells();
        let scaled = u32::from(total) * u32::from(self.hazard_level) / 16;
        let scaled = CellCount::try_from(scaled).unwrap_or(CellCount::MAX);
        scaled.max(MIN_HAZARDS).min(total)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(8, DEFAULT_HAZARD_LEVEL)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
