use crate::*;
pub use random::*;

mod random;

/// Strategy for hiding hazards on a freshly set up grid.
///
/// Generators only set the hidden `hazard` bit; the engine recomputes adjacency counts afterwards.
pub trait HazardGenerator {
    /// Places hazards on `grid` and returns how many were placed.
    fn generate(self, grid: &mut Grid) -> Result<CellCount>;
}

/// Places hazards on exactly the given cells. Fails without touching the grid if any cell is out
/// of bounds or occupied.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedHazardGenerator<'a> {
    coords: &'a [Coord2],
}

impl<'a> FixedHazardGenerator<'a> {
    pub fn new(coords: &'a [Coord2]) -> Self {
        Self { coords }
    }
}

impl HazardGenerator for FixedHazardGenerator<'_> {
    fn generate(self, grid: &mut Grid) -> Result<CellCount> {
        for &coords in self.coords {
            let coords = grid.validate_coords(coords)?;
            if grid[coords].is_occupied() {
                return Err(GameError::OccupiedCell);
            }
        }

        for &coords in self.coords {
            grid.put_hazard(coords)?;
        }

        Ok(grid.hazard_count())
    }
}
