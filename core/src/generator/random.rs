use rand::rngs::SmallRng;

use super::*;

/// Budgeted rejection sampling: draw uniformly random cells and hide a hazard on any that is
/// empty and hazard-free, giving up after `20 * target` draws.
#[derive(Debug)]
pub struct RandomHazardGenerator<'a> {
    rng: &'a mut SmallRng,
    target: CellCount,
}

impl<'a> RandomHazardGenerator<'a> {
    pub const ATTEMPTS_PER_HAZARD: u32 = 20;

    pub fn new(rng: &'a mut SmallRng, target: CellCount) -> Self {
        Self { rng, target }
    }
}

impl HazardGenerator for RandomHazardGenerator<'_> {
    fn generate(mut self, grid: &mut Grid) -> Result<CellCount> {
        use rand::prelude::*;

        let (height, width) = grid.size();
        let target = self.target.min(grid.total_cells());
        let budget = u32::from(target) * Self::ATTEMPTS_PER_HAZARD;

        let mut placed: CellCount = 0;
        let mut attempts = 0;
        while placed < target && attempts < budget {
            let coords = (
                self.rng.random_range(0..height),
                self.rng.random_range(0..width),
            );
            let cell = &mut grid[coords];
            if !cell.hazard && !cell.is_occupied() {
                cell.hazard = true;
                placed += 1;
            }
            attempts += 1;
        }

        // running out of attempts is accepted, the board just ends up with fewer hazards
        if placed < target {
            log::warn!(
                "Hazard placement ran out of attempts, placed {} of {} requested",
                placed,
                target
            );
        }

        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn never_places_on_pieces() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut grid = Grid::standard(8);

        let placed = RandomHazardGenerator::new(&mut rng, 8)
            .generate(&mut grid)
            .unwrap();

        assert_eq!(placed, grid.hazard_count());
        assert!(placed <= 8);
        assert!(grid
            .coords()
            .all(|pos| !(grid[pos].has_hazard() && grid[pos].is_occupied())));
    }

    #[test]
    fn full_board_gives_up_without_error() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut grid = Grid::standard(4);

        let placed = RandomHazardGenerator::new(&mut rng, 10)
            .generate(&mut grid)
            .unwrap();

        assert_eq!(placed, 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let mut grid_a = Grid::standard(10);
        let mut grid_b = Grid::standard(10);

        RandomHazardGenerator::new(&mut SmallRng::seed_from_u64(42), 10)
            .generate(&mut grid_a)
            .unwrap();
        RandomHazardGenerator::new(&mut SmallRng::seed_from_u64(42), 10)
            .generate(&mut grid_b)
            .unwrap();

        assert_eq!(grid_a, grid_b);
    }
}
