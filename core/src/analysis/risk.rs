use crate::*;

/// Risk assumed for a hidden cell with no revealed neighbors.
pub const UNKNOWN_RISK: f64 = 0.12;

/// Upper bound on the estimated risk of any cell.
pub const MAX_RISK: f64 = 0.85;

const FLAG_WEIGHT: f64 = 0.9;
const RISK_SCALE: f64 = 6.0;

/// Rough chance that the hidden cell on `coords` holds a hazard, judged from what its neighbors show.
pub fn estimate_risk(grid: &Grid, coords: Coord2) -> f64 {
    let mut known = 0u32;
    let mut sum_counts = 0u32;
    let mut flagged = 0u32;

    for pos in grid.iter_neighbors(coords) {
        let cell = grid[pos];
        if cell.is_revealed() {
            known += 1;
            sum_counts += u32::from(cell.adjacent_hazards());
        }
        if cell.is_flagged() {
            flagged += 1;
        }
    }

    if known == 0 {
        return UNKNOWN_RISK;
    }

    let average = f64::from(sum_counts) / f64::from(known);
    ((average + f64::from(flagged) * FLAG_WEIGHT) / RISK_SCALE).min(MAX_RISK)
}

/// First numbered cell, in row-major order, whose flags already match its number and which still
/// has a hidden, unflagged neighbor to open.
pub fn find_quick_reveal_candidate(grid: &Grid) -> Option<Coord2> {
    grid.coords().find(|&coords| {
        let cell = grid[coords];
        cell.shows_number()
            && grid.flagged_neighbor_count(coords) == cell.adjacent_hazards()
            && grid.iter_neighbors(coords).any(|pos| grid[pos].is_openable())
    })
}
