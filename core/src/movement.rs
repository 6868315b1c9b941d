//! Chess movement predicates. They consult only occupancy, never hazard or reveal state, and
//! never mutate anything.

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord2,
    pub to: Coord2,
}

impl Move {
    pub const fn new(from: Coord2, to: Coord2) -> Self {
        Self { from, to }
    }
}

impl Piece {
    /// Whether this piece, standing on `from`, may move to `to` on `grid`.
    pub fn can_move(&self, from: Coord2, to: Coord2, grid: &Grid) -> bool {
        if from == to || !grid.contains(from) || !grid.contains(to) {
            return false;
        }

        let d_row = i16::from(to.0) - i16::from(from.0);
        let d_col = i16::from(to.1) - i16::from(from.1);

        match self.kind {
            PieceKind::Pawn => self.pawn_can_move(from, to, grid),
            PieceKind::Knight => {
                let shape = (d_row.abs(), d_col.abs());
                matches!(shape, (1, 2) | (2, 1)) && self.can_land_on(to, grid)
            }
            PieceKind::King => {
                d_row.abs() <= 1 && d_col.abs() <= 1 && self.can_land_on(to, grid)
            }
            PieceKind::Rook => (d_row == 0 || d_col == 0) && self.slide(from, to, grid),
            PieceKind::Bishop => d_row.abs() == d_col.abs() && self.slide(from, to, grid),
            PieceKind::Queen => {
                (d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs())
                    && self.slide(from, to, grid)
            }
        }
    }

    /// Destination is empty or holds an enemy.
    fn can_land_on(&self, to: Coord2, grid: &Grid) -> bool {
        grid.occupant(to)
            .is_none_or(|target| target.color != self.color)
    }

    /// Straight or diagonal line with every intermediate cell empty. Direction is checked by the caller.
    fn slide(&self, from: Coord2, to: Coord2, grid: &Grid) -> bool {
        let step = (
            (i16::from(to.0) - i16::from(from.0)).signum(),
            (i16::from(to.1) - i16::from(from.1)).signum(),
        );

        let mut pos = from;
        loop {
            let Some(next) = offset(pos, step, grid.size()) else {
                return false;
            };
            if next == to {
                return self.can_land_on(to, grid);
            }
            if grid[next].is_occupied() {
                return false;
            }
            pos = next;
        }
    }

    fn pawn_can_move(&self, from: Coord2, to: Coord2, grid: &Grid) -> bool {
        let forward = self.color.forward();
        let d_row = i16::from(to.0) - i16::from(from.0);
        let d_col = i16::from(to.1) - i16::from(from.1);
        let target = grid.occupant(to);

        if d_col == 0 {
            if d_row == forward {
                return target.is_none();
            }

            if d_row == 2 * forward
                && !self.has_moved
                && from.0 == self.color.pawn_rank(grid.height())
            {
                let Some(middle) = offset(from, (forward, 0), grid.size()) else {
                    return false;
                };
                return target.is_none() && !grid[middle].is_occupied();
            }

            return false;
        }

        if d_col.abs() != 1 || d_row != forward {
            return false;
        }

        match target {
            Some(enemy) => enemy.color != self.color,
            // Loose en passant: any enemy pawn beside us that has moved at least once, regardless
            // of whether its last move was a double step. The passed pawn stays on the board.
            None => grid
                .occupant((from.0, to.1))
                .is_some_and(|side| side.is_pawn() && side.color != self.color && side.has_moved),
        }
    }
}

/// Whether the occupant of `from`, if any, may move to `to`.
pub fn can_move(grid: &Grid, from: Coord2, to: Coord2) -> bool {
    grid.occupant(from)
        .is_some_and(|piece| piece.can_move(from, to, grid))
}

/// Every destination the occupant of `from` may move to, in row-major order.
pub fn legal_destinations(grid: &Grid, from: Coord2) -> impl Iterator<Item = Coord2> + '_ {
    let piece = grid.occupant(from);
    grid.coords()
        .filter(move |&to| piece.is_some_and(|piece| piece.can_move(from, to, grid)))
}

/// Every move available to `side`, ordered by source then destination in row-major order.
pub fn legal_moves(grid: &Grid, side: Color) -> impl Iterator<Item = Move> + '_ {
    grid.coords()
        .filter(move |&from| grid.occupant(from).is_some_and(|piece| piece.color == side))
        .flat_map(move |from| legal_destinations(grid, from).map(move |to| Move::new(from, to)))
}
