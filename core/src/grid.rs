use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-width rectangular board. Never resized after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Board with no pieces and no hazards, at least one row tall.
    pub fn empty(height: Coord) -> Self {
        let height = height.max(1);
        Self {
            cells: Array2::default((height, WIDTH).to_nd_index()),
        }
    }

    /// Board with both armies on their starting rows: black on rows 0-1, white on the last two.
    pub fn standard(height: Coord) -> Self {
        let height = height.max(MIN_HEIGHT);
        let mut grid = Self::empty(height);

        for (col, kind) in (0..WIDTH).zip(PieceKind::BACK_RANK) {
            grid[(0, col)].occupant = Some(Piece::new(kind, Color::Black));
            grid[(1, col)].occupant = Some(Piece::new(PieceKind::Pawn, Color::Black));
            grid[(height - 2, col)].occupant = Some(Piece::new(PieceKind::Pawn, Color::White));
            grid[(height - 1, col)].occupant = Some(Piece::new(kind, Color::White));
        }

        grid
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (height, width) = self.size();
        mult(height, width)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (height, width) = self.size();
        coords.0 < height && coords.1 < width
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.contains(coords).then(|| &self[coords])
    }

    /// Occupant at `coords`, `None` when empty or out of bounds.
    pub fn occupant(&self, coords: Coord2) -> Option<Piece> {
        self.get(coords).and_then(Cell::occupant)
    }

    pub fn put_piece(&mut self, coords: Coord2, piece: Piece) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords].occupant = Some(piece);
        Ok(())
    }

    /// Hides a hazard under an empty cell. Adjacency counts are refreshed by the engine.
    pub fn put_hazard(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if self[coords].is_occupied() {
            return Err(GameError::OccupiedCell);
        }
        self[coords].hazard = true;
        Ok(())
    }

    pub fn hazard_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.hazard)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn adjacent_hazard_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].hazard)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn flagged_neighbor_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].flagged)
            .count()
            .try_into()
            .unwrap()
    }

    pub(crate) fn update_hazard_counts(&mut self) {
        for coords in self.coords() {
            self[coords].adjacent_hazards = self.adjacent_hazard_count(coords);
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (height, width) = self.size();
        (0..height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
