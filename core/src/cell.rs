use serde::{Deserialize, Serialize};

use crate::Piece;

/// One board square: optional occupant plus hazard-field state.
///
/// `adjacent_hazards` is computed for every cell at setup and refreshed on reveal, but callers
/// should only surface it through [`Cell::shows_number`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) occupant: Option<Piece>,
    pub(crate) revealed: bool,
    pub(crate) exploded: bool,
    pub(crate) hazard: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_hazards: u8,
}

impl Cell {
    pub const fn occupant(&self) -> Option<Piece> {
        self.occupant
    }

    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub const fn has_hazard(&self) -> bool {
        self.hazard
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn adjacent_hazards(&self) -> u8 {
        self.adjacent_hazards
    }

    /// Revealed, not exploded, and next to at least one hazard.
    pub const fn shows_number(&self) -> bool {
        self.revealed && !self.exploded && self.adjacent_hazards > 0
    }

    /// Hidden and not flagged, so a chord would open it.
    pub const fn is_openable(&self) -> bool {
        !self.revealed && !self.flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_hidden_until_revealed_safely() {
        let mut cell = Cell {
            adjacent_hazards: 2,
            ..Default::default()
        };
        assert!(!cell.shows_number());

        cell.revealed = true;
        assert!(cell.shows_number());

        cell.exploded = true;
        assert!(!cell.shows_number());
    }

    #[test]
    fn flagged_cell_is_not_openable() {
        let cell = Cell {
            flagged: true,
            ..Default::default()
        };
        assert!(!cell.is_openable());
        assert!(Cell::default().is_openable());
    }
}
