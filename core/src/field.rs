//! Hazard field: reveals, flood fill, explosions, and the chord (quick reveal).

use alloc::vec;

use crate::*;

impl Game {
    /// Uncovers `coords`. Flagged or already revealed cells are left alone.
    ///
    /// A hazard explodes and destroys whatever stands on it; a safe cell with no adjacent hazards
    /// opens its whole zero region.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.reveal_from(coords))
    }

    /// Chord on the numbered cell `coords`: when its flagged neighbors match its number, every
    /// other hidden neighbor is revealed.
    ///
    /// If that sets off a hazard, the piece on `trigger` (if still there) is removed as a penalty.
    /// The turn passes only when `consume_turn` is set and something was actually opened;
    /// otherwise nothing changes and nothing is recorded for undo.
    pub fn check_quick_reveal(
        &mut self,
        coords: Coord2,
        trigger: Option<Coord2>,
        consume_turn: bool,
    ) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if let Some(trigger) = trigger {
            self.grid.validate_coords(trigger)?;
        }
        self.check_not_finished()?;

        self.save_snapshot();
        let outcome = self.quick_reveal(coords, trigger);
        if !outcome.has_update() {
            self.discard_snapshot();
            return Ok(RevealOutcome::NoChange);
        }

        if consume_turn {
            self.flip_turn();
        }
        Ok(outcome)
    }

    pub(crate) fn reveal_from(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.grid[coords];
        if cell.revealed || cell.flagged {
            return RevealOutcome::NoChange;
        }

        if cell.hazard {
            self.detonate(coords);
            return RevealOutcome::Exploded;
        }

        self.flood_reveal(coords);
        RevealOutcome::Revealed
    }

    /// Opens `start` and, through zero-count cells, everything connected to it. Never reaches a
    /// hazard: a zero-count cell has no hazardous neighbors.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            if !self.grid[coords].is_openable() {
                continue;
            }

            let count = self.grid.adjacent_hazard_count(coords);
            let cell = &mut self.grid[coords];
            cell.revealed = true;
            cell.adjacent_hazards = count;
            log::trace!("Open cell at {:?}, hazard count: {}", coords, count);

            if count == 0 {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(coords)
                        .filter(|&pos| self.grid[pos].is_openable()),
                );
            }
        }
    }

    /// Sets off the hazard on `coords`, destroying its occupant. Losing a king loses the game.
    pub(crate) fn detonate(&mut self, coords: Coord2) {
        let cell = &mut self.grid[coords];
        cell.revealed = true;
        cell.exploded = true;

        match cell.occupant.take() {
            Some(victim) => {
                log::debug!(
                    "Hazard at {:?} destroyed {:?} {:?}",
                    coords,
                    victim.color,
                    victim.kind
                );
                if victim.is_king() {
                    self.end_game(victim.color.opponent());
                }
            }
            None => log::debug!("Hazard at {:?} exploded", coords),
        }
    }

    /// Chord without snapshot or turn handling.
    pub(crate) fn quick_reveal(
        &mut self,
        coords: Coord2,
        trigger: Option<Coord2>,
    ) -> RevealOutcome {
        let cell = self.grid[coords];
        if !cell.shows_number() || self.grid.flagged_neighbor_count(coords) != cell.adjacent_hazards
        {
            return RevealOutcome::NoChange;
        }

        let trigger_piece =
            trigger.and_then(|pos| self.grid.occupant(pos).map(|piece| (pos, piece)));

        let mut outcome = RevealOutcome::NoChange;
        for neighbor in self.grid.iter_neighbors(coords) {
            outcome = outcome | self.reveal_from(neighbor);
        }

        if outcome == RevealOutcome::Exploded {
            if let Some((pos, piece)) = trigger_piece {
                // penalty for an unsafe chord, unless the blast already took the piece
                if self.grid[pos].occupant == Some(piece) {
                    self.grid[pos].occupant = None;
                    log::debug!(
                        "Unsafe chord at {:?} cost {:?} {:?}",
                        coords,
                        piece.color,
                        piece.kind
                    );
                    if piece.is_king() {
                        self.end_game(piece.color.opponent());
                    }
                }
            }
        }

        if outcome.has_update() {
            log::debug!("Chord at {:?}: {:?}", coords, outcome);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(hazards: &[Coord2]) -> Game {
        let mut grid = Grid::empty(6);
        for &coords in hazards {
            grid.put_hazard(coords).unwrap();
        }
        Game::from_grid(GameConfig::new(6, DEFAULT_HAZARD_LEVEL), grid).unwrap()
    }

    fn revealed_count(game: &Game) -> usize {
        game.grid()
            .coords()
            .filter(|&pos| game.grid()[pos].is_revealed())
            .count()
    }

    #[test]
    fn hazard_explodes_without_spreading() {
        let mut game = game(&[(2, 2)]);

        assert_eq!(game.reveal_cell((2, 2)).unwrap(), RevealOutcome::Exploded);

        let cell = game.cell((2, 2)).unwrap();
        assert!(cell.is_revealed() && cell.is_exploded());
        assert_eq!(revealed_count(&game), 1);
    }

    #[test]
    fn hazard_under_a_king_ends_the_game() {
        let mut game = game(&[]);
        game.grid[(3, 3)].occupant = Some(Piece::new(PieceKind::King, Color::White));
        game.grid[(3, 3)].hazard = true;

        assert_eq!(game.reveal_cell((3, 3)).unwrap(), RevealOutcome::Exploded);

        assert!(game.cell((3, 3)).unwrap().occupant().is_none());
        assert_eq!(game.winner(), Some(Color::Black));
    }

    #[test]
    fn numbered_cell_does_not_flood() {
        let mut game = game(&[(2, 2)]);

        assert_eq!(game.reveal_cell((2, 3)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(game.cell((2, 3)).unwrap().adjacent_hazards(), 1);
        assert!(game.cell((2, 3)).unwrap().shows_number());
        assert_eq!(revealed_count(&game), 1);
    }

    #[test]
    fn flood_stops_at_numbers_and_flags() {
        let mut game = game(&[(2, 2)]);
        game.grid[(5, 7)].flagged = true;

        game.reveal_cell((5, 5)).unwrap();

        let grid = game.grid();
        assert!(!grid[(2, 2)].is_revealed());
        assert!(!grid[(5, 7)].is_revealed());
        assert_eq!(revealed_count(&game), 46);
        for pos in grid.coords().filter(|&pos| grid[pos].is_revealed()) {
            let opened_from_zero = pos == (5, 5)
                || grid
                    .iter_neighbors(pos)
                    .any(|n| grid[n].is_revealed() && grid[n].adjacent_hazards() == 0);
            assert!(opened_from_zero, "{:?} opened without a zero neighbor", pos);
        }
    }

    #[test]
    fn reveal_ignores_flagged_and_revealed_cells() {
        let mut game = game(&[(2, 2)]);
        game.grid[(2, 2)].flagged = true;

        assert_eq!(game.reveal_cell((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.reveal_cell((2, 3)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.reveal_cell((2, 3)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.reveal_cell((6, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn chord_with_unmatched_flags_is_a_no_op() {
        let mut game = game(&[(2, 2)]);
        game.reveal_cell((2, 3)).unwrap();
        let before = game.grid().clone();

        assert_eq!(
            game.check_quick_reveal((2, 3), None, true).unwrap(),
            RevealOutcome::NoChange
        );

        game.grid[(1, 2)].flagged = true;
        game.grid[(1, 3)].flagged = true;
        let two_flags = game.grid().clone();
        assert_eq!(
            game.check_quick_reveal((2, 3), None, true).unwrap(),
            RevealOutcome::NoChange
        );

        assert_eq!(game.grid(), &two_flags);
        assert_ne!(game.grid(), &before);
        assert_eq!(game.history_len(), 0);
        assert!(game.is_white_to_move());
    }

    #[test]
    fn chord_opens_unflagged_neighbors_and_consumes_turn() {
        let mut game = game(&[(2, 2)]);
        game.reveal_cell((2, 3)).unwrap();
        game.toggle_flag((2, 2)).unwrap();

        assert_eq!(
            game.check_quick_reveal((2, 3), None, true).unwrap(),
            RevealOutcome::Revealed
        );

        assert_eq!(game.history_len(), 2);
        assert_eq!(game.side_to_move(), Color::Black);
        assert!(game.grid().iter_neighbors((2, 3)).all(|pos| {
            let cell = game.grid()[pos];
            cell.is_revealed() != cell.is_flagged()
        }));
        assert!(game.cell((2, 2)).unwrap().is_flagged());
        // zero neighbors kept flooding
        assert!(game.cell((0, 7)).unwrap().is_revealed());

        // nothing left to open
        assert_eq!(
            game.check_quick_reveal((2, 3), None, false).unwrap(),
            RevealOutcome::NoChange
        );
        assert_eq!(game.history_len(), 2);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn chord_without_consuming_turn_keeps_side() {
        let mut game = game(&[(2, 2)]);
        game.reveal_cell((2, 3)).unwrap();
        game.toggle_flag((2, 2)).unwrap();

        game.check_quick_reveal((2, 3), None, false).unwrap();

        assert!(game.is_white_to_move());
    }

    #[test]
    fn unsafe_chord_removes_the_trigger_piece() {
        let mut game = game(&[(2, 2)]);
        let rook = Piece::new(PieceKind::Rook, Color::White);
        game.grid[(5, 0)].occupant = Some(rook);
        game.reveal_cell((2, 3)).unwrap();
        game.grid[(1, 3)].flagged = true;

        let outcome = game.check_quick_reveal((2, 3), Some((5, 0)), true).unwrap();

        assert_eq!(outcome, RevealOutcome::Exploded);
        assert!(game.cell((2, 2)).unwrap().is_exploded());
        assert!(game.cell((5, 0)).unwrap().occupant().is_none());
        assert!(!game.is_game_over());
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn unsafe_chord_with_king_trigger_loses() {
        let mut game = game(&[(2, 2)]);
        game.grid[(5, 0)].occupant = Some(Piece::new(PieceKind::King, Color::Black));
        game.reveal_cell((2, 3)).unwrap();
        game.grid[(1, 3)].flagged = true;

        game.check_quick_reveal((2, 3), Some((5, 0)), false).unwrap();

        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(
            game.check_quick_reveal((2, 3), None, false),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn chord_needs_a_visible_number() {
        let mut game = game(&[(2, 2), (4, 4)]);
        game.reveal_cell((2, 2)).unwrap();

        assert_eq!(
            game.check_quick_reveal((2, 2), None, true).unwrap(),
            RevealOutcome::NoChange
        );
        assert_eq!(
            game.check_quick_reveal((0, 0), None, true).unwrap(),
            RevealOutcome::NoChange
        );
        assert_eq!(
            game.check_quick_reveal((0, 9), None, true),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(game.history_len(), 0);
    }
}
