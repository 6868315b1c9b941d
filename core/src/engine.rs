use alloc::vec::Vec;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    AwaitingMove(Color),
    GameOver { winner: Color },
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver { .. })
    }
}

/// What a successful [`Game::move_piece`] did besides relocating the piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub captured: Option<Piece>,
    /// The mover landed on a live hazard and was destroyed.
    pub detonated: bool,
    /// Result of the automatic chord at the destination.
    pub chord: RevealOutcome,
}

/// What the built-in black opponent did on its turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiAction {
    Moved(Move),
    QuickReveal(Coord2),
    Pass,
}

/// Turn-based hazard chess engine. The only place where grid and turn state change together.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    pub(crate) grid: Grid,
    pub(crate) turn: TurnState,
    history: History,
    rng: SmallRng,
}

impl Game {
    /// Standard setup with randomly placed hazards drawn from the configured seed.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = seeded_rng(config.seed);
        let grid = random_grid(config, &mut rng);
        Self::assemble(config, grid, rng)
    }

    /// Standard setup with hazards chosen by `generator`.
    pub fn with_generator(config: GameConfig, generator: impl HazardGenerator) -> Result<Self> {
        let mut grid = Grid::standard(config.height);
        generator.generate(&mut grid)?;
        Ok(Self::assemble(config, grid, seeded_rng(config.seed)))
    }

    /// Standard setup with hazards on exactly `hazards`.
    pub fn with_hazards(config: GameConfig, hazards: &[Coord2]) -> Result<Self> {
        Self::with_generator(config, FixedHazardGenerator::new(hazards))
    }

    /// Starts from a hand-built position. Adjacency counts are recomputed from the hazard bits.
    pub fn from_grid(config: GameConfig, grid: Grid) -> Result<Self> {
        if grid.size() != config.size() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::assemble(config, grid, seeded_rng(config.seed)))
    }

    fn assemble(config: GameConfig, mut grid: Grid, rng: SmallRng) -> Self {
        grid.update_hazard_counts();
        log::debug!(
            "New game {:?} with {} hazards",
            grid.size(),
            grid.hazard_count()
        );
        Self {
            config,
            grid,
            turn: TurnState::new(),
            history: History::default(),
            rng,
        }
    }

    /// Discards the board for a fresh standard one with new random hazards and an empty history.
    pub fn reset(&mut self) {
        self.grid = random_grid(self.config, &mut self.rng);
        self.grid.update_hazard_counts();
        self.turn = TurnState::new();
        self.history.clear();
        log::debug!("Game reset with {} hazards", self.grid.hazard_count());
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.grid.get(coords)
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn width(&self) -> Coord {
        self.grid.width()
    }

    pub fn height(&self) -> Coord {
        self.grid.height()
    }

    pub fn hazard_count(&self) -> CellCount {
        self.grid.hazard_count()
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn side_to_move(&self) -> Color {
        self.turn.side_to_move
    }

    pub fn is_white_to_move(&self) -> bool {
        self.turn.side_to_move.is_white()
    }

    pub fn is_game_over(&self) -> bool {
        self.turn.is_game_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.turn.winner
    }

    pub fn state(&self) -> GameState {
        match self.turn.winner {
            Some(winner) => GameState::GameOver { winner },
            None => GameState::AwaitingMove(self.turn.side_to_move),
        }
    }

    pub fn legal_destinations(&self, from: Coord2) -> Vec<Coord2> {
        legal_destinations(&self.grid, from).collect()
    }

    pub fn legal_moves(&self, side: Color) -> Vec<Move> {
        legal_moves(&self.grid, side).collect()
    }

    /// Moves the piece on `from` to `to`, then applies the hazard consequences and flips the turn.
    ///
    /// Rejected moves leave every bit of state untouched and record nothing in the history.
    pub fn move_piece(&mut self, from: Coord2, to: Coord2) -> Result<MoveReport> {
        self.check_not_finished()?;
        let from = self.grid.validate_coords(from)?;
        let to = self.grid.validate_coords(to)?;
        let mut piece = self.grid[from].occupant.ok_or(GameError::EmptySource)?;
        if !piece.can_move(from, to, &self.grid) {
            return Err(GameError::IllegalMove);
        }

        self.save_snapshot();

        piece.mark_moved();
        self.grid[from].occupant = None;
        let captured = self.grid[to].occupant.replace(piece);
        log::debug!("Move {:?} from {:?} to {:?}", piece.kind, from, to);

        if let Some(captured) = captured {
            log::debug!("Captured {:?} {:?} at {:?}", captured.color, captured.kind, to);
            if captured.is_king() {
                self.end_game(piece.color);
            }
        }

        let destination = self.grid[to];
        let mut report = MoveReport {
            captured,
            detonated: false,
            chord: RevealOutcome::NoChange,
        };

        if destination.hazard && !destination.exploded {
            self.detonate(to);
            report.detonated = true;
        } else {
            self.reveal_from(to);
            if self.grid[to].shows_number() {
                // safety chord on arrival, part of this move's turn and snapshot
                report.chord = self.quick_reveal(to, Some(to));
            }
        }

        self.flip_turn();
        Ok(report)
    }

    /// Toggles the player flag on `coords`.
    ///
    /// Only hidden, exploded, or occupied cells take a flag, and a revealed cell holding a piece
    /// of the side not to move is refused. Never changes whose turn it is.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.grid[coords];
        let side = self.turn.side_to_move;
        if cell.revealed && cell.occupant.is_some_and(|piece| piece.color != side) {
            return Ok(MarkOutcome::NoChange);
        }
        if cell.revealed && !cell.exploded && !cell.is_occupied() {
            return Ok(MarkOutcome::NoChange);
        }

        self.save_snapshot();
        let cell = &mut self.grid[coords];
        cell.flagged = !cell.flagged;
        log::debug!("Flag at {:?} set to {}", coords, cell.flagged);
        Ok(MarkOutcome::Changed)
    }

    /// Restores the most recent snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        let (grid, turn) = snapshot.into_parts();
        self.grid = grid;
        self.turn = turn;
        log::debug!("Undo, {} snapshots left", self.history.len());
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// A pawn standing on its promotion rank, waiting for the caller to pick its replacement.
    pub fn pending_promotion(&self) -> Option<Coord2> {
        let height = self.grid.height();
        [Color::White, Color::Black].into_iter().find_map(|color| {
            let row = color.promotion_rank(height);
            (0..self.grid.width())
                .map(|col| (row, col))
                .find(|&pos| {
                    self.grid
                        .occupant(pos)
                        .is_some_and(|piece| piece.is_pawn() && piece.color == color)
                })
        })
    }

    /// Replaces the pawn on `coords` with `kind`. Part of the move that brought the pawn there,
    /// so it records no snapshot of its own.
    pub fn promote(&mut self, coords: Coord2, kind: PieceKind) -> Result<()> {
        let coords = self.grid.validate_coords(coords)?;
        let pawn = self.grid[coords]
            .occupant
            .filter(|piece| piece.is_pawn())
            .ok_or(GameError::InvalidPromotion)?;
        if !kind.is_promotion_target() || coords.0 != pawn.color.promotion_rank(self.grid.height())
        {
            return Err(GameError::InvalidPromotion);
        }

        self.grid[coords].occupant = Some(Piece::new(kind, pawn.color));
        log::debug!("{:?} pawn promoted to {:?} at {:?}", pawn.color, kind, coords);
        Ok(())
    }

    /// Best move for the built-in black opponent, if it has any.
    pub fn choose_best_ai_move(&mut self) -> Option<Move> {
        choose_best_move(&self.grid, Color::Black, &mut self.rng)
    }

    pub fn find_quick_reveal_candidate(&self) -> Option<Coord2> {
        find_quick_reveal_candidate(&self.grid)
    }

    /// Plays one turn for black: the best scored move (auto-promoting to a queen), or failing
    /// that a chord on the first satisfied numbered cell.
    pub fn play_ai_turn(&mut self) -> Result<AiAction> {
        self.check_not_finished()?;

        if let Some(mv) = self.choose_best_ai_move() {
            self.move_piece(mv.from, mv.to)?;
            let height = self.grid.height();
            let promotes = self.grid.occupant(mv.to).is_some_and(|piece| {
                piece.is_pawn() && mv.to.0 == piece.color.promotion_rank(height)
            });
            if promotes {
                self.promote(mv.to, PieceKind::Queen)?;
            }
            return Ok(AiAction::Moved(mv));
        }

        if let Some(coords) = self.find_quick_reveal_candidate() {
            let trigger = self
                .grid
                .occupant(coords)
                .filter(|piece| piece.color == Color::Black)
                .map(|_| coords);
            if self.check_quick_reveal(coords, trigger, true)?.has_update() {
                return Ok(AiAction::QuickReveal(coords));
            }
        }

        log::debug!("Black has nothing to play");
        Ok(AiAction::Pass)
    }

    pub(crate) fn save_snapshot(&mut self) {
        self.history.push(Snapshot::capture(&self.grid, self.turn));
    }

    pub(crate) fn discard_snapshot(&mut self) {
        self.history.discard_last();
    }

    pub(crate) fn flip_turn(&mut self) {
        self.turn.side_to_move = self.turn.side_to_move.opponent();
    }

    /// First decided result sticks.
    pub(crate) fn end_game(&mut self, winner: Color) {
        if self.turn.is_game_over() {
            return;
        }
        self.turn.winner = Some(winner);
        log::debug!("Game over, {:?} wins", winner);
    }

    pub(crate) fn check_not_finished(&self) -> Result<()> {
        if self.turn.is_game_over() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

fn seeded_rng(seed: u64) -> SmallRng {
    use rand::prelude::*;
    SmallRng::seed_from_u64(seed)
}

fn random_grid(config: GameConfig, rng: &mut SmallRng) -> Grid {
    let mut grid = Grid::standard(config.height);
    let requested = config.hazard_target();
    let placed = RandomHazardGenerator::new(rng, requested)
        .generate(&mut grid)
        .unwrap_or_default();
    log::debug!("Placed {} of {} hazards", placed, requested);
    grid
}
