//! Heuristic move selection for the built-in opponent.
//!
//! Read-only over the grid, so it may run on a worker thread as long as nothing mutates the board
//! meanwhile. Ties are broken by a small random jitter from the caller's generator.

use rand::rngs::SmallRng;

use crate::*;

const CAPTURE_BONUS: f64 = 200.0;
const CAPTURE_VALUE_WEIGHT: f64 = 40.0;
const EXPLODED_PENALTY: f64 = 500.0;
const OPEN_GROUND_BONUS: f64 = 30.0;
const NUMBERED_GROUND_BASE: f64 = 8.0;
const RISK_WEIGHT: f64 = 80.0;
const UNREVEALED_BONUS: f64 = 2.0;
const CENTER_REACH: f64 = 14.0;
const CENTER_WEIGHT: f64 = 0.5;
const PAWN_ADVANCE_WEIGHT: f64 = 0.3;
const JITTER: f64 = 0.5;

/// Deterministic part of a move's score: capture value, footing, centrality and pawn progress.
pub fn score_move(grid: &Grid, piece: Piece, mv: Move) -> f64 {
    let target = grid[mv.to];
    let mut score = 0.0;

    if let Some(victim) = target.occupant() {
        if victim.color != piece.color {
            score += CAPTURE_BONUS + f64::from(victim.kind.value()) * CAPTURE_VALUE_WEIGHT;
        }
    }

    if target.is_revealed() {
        if target.is_exploded() {
            score -= EXPLODED_PENALTY;
        } else {
            score += match target.adjacent_hazards() {
                0 => OPEN_GROUND_BONUS,
                count => (NUMBERED_GROUND_BASE - f64::from(count)).max(0.0),
            };
        }
    } else {
        score -= estimate_risk(grid, mv.to) * RISK_WEIGHT;
        score += UNREVEALED_BONUS;
    }

    let (height, width) = grid.size();
    let center_distance = mv.to.0.abs_diff(height / 2) + mv.to.1.abs_diff(width / 2);
    score += (CENTER_REACH - f64::from(center_distance)) * CENTER_WEIGHT;

    if piece.is_pawn() {
        let advanced = match piece.color {
            Color::White => height - 1 - mv.to.0,
            Color::Black => mv.to.0,
        };
        score += f64::from(advanced) * PAWN_ADVANCE_WEIGHT;
    }

    score
}

/// Highest scoring legal move for `side`, or `None` when `side` cannot move at all.
pub fn choose_best_move(grid: &Grid, side: Color, rng: &mut SmallRng) -> Option<Move> {
    use rand::prelude::*;

    let mut best: Option<(Move, f64)> = None;
    for mv in legal_moves(grid, side) {
        let Some(piece) = grid.occupant(mv.from) else {
            continue;
        };
        let score = score_move(grid, piece, mv) + rng.random_range(0.0..JITTER);
        log::trace!("Candidate {:?} -> {:?} scored {}", mv.from, mv.to, score);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    best.map(|(mv, _)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(3)
    }

    #[test]
    fn prefers_capturing_the_most_valuable_piece() {
        let mut grid = Grid::empty(8);
        let queen = Piece::new(PieceKind::Queen, Color::Black);
        grid.put_piece((4, 4), queen).unwrap();
        grid.put_piece((4, 0), Piece::new(PieceKind::Pawn, Color::White))
            .unwrap();
        grid.put_piece((0, 4), Piece::new(PieceKind::Rook, Color::White))
            .unwrap();
        grid.put_piece((7, 7), Piece::new(PieceKind::King, Color::White))
            .unwrap();

        let mv = choose_best_move(&grid, Color::Black, &mut rng());

        assert_eq!(mv, Some(Move::new((4, 4), (7, 7))));
    }

    #[test]
    fn avoids_exploded_cells() {
        let mut grid = Grid::empty(8);
        let king = Piece::new(PieceKind::King, Color::Black);
        grid.put_piece((3, 3), king).unwrap();
        for pos in grid.iter_neighbors((3, 3)) {
            grid[pos].revealed = true;
            grid[pos].exploded = true;
        }
        grid[(4, 4)].exploded = false;

        let mv = choose_best_move(&grid, Color::Black, &mut rng());

        assert_eq!(mv, Some(Move::new((3, 3), (4, 4))));
    }

    #[test]
    fn only_moves_the_requested_side() {
        let grid = Grid::standard(8);
        let mut rng = rng();

        for _ in 0..16 {
            let mv = choose_best_move(&grid, Color::Black, &mut rng).unwrap();
            assert_eq!(grid.occupant(mv.from).map(|p| p.color), Some(Color::Black));
        }
    }

    #[test]
    fn no_legal_move_gives_none() {
        let mut grid = Grid::empty(4);
        grid.put_piece((3, 0), Piece::new(PieceKind::Pawn, Color::Black))
            .unwrap();

        assert_eq!(choose_best_move(&grid, Color::Black, &mut rng()), None);
        assert_eq!(choose_best_move(&grid, Color::White, &mut rng()), None);
    }

    #[test]
    fn pawn_progress_counts_toward_promotion() {
        let grid = Grid::empty(8);
        let black = Piece::new(PieceKind::Pawn, Color::Black);
        let white = Piece::new(PieceKind::Pawn, Color::White);

        let deep = score_move(&grid, black, Move::new((5, 0), (6, 0)));
        let shallow = score_move(&grid, black, Move::new((1, 0), (2, 0)));
        assert!(deep - shallow > 0.0);

        let deep = score_move(&grid, white, Move::new((2, 0), (1, 0)));
        let shallow = score_move(&grid, white, Move::new((6, 0), (5, 0)));
        assert!(deep - shallow > 0.0);
    }
}
