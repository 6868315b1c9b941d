use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Whose move it is and whether the game has been decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub side_to_move: Color,
    pub winner: Option<Color>,
}

impl TurnState {
    pub const fn new() -> Self {
        Self {
            side_to_move: Color::White,
            winner: None,
        }
    }

    pub const fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the whole board and turn state. Cells hold plain values, so a clone
/// shares nothing with the live grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    grid: Grid,
    turn: TurnState,
}

impl Snapshot {
    pub fn capture(grid: &Grid, turn: TurnState) -> Self {
        Self {
            grid: grid.clone(),
            turn,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn into_parts(self) -> (Grid, TurnState) {
        (self.grid, self.turn)
    }
}

/// Bounded undo stack. Pushing past capacity drops the oldest snapshots.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Drops the most recent snapshot, used when an operation turned out to be a no-op.
    pub fn discard_last(&mut self) {
        self.entries.pop_back();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}
