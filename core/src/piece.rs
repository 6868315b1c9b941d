use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

use crate::Coord;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn is_white(self) -> bool {
        matches!(self, Self::White)
    }

    /// Row direction this color's pawns advance in.
    pub const fn forward(self) -> i16 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row on which this color's pawns start, for a board of `height` rows.
    pub const fn pawn_rank(self, height: Coord) -> Coord {
        match self {
            Self::White => height.saturating_sub(2),
            Self::Black => 1,
        }
    }

    /// Row on which this color's pawns promote.
    pub const fn promotion_rank(self, height: Coord) -> Coord {
        match self {
            Self::White => 0,
            Self::Black => height.saturating_sub(1),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Back rank layout, from column 0 to column 7.
    pub const BACK_RANK: [PieceKind; 8] = [
        Self::Rook,
        Self::Knight,
        Self::Bishop,
        Self::Queen,
        Self::King,
        Self::Bishop,
        Self::Knight,
        Self::Rook,
    ];

    /// Material value used by move selection.
    pub const fn value(self) -> u32 {
        match self {
            Self::King => 1000,
            Self::Queen => 9,
            Self::Rook => 5,
            Self::Bishop => 3,
            Self::Knight => 3,
            Self::Pawn => 1,
        }
    }

    pub const fn is_promotion_target(self) -> bool {
        matches!(self, Self::Queen | Self::Rook | Self::Bishop | Self::Knight)
    }
}

/// A piece standing on a cell. Plain value; relocating copies it and clears the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Only meaningful for pawns: controls the double step and the loose en-passant rule.
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    pub const fn is_king(self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    pub const fn is_pawn(self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    pub(crate) fn mark_moved(&mut self) {
        if self.is_pawn() {
            self.has_moved = true;
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Color::*;
        use PieceKind::*;

        let symbol = match (self.color, self.kind) {
            (White, King) => '\u{2654}',
            (White, Queen) => '\u{2655}',
            (White, Rook) => '\u{2656}',
            (White, Bishop) => '\u{2657}',
            (White, Knight) => '\u{2658}',
            (White, Pawn) => '\u{2659}',
            (Black, King) => '\u{265a}',
            (Black, Queen) => '\u{265b}',
            (Black, Rook) => '\u{265c}',
            (Black, Bishop) => '\u{265d}',
            (Black, Knight) => '\u{265e}',
            (Black, Pawn) => '\u{265f}',
        };
        write!(f, "{}", symbol)
    }
}
