use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("No piece on the source cell")]
    EmptySource,
    #[error("Piece cannot move to the requested cell")]
    IllegalMove,
    #[error("Cell is already occupied")]
    OccupiedCell,
    #[error("No pawn can be promoted to that piece here")]
    InvalidPromotion,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
