use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates ({row}, {column}) are out of range")]
    OutOfRange { row: isize, column: isize },
    #[error("Grid needs at least one row and one column")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mines were already placed on this grid")]
    MinesAlreadyPlaced,
}

pub type Result<T> = core::result::Result<T, GameError>;
