use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive")]
    InvalidDimensions,
    #[error("Too many mines ({mines}) for a {rows}x{cols} board")]
    TooManyMines { rows: u8, cols: u8, mines: u16 },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout has {actual} distinct mines, board expects {expected}")]
    MineCountMismatch { expected: u16, actual: u16 },
    #[error("Mines were already placed for this round")]
    MinesAlreadyPlaced,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure reading or writing persisted records.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Records could not be (de)serialized: {0}")]
    Json(#[from] serde_json::Error),
}
