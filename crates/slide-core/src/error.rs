use thiserror::Error;

/// Errors produced by the puzzle engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// Boards smaller than 2×2 have no meaningful moves
    #[error("board dimension must be at least 2, got {0}")]
    DimensionTooSmall(usize),

    /// Every trial of a selection batch returned to the solved state
    #[error("no valid shuffle among {trials} trials of {moves} moves")]
    NoValidTrial { trials: usize, moves: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("grid has {actual} cells, expected {expected}")]
    GridSizeMismatch { expected: usize, actual: usize },

    #[error("grid is not a permutation of 1..={max}")]
    NotAPermutation { max: usize },

    #[error("empty tile {tile} is outside 1..={max}")]
    EmptyTileOutOfRange { tile: usize, max: usize },

    #[error("unknown move `{0}`, expected up, down, left or right")]
    UnknownMove(String),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
