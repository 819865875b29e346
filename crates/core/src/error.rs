use thiserror::Error;

/// Errors that can occur while building or running pursuit simulations
#[derive(Error, Debug)]
pub enum PursuitError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid cell value {value} at ({row}, {col}), expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid action ({dr}, {dc}): components must be in -1..=1")]
    InvalidAction { dr: i32, dc: i32 },

    #[error("Not enough free cells: needed {needed}, grid has {available}")]
    NotEnoughFreeCells { needed: usize, available: usize },

    #[error("Could not place agents far enough apart after {attempts} attempts")]
    StartSamplingFailed { attempts: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for pursuit operations
pub type Result<T> = std::result::Result<T, PursuitError>;
