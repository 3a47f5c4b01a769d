//! Error types for tilefill-core

use thiserror::Error;

/// tilefill-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Invalid pixel rectangle
    #[error("invalid pixel bounds: ({min_x},{min_y})..=({max_x},{max_y})")]
    InvalidBounds {
        min_x: usize,
        min_y: usize,
        max_x: usize,
        max_y: usize,
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
