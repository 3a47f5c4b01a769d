//! Error types for tilefill-morph

use thiserror::Error;

/// Errors that can occur in morphology, blur and gap operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tilefill_core::Error),

    /// Morph offset outside `1..=TILE_SIZE` in magnitude, or zero
    #[error("invalid morph offset: {offset}")]
    InvalidOffset { offset: i32 },

    /// Structuring element radius outside `1..=TILE_SIZE`
    #[error("invalid structuring element radius: {radius}")]
    InvalidRadius { radius: usize },

    /// Blur radius whose factor table reaches past a full tile
    #[error("blur radius {requested} needs {effective} pixels of context, more than a tile edge")]
    InvalidBlurRadius { requested: u32, effective: usize },

    /// Feather radius outside `1..=TILE_SIZE`
    #[error("invalid feather radius: {feather}")]
    InvalidFeather { feather: u32 },

    /// Gap-closing distance outside `1..TILE_SIZE`
    #[error("invalid gap-closing distance: {distance}")]
    InvalidDistance { distance: usize },
}

/// Result type for morphology operations
pub type MorphResult<T> = Result<T, MorphError>;
