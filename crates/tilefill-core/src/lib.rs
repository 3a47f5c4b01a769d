//! tilefill-core - Tile and pixel primitives for flood-fill post-processing
//!
//! This crate provides the data model shared by the tile-based
//! post-processing passes (morphology, blur, gap detection):
//!
//! - Fixed-point alpha arithmetic ([`fix15`])
//! - The `N x N` alpha tile container ([`Tile`] / [`TileMut`])
//! - Non-owning pixel views and cursors ([`PixelBuffer`], [`PixelRef`])
//! - Process-unique transparent/opaque tile constants ([`constants`])
//! - Nine-grid neighborhood assembly over a tile map ([`grid`])
//! - The seamless working window spanning a tile and its neighbors
//!   ([`Window`])
//! - RGBA composition of a fill color over an alpha tile ([`fill_rgba`])
//!
//! # Tile layout
//!
//! A tile is a square array of `TILE_SIZE x TILE_SIZE` 16-bit alpha
//! channels in 15-bit fixed point, row-major. `TILE_SIZE` is a build-time
//! constant.

mod constants;
mod error;
pub mod fix15;
pub mod grid;
mod pixel;
mod rgba;
mod tile;
mod window;

pub use constants::{opaque_tile, transparent_tile};
pub use error::{Error, Result};
pub use fix15::{fix15_mul, fix15_short_clamp, Fix15, Fix15Short, FIX15_ONE};
pub use grid::{NineGrid, Strand, TileCoord, TileMap, GRID_OFFSETS};
pub use pixel::{PixelBuffer, PixelBufferMut, PixelRef, PixelRefMut};
pub use rgba::{fill_rgba, RgbaTile};
pub use tile::{Tile, TileMut};
pub use window::Window;

/// Tile edge length in pixels.
pub const TILE_SIZE: usize = 64;
