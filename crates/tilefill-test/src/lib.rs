//! tilefill-test - Regression test support
//!
//! This crate provides the shared pieces of the `tests/*_reg.rs`
//! regression tests: a parameter tracker accumulating comparison
//! failures ([`RegParams`]) and builders for synthetic tile fixtures.
//!
//! # Usage
//!
//! ```
//! use tilefill_test::{single_pixel_tile, RegParams};
//!
//! let mut rp = RegParams::new("example");
//! let tile = single_pixel_tile(32, 32, 32768);
//! rp.compare_values(32768.0, tile.get_pixel(32, 32).unwrap() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;

pub use params::RegParams;

use tilefill_core::{Fix15Short, Tile, TileMap, TileMut, TILE_SIZE};

/// A tile with a single set pixel.
pub fn single_pixel_tile(x: usize, y: usize, value: Fix15Short) -> Tile {
    let mut tm = TileMut::new();
    tm.set_pixel_unchecked(x, y, value);
    tm.into()
}

/// A tile computed pixel-by-pixel from `f(x, y)`.
pub fn tile_from_fn(f: impl Fn(usize, usize) -> Fix15Short) -> Tile {
    let mut tm = TileMut::new();
    for y in 0..TILE_SIZE {
        for x in 0..TILE_SIZE {
            tm.set_pixel_unchecked(x, y, f(x, y));
        }
    }
    tm.into()
}

/// Sum of all pixel values of a tile, in wide arithmetic.
pub fn tile_sum(tile: &Tile) -> u64 {
    tile.data().iter().map(|&v| v as u64).sum()
}

/// True if both maps hold the same keys with pixel-identical tiles.
pub fn maps_equal(a: &TileMap, b: &TileMap) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(coord, tile)| b.get(coord).is_some_and(|other| tile.same_pixels(other)))
}
