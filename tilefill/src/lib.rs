//! tilefill - Tile-based flood-fill post-processing
//!
//! Post-processing passes applied to the sparse tile grid a flood fill
//! produces: grow or shrink the fill with circular-disk morphology,
//! feather its edges with a separable Gaussian blur, and detect the
//! gaps a gap-closing fill must not leak through. All passes run
//! tile-parallel over worker threads.
//!
//! # Example
//!
//! ```
//! use tilefill::{morph, partition_tiles, Tile, TileMap, FIX15_ONE};
//!
//! // A single fully opaque tile, grown by three pixels.
//! let mut tiles = TileMap::new();
//! tiles.insert((0, 0), Tile::uniform(FIX15_ONE));
//! tilefill::complement_adjacent(&mut tiles);
//! let (mut grown, strands, _) = partition_tiles(&tiles, false);
//!
//! morph(3, &mut grown, &tiles, &strands).unwrap();
//! assert_eq!(grown[&(0, 0)].get_pixel(0, 0), Some(FIX15_ONE));
//! ```

// Re-export core types
pub use tilefill_core::*;

// Re-export the post-processing operations
pub use tilefill_morph::*;
