//! Tile coordinates, tile maps, and nine-grid assembly
//!
//! Post-processing kernels read a tile together with its eight
//! neighbors. [`NineGrid::assemble`] collects them from a coordinate
//! keyed map in a fixed slot order, substituting the shared transparent
//! tile for absent neighbors. The slot order is part of the contract:
//!
//! ```text
//! 8 1 5
//! 4 0 2
//! 7 3 6
//! ```

use crate::constants::transparent_tile;
use crate::tile::Tile;
use std::collections::HashMap;

/// Grid coordinate of a tile, used only as a key.
pub type TileCoord = (i32, i32);

/// Coordinate-keyed tile storage.
pub type TileMap = HashMap<TileCoord, Tile>;

/// Ordered run of vertically adjacent tile coordinates, top to bottom.
pub type Strand = Vec<TileCoord>;

/// Coordinate offsets in nine-grid slot order:
/// center, N, E, S, W, NE, SE, SW, NW.
pub const GRID_OFFSETS: [(i32, i32); 9] = [
    (0, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// The eight neighbor coordinates of `coord`, in slot order 1..9.
pub fn adjacent_coords(coord: TileCoord) -> [TileCoord; 8] {
    let (x, y) = coord;
    let mut out = [(0, 0); 8];
    for (i, &(dx, dy)) in GRID_OFFSETS[1..].iter().enumerate() {
        out[i] = (x + dx, y + dy);
    }
    out
}

/// A tile and its eight neighbors in fixed slot order
#[derive(Debug, Clone)]
pub struct NineGrid {
    tiles: [Tile; 9],
}

impl NineGrid {
    /// Collect the nine-grid around `coord` from `tiles`.
    ///
    /// Absent coordinates resolve to the shared transparent tile. The
    /// only work per slot is a map lookup and a reference-count bump.
    pub fn assemble(coord: TileCoord, tiles: &TileMap) -> Self {
        let (x, y) = coord;
        let tiles = GRID_OFFSETS.map(|(dx, dy)| {
            tiles
                .get(&(x + dx, y + dy))
                .unwrap_or_else(|| transparent_tile())
                .clone()
        });
        NineGrid { tiles }
    }

    /// Build a grid directly from nine tiles in slot order.
    pub fn from_tiles(tiles: [Tile; 9]) -> Self {
        NineGrid { tiles }
    }

    /// The tile in slot `i` (0 = center).
    #[inline]
    pub fn slot(&self, i: usize) -> &Tile {
        &self.tiles[i]
    }

    #[inline]
    pub fn center(&self) -> &Tile {
        &self.tiles[0]
    }

    #[inline]
    pub fn north(&self) -> &Tile {
        &self.tiles[1]
    }

    #[inline]
    pub fn east(&self) -> &Tile {
        &self.tiles[2]
    }

    #[inline]
    pub fn south(&self) -> &Tile {
        &self.tiles[3]
    }

    #[inline]
    pub fn west(&self) -> &Tile {
        &self.tiles[4]
    }

    #[inline]
    pub fn north_east(&self) -> &Tile {
        &self.tiles[5]
    }

    #[inline]
    pub fn south_east(&self) -> &Tile {
        &self.tiles[6]
    }

    #[inline]
    pub fn south_west(&self) -> &Tile {
        &self.tiles[7]
    }

    #[inline]
    pub fn north_west(&self) -> &Tile {
        &self.tiles[8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix15::FIX15_ONE;

    #[test]
    fn test_assemble_missing_neighbors() {
        let mut tiles = TileMap::new();
        tiles.insert((0, 0), Tile::uniform(FIX15_ONE));

        let grid = NineGrid::assemble((0, 0), &tiles);
        assert_eq!(grid.center().get_pixel(0, 0), Some(FIX15_ONE));
        for i in 1..9 {
            assert!(Tile::ptr_eq(grid.slot(i), transparent_tile()));
        }
    }

    #[test]
    fn test_assemble_slot_order() {
        let mut tiles = TileMap::new();
        // Distinct uniform value per occupied slot.
        for (i, &(dx, dy)) in GRID_OFFSETS.iter().enumerate() {
            tiles.insert((3 + dx, 7 + dy), Tile::uniform(i as u16 + 1));
        }

        let grid = NineGrid::assemble((3, 7), &tiles);
        for i in 0..9 {
            assert_eq!(grid.slot(i).get_pixel(0, 0), Some(i as u16 + 1));
        }
        assert_eq!(grid.north().get_pixel(0, 0), Some(2));
        assert_eq!(grid.north_west().get_pixel(0, 0), Some(9));
    }

    #[test]
    fn test_adjacent_coords() {
        let adj = adjacent_coords((0, 0));
        assert_eq!(adj[0], (0, -1));
        assert_eq!(adj[7], (-1, -1));
        assert_eq!(adj.len(), 8);
    }
}
