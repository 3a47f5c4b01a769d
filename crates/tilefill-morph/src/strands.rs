//! Strand partitioning of tile maps
//!
//! Tiles are processed in "strands": runs of vertically contiguous
//! coordinates ordered top to bottom. Within a strand, each working
//! window can reuse rows from the previous tile, so the partitioning
//! below is what makes the incremental kernels pay off.

use tilefill_core::grid::adjacent_coords;
use tilefill_core::{opaque_tile, transparent_tile, Strand, Tile, TileCoord, TileMap};

/// Ensure every tile in `tiles` has a full neighborhood of eight tiles,
/// inserting the shared transparent tile where one is missing.
///
/// The padded map should only be used as operation input; the inserted
/// tiles alias the read-only transparent singleton.
pub fn complement_adjacent(tiles: &mut TileMap) {
    let mut new = TileMap::new();
    for &coord in tiles.keys() {
        for adj in adjacent_coords(coord) {
            if !tiles.contains_key(&adj) && !new.contains_key(&adj) {
                new.insert(adj, transparent_tile().clone());
            }
        }
    }
    tiles.extend(new);
}

/// True if `coord` is directly below `above`.
fn directly_below(coord: TileCoord, above: TileCoord) -> bool {
    coord.0 == above.0 && coord.1 == above.1 + 1
}

/// True if all eight neighbors are the opaque singleton.
fn adj_opaque(coord: TileCoord, tiles: &TileMap) -> bool {
    adjacent_coords(coord)
        .iter()
        .all(|c| tiles.get(c).is_some_and(|t| Tile::ptr_eq(t, opaque_tile())))
}

/// Partition a tile map for strand processing.
///
/// Returns a map of tiles that need no further processing, the strands
/// covering everything else, and the total number of strand tiles.
/// Tiles that never need processing are identity-opaque tiles whose
/// whole neighborhood is identity-opaque as well; when `dilating`,
/// being identity-opaque is enough on its own.
pub fn partition_tiles(tiles: &TileMap, dilating: bool) -> (TileMap, Vec<Strand>, usize) {
    let mut done = TileMap::new();
    let mut strands = Vec::new();
    let mut group = Strand::new();
    let mut previous: Option<TileCoord> = None;
    let mut strand_tiles = 0;

    let mut coords: Vec<TileCoord> = tiles.keys().copied().collect();
    coords.sort_unstable();

    for coord in coords {
        let opaque = Tile::ptr_eq(&tiles[&coord], opaque_tile());
        if opaque && (dilating || adj_opaque(coord, tiles)) {
            done.insert(coord, opaque_tile().clone());
            previous = None;
            if !group.is_empty() {
                strands.push(std::mem::take(&mut group));
            }
        } else if previous.map_or(true, |p| directly_below(coord, p)) {
            group.push(coord);
            strand_tiles += 1;
        } else {
            strands.push(std::mem::take(&mut group));
            group.push(coord);
            strand_tiles += 1;
        }
        previous = Some(coord);
    }
    if !group.is_empty() {
        strands.push(group);
    }

    (done, strands, strand_tiles)
}
