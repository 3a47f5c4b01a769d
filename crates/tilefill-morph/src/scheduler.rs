//! Strand scheduler for morphological operations
//!
//! Strands are distributed over worker threads through a shared atomic
//! cursor. Each worker owns one [`MorphBucket`] and a private result
//! map, so the hot path takes no locks; the private maps are merged
//! into the caller's map after the workers join. Strand coordinates are
//! unique across the strand list, so no key is ever written twice and
//! the merged result is independent of worker count and interleaving.

use crate::bucket::{dilate, erode, MorphBucket};
use crate::error::{MorphError, MorphResult};
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tilefill_core::{transparent_tile, NineGrid, Strand, Tile, TileCoord, TileMap, TILE_SIZE};

/// Spawning a worker is only worth a few strands of work.
const MIN_STRANDS_PER_WORKER: usize = 4;

/// Decide whether a morph result should be left out of the output map.
///
/// An identity-transparent result is always dropped. A dilation of an
/// identity-non-transparent source can never be empty, so the
/// uniformity scan is skipped for it. Everything else is dropped only
/// when it actually is uniformly zero — in particular a dilation of an
/// identity-transparent source that picked up opacity from a neighbor
/// is kept.
fn empty_result(offset: i32, src: &Tile, dst: &Tile) -> bool {
    let transparent = transparent_tile();
    if Tile::ptr_eq(dst, transparent) {
        return true;
    }
    if offset > 0 && !Tile::ptr_eq(src, transparent) {
        return false;
    }
    dst.get_pixel_unchecked(0, 0) == 0 && dst.is_uniform()
}

/// Morph one strand of tiles into `morphed`.
///
/// Tiles after the first reuse the bucket's window and lookup table,
/// unless the previous tile returned through the uniform short-circuit
/// (nothing fresh was populated, so `can_update` resets).
fn morph_strand(
    offset: i32,
    strand: &[TileCoord],
    tiles: &TileMap,
    bucket: &mut MorphBucket,
    morphed: &mut TileMap,
) {
    let mut can_update = false;
    for &coord in strand {
        let grid = NineGrid::assemble(coord, tiles);
        let (updated, result) = if offset > 0 {
            dilate(bucket, can_update, &grid)
        } else {
            erode(bucket, can_update, &grid)
        };
        can_update = updated;

        if !empty_result(offset, grid.center(), &result) {
            morphed.insert(coord, result);
        }
    }
}

/// Dilate (`offset > 0`) or erode (`offset < 0`) a set of alpha tiles.
///
/// `tiles` is read-only input; `strands` is the caller's partitioning
/// of the coordinates to process (see
/// [`partition_tiles`](crate::partition_tiles)); results are inserted
/// into `morphed`. Fully transparent results are suppressed.
///
/// Work is spread over `min(available_parallelism, strands / 4)`
/// threads; small workloads run on the caller thread. The result map
/// is identical for any worker count.
///
/// # Errors
///
/// Returns [`MorphError::InvalidOffset`] if `offset` is zero or its
/// magnitude exceeds [`TILE_SIZE`].
pub fn morph(
    offset: i32,
    morphed: &mut TileMap,
    tiles: &TileMap,
    strands: &[Strand],
) -> MorphResult<()> {
    if offset == 0 || offset.unsigned_abs() as usize > TILE_SIZE {
        return Err(MorphError::InvalidOffset { offset });
    }
    let radius = offset.unsigned_abs() as usize;

    let num_strands = strands.len();
    let max_workers = thread::available_parallelism().map_or(1, |n| n.get());
    let num_workers = max_workers.min(num_strands / MIN_STRANDS_PER_WORKER);
    debug!(
        "morph offset {}: {} strands on {} worker(s)",
        offset,
        num_strands,
        num_workers.max(1)
    );

    if num_workers > 1 {
        let cursor = AtomicUsize::new(0);
        let results = thread::scope(|scope| {
            let workers: Vec<_> = (0..num_workers)
                .map(|_| {
                    scope.spawn(|| -> MorphResult<TileMap> {
                        let mut bucket = MorphBucket::new(radius)?;
                        let mut local = TileMap::new();
                        loop {
                            let i = cursor.fetch_add(1, Ordering::Relaxed);
                            if i >= num_strands {
                                break;
                            }
                            morph_strand(offset, &strands[i], tiles, &mut bucket, &mut local);
                        }
                        Ok(local)
                    })
                })
                .collect();
            workers
                .into_iter()
                .map(|w| w.join().expect("morph worker panicked"))
                .collect::<Vec<_>>()
        });
        for result in results {
            morphed.extend(result?);
        }
    } else {
        let mut bucket = MorphBucket::new(radius)?;
        for strand in strands {
            morph_strand(offset, strand, tiles, &mut bucket, morphed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilefill_core::{opaque_tile, TileMut, FIX15_ONE};

    #[test]
    fn test_invalid_offsets() {
        let tiles = TileMap::new();
        let mut out = TileMap::new();
        assert!(matches!(
            morph(0, &mut out, &tiles, &[]),
            Err(MorphError::InvalidOffset { offset: 0 })
        ));
        assert!(morph(TILE_SIZE as i32 + 1, &mut out, &tiles, &[]).is_err());
        assert!(morph(-(TILE_SIZE as i32) - 1, &mut out, &tiles, &[]).is_err());
    }

    #[test]
    fn test_empty_result_rules() {
        let transparent = transparent_tile().clone();
        let opaque = opaque_tile().clone();

        // Identity-transparent result: dropped.
        assert!(empty_result(3, &opaque, &transparent));
        assert!(empty_result(-3, &opaque, &transparent));

        // Dilation of a real source: kept without scanning.
        let zero_copy: Tile = TileMut::new().into();
        assert!(!empty_result(3, &opaque, &zero_copy));

        // Dilation of the transparent singleton: kept only if opacity
        // appeared.
        assert!(empty_result(3, &transparent, &zero_copy));
        let mut gained = TileMut::new();
        gained.set_pixel_unchecked(0, 63, FIX15_ONE);
        let gained: Tile = gained.into();
        assert!(!empty_result(3, &transparent, &gained));

        // Erosion: uniform-zero results dropped, others kept.
        assert!(empty_result(-3, &opaque, &zero_copy));
        assert!(!empty_result(-3, &opaque, &gained));
    }

    #[test]
    fn test_erode_opaque_singleton_tile() {
        let mut tiles = TileMap::new();
        tiles.insert((0, 0), opaque_tile().clone());
        let strands = vec![vec![(0, 0)]];

        let mut out = TileMap::new();
        morph(-5, &mut out, &tiles, &strands).unwrap();

        let tile = &out[&(0, 0)];
        assert_eq!(tile.get_pixel_unchecked(32, 32), FIX15_ONE);
        assert_eq!(tile.get_pixel_unchecked(4, 32), 0);
        assert_eq!(tile.get_pixel_unchecked(32, 59), 0);
    }

    #[test]
    fn test_dilate_expands_into_missing_neighbors() {
        // A pixel on the tile edge dilates into the complemented
        // neighbor tile.
        let mut tm = TileMut::new();
        tm.set_pixel_unchecked(0, 32, FIX15_ONE);
        let mut tiles = TileMap::new();
        tiles.insert((0, 0), tm.into());
        crate::strands::complement_adjacent(&mut tiles);
        let (done, strands, _) = crate::strands::partition_tiles(&tiles, false);
        assert!(done.is_empty());

        let mut out = TileMap::new();
        morph(2, &mut out, &tiles, &strands).unwrap();

        // West neighbor gained the overflow; the dilation of the
        // transparent singleton with no nearby opacity was suppressed.
        assert!(out.contains_key(&(0, 0)));
        let west = &out[&(-1, 0)];
        assert_eq!(west.get_pixel_unchecked(63, 32), FIX15_ONE);
        assert_eq!(west.get_pixel_unchecked(62, 32), FIX15_ONE);
        assert_eq!(west.get_pixel_unchecked(61, 32), 0);
        assert!(!out.contains_key(&(1, -1)));
        assert!(!out.contains_key(&(-1, -1)));
    }
}
