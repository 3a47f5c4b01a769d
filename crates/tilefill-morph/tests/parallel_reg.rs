//! Scheduler determinism regression test
//!
//! Tests:
//!   (1) Repeated threaded runs over many strands produce identical
//!       result maps
//!   (2) The scheduled result matches independent per-tile morphs with
//!       a cold bucket for every tile
//!   (3) Erosion suppression matches the per-tile rule
//!
//! Run with:
//! ```
//! cargo test -p tilefill-morph --test parallel_reg
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilefill_core::{NineGrid, Tile, TileMap, TileMut, FIX15_ONE, TILE_SIZE};
use tilefill_morph::{dilate, erode, morph, partition_tiles, MorphBucket};
use tilefill_test::{maps_equal, RegParams};

/// A 16x4 field of random tiles: 16 column strands, enough to spread
/// over several workers.
fn random_field(seed: u64) -> TileMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tiles = TileMap::new();
    for x in 0..16 {
        for y in 0..4 {
            let mut tm = TileMut::new();
            for py in 0..TILE_SIZE {
                for px in 0..TILE_SIZE {
                    // Dense random alpha with scattered holes, so both
                    // dilation and erosion produce nontrivial structure.
                    if !rng.gen_ratio(1, 8) {
                        tm.set_pixel_unchecked(px, py, rng.gen_range(1..=FIX15_ONE));
                    }
                }
            }
            tiles.insert((x, y), tm.into());
        }
    }
    tiles
}

/// Independent per-tile reference: a cold bucket per tile, with the
/// per-tile suppression rule applied by hand.
fn reference_morph(offset: i32, tiles: &TileMap, strands: &[Vec<(i32, i32)>]) -> TileMap {
    let mut out = TileMap::new();
    for coord in strands.iter().flatten().copied() {
        let grid = NineGrid::assemble(coord, tiles);
        let mut bucket = MorphBucket::new(offset.unsigned_abs() as usize).expect("bucket");
        let (_, result) = if offset > 0 {
            dilate(&mut bucket, false, &grid)
        } else {
            erode(&mut bucket, false, &grid)
        };
        let src_is_singleton = Tile::ptr_eq(grid.center(), tilefill_core::transparent_tile());
        let keep = if Tile::ptr_eq(&result, tilefill_core::transparent_tile()) {
            false
        } else if offset > 0 && !src_is_singleton {
            true
        } else {
            !(result.get_pixel(0, 0).unwrap() == 0 && result.is_uniform())
        };
        if keep {
            out.insert(coord, result);
        }
    }
    out
}

#[test]
fn parallel_reg() {
    let mut rp = RegParams::new("parallel");

    let tiles = random_field(0x7115_F111);
    let (done, strands, count) = partition_tiles(&tiles, false);
    rp.compare_bool(true, done.is_empty());
    rp.compare_values(64.0, count as f64, 0.0);
    rp.compare_values(16.0, strands.len() as f64, 0.0);

    // ====================================================================
    // Test 1: Repeated runs agree bit for bit
    // ====================================================================
    eprintln!("  Testing repeated-run determinism");
    for &offset in &[5i32, -3] {
        let mut first = TileMap::new();
        morph(offset, &mut first, &tiles, &strands).expect("morph");
        let mut second = TileMap::new();
        morph(offset, &mut second, &tiles, &strands).expect("morph");
        rp.compare_bool(true, maps_equal(&first, &second));
    }

    // ====================================================================
    // Test 2: Scheduled result matches cold per-tile morphs
    // ====================================================================
    eprintln!("  Testing against independent per-tile morphs");
    for &offset in &[5i32, -3] {
        let mut scheduled = TileMap::new();
        morph(offset, &mut scheduled, &tiles, &strands).expect("morph");
        let reference = reference_morph(offset, &tiles, &strands);
        rp.compare_bool(true, maps_equal(&scheduled, &reference));
    }

    // ====================================================================
    // Test 3: Single-strand workload takes the serial path and still
    // matches
    // ====================================================================
    eprintln!("  Testing the serial fallback");
    let mut serial = TileMap::new();
    for strand in &strands {
        let single = vec![strand.clone()];
        morph(5, &mut serial, &tiles, &single).expect("morph");
    }
    let mut scheduled = TileMap::new();
    morph(5, &mut scheduled, &tiles, &strands).expect("morph");
    rp.compare_bool(true, maps_equal(&serial, &scheduled));

    assert!(rp.cleanup(), "parallel regression test failed");
}
