//! Gap detection regression test
//!
//! Tests:
//!   (1) A two-pixel breach in a thin barrier is recorded with squared
//!       closing length 4, and only the breach footprint is touched
//!   (2) The same breach rotated 90 degrees yields the same minimum at
//!       the rotated location
//!   (3) Corner-gap screening of cardinal neighbors
//!
//! Run with:
//! ```
//! cargo test -p tilefill-morph --test gapfind_reg
//! ```

use tilefill_core::{opaque_tile, NineGrid, Tile, TileMap, TileMut, FIX15_ONE, TILE_SIZE};
use tilefill_morph::{distance_tile, find_gaps, no_corner_gaps, DistanceBucket, DIST_NONE};
use tilefill_test::{tile_from_fn, RegParams};

/// Flooded alphas: opaque everywhere except a one-pixel barrier row at
/// `y = 32`, breached at columns 30 and 31.
fn breached_row_tile() -> Tile {
    tile_from_fn(|x, y| {
        if y == 32 && !(30..=31).contains(&x) {
            0
        } else {
            FIX15_ONE
        }
    })
}

/// The same fixture rotated a quarter turn: barrier column at `x = 32`,
/// breached at rows 30 and 31.
fn breached_column_tile() -> Tile {
    tile_from_fn(|x, y| {
        if x == 32 && !(30..=31).contains(&y) {
            0
        } else {
            FIX15_ONE
        }
    })
}

/// Gap distances for a center tile embedded in fully flooded (opaque)
/// surroundings, so no boundary necks appear at the tile seams.
fn gaps_for(tile: Tile, distance: usize) -> TileMut {
    let mut tiles = TileMap::new();
    for dy in -1..=1 {
        for dx in -1..=1 {
            tiles.insert((dx, dy), opaque_tile().clone());
        }
    }
    tiles.insert((0, 0), tile);
    let grid = NineGrid::assemble((0, 0), &tiles);

    let mut bucket = DistanceBucket::new(distance).expect("bucket");
    let mut dists = distance_tile();
    find_gaps(&mut bucket, &mut dists, &grid);
    dists
}

/// Collect (coord, distance) for every non-sentinel pixel.
fn touched(dists: &TileMut) -> Vec<((usize, usize), u16)> {
    let mut out = Vec::new();
    for y in 0..TILE_SIZE {
        for x in 0..TILE_SIZE {
            let v = dists.get_pixel(x, y).unwrap();
            if v < DIST_NONE {
                out.push(((x, y), v));
            }
        }
    }
    out
}

#[test]
fn gapfind_reg() {
    let mut rp = RegParams::new("gapfind");

    // ====================================================================
    // Test 1: Horizontal barrier with a two-pixel breach
    // ====================================================================
    eprintln!("  Testing a breached horizontal barrier");
    let dists = gaps_for(breached_row_tile(), 5);

    // The breach columns carry the squared closing length (3 - 1)^2 = 4
    // across the double-width line.
    for &(x, y) in &[(30usize, 31usize), (30, 32), (30, 33), (31, 31), (31, 32), (31, 33)] {
        rp.compare_values(4.0, dists.get_pixel(x, y).unwrap() as f64, 0.0);
    }

    let hits = touched(&dists);
    let min = hits.iter().map(|&(_, v)| v).min().unwrap();
    rp.compare_values(4.0, min as f64, 0.0);
    rp.compare_values(15.0, hits.len() as f64, 0.0);
    // Longer near-misses trail off behind the far barrier end, still
    // inside the breach footprint.
    let in_footprint = hits
        .iter()
        .all(|&((x, y), _)| (30..=34).contains(&x) && (31..=33).contains(&y));
    rp.compare_bool(true, in_footprint);

    // ====================================================================
    // Test 2: Quarter-turn symmetry
    // ====================================================================
    eprintln!("  Testing the rotated breach");
    let dists = gaps_for(breached_column_tile(), 5);

    for &(x, y) in &[(32usize, 30usize), (32, 31), (33, 30), (33, 31)] {
        rp.compare_values(4.0, dists.get_pixel(x, y).unwrap() as f64, 0.0);
    }
    let hits = touched(&dists);
    let min = hits.iter().map(|&(_, v)| v).min().unwrap();
    rp.compare_values(4.0, min as f64, 0.0);
    let in_footprint = hits
        .iter()
        .all(|&((x, y), _)| (32..=33).contains(&x) && (27..=34).contains(&y));
    rp.compare_bool(true, in_footprint);

    // ====================================================================
    // Test 3: Corner-gap screening
    // ====================================================================
    eprintln!("  Testing corner-gap screening");
    let opaque = opaque_tile();
    rp.compare_bool(true, no_corner_gaps(5, opaque, opaque, opaque, opaque));

    // A zero pixel in the N tile's SE corner pairs with one in the E
    // tile's NW corner.
    let n = tile_from_fn(|x, y| {
        if x == TILE_SIZE - 1 && y == TILE_SIZE - 1 {
            0
        } else {
            FIX15_ONE
        }
    });
    let e = tile_from_fn(|x, y| if x == 0 && y == 0 { 0 } else { FIX15_ONE });
    rp.compare_bool(false, no_corner_gaps(5, &n, &e, opaque, opaque));
    rp.compare_bool(true, no_corner_gaps(5, &n, opaque, opaque, opaque));
    // Swapping the pair into a non-opposed configuration clears it.
    rp.compare_bool(true, no_corner_gaps(5, &e, &n, opaque, opaque));

    assert!(rp.cleanup(), "gapfind regression test failed");
}
