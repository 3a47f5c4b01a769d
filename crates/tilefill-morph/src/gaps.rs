//! Gap detection for gap-closing fills
//!
//! Scans a nine-grid of flooded alpha tiles for places where the
//! fillable (opaque) region is pinched to a short neck between
//! zero-alpha pixels, and records the squared length of the shortest
//! closing line through every affected pixel of the center tile.
//!
//! Four octant orientations are scanned per transparent pixel,
//! expressed as coordinate-rotation functions; leftward-facing
//! orientations are covered by the originating pixel on the opposite
//! side of the same neck.

use crate::error::{MorphError, MorphResult};
use tilefill_core::{Fix15Short, NineGrid, Tile, TileMut, Window, TILE_SIZE};

/// Sentinel distance meaning "no gap through this pixel".
pub const DIST_NONE: Fix15Short = Fix15Short::MAX;

/// A fresh distance tile with every pixel at [`DIST_NONE`].
pub fn distance_tile() -> TileMut {
    TileMut::filled(DIST_NONE)
}

/// Worker-owned window for gap searches of one distance
pub struct DistanceBucket {
    distance: usize,
    input: Window,
}

impl DistanceBucket {
    /// Allocate the search window for gaps up to `distance` pixels.
    ///
    /// The window reaches `distance + 1` pixels past the center tile,
    /// which must still fit inside the direct neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidDistance`] unless
    /// `1 <= distance < TILE_SIZE`.
    pub fn new(distance: usize) -> MorphResult<Self> {
        if distance == 0 || distance >= TILE_SIZE {
            return Err(MorphError::InvalidDistance { distance });
        }
        Ok(DistanceBucket {
            distance,
            input: Window::new(distance + 1),
        })
    }

    /// The gap-closing distance this bucket searches for.
    pub fn distance(&self) -> usize {
        self.distance
    }
}

/// Coordinate reflection/rotation selecting the octant searched.
type RotOp = fn(i32, i32, i32, i32) -> (i32, i32);

fn top_right(x: i32, y: i32, xoffs: i32, yoffs: i32) -> (i32, i32) {
    (x + xoffs, y + yoffs)
}

fn top_centr(x: i32, y: i32, xoffs: i32, yoffs: i32) -> (i32, i32) {
    (x - yoffs, y - xoffs)
}

fn bot_centr(x: i32, y: i32, xoffs: i32, yoffs: i32) -> (i32, i32) {
    (x - yoffs, y + xoffs)
}

fn bot_right(x: i32, y: i32, xoffs: i32, yoffs: i32) -> (i32, i32) {
    (x + xoffs, y - yoffs)
}

/// Record `new_dist` at a center-tile coordinate if it is inside the
/// tile and shorter than what is already there.
#[inline]
fn upd_dist(coord: (i32, i32), dists: &mut TileMut, new_dist: Fix15Short) {
    let (x, y) = coord;
    if x < 0 || x > TILE_SIZE as i32 - 1 || y < 0 || y > TILE_SIZE as i32 - 1 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if dists.get_pixel_unchecked(x, y) > new_dist {
        dists.set_pixel_unchecked(x, y, new_dist);
    }
}

/// Search one octant around the window pixel (x, y) for gaps of up to
/// `dist` pixels, marking any found along a double-width line in the
/// distance tile.
fn dist_search(x: i32, y: i32, dist: i32, window: &Window, dists: &mut TileMut, op: RotOp) {
    let offs = dist + 1;
    let rx = x - offs;
    let ry = y - offs;

    // Both pixels directly "above" in the rotated frame must be
    // opaque, otherwise no short gap closes through here.
    let t1 = op(x, y, 0, -1);
    let t2 = op(x, y, 1, -1);
    if window.get(t1.0 as usize, t1.1 as usize) == 0 || window.get(t2.0 as usize, t2.1 as usize) == 0
    {
        return;
    }

    for yoffs in 2..dist + 2 {
        let y_dist_sqr = (yoffs - 1) * (yoffs - 1);

        for xoffs in 0..=yoffs {
            let offs_dist = y_dist_sqr + xoffs * xoffs;
            if offs_dist >= 1 + dist * dist {
                break;
            }
            let probe = op(x, y, xoffs, -yoffs);
            if window.get(probe.0 as usize, probe.1 as usize) == 0 {
                // Gap found: mark a double-width line back towards the
                // originating pixel.
                let dx = xoffs as f32 / (yoffs - 1) as f32;
                let mut tx = 0f32;
                let mut cx = 0;
                for cy in 1..yoffs {
                    upd_dist(op(rx, ry, cx, -cy), dists, offs_dist as Fix15Short);
                    tx += dx;
                    if tx.floor() as i32 > cx {
                        cx += 1;
                        upd_dist(op(rx, ry, cx, -cy), dists, offs_dist as Fix15Short);
                    }
                    upd_dist(op(rx, ry, cx + 1, -cy), dists, offs_dist as Fix15Short);
                }
            }
        }
    }
}

/// Search the nine-grid of flooded alpha tiles for gaps up to the
/// bucket's distance, writing squared closing-line lengths into
/// `dists`.
///
/// `dists` covers the center tile and should start out filled with
/// [`DIST_NONE`] (see [`distance_tile`]); shorter gaps overwrite longer
/// ones per pixel.
pub fn find_gaps(bucket: &mut DistanceBucket, dists: &mut TileMut, grid: &NineGrid) {
    let d = bucket.distance as i32;
    let r = d + 1;
    let n = TILE_SIZE as i32;

    bucket.input.fill_from_grid(grid, false);

    // Gaps are probed at most distance + 1 pixels from any point, in an
    // approximate semicircle.
    for y in 0..2 * r + n - 1 {
        for x in 0..r + n - 1 {
            if bucket.input.get(x as usize, y as usize) == 0 {
                if y >= r {
                    dist_search(x, y, d, &bucket.input, dists, top_right);
                    dist_search(x, y, d, &bucket.input, dists, top_centr);
                }
                if y < n + r {
                    dist_search(x, y, d, &bucket.input, dists, bot_centr);
                    dist_search(x, y, d, &bucket.input, dists, bot_right);
                }
            }
        }
    }
}

/// Any zero-alpha pixel in the `w x h` rectangle at (x, y)?
fn any_unfillable(x: usize, w: usize, y: usize, h: usize, tile: &Tile) -> bool {
    for yy in y..y + h {
        let row = &tile.row(yy)[x..x + w];
        if row.iter().any(|&v| v == 0) {
            return true;
        }
    }
    false
}

/// Check whether gaps crossing a fully transparent center tile are
/// possible, given its four cardinal neighbors.
///
/// Only diagonally opposed pairs of zero-alpha corner patches can
/// produce such gaps. `true` guarantees none exist; `false` only means
/// they cannot be ruled out.
///
/// # Panics
///
/// Panics if `distance` exceeds [`TILE_SIZE`].
pub fn no_corner_gaps(distance: usize, n: &Tile, e: &Tile, s: &Tile, w: &Tile) -> bool {
    let d = distance;
    let edge = TILE_SIZE - d;

    // NE corner of W tile, check SW of N if any found
    if any_unfillable(edge, d, 0, d, w) && any_unfillable(0, d, edge, d, n) {
        return false;
    }
    // SE corner of W tile, check NW of S if any found
    if any_unfillable(edge, d, edge, d, w) && any_unfillable(0, d, 0, d, s) {
        return false;
    }
    // SE corner of N tile, check NW of E if any found
    if any_unfillable(edge, d, edge, d, n) && any_unfillable(0, d, 0, d, e) {
        return false;
    }
    // NE corner of S tile, check SW of E if any found
    if any_unfillable(edge, d, 0, d, s) && any_unfillable(0, d, edge, d, e) {
        return false;
    }

    true
}
