//! Disk morphology over tile windows
//!
//! Dilation and erosion use a circular structuring element and the
//! Urbach-Wilkinson algorithm: every chord of the disk is a horizontal
//! interval, and the extremum of any interval of length `len[k]` can be
//! built from two overlapping intervals of length `len[k-1]`. A lookup
//! table of per-row interval extrema therefore costs one comparison per
//! cell, and each output pixel reduces one table cell per chord instead
//! of sampling the whole disk.
//!
//! The table covers `2r + 1` input rows. Moving to the next output row
//! only needs the newly exposed bottom row, so the table rows are kept
//! behind a rotating row-order indirection and repopulated one at a
//! time. The same trick extends across tiles: when a strand supplies
//! tiles top to bottom, the window filler reuses the previous tile's
//! bottom rows and the table stays warm (`can_update`).

use crate::error::{MorphError, MorphResult};
use tilefill_core::{
    opaque_tile, transparent_tile, Fix15Short, NineGrid, Tile, TileMut, Window, FIX15_ONE,
    TILE_SIZE,
};

/// One row of the disk structuring element
///
/// Stores an index into the unique chord-length table rather than the
/// length itself, so chords of equal length share lookups.
#[derive(Debug, Clone, Copy, Default)]
struct Chord {
    x_offset: i32,
    length_index: usize,
}

/// Comparator capability for a morphological operation
///
/// Monomorphizing the kernel over this trait keeps the inner chord loop
/// free of runtime dispatch.
pub trait MorphOp {
    /// Reduction seed for one output pixel.
    const INIT: Fix15Short;
    /// Absorbing value: once reached the chord loop can stop, and a
    /// uniform tile of this value is the short-circuit result.
    const LIM: Fix15Short;

    /// The reduction itself.
    fn cmp(a: Fix15Short, b: Fix15Short) -> Fix15Short;
}

/// Dilation: max-reduction towards fully opaque.
pub struct Dilation;

impl MorphOp for Dilation {
    const INIT: Fix15Short = 0;
    const LIM: Fix15Short = FIX15_ONE;

    #[inline]
    fn cmp(a: Fix15Short, b: Fix15Short) -> Fix15Short {
        a.max(b)
    }
}

/// Erosion: min-reduction towards fully transparent.
pub struct Erosion;

impl MorphOp for Erosion {
    const INIT: Fix15Short = FIX15_ONE;
    const LIM: Fix15Short = 0;

    #[inline]
    fn cmp(a: Fix15Short, b: Fix15Short) -> Fix15Short {
        a.min(b)
    }
}

/// Worker-owned scratch state for tile morphs of one radius
///
/// Holds the structuring element chords, the working window populated
/// from a nine-grid, and the interval lookup table. One bucket is owned
/// by exactly one worker and reused across every tile that worker
/// processes.
pub struct MorphBucket {
    radius: usize,
    height: usize,
    se_chords: Vec<Chord>,
    se_lengths: Vec<usize>,
    input: Window,
    /// `height x (TILE_SIZE + 2r) x num_lengths`, contiguous.
    table: Vec<Fix15Short>,
    /// Physical table row per logical row; rotated instead of moving data.
    row_order: Vec<usize>,
}

impl MorphBucket {
    /// Build the structuring element and allocate scratch space for
    /// morphs of the given radius.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidRadius`] unless
    /// `1 <= radius <= TILE_SIZE`.
    pub fn new(radius: usize) -> MorphResult<Self> {
        if radius == 0 || radius > TILE_SIZE {
            return Err(MorphError::InvalidRadius { radius });
        }

        let height = radius * 2 + 1;
        let rf = radius as f64;
        let fst_length = 1 + 2 * (((rf + 0.5).powi(2) - rf.powi(2)).sqrt().floor() as usize);

        // Power-of-two ladder below the first chord length: every later
        // length stays reachable by combining two shorter intervals.
        let mut se_lengths = Vec::new();
        let mut pad = 1;
        while pad < fst_length {
            se_lengths.push(pad);
            pad *= 2;
        }

        // First half of the circle; new unique lengths appended as the
        // chords widen towards the equator.
        let mut se_chords = vec![Chord::default(); height];
        for y in -(radius as i32)..=0 {
            let x_offs = ((rf + 0.5).powi(2) - (y as f64).powi(2)).sqrt().floor() as i32;
            let length = 1 + x_offs as usize * 2;
            if se_lengths.last() != Some(&length) {
                se_lengths.push(length);
            }
            se_chords[(y + radius as i32) as usize] = Chord {
                x_offset: -x_offs,
                length_index: se_lengths.len() - 1,
            };
        }
        // Mirror onto the second half.
        for mirr_y in 1..=radius {
            se_chords[mirr_y + radius] = se_chords[radius - mirr_y];
        }

        let width = TILE_SIZE + 2 * radius;
        let num_lengths = se_lengths.len();
        Ok(MorphBucket {
            radius,
            height,
            se_chords,
            se_lengths,
            input: Window::new(radius),
            table: vec![0; height * width * num_lengths],
            row_order: (0..height).collect(),
        })
    }

    /// Structuring element radius this bucket was built for.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Rotate the lookup table down one step: the topmost logical row
    /// becomes the scratch row for the next input row.
    fn rotate_lut(&mut self) {
        self.row_order.rotate_left(1);
    }

    /// Fill logical table row `y_row` from window row `y_px`.
    fn populate_row<O: MorphOp>(&mut self, y_row: usize, y_px: usize) {
        let width = self.input.width();
        let num_lengths = self.se_lengths.len();
        let base = self.row_order[y_row] * width * num_lengths;

        let input_row = self.input.row(y_px);
        for x in 0..width {
            self.table[base + x * num_lengths] = input_row[x];
        }

        let mut prev_len = 1;
        for len_i in 1..num_lengths {
            let len = self.se_lengths[len_i];
            let len_diff = len - prev_len;
            prev_len = len;
            for x in 0..=(width - len) {
                let ext = O::cmp(
                    self.table[base + x * num_lengths + len_i - 1],
                    self.table[base + (x + len_diff) * num_lengths + len_i - 1],
                );
                self.table[base + x * num_lengths + len_i] = ext;
            }
        }
    }

    /// Search the horizontal and vertical diameters of a circle at
    /// (cx, cy) with half-width `w` for any pixel equalling `lim`.
    fn check_lim(lim: Fix15Short, tile: &Tile, cx: i32, cy: i32, w: i32) -> bool {
        for y in 0..=1 {
            for x in -w..=w {
                if tile.get_pixel_unchecked((cx + x) as usize, (cy + y) as usize) == lim
                    || tile.get_pixel_unchecked((cx + y) as usize, (cy + x) as usize) == lim
                {
                    return true;
                }
            }
        }
        false
    }

    /// Probe whether the result is a foregone `LIM`-uniform tile.
    ///
    /// When the radius is large enough that one structuring element
    /// centered mid-tile covers the whole tile, a single `LIM` pixel
    /// near the center decides the result. With a radius half that, four
    /// elements at the quarter positions suffice. The probes search
    /// small crosses only, so this stays cheap relative to a real morph.
    fn can_skip<O: MorphOp>(&self, tile: &Tile) -> bool {
        const MAX_SEARCH_RADIUS: i32 = 15;
        let n = TILE_SIZE as i32;
        let r = self.radius as i32;
        let r_limit = (n as f64 * std::f64::consts::SQRT_2 / 2.0) as i32;

        // Structuring element covers the entire tile
        if r > r_limit {
            let range = (r - r_limit).min(MAX_SEARCH_RADIUS);
            let half = n / 2 - 1;
            if Self::check_lim(O::LIM, tile, half, half, range) {
                return true;
            }
        }
        // Four structuring elements can cover the tile
        if r > r_limit / 2 {
            let range = (r - r_limit / 2).min(MAX_SEARCH_RADIUS);
            let qrtr = n / 4;
            let r_px = -1;
            if Self::check_lim(O::LIM, tile, r_px + qrtr, r_px + qrtr, range)
                && Self::check_lim(O::LIM, tile, r_px + 3 * qrtr, r_px + qrtr, range)
                && Self::check_lim(O::LIM, tile, r_px + 3 * qrtr, r_px + 3 * qrtr, range)
                && Self::check_lim(O::LIM, tile, r_px + qrtr, r_px + 3 * qrtr, range)
            {
                return true;
            }
        }

        false
    }

    /// Run the morph kernel over the populated window into `dst`.
    ///
    /// With `can_update`, only the newly exposed bottom row is
    /// populated before the first output row; otherwise the whole table
    /// is rebuilt.
    fn morph<O: MorphOp>(&mut self, can_update: bool, dst: &mut TileMut) {
        let r = self.radius;
        let height = self.height;
        let width = self.input.width();
        let num_lengths = self.se_lengths.len();

        if can_update {
            self.populate_row::<O>(0, 2 * r);
            self.rotate_lut();
        } else {
            for dy in 0..height {
                self.populate_row::<O>(dy, dy);
            }
        }

        let mut pixels = dst.pixels_mut();
        let mut dst_px = pixels.pixel_mut(0, 0);
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let mut ext = O::INIT;
                for c in 0..height {
                    let ch = self.se_chords[c];
                    let xi = (x as i32 + ch.x_offset + r as i32) as usize;
                    let cell = self.row_order[c] * width * num_lengths
                        + xi * num_lengths
                        + ch.length_index;
                    ext = O::cmp(ext, self.table[cell]);
                    if ext == O::LIM {
                        break;
                    }
                }
                dst_px.write(ext);
                dst_px.move_x(1);
            }
            if y < TILE_SIZE - 1 {
                self.populate_row::<O>(0, y + 2 * r + 1);
                self.rotate_lut();
            }
        }
    }
}

/// Morph one nine-grid, returning whether the lookup table was brought
/// up to date along with the result tile.
///
/// A `false` first element means the uniform short-circuit fired and
/// the table holds stale rows; the caller must not pass `can_update`
/// for the next tile in the strand.
fn generic_morph<O: MorphOp>(
    bucket: &mut MorphBucket,
    can_update: bool,
    grid: &NineGrid,
) -> (bool, Tile) {
    if bucket.can_skip::<O>(grid.center()) {
        let skip_tile = if O::LIM == 0 {
            transparent_tile()
        } else {
            opaque_tile()
        };
        return (false, skip_tile.clone());
    }

    bucket.input.fill_from_grid(grid, can_update);

    let mut dst = TileMut::new();
    bucket.morph::<O>(can_update, &mut dst);
    (true, dst.into())
}

/// Dilate the center tile of `grid` by the bucket's radius.
pub fn dilate(bucket: &mut MorphBucket, can_update: bool, grid: &NineGrid) -> (bool, Tile) {
    generic_morph::<Dilation>(bucket, can_update, grid)
}

/// Erode the center tile of `grid` by the bucket's radius.
pub fn erode(bucket: &mut MorphBucket, can_update: bool, grid: &NineGrid) -> (bool, Tile) {
    generic_morph::<Erosion>(bucket, can_update, grid)
}
