//! The seamless working window
//!
//! Kernels that look `margin` pixels past a tile's edge operate on a
//! contiguous `(TILE_SIZE + 2*margin)^2` window copied out of the tile
//! and its eight neighbors. `window[y][x]` corresponds to the pixel at
//! offset `(x - margin, y - margin)` within the center tile, sourced
//! from whichever of the nine tiles covers that coordinate.
//!
//! When tiles are processed in a vertically contiguous run, the bottom
//! `2*margin` rows of one window are exactly the top `2*margin` rows of
//! the next. [`Window::fill_from_grid`] with `from_above` reuses them
//! and refills only the band below, which is the main performance
//! contract of strand-ordered processing.

use crate::fix15::Fix15Short;
use crate::grid::NineGrid;
use crate::tile::Tile;
use crate::TILE_SIZE;

/// Contiguous working window over a nine-grid
#[derive(Debug)]
pub struct Window {
    margin: usize,
    width: usize,
    data: Vec<Fix15Short>,
}

impl Window {
    /// Allocate a zeroed window reaching `margin` pixels past the
    /// center tile on every side.
    pub fn new(margin: usize) -> Self {
        let width = TILE_SIZE + 2 * margin;
        Window {
            margin,
            width,
            data: vec![0; width * width],
        }
    }

    /// Window edge length, `TILE_SIZE + 2*margin`.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The margin this window was allocated for.
    #[inline]
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Read the window pixel at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Fix15Short {
        self.data[y * self.width + x]
    }

    /// One window row.
    #[inline]
    pub fn row(&self, y: usize) -> &[Fix15Short] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Copy a `w x h` rectangle from `src` (starting at `(px_x, px_y)`)
    /// into the window at `(x, y)`.
    fn fill_section(
        &mut self,
        x: usize,
        w: usize,
        y: usize,
        h: usize,
        src: &Tile,
        px_x: usize,
        px_y: usize,
    ) {
        for row_i in 0..h {
            let src_row = &src.row(px_y + row_i)[px_x..px_x + w];
            let start = (y + row_i) * self.width + x;
            self.data[start..start + w].copy_from_slice(src_row);
        }
    }

    /// Swap the contents of window rows `a` and `b` (`a < b`).
    fn swap_rows(&mut self, a: usize, b: usize) {
        let w = self.width;
        let (head, tail) = self.data.split_at_mut(b * w);
        head[a * w..a * w + w].swap_with_slice(&mut tail[..w]);
    }

    /// Populate the window from a nine-grid.
    ///
    /// With `from_above` set, the top `2*margin` rows are taken from
    /// what were the bottom `2*margin` rows of the previous fill (the
    /// previous center tile must have been the tile directly above),
    /// and only the west/center/east band below them is refilled.
    pub fn fill_from_grid(&mut self, grid: &NineGrid, from_above: bool) {
        let r = self.margin;
        let n = TILE_SIZE;

        if from_above {
            // Reuse margin*2 rows from the previous fill; the topmost
            // tiles need no handling.
            for i in 0..2 * r {
                self.swap_rows(i, n + i);
            }
            // west, mid, east: bottom (n - r) rows
            self.fill_section(0, r, 2 * r, n - r, grid.west(), n - r, r);
            self.fill_section(r, n, 2 * r, n - r, grid.center(), 0, r);
            self.fill_section(n + r, r, 2 * r, n - r, grid.east(), 0, r);
        } else {
            // nw, north, ne
            self.fill_section(0, r, 0, r, grid.north_west(), n - r, n - r);
            self.fill_section(r, n, 0, r, grid.north(), 0, n - r);
            self.fill_section(n + r, r, 0, r, grid.north_east(), 0, n - r);

            // west, mid, east
            self.fill_section(0, r, r, n, grid.west(), n - r, 0);
            self.fill_section(r, n, r, n, grid.center(), 0, 0);
            self.fill_section(n + r, r, r, n, grid.east(), 0, 0);
        }
        // sw, south, se
        self.fill_section(0, r, n + r, r, grid.south_west(), n - r, 0);
        self.fill_section(r, n, n + r, r, grid.south(), 0, 0);
        self.fill_section(n + r, r, n + r, r, grid.south_east(), 0, 0);
    }
}
