//! Tile - the alpha tile container
//!
//! The `Tile` structure holds one `TILE_SIZE x TILE_SIZE` square of alpha
//! values at 15-bit fixed point, row-major.
//!
//! # Ownership model
//!
//! `Tile` uses `Arc` for efficient cloning (shared ownership). Tiles are
//! immutable once constructed; to build or modify pixel data, use
//! [`TileMut`] and convert with `Into<Tile>`. Identity of the shared
//! allocation is observable through [`Tile::ptr_eq`], which is how the
//! process-unique transparent/opaque constants are recognized on hot
//! paths without scanning pixels.

use crate::error::{Error, Result};
use crate::fix15::Fix15Short;
use crate::pixel::{PixelBuffer, PixelBufferMut};
use crate::TILE_SIZE;
use std::sync::Arc;

/// Internal tile data
#[derive(Debug)]
struct TileData {
    /// Alpha values, row-major, `TILE_SIZE * TILE_SIZE` entries
    data: Vec<Fix15Short>,
}

/// Immutable, shareable alpha tile
///
/// # Examples
///
/// ```
/// use tilefill_core::Tile;
///
/// let tile = Tile::new();
/// assert_eq!(tile.get_pixel(0, 0), Some(0));
/// assert!(tile.is_uniform());
/// ```
#[derive(Debug, Clone)]
pub struct Tile {
    inner: Arc<TileData>,
}

impl Tile {
    /// Create a new fully transparent tile.
    ///
    /// Note: this allocates. For a shared transparent tile use
    /// [`crate::transparent_tile`].
    pub fn new() -> Self {
        Tile {
            inner: Arc::new(TileData {
                data: vec![0; TILE_SIZE * TILE_SIZE],
            }),
        }
    }

    /// Create a tile with every pixel set to `value`.
    pub fn uniform(value: Fix15Short) -> Self {
        Tile {
            inner: Arc::new(TileData {
                data: vec![value; TILE_SIZE * TILE_SIZE],
            }),
        }
    }

    /// Get a pixel value at (x, y), or `None` if out of bounds.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Fix15Short> {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: usize, y: usize) -> Fix15Short {
        self.inner.data[y * TILE_SIZE + x]
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[Fix15Short] {
        &self.inner.data
    }

    /// Get one row of pixel data.
    ///
    /// # Panics
    ///
    /// Panics if `y >= TILE_SIZE`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Fix15Short] {
        let start = y * TILE_SIZE;
        &self.inner.data[start..start + TILE_SIZE]
    }

    /// Get a non-owning pixel view over this tile.
    #[inline]
    pub fn pixels(&self) -> PixelBuffer<'_> {
        PixelBuffer::new(&self.inner.data)
    }

    /// True if both tiles share the same allocation.
    ///
    /// This is an identity test, not a content comparison; two
    /// independently built all-zero tiles are not `ptr_eq`.
    #[inline]
    pub fn ptr_eq(a: &Tile, b: &Tile) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// True if every pixel equals the pixel at (0, 0).
    pub fn is_uniform(&self) -> bool {
        let first = self.inner.data[0];
        self.inner.data.iter().all(|&v| v == first)
    }

    /// Compare pixel contents with another tile.
    pub fn same_pixels(&self, other: &Tile) -> bool {
        Tile::ptr_eq(self, other) || self.inner.data == other.inner.data
    }

    /// Get the number of strong references to this tile.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a mutable copy of this tile's pixels.
    pub fn to_mut(&self) -> TileMut {
        TileMut {
            inner: TileData {
                data: self.inner.data.clone(),
            },
        }
    }

    /// Try to reclaim exclusive access to the pixel data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<TileMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(TileMut { inner: data }),
            Err(arc) => Err(Tile { inner: arc }),
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::new()
    }
}

/// Mutable alpha tile
///
/// Exclusively owned while being written; convert to a shareable
/// immutable [`Tile`] with `Into<Tile>`.
#[derive(Debug)]
pub struct TileMut {
    inner: TileData,
}

impl TileMut {
    /// Create a new fully transparent mutable tile.
    pub fn new() -> Self {
        TileMut {
            inner: TileData {
                data: vec![0; TILE_SIZE * TILE_SIZE],
            },
        }
    }

    /// Create a mutable tile with every pixel set to `value`.
    pub fn filled(value: Fix15Short) -> Self {
        TileMut {
            inner: TileData {
                data: vec![value; TILE_SIZE * TILE_SIZE],
            },
        }
    }

    /// Get a pixel value at (x, y), or `None` if out of bounds.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Fix15Short> {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: usize, y: usize) -> Fix15Short {
        self.inner.data[y * TILE_SIZE + x]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `x` or `y` is out of bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, val: Fix15Short) -> Result<()> {
        if x >= TILE_SIZE {
            return Err(Error::IndexOutOfBounds {
                index: x,
                len: TILE_SIZE,
            });
        }
        if y >= TILE_SIZE {
            return Err(Error::IndexOutOfBounds {
                index: y,
                len: TILE_SIZE,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: usize, y: usize, val: Fix15Short) {
        self.inner.data[y * TILE_SIZE + x] = val;
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[Fix15Short] {
        &self.inner.data
    }

    /// Get mutable raw access to the pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Fix15Short] {
        &mut self.inner.data
    }

    /// Get a mutable pixel view over this tile.
    #[inline]
    pub fn pixels_mut(&mut self) -> PixelBufferMut<'_> {
        PixelBufferMut::new(&mut self.inner.data)
    }

    /// Clear all pixels to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set all pixels to `value`.
    pub fn fill(&mut self, value: Fix15Short) {
        self.inner.data.fill(value);
    }
}

impl Default for TileMut {
    fn default() -> Self {
        TileMut::new()
    }
}

impl From<TileMut> for Tile {
    fn from(tile_mut: TileMut) -> Self {
        Tile {
            inner: Arc::new(tile_mut.inner),
        }
    }
}
