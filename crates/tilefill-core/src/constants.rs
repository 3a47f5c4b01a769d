//! Process-unique tile constants
//!
//! The fully transparent and fully opaque tiles are constructed once and
//! shared by reference everywhere. Hot paths recognize them by identity
//! ([`Tile::ptr_eq`]) instead of scanning pixels, so exactly one of each
//! must ever exist in a process.

use crate::fix15::FIX15_ONE;
use crate::tile::Tile;
use once_cell::sync::Lazy;

static TRANSPARENT: Lazy<Tile> = Lazy::new(Tile::new);
static OPAQUE: Lazy<Tile> = Lazy::new(|| Tile::uniform(FIX15_ONE));

/// The shared fully transparent tile.
pub fn transparent_tile() -> &'static Tile {
    &TRANSPARENT
}

/// The shared fully opaque tile.
pub fn opaque_tile() -> &'static Tile {
    &OPAQUE
}
