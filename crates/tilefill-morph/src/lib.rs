//! tilefill-morph - Post-processing passes over flood-fill alpha tiles
//!
//! This crate provides the tile-parallel post-processing applied to a
//! flood fill's output:
//!
//! - Dilation and erosion with a circular structuring element
//!   ([`MorphBucket`], [`morph`])
//! - Separable Gaussian box blur for feathering ([`BlurBucket`],
//!   [`blur`], [`blur_fill`])
//! - Gap detection for gap-closing fills ([`DistanceBucket`],
//!   [`find_gaps`], [`no_corner_gaps`])
//! - Strand partitioning and the worker scheduler that processes
//!   strands in parallel ([`partition_tiles`], [`morph`])
//!
//! All passes consume a coordinate-keyed map of immutable tiles plus
//! the tile's eight neighbors, and produce freshly allocated tiles;
//! input tiles are never modified.

mod blur;
mod bucket;
mod error;
mod gaps;
mod scheduler;
mod strands;

pub use blur::{blur, blur_fill, blur_strands, triples, BlurBucket};
pub use bucket::{dilate, erode, Dilation, Erosion, MorphBucket, MorphOp};
pub use error::{MorphError, MorphResult};
pub use gaps::{distance_tile, find_gaps, no_corner_gaps, DistanceBucket, DIST_NONE};
pub use scheduler::morph;
pub use strands::{complement_adjacent, partition_tiles};
