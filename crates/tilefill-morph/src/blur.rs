//! Separable Gaussian box blur over tile windows
//!
//! The blur is a horizontal pass into an intermediate buffer followed
//! by a vertical pass into the output tile, both using the same
//! precomputed fixed-point factor table. Feathering a fill runs one to
//! three such passes with radii summing to the feather value.

use crate::error::{MorphError, MorphResult};
use crate::strands::partition_tiles;
use log::debug;
use tilefill_core::{
    fix15_mul, fix15_short_clamp, Fix15, Fix15Short, NineGrid, Strand, TileMap, TileMut, Window,
    FIX15_ONE, TILE_SIZE,
};

/// Gaussian multiplicands for radius `r`, in fixed point.
///
/// The low two bits of every factor are forced on so the factor sum can
/// never come out as zero; blurred pixels are clamped to `FIX15_ONE`
/// anyway, so the slight oversize is harmless.
fn blur_factors(r: u32) -> Vec<Fix15Short> {
    let sigma = 0.3 * r as f64 + 0.3;
    let prelim_size = 6 * (sigma + 1.0).ceil() as usize;
    let mul = 1.0 / (2.0 * std::f64::consts::PI * sigma * sigma).sqrt();
    let exp_mul = 1.0 / (2.0 * sigma * sigma);

    let center = (prelim_size / 2) as f64;
    (0..prelim_size)
        .map(|i| {
            let d = center - i as f64;
            let fac = mul * (-d * d * exp_mul).exp();
            (((FIX15_ONE as f64 * fac) as Fix15) | 3) as Fix15Short
        })
        .collect()
}

/// Worker-owned scratch state for tile blurs of one radius
pub struct BlurBucket {
    factors: Vec<Fix15Short>,
    /// Effective radius derived from the factor table size.
    radius: usize,
    /// Nine-grid window, input to the horizontal pass.
    input_full: Window,
    /// Output of the horizontal pass, `(TILE_SIZE + 2r) x TILE_SIZE`.
    input_vert: Vec<Fix15Short>,
}

impl BlurBucket {
    /// Precompute the factor table for `radius` and allocate the pass
    /// buffers.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidBlurRadius`] when the factor table
    /// would reach further than a full tile past the window edge.
    pub fn new(radius: u32) -> MorphResult<Self> {
        let factors = blur_factors(radius);
        let effective = (factors.len() - 1) / 2;
        if effective > TILE_SIZE {
            return Err(MorphError::InvalidBlurRadius {
                requested: radius,
                effective,
            });
        }

        let width = TILE_SIZE + 2 * effective;
        Ok(BlurBucket {
            factors,
            radius: effective,
            input_full: Window::new(effective),
            input_vert: vec![0; width * TILE_SIZE],
        })
    }

    /// Effective blur radius, `(factor_count - 1) / 2`.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Factor table for this bucket.
    pub fn factors(&self) -> &[Fix15Short] {
        &self.factors
    }

    /// Blur the populated window into `dst`.
    fn run(&mut self, dst: &mut TileMut) {
        let r = self.radius;

        // Blur each row from the window into the intermediate buffer.
        for y in 0..TILE_SIZE + 2 * r {
            let row = self.input_full.row(y);
            for x in 0..TILE_SIZE {
                let mut blurred: Fix15 = 0;
                for k in 0..=2 * r {
                    blurred += fix15_mul(row[x + k], self.factors[k]);
                }
                self.input_vert[y * TILE_SIZE + x] = fix15_short_clamp(blurred);
            }
        }

        // Blur each column from the intermediate buffer into the tile.
        let out = dst.data_mut();
        for x in 0..TILE_SIZE {
            for y in 0..TILE_SIZE {
                let mut blurred: Fix15 = 0;
                for k in 0..=2 * r {
                    blurred += fix15_mul(self.input_vert[(y + k) * TILE_SIZE + x], self.factors[k]);
                }
                out[y * TILE_SIZE + x] = fix15_short_clamp(blurred);
            }
        }
    }
}

/// Blur the center tile of `grid` into `dst`.
///
/// With `can_update`, the window reuses rows from the previous call;
/// valid only when the previous tile was directly above this one.
pub fn blur(bucket: &mut BlurBucket, can_update: bool, grid: &NineGrid, dst: &mut TileMut) {
    bucket.input_full.fill_from_grid(grid, can_update);
    bucket.run(dst);
}

/// Run one blur pass over caller-partitioned strands, inserting the
/// blurred tiles into `blurred`.
pub fn blur_strands(
    bucket: &mut BlurBucket,
    tiles: &TileMap,
    strands: &[Strand],
    blurred: &mut TileMap,
) {
    for strand in strands {
        let mut can_update = false;
        for &coord in strand {
            let grid = NineGrid::assemble(coord, tiles);
            let mut dst = TileMut::new();
            blur(bucket, can_update, &grid, &mut dst);
            blurred.insert(coord, dst.into());
            can_update = true;
        }
    }
}

/// One blur pass over a whole tile map: partition, then blur every
/// strand tile. Identity-opaque tiles with identity-opaque
/// neighborhoods pass through unchanged.
fn blur_pass(tiles: &TileMap, bucket: &mut BlurBucket) -> TileMap {
    let (mut blurred, strands, _) = partition_tiles(tiles, false);
    blur_strands(bucket, tiles, &strands, &mut blurred);
    blurred
}

/// Split a feather radius into three minimally different box radii
/// summing to it.
pub fn triples(num: u32) -> (u32, u32, u32) {
    let fraction = num as f64 / 3.0;
    let whole = num / 3;
    let floor = fraction.floor() as u32;
    let ceil = fraction.ceil() as u32;
    if fraction - whole as f64 >= 0.5 {
        (ceil, ceil, floor)
    } else {
        (ceil, floor, floor)
    }
}

/// Feather a set of filled alpha tiles, returning the blurred tiles.
///
/// Single-pixel feathering uses one pass; two pixels, two radius-1
/// passes; larger feathers run three passes whose radii sum to the
/// feather value. Tile coverage is expanded once up front, on the
/// assumption that the total feather never exceeds a tile edge.
///
/// # Errors
///
/// Returns [`MorphError::InvalidFeather`] unless
/// `1 <= feather <= TILE_SIZE`.
pub fn blur_fill(feather: u32, tiles: &TileMap) -> MorphResult<TileMap> {
    if feather == 0 || feather as usize > TILE_SIZE {
        return Err(MorphError::InvalidFeather { feather });
    }

    let radiuses: Vec<u32> = match feather {
        1 => vec![1],
        2 => vec![1, 1],
        f => {
            let (a, b, c) = triples(f);
            vec![a, b, c]
        }
    };
    debug!("feather {}: blur passes {:?}", feather, radiuses);

    let mut tiles = tiles.clone();
    crate::strands::complement_adjacent(&mut tiles);

    let mut prev_radius = radiuses[0];
    let mut bucket = BlurBucket::new(prev_radius)?;
    for &radius in &radiuses {
        if radius != prev_radius {
            bucket = BlurBucket::new(radius)?;
            prev_radius = radius;
        }
        tiles = blur_pass(&tiles, &mut bucket);
    }
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_floor() {
        for r in [0, 1, 2, 5, 10] {
            let factors = blur_factors(r);
            assert_eq!(factors.len(), 6 * ((0.3 * r as f64 + 1.3).ceil() as usize));
            for f in &factors {
                assert_eq!(f & 3, 3, "factor {} lacks the low-bit floor", f);
            }
            let sum: u32 = factors.iter().map(|&f| f as u32).sum();
            assert!(sum >= 1);
        }
    }

    #[test]
    fn test_effective_radius() {
        // Radius 2: sigma 0.9, table size 12, effective radius 5.
        let bucket = BlurBucket::new(2).unwrap();
        assert_eq!(bucket.radius(), 5);
        assert_eq!(bucket.factors().len(), 12);

        assert!(BlurBucket::new(64).is_ok());
        assert!(matches!(
            BlurBucket::new(80),
            Err(MorphError::InvalidBlurRadius { .. })
        ));
    }

    #[test]
    fn test_triples() {
        assert_eq!(triples(3), (1, 1, 1));
        assert_eq!(triples(4), (2, 1, 1));
        assert_eq!(triples(5), (2, 2, 1));
        assert_eq!(triples(6), (2, 2, 2));
        assert_eq!(triples(64), (22, 21, 21));
        for n in 3..=64 {
            let (a, b, c) = triples(n);
            assert_eq!(a + b + c, n);
            assert!(a >= b && b >= c && a - c <= 1);
        }
    }

    #[test]
    fn test_invalid_feather() {
        let tiles = TileMap::new();
        assert!(blur_fill(0, &tiles).is_err());
        assert!(blur_fill(TILE_SIZE as u32 + 1, &tiles).is_err());
    }
}
