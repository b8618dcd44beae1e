//! Procedural sand dunes
//!
//! A 1D midpoint displacement ("fractal trend") heightmap, generated once
//! at startup and never modified afterwards.

use glam::DVec2;
use rand::Rng;
use serde::Serialize;

/// Largest accepted detail level (2^24 + 1 samples)
pub const MAX_TERRAIN_DETAIL: u32 = 24;

/// Generate `2^detail + 1` heights by midpoint displacement.
///
/// Endpoints are uniform in [0, 1). Each refinement round halves the
/// segment size `s` and sets every odd multiple of `s` to the mean of its
/// neighbours at distance `s`, plus a uniform perturbation in
/// `[-s/points, s/points)`, floored at zero.
///
/// # Panics
/// If `detail` is zero or above [`MAX_TERRAIN_DETAIL`].
pub fn generate_trend<R: Rng>(detail: u32, rng: &mut R) -> Vec<f64> {
    assert!(
        (1..=MAX_TERRAIN_DETAIL).contains(&detail),
        "terrain detail must be in 1..={MAX_TERRAIN_DETAIL}, got {detail}"
    );

    let points = 1usize << detail;
    let mut heights = vec![0.0; points + 1];
    heights[0] = rng.random::<f64>();
    heights[points] = rng.random::<f64>();

    let mut size = points / 2;
    while size >= 1 {
        let scale = size as f64 / points as f64;
        for i in (size..points).step_by(2 * size) {
            let average = (heights[i - size] + heights[i + size]) / 2.0;
            let jitter = rng.random_range(-1.0_f64..1.0) * scale;
            heights[i] = (average + jitter).max(0.0);
        }
        size /= 2;
    }

    heights
}

/// Immutable terrain heightmap plus its placement in the viewport.
///
/// Only [`Terrain::generate`] builds one, so there are always at least
/// three samples.
#[derive(Debug, Clone, Serialize)]
pub struct Terrain {
    heights: Vec<f64>,
    band_base: f64,
    band_relief: f64,
}

impl Terrain {
    /// Generate a fresh heightmap and place it in the band
    /// `band_base + band_relief * h` (fractions of the viewport height).
    pub fn generate<R: Rng>(
        detail: u32,
        band_base: f64,
        band_relief: f64,
        rng: &mut R,
    ) -> Self {
        Self {
            heights: generate_trend(detail, rng),
            band_base,
            band_relief,
        }
    }

    /// Raw heights as generated
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Sand surface for sample `i` as a fraction of viewport height
    #[inline]
    pub fn display_height(&self, i: usize) -> f64 {
        self.band_base + self.band_relief * self.heights[i]
    }

    /// Sand surface polyline in logical screen coordinates, left to right
    pub fn silhouette(&self, width: f64, height: f64) -> Vec<DVec2> {
        let last = (self.heights.len() - 1) as f64;
        (0..self.heights.len())
            .map(|i| DVec2::new(width * i as f64 / last, self.display_height(i) * height))
            .collect()
    }
}
