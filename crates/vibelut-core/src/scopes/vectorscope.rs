//! Vectorscope (chromaticity) scope accumulation.
//!
//! Plots color saturation and hue by projecting each sampled pixel's
//! chrominance onto a 2D grid using Cb/Cr (blue-difference and
//! red-difference chroma) axes. Neutral colors land at the center.

use serde::{Deserialize, Serialize};

use crate::grading::sliders::luma;

/// Vectorscope grid resolution.
pub const VECTORSCOPE_RESOLUTION: u32 = 256;

/// Grid cells per unit of chroma.
const SCALE: f32 = 224.0;

/// Only every Nth pixel is plotted.
pub const SAMPLE_STRIDE: usize = 5;

/// Vectorscope data — a chroma-distribution heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorscopeData {
    /// Resolution of the square vectorscope grid.
    pub resolution: u32,
    /// Density values for each grid cell, row-major. Length = resolution².
    pub density: Vec<u32>,
}

impl Default for VectorscopeData {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorscopeData {
    pub fn new() -> Self {
        let cells = (VECTORSCOPE_RESOLUTION * VECTORSCOPE_RESOLUTION) as usize;
        Self {
            resolution: VECTORSCOPE_RESOLUTION,
            density: vec![0; cells],
        }
    }

    /// Plot one graded sample.
    ///
    /// ```text
    /// Cb = (B − Y) / 1.772
    /// Cr = (R − Y) / 1.402
    /// x  = 128 + Cb × 224
    /// y  = 128 − Cr × 224
    /// ```
    ///
    /// Out-of-grid samples are dropped; saturated colors can legitimately
    /// fall outside the displayed range.
    pub fn plot(&mut self, rgb: [f32; 3]) {
        let y = luma(rgb);
        let cb = (rgb[2] - y) / 1.772;
        let cr = (rgb[0] - y) / 1.402;

        let center = (self.resolution / 2) as f32;
        let x = (center + cb * SCALE).floor();
        let y = (center - cr * SCALE).floor();

        let res = self.resolution as f32;
        if !(0.0..res).contains(&x) || !(0.0..res).contains(&y) {
            return;
        }
        let idx = y as usize * self.resolution as usize + x as usize;
        self.density[idx] += 1;
    }

    pub fn total(&self) -> u64 {
        self.density.iter().map(|&n| n as u64).sum()
    }

    /// Density at grid cell `(x, y)`.
    pub fn at(&self, x: u32, y: u32) -> u32 {
        self.density[(y * self.resolution + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_lands_at_center() {
        let mut vs = VectorscopeData::new();
        vs.plot([0.5, 0.5, 0.5]);
        vs.plot([0.0, 0.0, 0.0]);
        vs.plot([1.0, 1.0, 1.0]);
        assert_eq!(vs.at(128, 128), 3);
        assert_eq!(vs.total(), 3);
    }

    #[test]
    fn test_red_plots_upward() {
        let mut vs = VectorscopeData::new();
        vs.plot([1.0, 0.0, 0.0]);
        // Y = 0.2126, Cb ≈ -0.12, Cr ≈ 0.5619
        let cb = (0.0 - 0.2126) / 1.772;
        let cr = (1.0 - 0.2126) / 1.402;
        let x = (128.0_f32 + cb * 224.0).floor() as u32;
        let y = (128.0_f32 - cr * 224.0).floor() as u32;
        assert_eq!(vs.at(x, y), 1);
        assert!(y < 128 && x < 128);
    }

    #[test]
    fn test_out_of_range_is_dropped() {
        let mut vs = VectorscopeData::new();
        vs.plot([-2.0, 0.0, 4.0]);
        assert_eq!(vs.total(), 0);
    }

    #[test]
    fn test_grid_dimensions() {
        let vs = VectorscopeData::new();
        assert_eq!(vs.resolution, 256);
        assert_eq!(vs.density.len(), 256 * 256);
    }
}
