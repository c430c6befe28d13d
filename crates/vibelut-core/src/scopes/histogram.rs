//! RGB + luminance histogram accumulation.

use serde::{Deserialize, Serialize};

use crate::grading::sliders::LUMA_REC709;

/// Number of bins per channel (one per 8-bit code value).
pub const HISTOGRAM_BINS: usize = 256;

/// Histogram data for R, G, B, and luminance channels (256 bins each).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramData {
    /// Bin counts for `[R, G, B, Luma]` channels. Each `Vec` has 256 entries.
    pub bins: [Vec<u32>; 4],
}

impl Default for HistogramData {
    fn default() -> Self {
        Self::new()
    }
}

impl HistogramData {
    pub fn new() -> Self {
        Self {
            bins: std::array::from_fn(|_| vec![0; HISTOGRAM_BINS]),
        }
    }

    /// Count one quantized output pixel.
    ///
    /// Luma is derived from the 8-bit values with Rec. 709 weights, rounded
    /// and capped at 255.
    pub fn record(&mut self, rgb: [u8; 3]) {
        for (c, &v) in rgb.iter().enumerate() {
            self.bins[c][v as usize] += 1;
        }
        let luma = rgb[0] as f32 * LUMA_REC709[0]
            + rgb[1] as f32 * LUMA_REC709[1]
            + rgb[2] as f32 * LUMA_REC709[2];
        let bin = (luma.round() as usize).min(HISTOGRAM_BINS - 1);
        self.bins[3][bin] += 1;
    }

    /// Peak bin value across all channels (for normalization).
    pub fn peak(&self) -> u32 {
        self.bins
            .iter()
            .flat_map(|channel| channel.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Sum of all bins of one channel (0 = R … 3 = Luma).
    pub fn total(&self, channel: usize) -> u64 {
        self.bins[channel].iter().map(|&n| n as u64).sum()
    }
}
