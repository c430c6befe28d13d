//! Scope computation — histogram and vectorscope.
//!
//! Scopes are accumulated alongside a full-buffer grading pass rather than
//! recomputed from the output afterwards; see [`ScopeAccumulator`].

pub mod histogram;
pub mod vectorscope;

use serde::{Deserialize, Serialize};

pub use histogram::HistogramData;
pub use vectorscope::VectorscopeData;

use vectorscope::SAMPLE_STRIDE;

/// Scope results of one grading pass. Immutable once the pass completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeData {
    pub histogram: HistogramData,
    pub vectorscope: VectorscopeData,
}

impl ScopeData {
    /// Largest histogram bin across all four channels.
    pub fn peak(&self) -> u32 {
        self.histogram.peak()
    }

    pub fn vectorscope_total(&self) -> u64 {
        self.vectorscope.total()
    }
}

/// Per-pass scope accumulator.
///
/// Feed every graded pixel in buffer order. Histograms see every pixel;
/// the vectorscope sees pixels whose index is a multiple of 5.
#[derive(Debug, Default)]
pub struct ScopeAccumulator {
    data: ScopeData,
    pixel_index: usize,
}

impl ScopeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one graded pixel: the clamped float sample and its quantized
    /// 8-bit output.
    pub fn record(&mut self, graded: [f32; 3], quantized: [u8; 3]) {
        self.data.histogram.record(quantized);
        if self.pixel_index % SAMPLE_STRIDE == 0 {
            self.data.vectorscope.plot(graded);
        }
        self.pixel_index += 1;
    }

    pub fn finish(self) -> ScopeData {
        self.data
    }
}
