//! Full-buffer grading pass with scope accumulation.

use std::time::Instant;

use crate::image::{PixelBuffer, Rgba8, quantize};
use crate::scopes::{ScopeAccumulator, ScopeData};
use crate::transform::evaluate::grade;
use crate::transform::params::{ColorParams, PipelineConfig};

/// Result of one full-buffer pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Graded pixels, same dimensions as the source. Alpha is preserved.
    pub image: PixelBuffer,
    pub scopes: ScopeData,
}

/// Grade every pixel of `source` and accumulate scopes from the output.
///
/// The source is only read; a fresh output buffer is allocated.
pub fn render(source: &PixelBuffer, params: &ColorParams, config: &PipelineConfig) -> RenderOutput {
    let start = Instant::now();
    let mut scopes = ScopeAccumulator::new();

    let image = source.map_pixels(|px| {
        let graded = grade(px.to_unit_rgb(), params, config);
        let out = graded.map(quantize);
        scopes.record(graded, out);
        Rgba8::new(out[0], out[1], out[2], px.a)
    });

    tracing::debug!(
        "graded {}x{} in {:.1} ms",
        source.width(),
        source.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    RenderOutput {
        image,
        scopes: scopes.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::params::Rgb;

    #[test]
    fn test_identity_render_reproduces_source() {
        let pixels = (0..64u8)
            .map(|i| Rgba8::new(i * 4, 255 - i * 4, i, 200))
            .collect();
        let src = PixelBuffer::from_pixels(8, 8, pixels).unwrap();
        let config = PipelineConfig {
            safe_range: false,
            ..PipelineConfig::default()
        };
        let out = render(&src, &ColorParams::default(), &config);
        assert_eq!(out.image, src);
    }

    #[test]
    fn test_alpha_is_preserved() {
        let src = PixelBuffer::filled(2, 2, Rgba8::new(100, 150, 200, 17));
        let params = ColorParams {
            gain: Rgb::splat(1.5),
            ..ColorParams::default()
        };
        let out = render(&src, &params, &PipelineConfig::default());
        assert!(out.image.pixels().iter().all(|p| p.a == 17));
        assert_ne!(out.image, src);
    }

    #[test]
    fn test_scopes_cover_every_pixel() {
        let src = PixelBuffer::filled(4, 5, Rgba8::new(30, 60, 90, 255));
        let out = render(&src, &ColorParams::default(), &PipelineConfig::default());
        for c in 0..4 {
            assert_eq!(out.scopes.histogram.total(c), 20);
        }
        // indices 0, 5, 10, 15
        assert_eq!(out.scopes.vectorscope_total(), 4);
    }
}
