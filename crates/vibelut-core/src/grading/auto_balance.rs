//! Automatic white balance.
//!
//! Uses the grey-world assumption: the average color of a natural scene
//! should be neutral grey. The estimator runs on the untouched source buffer
//! after the input transform only, so flat log footage is judged in the
//! same space the creative operators see.

use crate::color_management::idt::apply_input_transform;
use crate::image::PixelBuffer;
use crate::transform::params::{PipelineConfig, Rgb};

/// Stand-in for a channel average of zero (or an empty buffer).
const MIN_AVERAGE: f64 = 0.001;

/// Estimate per-channel multipliers that neutralize the image average.
///
/// The result becomes `ColorParams::balance`. An already-neutral image
/// returns `{1, 1, 1}`.
///
/// # Algorithm
/// 1. Decode every pixel through the input transform (no grading)
/// 2. Compute mean R, G, B
/// 3. `global = (avg_r + avg_g + avg_b) / 3`
/// 4. Return `global / avg_c` per channel
pub fn estimate_balance(source: &PixelBuffer, config: &PipelineConfig) -> Rgb {
    let mut sum = [0.0_f64; 3];
    for px in source.pixels() {
        let rgb = apply_input_transform(px.to_unit_rgb(), config.input_color_space);
        for c in 0..3 {
            sum[c] += rgb[c] as f64;
        }
    }

    let count = source.pixel_count() as f64;
    let avg = sum.map(|s| {
        let mean = s / count;
        if mean == 0.0 || !mean.is_finite() {
            MIN_AVERAGE
        } else {
            mean
        }
    });

    let global = (avg[0] + avg[1] + avg[2]) / 3.0;
    let balance = Rgb::new(
        (global / avg[0]) as f32,
        (global / avg[1]) as f32,
        (global / avg[2]) as f32,
    );

    tracing::debug!(
        "grey-world balance over {} px ({}): {:?}",
        source.pixel_count(),
        config.input_color_space.label(),
        balance
    );
    balance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rgba8;
    use crate::transform::params::InputColorSpace;

    const EPSILON: f32 = 1e-5;

    fn make_uniform_buffer(r: u8, g: u8, b: u8, size: u32) -> PixelBuffer {
        PixelBuffer::filled(size, size, Rgba8::new(r, g, b, 255))
    }

    #[test]
    fn test_uniform_grey_buffer_is_neutral() {
        let buf = make_uniform_buffer(128, 128, 128, 10);
        let balance = estimate_balance(&buf, &PipelineConfig::default());
        for c in balance.to_array() {
            assert!((c - 1.0).abs() < EPSILON, "{balance:?}");
        }
    }

    #[test]
    fn test_uniform_colored_buffer_equalizes_channel_means() {
        let buf = make_uniform_buffer(180, 120, 60, 4);
        let balance = estimate_balance(&buf, &PipelineConfig::default());
        let px = buf.pixels()[0].to_unit_rgb();
        let corrected = [px[0] * balance.r, px[1] * balance.g, px[2] * balance.b];
        assert!((corrected[0] - corrected[1]).abs() < EPSILON);
        assert!((corrected[1] - corrected[2]).abs() < EPSILON);
        assert!(balance.r < 1.0 && balance.b > 1.0, "warm image is cooled: {balance:?}");
    }

    #[test]
    fn test_empty_buffer_returns_identity() {
        let buf = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        let balance = estimate_balance(&buf, &PipelineConfig::default());
        assert_eq!(balance, Rgb::ONE);
    }

    #[test]
    fn test_black_channel_uses_epsilon_average() {
        // Blue averages to zero and is replaced by 0.001.
        let buf = make_uniform_buffer(255, 255, 0, 2);
        let balance = estimate_balance(&buf, &PipelineConfig::default());
        let global = (1.0 + 1.0 + 0.001) / 3.0;
        assert!((balance.b - (global / 0.001) as f32).abs() < 0.01);
        assert!(balance.b.is_finite());
    }

    #[test]
    fn test_estimate_runs_through_input_transform() {
        let buf = make_uniform_buffer(200, 110, 90, 3);
        let rec709 = estimate_balance(&buf, &PipelineConfig::default());
        let slog = estimate_balance(
            &buf,
            &PipelineConfig {
                input_color_space: InputColorSpace::SonySLog3,
                safe_range: true,
            },
        );
        assert_ne!(rec709, slog);
    }
}
