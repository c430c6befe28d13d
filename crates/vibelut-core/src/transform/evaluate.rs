//! Core transform evaluation — applies the full grading chain to a single pixel.

use crate::color_management::idt::apply_input_transform;
use crate::grading::rolloff::rolloff;
use crate::grading::skin::apply_skin_protection;
use crate::grading::sliders::{apply_contrast, apply_saturation, apply_temperature_tint};
use crate::grading::wheels::apply_cdl;
use crate::transform::params::{ColorParams, PipelineConfig};

/// The core function. The LUT baker, the full-buffer pass and the
/// coordinator all call this exactly.
///
/// Applies the complete grading transform chain to a single RGB sample:
/// 1. Input device transform
/// 2. White balance (`params.balance`)
/// 3. Snapshot the balanced sample as the skin-protection base
/// 4. CDL slope, offset and power
/// 5. Temperature / tint
/// 6. Contrast with pivot
/// 7. Saturation
/// 8. Skin protection blend toward the base
/// 9. Safe-range rolloff (when enabled)
/// 10. Clamp to `[0, 1]`
pub fn grade(rgb: [f32; 3], params: &ColorParams, config: &PipelineConfig) -> [f32; 3] {
    let idt = apply_input_transform(rgb, config.input_color_space);
    let balance = params.balance.to_array();
    let base: [f32; 3] = std::array::from_fn(|c| idt[c] * balance[c]);

    let mut out = apply_cdl(base, params.lift, params.gamma, params.gain);
    out = apply_temperature_tint(out, params.temperature, params.tint);
    out = apply_contrast(out, params.contrast, params.contrast_pivot);
    out = apply_saturation(out, params.saturation);
    out = apply_skin_protection(out, base, params.skin_protect);

    if config.safe_range {
        out = out.map(rolloff);
    }
    out.map(clamp_unit)
}

/// Clamp to `[0, 1]`. NaN and negative zero map to `0.0`.
fn clamp_unit(v: f32) -> f32 {
    if v > 0.0 { v.min(1.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::params::{InputColorSpace, Rgb};

    const EPSILON: f32 = 1e-5;

    fn no_rolloff() -> PipelineConfig {
        PipelineConfig {
            input_color_space: InputColorSpace::Rec709,
            safe_range: false,
        }
    }

    fn assert_rgb_eq(a: [f32; 3], b: [f32; 3], tol: f32) {
        for c in 0..3 {
            assert!((a[c] - b[c]).abs() < tol, "channel {c}: {:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_identity_params_produce_identity() {
        let params = ColorParams::default();
        let config = no_rolloff();
        for r in 0..=10 {
            for g in 0..=10 {
                for b in 0..=10 {
                    let input = [r as f32 / 10.0, g as f32 / 10.0, b as f32 / 10.0];
                    assert_rgb_eq(grade(input, &params, &config), input, EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_mid_grey_is_exact() {
        let out = grade([0.5, 0.5, 0.5], &ColorParams::default(), &no_rolloff());
        assert_eq!(out, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_safe_range_compresses_highlights() {
        let out = grade([1.0, 0.9, 0.9], &ColorParams::default(), &PipelineConfig::default());
        assert!((out[0] - 0.857_142_9).abs() < EPSILON);
        // 0.8 + (0.1 / 0.6) * 0.2
        assert!((out[1] - 0.833_333_3).abs() < EPSILON);
        assert!(out.iter().all(|&v| v < 1.0));
    }

    #[test]
    fn test_gain_then_lift_order() {
        let params = ColorParams {
            gain: Rgb::splat(2.0),
            lift: Rgb::splat(0.1),
            ..ColorParams::default()
        };
        let out = grade([0.2, 0.2, 0.2], &params, &no_rolloff());
        // 0.2 * 2 + 0.1, not (0.2 + 0.1) * 2
        assert_rgb_eq(out, [0.5, 0.5, 0.5], EPSILON);
    }

    #[test]
    fn test_balance_applies_before_grade() {
        let params = ColorParams {
            balance: Rgb::new(0.5, 1.0, 1.0),
            ..ColorParams::default()
        };
        let out = grade([0.8, 0.4, 0.4], &params, &no_rolloff());
        assert_rgb_eq(out, [0.4, 0.4, 0.4], EPSILON);
    }

    #[test]
    fn test_output_always_clamped() {
        let params = ColorParams {
            gain: Rgb::splat(2.0),
            lift: Rgb::splat(-0.2),
            gamma: Rgb::splat(0.0),
            saturation: 2.0,
            contrast: 1.5,
            temperature: 1.0,
            ..ColorParams::default()
        };
        for space in InputColorSpace::all() {
            let config = PipelineConfig {
                input_color_space: *space,
                safe_range: false,
            };
            for v in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let out = grade([v, 1.0 - v, v * 0.5], &params, &config);
                assert!(out.iter().all(|c| (0.0..=1.0).contains(c)), "{out:?}");
            }
        }
    }

    #[test]
    fn test_nan_input_clamps_to_zero() {
        let out = grade([f32::NAN, 0.5, 0.5], &ColorParams::default(), &no_rolloff());
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn test_skin_protect_pulls_toward_base() {
        let skin = [0.7, 0.55, 0.2];
        let graded = ColorParams {
            saturation: 0.0,
            ..ColorParams::default()
        };
        let protected = ColorParams {
            skin_protect: 1.0,
            ..graded.clone()
        };
        let config = no_rolloff();
        let desaturated = grade(skin, &graded, &config);
        let kept = grade(skin, &protected, &config);
        assert!((desaturated[0] - desaturated[2]).abs() < EPSILON);
        assert_rgb_eq(kept, skin, EPSILON);
    }
}
