//! End-to-end properties of the grading pipeline, exercised through the
//! public API only.

use vibelut_core::grading::rolloff::{ROLLOFF_KNEE, rolloff};
use vibelut_core::grading::skin::skin_weight;
use vibelut_core::{
    ColorParams, InputColorSpace, Lut3D, PipelineConfig, PixelBuffer, Rgb, Rgba8, bake_lut,
    estimate_balance, grade, render,
};

const EPSILON: f32 = 1e-5;

fn native(safe_range: bool) -> PipelineConfig {
    PipelineConfig {
        input_color_space: InputColorSpace::Rec709,
        safe_range,
    }
}

fn identity_with_pivot(pivot: f32) -> ColorParams {
    ColorParams {
        contrast_pivot: pivot,
        ..ColorParams::default()
    }
}

#[test]
fn identity_grade_reproduces_unit_cube() {
    let config = native(false);
    for pivot in [0.0, 0.18, 0.435, 1.0] {
        let params = identity_with_pivot(pivot);
        for r in 0..=16 {
            for g in 0..=16 {
                for b in 0..=16 {
                    let input = [r as f32 / 16.0, g as f32 / 16.0, b as f32 / 16.0];
                    let out = grade(input, &params, &config);
                    for c in 0..3 {
                        assert!((out[c] - input[c]).abs() < EPSILON, "{input:?} -> {out:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn mid_grey_passes_through_exactly() {
    let out = grade([0.5, 0.5, 0.5], &ColorParams::default(), &native(false));
    assert_eq!(out, [0.5, 0.5, 0.5]);
}

#[test]
fn safe_range_highlight_scenario() {
    let out = grade([1.0, 0.9, 0.9], &ColorParams::default(), &native(true));
    let expected_r = 0.8 + (0.2 / 0.7) * 0.2;
    assert!((out[0] - expected_r).abs() < EPSILON);
    assert!((out[1] - rolloff(0.9)).abs() < EPSILON);
    assert!(out.iter().all(|&v| v < 1.0));
}

#[test]
fn rolloff_is_monotonic_and_bounded() {
    let samples: Vec<f32> = (0..2000).map(|i| ROLLOFF_KNEE + i as f32 * 0.005).collect();
    for pair in samples.windows(2) {
        assert!(rolloff(pair[0]) < rolloff(pair[1]), "at {}", pair[0]);
    }
    for x in [-1e6, -1.0, 0.0, 0.5, 0.8, 1.0, 5.0, 50.0, 1e7, 1e20, f32::MAX] {
        assert!(rolloff(x) < 1.0, "rolloff({x}) = {}", rolloff(x));
    }
}

#[test]
fn uniform_buffer_balance_is_neutral() {
    for space in InputColorSpace::all() {
        let config = PipelineConfig {
            input_color_space: *space,
            safe_range: true,
        };
        let buf = PixelBuffer::filled(6, 4, Rgba8::new(140, 140, 140, 255));
        let balance = estimate_balance(&buf, &config);
        for c in balance.to_array() {
            // gamut matrix rows sum to 1, so grey stays grey up to rounding
            assert!((c - 1.0).abs() < 1e-4, "{space:?}: {balance:?}");
        }
    }
}

#[test]
fn skin_weight_gates_and_bounds() {
    let step = 1.0 / 24.0;
    for ri in 0..=24 {
        for gi in 0..=24 {
            for bi in 0..=24 {
                let (r, g, b) = (ri as f32 * step, gi as f32 * step, bi as f32 * step);
                let w = skin_weight([r, g, b]);
                if r <= g || g <= b || r - b < 0.05 || r < 0.15 {
                    assert_eq!(w, 0.0, "({r}, {g}, {b})");
                } else {
                    assert!((0.0..=1.0).contains(&w));
                }
            }
        }
    }
}

#[test]
fn baked_lut_has_exact_layout() {
    let params = ColorParams {
        lift: Rgb::splat(0.05),
        saturation: 1.6,
        contrast: 1.3,
        ..ColorParams::default()
    };
    let text = bake_lut(&params, &native(true));
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("TITLE "));
    assert!(lines[1].starts_with("LUT_3D_SIZE 33"));
    assert!(lines[2].is_empty());

    let data = &lines[3..];
    assert_eq!(data.len(), 35_937);
    for line in data {
        let values: Vec<f32> = line.split(' ').map(|v| v.parse().unwrap()).collect();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)), "{line}");
    }

    let parsed = vibelut_core::transform::lut::parse_cube(text.as_bytes()).unwrap();
    assert_eq!(parsed.size, 33);
}

#[test]
fn grey_buffer_histograms_count_every_pixel() {
    let src = PixelBuffer::filled(2, 2, Rgba8::new(128, 128, 128, 255));
    let looks = [
        ColorParams::default(),
        ColorParams {
            gain: Rgb::new(1.4, 0.8, 1.1),
            temperature: 0.7,
            saturation: 1.9,
            skin_protect: 0.5,
            ..ColorParams::default()
        },
    ];
    for params in &looks {
        for space in InputColorSpace::all() {
            for safe_range in [false, true] {
                let config = PipelineConfig {
                    input_color_space: *space,
                    safe_range,
                };
                let out = render(&src, params, &config);
                for c in 0..4 {
                    assert_eq!(out.scopes.histogram.total(c), 4);
                }
                assert_eq!(out.image.pixel_count(), 4);
            }
        }
    }
}

#[test]
fn render_matches_lut_at_grid_nodes() {
    // 8-bit values 0 and 255 land exactly on LUT nodes.
    let params = ColorParams {
        gamma: Rgb::new(0.8, 1.0, 1.3),
        tint: -0.2,
        ..ColorParams::default()
    };
    let config = native(true);
    let lut = Lut3D::bake(&params, &config);
    let src = PixelBuffer::from_pixels(
        2,
        2,
        vec![
            Rgba8::new(0, 0, 0, 255),
            Rgba8::new(255, 0, 0, 255),
            Rgba8::new(0, 255, 255, 255),
            Rgba8::new(255, 255, 255, 255),
        ],
    )
    .unwrap();
    let out = render(&src, &params, &config);
    for (px, graded) in src.pixels().iter().zip(out.image.pixels()) {
        let via_lut = lut.apply(px.to_unit_rgb());
        let expected = via_lut.map(vibelut_core::image::quantize);
        assert_eq!([graded.r, graded.g, graded.b], expected);
    }
}
