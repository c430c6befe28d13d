//! Skin-tone protection.
//!
//! A hue heuristic picks out warm, moderately saturated samples and pulls
//! them back toward their pre-grade value so creative looks don't turn
//! faces green or grey.
//!
//! # Algorithm
//! 1. Require `R > G > B`, `R − B ≥ 0.05` and `R ≥ 0.15`
//! 2. Hue proxy `h = (G − B) / (R − B)`
//! 3. Cosine falloff around `h = 0.70` with half-width `0.20`
//!
//! The constants are empirically tuned and kept as-is.

use std::f32::consts::PI;

const HUE_TARGET: f32 = 0.70;
const HUE_RANGE: f32 = 0.20;
const MIN_CHROMA: f32 = 0.05;
const MIN_RED: f32 = 0.15;

/// How skin-like `base` is, in `[0, 1]`.
///
/// Returns exactly 0 for non-warm orderings, low chroma and near-black.
pub fn skin_weight(base: [f32; 3]) -> f32 {
    let [r, g, b] = base;
    if r <= g || g <= b {
        return 0.0;
    }
    let chroma = r - b;
    if chroma < MIN_CHROMA || r < MIN_RED {
        return 0.0;
    }

    let hue = (g - b) / chroma;
    let dist = (hue - HUE_TARGET).abs();
    if dist > HUE_RANGE {
        return 0.0;
    }

    0.5 * (1.0 + (dist / HUE_RANGE * PI).cos())
}

/// Blend `graded` back toward `base` by `skin_weight(base) × strength`.
pub fn apply_skin_protection(graded: [f32; 3], base: [f32; 3], strength: f32) -> [f32; 3] {
    if strength <= 0.0 {
        return graded;
    }
    let mix = skin_weight(base) * strength;
    if mix <= 0.0 {
        return graded;
    }
    std::array::from_fn(|c| graded[c] * (1.0 - mix) + base[c] * mix)
}
